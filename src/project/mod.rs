//! Project persistence - reading and writing a project's version property
//!
//! The update engine never touches the filesystem itself; it borrows
//! [VersionedProject] instances through the [ProjectAdapter] trait. The
//! concrete implementations are:
//!
//! - [fs::FsProjectAdapter]: reads and writes real project files
//! - [memory::InMemoryProjectAdapter]: test double with a save log
//!
//! An adapter caches by file path and hands out shared instances, so all
//! graph nodes of a multi-targeted project see the same underlying project
//! and it is written at most once per operation.

pub mod fs;
pub mod manifest;
pub mod memory;

pub use fs::FsProjectAdapter;
pub use manifest::ProjectManifest;
pub use memory::InMemoryProjectAdapter;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use regex::Regex;
use semver::Version;

use crate::domain::parse_version;
use crate::error::Result;
use crate::solution::ProjectNode;

/// A versioned project shared between all graph nodes backed by one file
pub type SharedProject = Rc<RefCell<VersionedProject>>;

/// The externally-owned mutable resource holding one persisted version per
/// project file.
///
/// Keeps the raw file content so that saving preserves formatting and
/// comments; only the `version` entry is spliced.
#[derive(Debug, Clone)]
pub struct VersionedProject {
    name: String,
    path: PathBuf,
    content: String,
    version: Option<Version>,
}

impl VersionedProject {
    /// Decode a project file. An invalid version string is an immediate
    /// format error, never coerced; an absent version means the project is
    /// not under version management.
    pub fn parse(path: impl Into<PathBuf>, content: impl Into<String>) -> Result<Self> {
        let content = content.into();
        let manifest = ProjectManifest::parse(&content)?;
        let version = manifest.version.as_deref().map(parse_version).transpose()?;

        Ok(VersionedProject {
            name: manifest.name,
            path: path.into(),
            content,
            version,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    pub fn set_version(&mut self, version: Version) {
        self.version = Some(version);
    }

    /// Set the version from text; fails if the text is not a semantic version
    pub fn set_version_str(&mut self, version: &str) -> Result<()> {
        self.version = Some(parse_version(version)?);
        Ok(())
    }

    /// The file content with the current version spliced in.
    ///
    /// The original formatting survives: only the `version` value changes.
    /// A project that had no `version` entry gets one after its `name` line.
    pub fn render(&self) -> String {
        let version = match &self.version {
            Some(version) => version,
            None => return self.content.clone(),
        };

        if let Ok(re) = Regex::new(r#"(?m)^(\s*version\s*=\s*")[^"]*(")"#) {
            if re.is_match(&self.content) {
                let replacement = format!("${{1}}{}${{2}}", version);
                return re.replace(&self.content, replacement.as_str()).into_owned();
            }
        }

        if let Ok(re) = Regex::new(r"(?m)^\s*name\s*=.*$") {
            if let Some(found) = re.find(&self.content) {
                let mut out = String::with_capacity(self.content.len() + 32);
                out.push_str(&self.content[..found.end()]);
                out.push_str(&format!("\nversion = \"{}\"", version));
                out.push_str(&self.content[found.end()..]);
                return out;
            }
        }

        format!("version = \"{}\"\n{}", version, self.content)
    }
}

/// Owns load/save/caching of versioned projects.
///
/// `load_project` must return the same shared instance for every node backed
/// by one file within a session.
pub trait ProjectAdapter {
    fn load_project(&mut self, node: &ProjectNode) -> Result<SharedProject>;

    /// Batch load, deduplicated: each underlying project appears once even
    /// when several nodes map to it
    fn load_projects(&mut self, nodes: &[&ProjectNode]) -> Result<Vec<SharedProject>> {
        let mut projects: Vec<SharedProject> = Vec::new();
        for node in nodes {
            let project = self.load_project(node)?;
            if !projects.iter().any(|p| Rc::ptr_eq(p, &project)) {
                projects.push(project);
            }
        }
        Ok(projects)
    }

    fn save_project(&mut self, project: &VersionedProject) -> Result<()>;
}
