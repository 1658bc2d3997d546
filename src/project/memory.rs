use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{ProjectAdapter, SharedProject, VersionedProject};
use crate::error::{ProjectBumpError, Result};
use crate::solution::ProjectNode;

/// In-memory project adapter for testing without touching the filesystem.
///
/// Projects are registered up front by path; `save_project` records every
/// save so tests can assert a shared file is written exactly once per phase.
#[derive(Debug, Default)]
pub struct InMemoryProjectAdapter {
    projects: HashMap<PathBuf, SharedProject>,
    saved: Vec<PathBuf>,
}

impl InMemoryProjectAdapter {
    pub fn new() -> Self {
        InMemoryProjectAdapter {
            projects: HashMap::new(),
            saved: Vec::new(),
        }
    }

    /// Register a project and return the shared handle, so the caller can
    /// inspect mutations later
    pub fn insert(&mut self, project: VersionedProject) -> SharedProject {
        let path = project.path().to_path_buf();
        let shared = Rc::new(RefCell::new(project));
        self.projects.insert(path, Rc::clone(&shared));
        shared
    }

    /// Register a project from manifest TOML
    pub fn insert_toml(&mut self, path: impl Into<PathBuf>, content: &str) -> Result<SharedProject> {
        let project = VersionedProject::parse(path, content)?;
        Ok(self.insert(project))
    }

    /// Paths passed to `save_project`, in order
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }

    /// How often the given file was saved
    pub fn save_count(&self, path: &Path) -> usize {
        self.saved.iter().filter(|p| p.as_path() == path).count()
    }
}

impl ProjectAdapter for InMemoryProjectAdapter {
    fn load_project(&mut self, node: &ProjectNode) -> Result<SharedProject> {
        self.projects
            .get(&node.path)
            .map(Rc::clone)
            .ok_or_else(|| {
                ProjectBumpError::project(format!(
                    "No project registered for '{}'",
                    node.path.display()
                ))
            })
    }

    fn save_project(&mut self, project: &VersionedProject) -> Result<()> {
        self.saved.push(project.path().to_path_buf());
        Ok(())
    }
}
