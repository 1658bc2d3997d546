use serde::Deserialize;

use crate::error::Result;

/// Decoded view of a `project.toml` manifest.
///
/// The same file backs two views: the solution loader reads `name`,
/// `targets` and `dependencies` to build the dependency graph, while
/// [crate::project::VersionedProject] reads and rewrites `version`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectManifest {
    pub name: String,

    /// Absent means the project is not under version management
    #[serde(default)]
    pub version: Option<String>,

    /// A project with several targets appears in the graph once per target,
    /// all entries sharing this one file
    #[serde(default)]
    pub targets: Vec<String>,

    /// Names of sibling projects in the same solution
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl ProjectManifest {
    /// Parse manifest TOML
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: ProjectManifest = toml::from_str(content)?;
        Ok(manifest)
    }
}
