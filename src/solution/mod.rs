//! Solution model - the set of projects an update operates over
//!
//! A solution is described by a `solution.toml` file listing the member
//! project manifests. Each manifest expands into one graph node per target,
//! so a multi-targeted project appears e.g. as `core(stable)` and
//! `core(nightly)`, both backed by the same file.

pub mod discover;
pub mod graph;

pub use discover::{find_containing_solution, SOLUTION_FILE_NAME};
pub use graph::{DependencyGraph, DependencyLookup};

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ProjectBumpError, Result};
use crate::project::manifest::ProjectManifest;

/// Stable identity of one project node in the dependency graph.
///
/// Distinct from the file path: a multi-targeted project file corresponds to
/// several nodes, one per target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(name: &str, target: Option<&str>) -> Self {
        match target {
            Some(target) => ProjectId(format!("{}({})", name, target)),
            None => ProjectId(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One project node: identity, backing file, and direct dependency names
#[derive(Debug, Clone)]
pub struct ProjectNode {
    pub id: ProjectId,
    pub name: String,
    pub target: Option<String>,
    pub path: PathBuf,
    pub dependencies: Vec<String>,
}

impl ProjectNode {
    pub fn new(
        name: impl Into<String>,
        target: Option<&str>,
        path: impl Into<PathBuf>,
        dependencies: Vec<String>,
    ) -> Self {
        let name = name.into();
        ProjectNode {
            id: ProjectId::new(&name, target),
            name,
            target: target.map(|t| t.to_string()),
            path: path.into(),
            dependencies,
        }
    }
}

/// On-disk shape of `solution.toml`
#[derive(Debug, Deserialize)]
struct SolutionFile {
    projects: Vec<String>,
}

/// A loaded solution: the project nodes behind a `solution.toml`
#[derive(Debug)]
pub struct Solution {
    path: PathBuf,
    projects: Vec<ProjectNode>,
}

impl Solution {
    /// Load a solution from its `solution.toml` file.
    ///
    /// Fails if a listed project file is missing or unparsable, or if two
    /// projects share a name.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ProjectBumpError::solution(format!(
                "Cannot read solution file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let solution_file: SolutionFile = toml::from_str(&content)?;

        let root = path.parent().unwrap_or_else(|| Path::new("."));

        let mut seen_names = HashSet::new();
        let mut projects = Vec::new();
        for entry in &solution_file.projects {
            let project_path = fs::canonicalize(root.join(entry)).map_err(|e| {
                ProjectBumpError::solution(format!(
                    "Solution '{}' references missing project file '{}': {}",
                    path.display(),
                    entry,
                    e
                ))
            })?;

            let manifest_content = fs::read_to_string(&project_path)?;
            let manifest = ProjectManifest::parse(&manifest_content)?;

            if !seen_names.insert(manifest.name.clone()) {
                return Err(ProjectBumpError::solution(format!(
                    "Duplicate project name '{}' in solution '{}'",
                    manifest.name,
                    path.display()
                )));
            }

            projects.extend(expand_nodes(&manifest, &project_path));
        }

        Ok(Solution {
            path: path.to_path_buf(),
            projects,
        })
    }

    /// Build a solution from already-constructed nodes (used by tests and
    /// in-memory setups)
    pub fn new(path: impl Into<PathBuf>, projects: Vec<ProjectNode>) -> Self {
        Solution {
            path: path.into(),
            projects,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn projects(&self) -> &[ProjectNode] {
        &self.projects
    }

    /// Look up a node by identity
    pub fn project(&self, id: &ProjectId) -> Option<&ProjectNode> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// All nodes backed by the given project file.
    /// A multi-targeted file yields several nodes.
    pub fn projects_at_path(&self, path: &Path) -> Vec<&ProjectNode> {
        self.projects.iter().filter(|p| p.path == path).collect()
    }

    /// Build the dependency graph for this solution
    pub fn dependency_graph(&self) -> Result<DependencyGraph> {
        DependencyGraph::from_solution(self)
    }
}

fn expand_nodes(manifest: &ProjectManifest, path: &Path) -> Vec<ProjectNode> {
    if manifest.targets.is_empty() {
        return vec![ProjectNode::new(
            manifest.name.as_str(),
            None,
            path,
            manifest.dependencies.clone(),
        )];
    }

    manifest
        .targets
        .iter()
        .map(|target| {
            ProjectNode::new(
                manifest.name.as_str(),
                Some(target.as_str()),
                path,
                manifest.dependencies.clone(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_project(dir: &Path, file: &str, content: &str) -> PathBuf {
        let path = dir.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn write_solution(dir: &Path, projects: &[&str]) -> PathBuf {
        let entries: Vec<String> = projects.iter().map(|p| format!("    \"{}\",", p)).collect();
        let content = format!("projects = [\n{}\n]\n", entries.join("\n"));
        write_project(dir, "solution.toml", &content)
    }

    #[test]
    fn test_load_solution() {
        let dir = TempDir::new().unwrap();
        write_project(
            dir.path(),
            "core/project.toml",
            "name = \"core\"\nversion = \"1.0.0\"\n",
        );
        write_project(
            dir.path(),
            "api/project.toml",
            "name = \"api\"\nversion = \"0.5.0\"\ndependencies = [\"core\"]\n",
        );
        let solution_path = write_solution(dir.path(), &["core/project.toml", "api/project.toml"]);

        let solution = Solution::load(&solution_path).unwrap();
        assert_eq!(solution.projects().len(), 2);
        assert!(solution.project(&ProjectId::new("core", None)).is_some());
        assert!(solution.project(&ProjectId::new("api", None)).is_some());
    }

    #[test]
    fn test_multi_target_expands_to_one_node_per_target() {
        let dir = TempDir::new().unwrap();
        let project_path = write_project(
            dir.path(),
            "core/project.toml",
            "name = \"core\"\nversion = \"1.0.0\"\ntargets = [\"stable\", \"nightly\"]\n",
        );
        let solution_path = write_solution(dir.path(), &["core/project.toml"]);

        let solution = Solution::load(&solution_path).unwrap();
        assert_eq!(solution.projects().len(), 2);
        assert!(solution
            .project(&ProjectId::new("core", Some("stable")))
            .is_some());
        assert!(solution
            .project(&ProjectId::new("core", Some("nightly")))
            .is_some());

        // Both nodes resolve back to the same file
        let canonical = fs::canonicalize(&project_path).unwrap();
        assert_eq!(solution.projects_at_path(&canonical).len(), 2);
    }

    #[test]
    fn test_missing_project_file_fails() {
        let dir = TempDir::new().unwrap();
        let solution_path = write_solution(dir.path(), &["nowhere/project.toml"]);

        let result = Solution::load(&solution_path);
        assert!(matches!(result, Err(crate::ProjectBumpError::Solution(_))));
    }

    #[test]
    fn test_duplicate_project_name_fails() {
        let dir = TempDir::new().unwrap();
        write_project(dir.path(), "a/project.toml", "name = \"core\"\n");
        write_project(dir.path(), "b/project.toml", "name = \"core\"\n");
        let solution_path = write_solution(dir.path(), &["a/project.toml", "b/project.toml"]);

        let result = Solution::load(&solution_path);
        assert!(matches!(result, Err(crate::ProjectBumpError::Solution(_))));
    }

    #[test]
    fn test_project_id_display() {
        assert_eq!(ProjectId::new("core", None).to_string(), "core");
        assert_eq!(
            ProjectId::new("core", Some("stable")).to_string(),
            "core(stable)"
        );
    }
}
