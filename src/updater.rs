//! The update engine: bump seed projects, then propagate to dependants
//!
//! Two sequential phases. Phase A applies the requested increase to every
//! distinct project file behind the seed nodes. Phase B gives every project
//! that transitively depends on a seed a patch-level bump, in prerelease mode
//! iff any seed's post-update version is a prerelease.

use std::collections::HashSet;
use std::path::PathBuf;

use semver::Version;

use crate::domain::{PrereleaseScheme, VersionExt, VersionPart};
use crate::error::{ProjectBumpError, Result};
use crate::project::ProjectAdapter;
use crate::solution::{DependencyLookup, ProjectId, ProjectNode, Solution};

/// One applied version update, reported back to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct VersionChange {
    pub project: String,
    pub path: PathBuf,
    pub previous: Version,
    pub next: Version,
}

/// Applies version increases to a set of seed projects and, on request, to
/// everything that depends on them.
///
/// The engine does not own project persistence; it borrows shared
/// [crate::project::VersionedProject] instances through the adapter, which
/// guarantees one instance per file. A file shared by multi-targeted nodes is
/// therefore read and written exactly once per phase.
pub struct VersionUpdater<'s, A> {
    solution: &'s Solution,
    graph: &'s dyn DependencyLookup,
    targets: Vec<ProjectId>,
    scheme: Box<dyn PrereleaseScheme>,
    adapter: A,
}

impl<'s, A: ProjectAdapter> VersionUpdater<'s, A> {
    pub fn new(
        solution: &'s Solution,
        graph: &'s dyn DependencyLookup,
        targets: Vec<ProjectId>,
        scheme: Box<dyn PrereleaseScheme>,
        adapter: A,
    ) -> Self {
        VersionUpdater {
            solution,
            graph,
            targets,
            scheme,
            adapter,
        }
    }

    /// Resolve seed projects from file paths. Every node backed by one of
    /// the paths becomes a seed; a path matching no project contributes
    /// nothing.
    pub fn for_paths(
        solution: &'s Solution,
        graph: &'s dyn DependencyLookup,
        paths: &[PathBuf],
        scheme: Box<dyn PrereleaseScheme>,
        adapter: A,
    ) -> Self {
        let targets = paths
            .iter()
            .flat_map(|path| solution.projects_at_path(path))
            .map(|node| node.id.clone())
            .collect();

        Self::new(solution, graph, targets, scheme, adapter)
    }

    /// Seed node identities
    pub fn target_ids(&self) -> &[ProjectId] {
        &self.targets
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Phase A: increase the version of every seed project.
    ///
    /// A seed without a version is an error - an update target must already
    /// be versioned; the engine never invents an initial version.
    pub fn increase_version(
        &mut self,
        part: VersionPart,
        prerelease: bool,
    ) -> Result<Vec<VersionChange>> {
        let nodes = self.target_nodes();
        let projects = self.adapter.load_projects(&nodes)?;

        let mut changes = Vec::new();
        for shared in projects {
            let mut project = shared.borrow_mut();

            let current = project.version().cloned().ok_or_else(|| {
                ProjectBumpError::project(format!(
                    "Project '{}' has no version to update",
                    project.name()
                ))
            })?;

            let next = if prerelease {
                self.scheme.next(&current, part)?
            } else {
                current.increase(part)
            };

            project.set_version(next.clone());
            self.adapter.save_project(&project)?;

            changes.push(VersionChange {
                project: project.name().to_string(),
                path: project.path().to_path_buf(),
                previous: current,
                next,
            });
        }

        Ok(changes)
    }

    /// Phase B: patch-bump every project that transitively depends on a seed.
    ///
    /// Assumes the seed versions already reflect the intended state (i.e.
    /// Phase A ran, or the caller prepared an equivalent state). Dependants
    /// without a version - projects that opted out of versioning, such as
    /// test-only projects - are skipped silently.
    pub fn increase_dependants_version(&mut self) -> Result<Vec<VersionChange>> {
        let prerelease = self.is_prerelease()?;

        let nodes = self.dependant_nodes();
        let projects = self.adapter.load_projects(&nodes)?;

        let mut changes = Vec::new();
        for shared in projects {
            let mut project = shared.borrow_mut();

            let current = match project.version().cloned() {
                Some(version) => version,
                None => continue,
            };

            let next = if prerelease {
                self.scheme.next(&current, VersionPart::Patch)?
            } else {
                current.increase_patch()
            };

            project.set_version(next.clone());
            self.adapter.save_project(&project)?;

            changes.push(VersionChange {
                project: project.name().to_string(),
                path: project.path().to_path_buf(),
                previous: current,
                next,
            });
        }

        Ok(changes)
    }

    fn target_nodes(&self) -> Vec<&'s ProjectNode> {
        self.targets
            .iter()
            .filter_map(|id| self.solution.project(id))
            .collect()
    }

    /// Transitive dependents of all seeds, minus the seed set, in solution
    /// order. A seed is never its own dependant, cycles included.
    fn dependant_nodes(&self) -> Vec<&'s ProjectNode> {
        let mut ids: HashSet<ProjectId> = HashSet::new();
        for target in &self.targets {
            ids.extend(self.graph.transitive_dependents(target));
        }
        for target in &self.targets {
            ids.remove(target);
        }

        self.solution
            .projects()
            .iter()
            .filter(|node| ids.contains(&node.id))
            .collect()
    }

    /// Whether dependants get prerelease bumps: true iff any seed's current
    /// version is a prerelease. Reads go through the adapter cache, which
    /// hands out the same shared instances Phase A mutated.
    fn is_prerelease(&mut self) -> Result<bool> {
        let nodes = self.target_nodes();
        let projects = self.adapter.load_projects(&nodes)?;

        for shared in projects {
            let project = shared.borrow();
            let version = project.version().ok_or_else(|| {
                ProjectBumpError::project(format!(
                    "Project '{}' has no version",
                    project.name()
                ))
            })?;

            if version.is_prerelease() {
                return Ok(true);
            }
        }

        Ok(false)
    }
}
