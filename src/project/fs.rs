use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use super::{ProjectAdapter, SharedProject, VersionedProject};
use crate::error::{ProjectBumpError, Result};
use crate::solution::ProjectNode;

/// Filesystem-backed project adapter.
///
/// Caches loaded projects by file path, so every node of a multi-targeted
/// project shares one instance and saves hit the disk once per file. In
/// dry-run mode saves are skipped entirely.
#[derive(Debug, Default)]
pub struct FsProjectAdapter {
    cache: HashMap<PathBuf, SharedProject>,
    dry_run: bool,
}

impl FsProjectAdapter {
    pub fn new() -> Self {
        FsProjectAdapter {
            cache: HashMap::new(),
            dry_run: false,
        }
    }

    /// Create an adapter that never writes files
    pub fn dry_run() -> Self {
        FsProjectAdapter {
            cache: HashMap::new(),
            dry_run: true,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl ProjectAdapter for FsProjectAdapter {
    fn load_project(&mut self, node: &ProjectNode) -> Result<SharedProject> {
        if let Some(project) = self.cache.get(&node.path) {
            return Ok(Rc::clone(project));
        }

        let content = fs::read_to_string(&node.path).map_err(|e| {
            ProjectBumpError::project(format!(
                "Cannot read project file '{}': {}",
                node.path.display(),
                e
            ))
        })?;
        let project = VersionedProject::parse(&node.path, content)?;

        let shared = Rc::new(RefCell::new(project));
        self.cache.insert(node.path.clone(), Rc::clone(&shared));
        Ok(shared)
    }

    fn save_project(&mut self, project: &VersionedProject) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }

        fs::write(project.path(), project.render())?;
        Ok(())
    }
}
