use std::path::{Path, PathBuf};

use crate::error::{ProjectBumpError, Result};

/// File name that marks a solution root
pub const SOLUTION_FILE_NAME: &str = "solution.toml";

/// Find the solution file governing a project, walking up from the project's
/// directory through at most `max_levels` parent directories.
pub fn find_containing_solution(project_path: &Path, max_levels: u32) -> Result<PathBuf> {
    let start = project_path.parent().ok_or_else(|| {
        ProjectBumpError::solution(format!(
            "Project path '{}' has no parent directory",
            project_path.display()
        ))
    })?;

    let mut directory = start;
    let mut levels_walked = 0;
    loop {
        let candidate = directory.join(SOLUTION_FILE_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }

        if levels_walked >= max_levels {
            return Err(ProjectBumpError::solution(format!(
                "Cannot find a solution file for project '{}' in the project directory or {} parent directories",
                project_path.display(),
                max_levels
            )));
        }

        directory = directory.parent().ok_or_else(|| {
            ProjectBumpError::solution(format!(
                "Cannot find a solution file for project '{}'",
                project_path.display()
            ))
        })?;
        levels_walked += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_solution_next_to_project() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SOLUTION_FILE_NAME), "projects = []\n").unwrap();
        let project = dir.path().join("project.toml");
        fs::write(&project, "name = \"a\"\n").unwrap();

        let found = find_containing_solution(&project, 3).unwrap();
        assert_eq!(found, dir.path().join(SOLUTION_FILE_NAME));
    }

    #[test]
    fn test_solution_in_parent_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SOLUTION_FILE_NAME), "projects = []\n").unwrap();
        let nested = dir.path().join("services").join("core");
        fs::create_dir_all(&nested).unwrap();
        let project = nested.join("project.toml");
        fs::write(&project, "name = \"core\"\n").unwrap();

        let found = find_containing_solution(&project, 3).unwrap();
        assert_eq!(found, dir.path().join(SOLUTION_FILE_NAME));
    }

    #[test]
    fn test_gives_up_after_max_levels() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SOLUTION_FILE_NAME), "projects = []\n").unwrap();
        let nested = dir.path().join("a").join("b").join("c").join("d");
        fs::create_dir_all(&nested).unwrap();
        let project = nested.join("project.toml");
        fs::write(&project, "name = \"deep\"\n").unwrap();

        // The solution sits four levels up but only two are allowed
        let result = find_containing_solution(&project, 2);
        assert!(matches!(result, Err(crate::ProjectBumpError::Solution(_))));

        assert!(find_containing_solution(&project, 4).is_ok());
    }
}
