use thiserror::Error;

/// Unified error type for project-bump operations
#[derive(Error, Debug)]
pub enum ProjectBumpError {
    #[error("Version error: {0}")]
    Version(String),

    #[error("Solution error: {0}")]
    Solution(String),

    #[error("Project error: {0}")]
    Project(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid project file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in project-bump
pub type Result<T> = std::result::Result<T, ProjectBumpError>;

impl ProjectBumpError {
    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ProjectBumpError::Version(msg.into())
    }

    /// Create a solution error with context
    pub fn solution(msg: impl Into<String>) -> Self {
        ProjectBumpError::Solution(msg.into())
    }

    /// Create a project error with context
    pub fn project(msg: impl Into<String>) -> Self {
        ProjectBumpError::Project(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ProjectBumpError::Config(msg.into())
    }
}
