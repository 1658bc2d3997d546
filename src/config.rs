use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for project-bump.
///
/// Controls the prerelease labeling scheme and how solution files are
/// discovered.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub prerelease: PrereleaseConfig,

    #[serde(default)]
    pub solution: SolutionConfig,
}

/// Returns the default prerelease scheme name.
fn default_scheme_name() -> String {
    "pre".to_string()
}

/// Configuration for the prerelease labeling scheme.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PrereleaseConfig {
    /// Label name written into new prerelease versions
    #[serde(default = "default_scheme_name")]
    pub name: String,

    /// Legacy label names that still continue an in-progress cycle,
    /// e.g. after renaming the scheme
    #[serde(default)]
    pub recognized: Vec<String>,
}

impl Default for PrereleaseConfig {
    fn default() -> Self {
        PrereleaseConfig {
            name: default_scheme_name(),
            recognized: Vec::new(),
        }
    }
}

/// Returns the default number of parent directories to search.
fn default_search_depth() -> u32 {
    3
}

/// Configuration for solution file discovery.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SolutionConfig {
    /// How many parent directories to walk when looking for a solution file
    #[serde(default = "default_search_depth")]
    pub search_depth: u32,
}

impl Default for SolutionConfig {
    fn default() -> Self {
        SolutionConfig {
            search_depth: default_search_depth(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `projectbump.toml` in current directory
/// 3. `~/.config/.projectbump.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./projectbump.toml").exists() {
        fs::read_to_string("./projectbump.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".projectbump.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
