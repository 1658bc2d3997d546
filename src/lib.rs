pub mod config;
pub mod domain;
pub mod error;
pub mod project;
pub mod solution;
pub mod ui;
pub mod updater;

pub use error::{ProjectBumpError, Result};
