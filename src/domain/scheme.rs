use semver::Version;

use super::label::ReleaseLabelParser;
use super::version::{VersionExt, VersionPart};
use crate::error::{ProjectBumpError, Result};

/// Decides the next prerelease version for a given current version.
///
/// A scheme either continues an in-progress prerelease cycle it recognizes as
/// its own, or starts a fresh one labeled `<name>.1`.
pub trait PrereleaseScheme {
    fn next(&self, version: &Version, part: VersionPart) -> Result<Version>;
}

/// A prerelease scheme identified by a label name, e.g. `pre` or `rc`.
///
/// Continuing the same named cycle only advances the counter and never
/// re-bumps the numeric triple, regardless of the requested part; switching
/// from a foreign label (or starting from a release) bumps the triple and
/// resets the counter to 1.
///
/// ```
/// use project_bump::domain::{NamedScheme, PrereleaseScheme, Version, VersionPart};
///
/// let scheme = NamedScheme::new("pre").unwrap();
/// let version = Version::parse("1.0.0").unwrap();
/// let next = scheme.next(&version, VersionPart::Minor).unwrap();
/// assert_eq!(next.to_string(), "1.1.0-pre.1");
///
/// let again = scheme.next(&next, VersionPart::Minor).unwrap();
/// assert_eq!(again.to_string(), "1.1.0-pre.2");
/// ```
#[derive(Debug, Clone)]
pub struct NamedScheme {
    name: String,
    parser: ReleaseLabelParser,
}

impl NamedScheme {
    /// Create a scheme with the given label name.
    ///
    /// The name must be non-empty and consist of alphanumeric characters or
    /// hyphens, so that the generated `<name>.<counter>` labels are valid
    /// semantic-versioning identifiers.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::validate_name(&name)?;

        let parser = ReleaseLabelParser::new(name.clone());
        Ok(NamedScheme { name, parser })
    }

    /// Create a scheme that also recognizes legacy label names.
    ///
    /// Cycles written under a legacy name are continued rather than reset,
    /// but new labels are always written under the current name.
    pub fn with_recognized(name: impl Into<String>, legacy: &[String]) -> Result<Self> {
        let name = name.into();
        Self::validate_name(&name)?;

        let mut names = vec![name.clone()];
        for legacy_name in legacy {
            if !names.contains(legacy_name) {
                names.push(legacy_name.clone());
            }
        }

        let parser = ReleaseLabelParser::with_names(names);
        Ok(NamedScheme { name, parser })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return Err(ProjectBumpError::version(format!(
                "Invalid prerelease scheme name: '{}'",
                name
            )));
        }
        Ok(())
    }
}

impl PrereleaseScheme for NamedScheme {
    fn next(&self, version: &Version, part: VersionPart) -> Result<Version> {
        match self.parser.try_parse_release(version) {
            // Continuing our own cycle: same triple, counter advances,
            // the requested part is ignored.
            Some(label) => version.with_release_label(&format!("{}.{}", self.name, label.counter + 1)),
            // Release version or foreign label: start a new cycle at .1
            None => version
                .increase(part)
                .with_release_label(&format!("{}.1", self.name)),
        }
    }
}
