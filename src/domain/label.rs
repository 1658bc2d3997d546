use semver::Version;

use super::version::VersionExt;

/// A prerelease label decoded into its scheme name and counter,
/// e.g. `"pre.3"` -> `("pre", 3)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLabel {
    pub name: String,
    pub counter: u32,
}

/// Parses prerelease labels of the exact shape `<name>.<counter>` under a set
/// of recognized scheme names.
///
/// The parser is purely syntactic: `"1.0.0-major.1"` decodes to
/// `("major", 1)` when `"major"` is among the recognized names. Any label
/// that does not match the two-segment shape - no dot, more than one dot, a
/// non-integer counter, or an unrecognized name - is treated as a foreign
/// scheme, not an error.
#[derive(Debug, Clone)]
pub struct ReleaseLabelParser {
    names: Vec<String>,
}

impl ReleaseLabelParser {
    /// Create a parser recognizing a single scheme name
    pub fn new(name: impl Into<String>) -> Self {
        ReleaseLabelParser {
            names: vec![name.into()],
        }
    }

    /// Create a parser recognizing several scheme names.
    /// Useful when migrating between scheme names.
    pub fn with_names(names: Vec<String>) -> Self {
        ReleaseLabelParser { names }
    }

    /// Decode the version's prerelease label, if it matches a recognized scheme.
    ///
    /// Returns `None` for release versions and for any label outside the
    /// `<name>.<counter>` shape.
    pub fn try_parse_release(&self, version: &Version) -> Option<ParsedLabel> {
        if !version.is_prerelease() {
            return None;
        }

        let parts: Vec<&str> = version.pre.as_str().split('.').collect();
        if parts.len() != 2 {
            return None;
        }

        let counter = parts[1].parse::<u32>().ok()?;

        let name = parts[0];
        if !self.names.iter().any(|n| n == name) {
            return None;
        }

        Some(ParsedLabel {
            name: name.to_string(),
            counter,
        })
    }
}
