use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Prerelease, Version};

use crate::error::{ProjectBumpError, Result};

/// Which part of a `major.minor.patch` triple to increase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPart {
    Major,
    Minor,
    Patch,
}

impl FromStr for VersionPart {
    type Err = ProjectBumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "major" => Ok(VersionPart::Major),
            "minor" => Ok(VersionPart::Minor),
            "patch" => Ok(VersionPart::Patch),
            other => Err(ProjectBumpError::version(format!(
                "Unknown version part: '{}' - expected major, minor or patch",
                other
            ))),
        }
    }
}

impl fmt::Display for VersionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionPart::Major => write!(f, "major"),
            VersionPart::Minor => write!(f, "minor"),
            VersionPart::Patch => write!(f, "patch"),
        }
    }
}

/// Parse a semantic version string (e.g. "1.2.3" or "1.2.3-pre.1")
pub fn parse_version(text: &str) -> Result<Version> {
    Version::parse(text).map_err(|e| {
        ProjectBumpError::version(format!(
            "'{}' does not follow semantic versioning syntax: {}",
            text, e
        ))
    })
}

/// Version arithmetic over [semver::Version].
///
/// A prerelease version already represents the *next* numeric triple, so
/// increasing it never bumps the triple again - it only drops the label.
/// `increase_major("2.1.1-pre.1")` is `"2.0.0"`, not `"3.0.0"`.
pub trait VersionExt {
    /// Next major version: `(major+1, 0, 0)` for a release,
    /// `(major, 0, 0)` with the label removed for a prerelease.
    fn increase_major(&self) -> Version;

    /// Next minor version: `(major, minor+1, 0)` for a release,
    /// `(major, minor, 0)` with the label removed for a prerelease.
    fn increase_minor(&self) -> Version;

    /// Next patch version: `(major, minor, patch+1)` for a release,
    /// the same triple with the label removed for a prerelease.
    fn increase_patch(&self) -> Version;

    /// Dispatch to the three increase operations by [VersionPart]
    fn increase(&self, part: VersionPart) -> Version;

    /// Same triple with the given release label attached.
    /// Fails if the label is not a valid prerelease identifier.
    fn with_release_label(&self, label: &str) -> Result<Version>;

    /// Same triple with no release label
    fn without_release_label(&self) -> Version;

    /// True if the version carries a prerelease label
    fn is_prerelease(&self) -> bool;
}

impl VersionExt for Version {
    fn increase_major(&self) -> Version {
        let major = if self.is_prerelease() {
            self.major
        } else {
            self.major + 1
        };
        Version::new(major, 0, 0)
    }

    fn increase_minor(&self) -> Version {
        let minor = if self.is_prerelease() {
            self.minor
        } else {
            self.minor + 1
        };
        Version::new(self.major, minor, 0)
    }

    fn increase_patch(&self) -> Version {
        let patch = if self.is_prerelease() {
            self.patch
        } else {
            self.patch + 1
        };
        Version::new(self.major, self.minor, patch)
    }

    fn increase(&self, part: VersionPart) -> Version {
        match part {
            VersionPart::Major => self.increase_major(),
            VersionPart::Minor => self.increase_minor(),
            VersionPart::Patch => self.increase_patch(),
        }
    }

    fn with_release_label(&self, label: &str) -> Result<Version> {
        // semver treats an empty prerelease as "no label"; a prerelease
        // version must always carry one
        if label.is_empty() {
            return Err(ProjectBumpError::version(
                "Release label must not be empty".to_string(),
            ));
        }

        let pre = Prerelease::new(label).map_err(|e| {
            ProjectBumpError::version(format!("Invalid release label '{}': {}", label, e))
        })?;

        Ok(Version {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            pre,
            build: BuildMetadata::EMPTY,
        })
    }

    fn without_release_label(&self) -> Version {
        Version::new(self.major, self.minor, self.patch)
    }

    fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> Version {
        parse_version(text).unwrap()
    }

    #[test]
    fn test_increase_major_release() {
        assert_eq!(v("2.0.0").increase_major(), v("3.0.0"));
        assert_eq!(v("2.1.1").increase_major(), v("3.0.0"));
    }

    #[test]
    fn test_increase_major_prerelease_promotes() {
        // A prerelease already names the next triple - only the label goes
        assert_eq!(v("2.1.1-pre.1").increase_major(), v("2.0.0"));
    }

    #[test]
    fn test_increase_minor_release() {
        assert_eq!(v("2.0.0").increase_minor(), v("2.1.0"));
        assert_eq!(v("2.1.1").increase_minor(), v("2.2.0"));
    }

    #[test]
    fn test_increase_minor_prerelease_promotes() {
        assert_eq!(v("2.1.1-pre").increase_minor(), v("2.1.0"));
    }

    #[test]
    fn test_increase_patch_release() {
        assert_eq!(v("2.0.0").increase_patch(), v("2.0.1"));
        assert_eq!(v("2.1.1").increase_patch(), v("2.1.2"));
    }

    #[test]
    fn test_increase_patch_prerelease_promotes() {
        assert_eq!(v("2.1.1-pre").increase_patch(), v("2.1.1"));
    }

    #[test]
    fn test_increase_dispatch() {
        let version = v("1.2.3");
        assert_eq!(version.increase(VersionPart::Major), v("2.0.0"));
        assert_eq!(version.increase(VersionPart::Minor), v("1.3.0"));
        assert_eq!(version.increase(VersionPart::Patch), v("1.2.4"));
    }

    #[test]
    fn test_increase_applied_twice_is_strictly_greater() {
        let once = v("1.2.3").increase(VersionPart::Minor);
        let twice = once.increase(VersionPart::Minor);
        assert!(once > v("1.2.3"));
        assert!(twice > once);
    }

    #[test]
    fn test_set_release_label() {
        assert_eq!(v("1.0.0").with_release_label("xyz").unwrap(), v("1.0.0-xyz"));
        assert_eq!(
            v("2.0.0-xyz").with_release_label("abc").unwrap(),
            v("2.0.0-abc")
        );
    }

    #[test]
    fn test_set_release_label_invalid() {
        assert!(v("1.0.0").with_release_label("not a label").is_err());
        assert!(v("1.0.0").with_release_label("").is_err());
    }

    #[test]
    fn test_remove_release_label() {
        assert_eq!(v("1.0.0").without_release_label(), v("1.0.0"));
        assert_eq!(v("2.0.0-pre.1").without_release_label(), v("2.0.0"));
    }

    #[test]
    fn test_is_prerelease() {
        assert!(!v("1.0.0").is_prerelease());
        assert!(v("1.0.0-pre.1").is_prerelease());
        assert!(v("1.0.0-feature").is_prerelease());
    }

    #[test]
    fn test_parse_version_invalid() {
        assert!(parse_version("1.2").is_err());
        assert!(parse_version("1.2.3.4").is_err());
        assert!(parse_version("not-a-version").is_err());
    }

    #[test]
    fn test_parse_version_round_trip() {
        assert_eq!(v("1.2.3-pre.1").to_string(), "1.2.3-pre.1");
    }

    #[test]
    fn test_version_part_from_str() {
        assert_eq!("major".parse::<VersionPart>().unwrap(), VersionPart::Major);
        assert_eq!("Minor".parse::<VersionPart>().unwrap(), VersionPart::Minor);
        assert_eq!("PATCH".parse::<VersionPart>().unwrap(), VersionPart::Patch);
        assert!("build".parse::<VersionPart>().is_err());
    }

    #[test]
    fn test_version_part_display() {
        assert_eq!(VersionPart::Major.to_string(), "major");
        assert_eq!(VersionPart::Minor.to_string(), "minor");
        assert_eq!(VersionPart::Patch.to_string(), "patch");
    }
}
