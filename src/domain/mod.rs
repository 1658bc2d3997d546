//! Domain logic - pure version arithmetic independent of project file I/O

pub mod label;
pub mod scheme;
pub mod version;

pub use label::{ParsedLabel, ReleaseLabelParser};
pub use scheme::{NamedScheme, PrereleaseScheme};
pub use semver::Version;
pub use version::{parse_version, VersionExt, VersionPart};
