//! API version type and per-action version models

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// An API version.
///
/// Versions are opaque to routing: the engine only compares them for
/// equality and iterates them in declaration order. Supported textual
/// formats:
/// - `v1`, `v2` (major only)
/// - `v1.0`, `v1.2` (major.minor)
/// - `v1.0.0`, `v1.2.3` (major.minor.patch)
/// - `1`, `1.0`, `1.0.0` (without the 'v' prefix)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApiVersion {
    /// Major version number
    pub major: u32,
    /// Minor version number (defaults to 0)
    pub minor: u32,
    /// Patch version number (defaults to 0)
    pub patch: u32,
}

impl ApiVersion {
    /// Create a new version.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Create a version with only a major number.
    pub fn major(major: u32) -> Self {
        Self {
            major,
            minor: 0,
            patch: 0,
        }
    }

    /// Create version 1.0.0
    pub fn v1() -> Self {
        Self::new(1, 0, 0)
    }

    /// Create version 2.0.0
    pub fn v2() -> Self {
        Self::new(2, 0, 0)
    }

    /// Create version 3.0.0
    pub fn v3() -> Self {
        Self::new(3, 0, 0)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ApiVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Remove optional 'v' prefix
        let s = s
            .strip_prefix('v')
            .or_else(|| s.strip_prefix('V'))
            .unwrap_or(s);

        if s.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let mut numbers = [0u32; 3];
        let parts: Vec<&str> = s.split('.').collect();

        if parts.len() > numbers.len() {
            return Err(VersionParseError::InvalidFormat);
        }

        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| VersionParseError::InvalidNumber)?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.major.cmp(&other.major) {
            Ordering::Equal => match self.minor.cmp(&other.minor) {
                Ordering::Equal => self.patch.cmp(&other.patch),
                ord => ord,
            },
            ord => ord,
        }
    }
}

/// Error type for version parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionParseError {
    /// Invalid number in version string
    InvalidNumber,
    /// Invalid version format
    InvalidFormat,
    /// Empty version string
    Empty,
}

impl fmt::Display for VersionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber => write!(f, "invalid number in version"),
            Self::InvalidFormat => write!(f, "invalid version format"),
            Self::Empty => write!(f, "empty version string"),
        }
    }
}

impl std::error::Error for VersionParseError {}

/// The merged (explicit + implicit) version declaration of an action.
///
/// A model is either version-neutral or carries at least one declared
/// version, never both. Declaration order is preserved; duplicates are
/// collapsed on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersionModel {
    neutral: bool,
    declared: Vec<ApiVersion>,
}

impl ApiVersionModel {
    /// The model of a version-neutral action.
    pub fn neutral() -> Self {
        Self {
            neutral: true,
            declared: Vec::new(),
        }
    }

    /// The model of a versioned action.
    ///
    /// # Panics
    ///
    /// Panics if `declared` yields no versions; a versioned action always
    /// declares at least one.
    pub fn versioned(declared: impl IntoIterator<Item = ApiVersion>) -> Self {
        let mut versions: Vec<ApiVersion> = Vec::new();

        for version in declared {
            if !versions.contains(&version) {
                versions.push(version);
            }
        }

        assert!(
            !versions.is_empty(),
            "a versioned action must declare at least one API version"
        );

        Self {
            neutral: false,
            declared: versions,
        }
    }

    /// Whether the action is version-neutral.
    pub fn is_version_neutral(&self) -> bool {
        self.neutral
    }

    /// The declared versions, in declaration order. Empty iff neutral.
    pub fn declared_versions(&self) -> &[ApiVersion] {
        &self.declared
    }
}
