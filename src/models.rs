use crate::error::{GumError, Result};
use std::fmt;

/// A Go version identifier in its canonical `goX.Y[.Z]` form.
///
/// Raw user input may omit the `go` prefix; `normalise` adds it. Every
/// filesystem and network operation works with the canonical form only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GoVersion(String);

impl GoVersion {
    /// Normalise a raw version token to its canonical form.
    ///
    /// Panics on the empty string: the CLI layer validates arguments, so an
    /// empty identifier here is caller misuse, not a user error.
    pub fn normalise(raw: &str) -> Self {
        assert!(!raw.is_empty(), "normalise: received empty version string");

        if raw.starts_with("go") {
            Self(raw.to_string())
        } else {
            Self(format!("go{raw}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supported operating systems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Mac,
}

impl Platform {
    pub fn current() -> Result<Self> {
        match std::env::consts::OS {
            "linux" => Ok(Platform::Linux),
            "macos" => Ok(Platform::Mac),
            os => Err(GumError::UnsupportedPlatform {
                os: os.to_string(),
                arch: std::env::consts::ARCH.to_string(),
            }),
        }
    }

    /// OS token as it appears in download archive names.
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Linux => "linux",
            Platform::Mac => "darwin",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Supported architectures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    Amd64,
    I386,
    Arm64,
    Arm,
}

impl Architecture {
    /// Resolve the host architecture.
    ///
    /// An architecture outside the known table is a fatal configuration
    /// error: no download mapping can exist for it, so the process cannot
    /// proceed.
    pub fn current() -> Self {
        match std::env::consts::ARCH {
            "x86_64" => Architecture::Amd64,
            "x86" => Architecture::I386,
            "aarch64" => Architecture::Arm64,
            "arm" => Architecture::Arm,
            arch => panic!("unsupported architecture {arch}."),
        }
    }

    /// Architecture token as it appears in download archive names.
    ///
    /// Not all host architecture names match the tokens used for Go
    /// downloads; 32-bit ARM is published as `armv6l`.
    pub fn as_str(&self) -> &str {
        match self {
            Architecture::Amd64 => "amd64",
            Architecture::I386 => "386",
            Architecture::Arm64 => "arm64",
            Architecture::Arm => "armv6l",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_adds_prefix() {
        assert_eq!(GoVersion::normalise("1.24").as_str(), "go1.24");
        assert_eq!(GoVersion::normalise("1.22.3").as_str(), "go1.22.3");
    }

    #[test]
    fn test_normalise_is_idempotent() {
        let once = GoVersion::normalise("1.24");
        let twice = GoVersion::normalise(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalise_canonical_is_fixed_point() {
        assert_eq!(GoVersion::normalise("go1.24").as_str(), "go1.24");
    }

    #[test]
    #[should_panic(expected = "empty version string")]
    fn test_normalise_rejects_empty() {
        GoVersion::normalise("");
    }

    #[test]
    fn test_platform_tokens() {
        assert_eq!(Platform::Linux.as_str(), "linux");
        assert_eq!(Platform::Mac.as_str(), "darwin");
    }

    #[test]
    fn test_architecture_tokens() {
        assert_eq!(Architecture::Amd64.as_str(), "amd64");
        assert_eq!(Architecture::I386.as_str(), "386");
        assert_eq!(Architecture::Arm64.as_str(), "arm64");
        assert_eq!(Architecture::Arm.as_str(), "armv6l");
    }
}
