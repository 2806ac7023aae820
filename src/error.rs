use thiserror::Error;

#[derive(Error, Debug)]
pub enum GumError {
    #[error("Unsupported platform: {os} {arch}")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("Failed to download from {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("Failed to extract archive: {0}")]
    ExtractionFailed(String),

    #[error("Go {0} is not installed. Run 'gum install {0}' first")]
    NotInstalled(String),

    #[error("Go binary not found in {0}")]
    BinaryNotFound(String),

    #[error("Failed to detect version from go.mod: {0}")]
    DetectionFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GumError>;
