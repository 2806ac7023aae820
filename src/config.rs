use crate::error::Result;
use crate::fs::FileSystem;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://golang.org/dl";

const DEFAULT_GUM_DIR: &str = "~/.gum";

/// Resolved paths and settings, derived once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub gum_dir: PathBuf,

    /// Install root: one subdirectory per installed version.
    pub versions_dir: PathBuf,

    /// Directory holding the active-version symlink.
    pub bin_dir: PathBuf,

    pub config_file: PathBuf,

    /// Base URL the download archives are resolved against.
    pub base_url: String,
}

/// User-settable subset read from `config.toml`.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    install_dir: Option<String>,
}

impl Config {
    pub fn load(fs: &dyn FileSystem) -> Result<Self> {
        let gum_dir = Self::default_gum_dir(fs);

        let mut config = Self {
            versions_dir: gum_dir.join("versions"),
            bin_dir: gum_dir.join("bin"),
            config_file: gum_dir.join("config.toml"),
            gum_dir,
            base_url: DEFAULT_BASE_URL.to_string(),
        };

        if fs.exists(&config.config_file) {
            let contents = fs.read_to_string(&config.config_file)?;
            let file_config: FileConfig = toml::from_str(&contents)?;

            if let Some(base_url) = file_config.base_url {
                config.base_url = base_url;
            }
            if let Some(install_dir) = file_config.install_dir {
                config.versions_dir =
                    PathBuf::from(shellexpand::tilde(&install_dir).to_string());
            }
        }

        Ok(config)
    }

    fn default_gum_dir(fs: &dyn FileSystem) -> PathBuf {
        // GUM_DIR environment variable takes precedence
        if let Ok(dir) = std::env::var("GUM_DIR") {
            return PathBuf::from(shellexpand::tilde(&dir).to_string());
        }

        expand_home(DEFAULT_GUM_DIR, fs)
    }

    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.versions_dir.join(version)
    }

    /// Path of the active-version symlink.
    pub fn active_link(&self) -> PathBuf {
        self.bin_dir.join("go")
    }
}

/// Replace a leading `~` with the resolved home directory.
///
/// Best-effort: if home resolution fails the template is returned
/// unmodified rather than failing the caller.
pub fn expand_home(template: &str, fs: &dyn FileSystem) -> PathBuf {
    if let Some(rest) = template.strip_prefix('~') {
        if let Some(home) = fs.home_dir() {
            let rest = rest.strip_prefix(std::path::MAIN_SEPARATOR).unwrap_or(rest);
            return home.join(rest);
        }
    }
    PathBuf::from(template)
}
