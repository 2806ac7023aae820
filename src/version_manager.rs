use crate::config::Config;
use crate::detect;
use crate::download;
use crate::error::{GumError, Result};
use crate::fs::FileSystem;
use crate::install::Installer;
use crate::models::{Architecture, GoVersion, Platform};
use colored::*;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// The version lifecycle engine: installs, removes, activates, and lists Go
/// toolchain versions under the configured install root.
///
/// Capability ports are injected at construction so tests run against
/// in-memory fakes.
pub struct VersionManager {
    fs: Box<dyn FileSystem>,
    installer: Installer,
    config: Config,
}

impl VersionManager {
    pub fn new(fs: Box<dyn FileSystem>, installer: Installer, config: Config) -> Self {
        Self {
            fs,
            installer,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Install a specific Go version.
    ///
    /// Installing an already-installed version is a no-op. On any installer
    /// failure the partially populated version directory is rolled back.
    pub fn install(&self, version: &str, out: &mut dyn Write) -> Result<()> {
        let v = GoVersion::normalise(version);
        let version_dir = self.config.version_dir(v.as_str());

        if self.fs.exists(&version_dir) {
            writeln!(
                out,
                "Go {} is already installed at {}",
                v,
                version_dir.display()
            )?;
            return Ok(());
        }

        let platform = Platform::current()?;
        let arch = Architecture::current();
        let url = download::download_url(&self.config.base_url, &v, platform, arch)?;
        debug!(%url, "resolved download url");

        self.fs.create_dir_all(&self.config.versions_dir)?;

        writeln!(out, "Downloading {url}...")?;
        if let Err(err) = self.installer.install_archive(&url, &version_dir, out) {
            // The original failure is what matters, not the cleanup outcome
            let _ = self.fs.remove_dir_all(&version_dir);
            return Err(err);
        }

        writeln!(
            out,
            "{} Successfully installed Go {} at {}",
            "✓".green().bold(),
            v.to_string().cyan(),
            version_dir.display()
        )?;
        Ok(())
    }

    /// Uninstall a specific Go version.
    ///
    /// Uninstalling a version that is not installed is a no-op. Removing the
    /// currently active version leaves the active link dangling.
    pub fn uninstall(&self, version: &str, out: &mut dyn Write) -> Result<()> {
        let v = GoVersion::normalise(version);
        let version_dir = self.config.version_dir(v.as_str());

        writeln!(out, "Uninstalling Go version {v}")?;

        if !self.fs.exists(&version_dir) {
            writeln!(
                out,
                "Go {} is not installed at {}",
                v,
                version_dir.display()
            )?;
            return Ok(());
        }

        self.fs.remove_dir_all(&version_dir)?;

        writeln!(
            out,
            "{} Successfully uninstalled Go {} from {}",
            "✓".green().bold(),
            v.to_string().cyan(),
            version_dir.display()
        )?;
        Ok(())
    }

    /// Make a Go version the active one by pointing the active link at its
    /// entry point.
    ///
    /// With no version given, the version declared in `go.mod` in the
    /// current directory is used.
    pub fn use_version(&self, version: Option<&str>, out: &mut dyn Write) -> Result<()> {
        let v = match version {
            Some(raw) => GoVersion::normalise(raw),
            None => {
                let detected = detect::version_from_gomod(self.fs.as_ref())?.ok_or_else(|| {
                    GumError::DetectionFailed("no go.mod file in current directory".to_string())
                })?;
                writeln!(out, "Detected Go {detected} from go.mod")?;
                GoVersion::normalise(&detected)
            }
        };

        let version_dir = self.config.version_dir(v.as_str());
        if !self.fs.exists(&version_dir) {
            return Err(GumError::NotInstalled(v.to_string()));
        }

        let entry_point = version_dir.join("bin").join("go");
        if !self.fs.exists(&entry_point) {
            return Err(GumError::BinaryNotFound(version_dir.display().to_string()));
        }

        self.fs.create_dir_all(&self.config.bin_dir)?;

        let link = self.config.active_link();
        match self.fs.read_link(&link) {
            Ok(current) if current == entry_point => {
                writeln!(out, "Go {v} is already the active version")?;
                return Ok(());
            }
            // A stale link (wrong target or dangling) must go first; removal
            // failure aborts before anything new is created
            Ok(_) => self.fs.remove_file(&link)?,
            Err(_) => {}
        }

        debug!(link = %link.display(), target = %entry_point.display(), "updating active link");
        self.fs.symlink(&entry_point, &link)?;

        writeln!(
            out,
            "{} Successfully set Go {} as the active version",
            "✓".green().bold(),
            v.to_string().cyan()
        )?;
        Ok(())
    }

    /// List installed versions, marking the active one.
    pub fn list(&self, out: &mut dyn Write) -> Result<()> {
        let entries = match self.fs.list_dir(&self.config.versions_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                writeln!(out, "No Go versions installed yet")?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let versions: Vec<&PathBuf> = entries.iter().filter(|p| self.fs.is_dir(p)).collect();
        if versions.is_empty() {
            writeln!(out, "No Go versions installed yet")?;
            return Ok(());
        }

        let active = self.active_version();

        writeln!(out, "Installed Go versions:")?;
        for dir in versions {
            let name = match dir.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };

            if Some(name) == active.as_deref() {
                writeln!(
                    out,
                    "{} {} {}",
                    "*".green().bold(),
                    name.cyan(),
                    "(active)".green()
                )?;
            } else {
                writeln!(out, "  {name}")?;
            }
        }
        Ok(())
    }

    /// Resolve the active link and derive the owning version directory name.
    ///
    /// The entry point sits two levels below the directory named after the
    /// version. Any resolution failure (no link, dangling link) just means
    /// no version is active.
    fn active_version(&self) -> Option<String> {
        let resolved = self.fs.canonicalize(&self.config.active_link()).ok()?;
        let version_dir = resolved.parent()?.parent()?;
        version_dir
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
    }
}
