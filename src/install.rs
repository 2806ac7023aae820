use crate::download::Downloader;
use crate::error::{GumError, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;
use tar::Archive;
use tempfile::NamedTempFile;
use tracing::debug;

/// Every Go archive roots its entries under this single directory, which is
/// stripped on extraction.
const ARCHIVE_ROOT: &str = "go";

pub struct Installer {
    downloader: Downloader,
}

impl Installer {
    pub fn new(downloader: Downloader) -> Self {
        Self { downloader }
    }

    /// Download `url` to a scratch file and unpack it into `dest_dir`.
    ///
    /// The scratch file is removed on every exit path. Partial contents left
    /// in `dest_dir` after a failure are the caller's to roll back.
    pub fn install_archive(
        &self,
        url: &str,
        dest_dir: &Path,
        out: &mut dyn Write,
    ) -> Result<()> {
        let mut scratch = NamedTempFile::new()?;

        self.downloader.download(url, scratch.as_file_mut())?;

        scratch.as_file_mut().seek(SeekFrom::Start(0))?;

        if let Some(parent) = dest_dir.parent() {
            std::fs::create_dir_all(parent)?;
        }

        writeln!(out, "Extracting to {}...", dest_dir.display())?;
        if url.ends_with(".tar.gz") {
            self.extract_tar_gz(scratch.as_file(), dest_dir)
        } else {
            Err(GumError::ExtractionFailed(format!(
                "unsupported archive format: {url}"
            )))
        }
    }

    fn extract_tar_gz(&self, file: &File, dest_dir: &Path) -> Result<()> {
        let gz = GzDecoder::new(file);
        let mut archive = Archive::new(gz);

        let entries = archive
            .entries()
            .map_err(|e| GumError::ExtractionFailed(e.to_string()))?;

        for entry in entries {
            let mut entry = entry.map_err(|e| GumError::ExtractionFailed(e.to_string()))?;
            let path = entry
                .path()
                .map_err(|e| GumError::ExtractionFailed(e.to_string()))?
                .into_owned();

            // Strip the archive root; the root entry itself is skipped
            let target = match path.strip_prefix(ARCHIVE_ROOT) {
                Ok(rest) if rest.as_os_str().is_empty() => continue,
                Ok(rest) => dest_dir.join(rest),
                Err(_) => dest_dir.join(&path),
            };

            if entry.header().entry_type().is_dir() {
                std::fs::create_dir_all(&target)?;
                continue;
            }

            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }

            debug!(path = %target.display(), "unpacking entry");
            entry
                .unpack(&target)
                .map_err(|e| GumError::ExtractionFailed(e.to_string()))?;
        }

        Ok(())
    }
}
