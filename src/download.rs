use crate::error::{GumError, Result};
use crate::models::{Architecture, GoVersion, Platform};
use crate::transport::Transport;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::fs::File;
use std::io::{Read, Write};
use tracing::debug;

/// Resolve the archive URL for a version on a given platform.
///
/// macOS builds are only published for amd64 and arm64.
pub fn download_url(
    base_url: &str,
    version: &GoVersion,
    platform: Platform,
    arch: Architecture,
) -> Result<String> {
    match platform {
        Platform::Mac => match arch {
            Architecture::Amd64 | Architecture::Arm64 => Ok(format!(
                "{}/{}.darwin-{}.tar.gz",
                base_url, version, arch
            )),
            _ => Err(GumError::UnsupportedPlatform {
                os: platform.as_str().to_string(),
                arch: arch.as_str().to_string(),
            }),
        },
        Platform::Linux => Ok(format!(
            "{}/{}.linux-{}.tar.gz",
            base_url, version, arch
        )),
    }
}

pub struct Downloader {
    transport: Box<dyn Transport>,
}

impl Downloader {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Stream `url` into `dest` with a progress indicator.
    ///
    /// A non-success status or transport failure aborts the download; no
    /// retry is attempted.
    pub fn download(&self, url: &str, dest: &mut File) -> Result<()> {
        debug!(url, "starting download");

        let response = self.transport.get(url)?;

        if !response.is_success() {
            return Err(GumError::DownloadFailed {
                url: url.to_string(),
                reason: format!("server responded with status {}", response.status),
            });
        }

        let pb = progress_bar(url, response.content_length);

        let mut body = response.body;
        let mut buffer = [0u8; 8192];
        loop {
            let n = body.read(&mut buffer).map_err(|e| GumError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
            if n == 0 {
                break;
            }
            dest.write_all(&buffer[..n])?;
            pb.inc(n as u64);
        }

        pb.finish_with_message("Download complete");
        Ok(())
    }
}

/// Percent-of-total bar when the server declares a length, otherwise a
/// spinner with cumulative bytes. Drawn at most every 100ms.
fn progress_bar(url: &str, content_length: Option<u64>) -> ProgressBar {
    let file_name = url.split('/').last().unwrap_or("file");

    let pb = match content_length {
        Some(total) => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} {bytes} ({elapsed})")
                    .unwrap(),
            );
            pb
        }
    };

    pb.set_draw_target(ProgressDrawTarget::stdout_with_hz(10));
    pb.set_message(format!("Downloading {file_name}"));
    pb
}
