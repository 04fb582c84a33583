use crate::{config::Font, emit::write_atomic};
use log::*;
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

const CACHE_DIR_NAME: &str = "icongen";

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("Could not read the font at {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("No font cached at {} and downloads are disabled", .0.display())]
    Offline(PathBuf),
    #[error("No cache directory is configured and none could be found for this platform")]
    NoCacheDir,
    #[error("No download URLs are configured")]
    NoSources,
    #[error("All {0} download sources failed")]
    AllSourcesFailed(usize),
}

/// Finds the font bytes: an explicit path, then the cache, then each URL in order.
/// A successful download is written to the cache before it is returned.
pub fn fetch_font(font: &Font, offline: bool) -> Result<Vec<u8>, AcquireError> {
    if let Some(path) = &font.path {
        info!("Reading font from {}", path.display());
        return read(path);
    }

    let cached = cache_path(font)?;
    if is_usable(&cached) {
        info!("Using cached font at {}", cached.display());
        return read(&cached);
    }

    if offline {
        return Err(AcquireError::Offline(cached));
    }
    if font.urls.is_empty() {
        return Err(AcquireError::NoSources);
    }

    let timeout = Duration::from_secs(font.timeout_secs);
    for url in &font.urls {
        info!("Downloading font from {url}");
        match download(url, timeout) {
            Ok(bytes) if bytes.is_empty() => warn!("Download from {url} was empty"),
            Ok(bytes) => {
                if let Err(e) = write_atomic(&cached, &bytes) {
                    // The bytes are still good for this run
                    warn!("Could not cache the font at {}: {e}", cached.display());
                }
                return Ok(bytes);
            }
            Err(e) => warn!("Fetch from {url} failed: {e}"),
        }
    }

    Err(AcquireError::AllSourcesFailed(font.urls.len()))
}

pub fn cache_path(font: &Font) -> Result<PathBuf, AcquireError> {
    let dir = match &font.cache_dir {
        Some(dir) => dir.clone(),
        None => directories::BaseDirs::new()
            .ok_or(AcquireError::NoCacheDir)?
            .cache_dir()
            .join(CACHE_DIR_NAME),
    };
    Ok(dir.join(&font.cache_file))
}

fn is_usable(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_file() && m.len() > 0)
}

fn read(path: &Path) -> Result<Vec<u8>, AcquireError> {
    fs::read(path).map_err(|source| AcquireError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn download(url: &str, timeout: Duration) -> reqwest::Result<Vec<u8>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}
