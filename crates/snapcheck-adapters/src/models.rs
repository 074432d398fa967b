//! Model artifact fetching and caching adapter.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use snapcheck_core::{
    ArtifactFetcher, ModelKind, ModelLocation, ModelSource, ModelSources, ModelUnavailableError,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Timeout for a single artifact download.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Returns the models directory path.
///
/// Uses `override_dir` when given, else `XDG_DATA_HOME/snapcheck/models`
/// or `~/.local/share/snapcheck/models`.
#[must_use]
pub fn models_dir(override_dir: Option<&Path>) -> PathBuf {
    override_dir.map_or_else(
        || {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("snapcheck")
                .join("models")
        },
        Path::to_path_buf,
    )
}

/// Returns the cached artifact path for a model.
#[must_use]
pub fn model_path(dir: &Path, kind: ModelKind) -> PathBuf {
    dir.join(kind.filename())
}

/// Completes the configured sources, falling back to the cached artifact
/// in `dir` for any model without one.
#[must_use]
pub fn resolve_sources(
    dir: &Path,
    rotation: Option<ModelSource>,
    crop: Option<ModelSource>,
) -> ModelSources {
    let cached = |kind| ModelSource::new(ModelLocation::Path(model_path(dir, kind)));
    ModelSources {
        rotation: rotation.unwrap_or_else(|| cached(ModelKind::Rotation)),
        crop: crop.unwrap_or_else(|| cached(ModelKind::Crop)),
    }
}

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Fetches artifacts from local paths or HTTP(S) URLs and verifies their
/// checksum when one is configured.
pub struct SourceFetcher {
    client: reqwest::blocking::Client,
}

impl SourceFetcher {
    /// Creates a fetcher with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .context("Failed to initialize HTTP client")?;
        Ok(Self { client })
    }

    fn download(&self, kind: ModelKind, url: &str) -> Result<Vec<u8>, ModelUnavailableError> {
        info!("Downloading {kind} model from {url}");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ModelUnavailableError::new(kind, format!("download failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ModelUnavailableError::new(
                kind,
                format!("download failed with status: {status}"),
            ));
        }

        let bytes = response.bytes().map_err(|e| {
            ModelUnavailableError::new(kind, format!("failed to read response: {e}"))
        })?;
        Ok(bytes.to_vec())
    }
}

impl ArtifactFetcher for SourceFetcher {
    fn fetch(&self, kind: ModelKind, source: &ModelSource) -> Result<Vec<u8>, ModelUnavailableError> {
        let bytes = match &source.location {
            ModelLocation::Url(url) => self.download(kind, url)?,
            ModelLocation::Path(path) => {
                debug!("Reading {kind} model from {}", path.display());
                fs::read(path).map_err(|e| {
                    ModelUnavailableError::new(kind, format!("cannot read {}: {e}", path.display()))
                })?
            }
        };

        match &source.sha256 {
            Some(expected) => {
                let actual = sha256_hex(&bytes);
                if &actual != expected {
                    return Err(ModelUnavailableError::new(
                        kind,
                        format!(
                            "checksum mismatch for {}: expected {expected}, got {actual}",
                            source.location
                        ),
                    ));
                }
                debug!("Checksum verified for {kind} model");
            }
            None => debug!("No checksum configured for {kind} model"),
        }

        info!("Fetched {kind} model ({} bytes)", bytes.len());
        Ok(bytes)
    }
}

/// Fetches an artifact and stores it in the models directory.
///
/// The file is written under a temporary name and renamed into place, so
/// a failed download never leaves a truncated artifact in the cache.
///
/// # Errors
///
/// Returns an error if fetching, verification or the write fails.
pub fn fetch_to_cache(
    fetcher: &dyn ArtifactFetcher,
    kind: ModelKind,
    source: &ModelSource,
    dir: &Path,
) -> Result<PathBuf> {
    fs::create_dir_all(dir).context("Failed to create models directory")?;

    let bytes = fetcher.fetch(kind, source)?;
    let path = model_path(dir, kind);

    // The temporary file is removed on drop, so a failed write or rename
    // leaves nothing behind in the cache.
    let mut staged = NamedTempFile::new_in(dir).context("Failed to create temporary file")?;
    staged
        .write_all(&bytes)
        .with_context(|| format!("Failed to write {}", staged.path().display()))?;
    staged
        .persist(&path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to move {} into place", path.display()))?;

    info!("Cached {kind} model at {}", path.display());
    Ok(path)
}

/// Cache status of one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelStatus {
    /// Which model.
    pub kind: ModelKind,
    /// Where the cached artifact lives.
    pub path: PathBuf,
    /// Whether the artifact is present.
    pub installed: bool,
}

/// Lists both models with their cache status.
#[must_use]
pub fn list_models(dir: &Path) -> Vec<ModelStatus> {
    ModelKind::ALL
        .iter()
        .map(|&kind| {
            let path = model_path(dir, kind);
            let installed = path.is_file();
            ModelStatus {
                kind,
                path,
                installed,
            }
        })
        .collect()
}
