//! Tarball staging.
//!
//! Downloads go to a fresh path under `<data_dir>/downloads/`. A completed
//! file belongs to the caller. A failed download, or one whose future is
//! dropped before it finishes, never leaves a file behind.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use npmsync_core::downloads_root;
use reqwest::Method;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use url::Url;

use crate::envelope::{DownloadResult, RequestOptions};
use crate::error::{RegistryError, RegistryResult};
use crate::http::HttpTransport;
use crate::staging::{random_token, staging_path, tarball_file_name};

use super::NpmRegistry;

impl<T: HttpTransport> NpmRegistry<T> {
    /// Download `tarball_url` into a new staging file.
    ///
    /// Uses the configured download timeout instead of the request timeout.
    /// On error the partial file has already been removed when this returns,
    /// and the original error is returned unchanged.
    pub async fn download_tarball(&self, tarball_url: &str) -> RegistryResult<DownloadResult> {
        let url = Url::parse(tarball_url).map_err(|source| RegistryError::InvalidUrl {
            url: tarball_url.to_string(),
            source,
        })?;

        let tmpfile = staging_path(
            &downloads_root(&self.config.data_dir),
            Utc::now().date_naive(),
            &random_token(),
            tarball_file_name(&url),
        );

        if let Some(parent) = tmpfile.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| RegistryError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let file = create_staging_file(&tmpfile).await?;
        let mut guard = PartialFileGuard::new(tmpfile.clone());
        // Declared after the guard so the handle is closed before removal
        let mut file = file;

        debug!(url = tarball_url, path = %tmpfile.display(), "Staging tarball");

        let options = RequestOptions::new()
            .with_timeout(self.config.download_timeout)
            .with_writer(&mut file);

        let outcome = self.request(Method::GET, tarball_url, None, options).await;
        let result = match outcome {
            Ok(envelope) => file
                .flush()
                .await
                .map(|()| envelope)
                .map_err(RegistryError::Write),
            Err(err) => Err(err),
        };
        drop(file);

        match result {
            Ok(envelope) => {
                guard.disarm();
                Ok(DownloadResult {
                    envelope,
                    temp_file_path: tmpfile,
                })
            }
            Err(err) => {
                remove_partial(&tmpfile).await;
                guard.disarm();
                Err(err)
            }
        }
    }
}

/// Create the staging file, refusing to reuse an existing path.
async fn create_staging_file(path: &Path) -> RegistryResult<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Removes a staged file on drop unless disarmed.
///
/// Covers a download future dropped mid-transfer, where no error path runs.
struct PartialFileGuard {
    path: Option<PathBuf>,
}

impl PartialFileGuard {
    const fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    fn disarm(&mut self) {
        self.path = None;
    }
}

impl Drop for PartialFileGuard {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };
        match std::fs::remove_file(&path) {
            Ok(()) => debug!(path = %path.display(), "Removed abandoned download"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove abandoned download"
            ),
        }
    }
}

/// Best-effort removal of a partial download.
async fn remove_partial(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "Removed partial download"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(
            path = %path.display(),
            error = %e,
            "Failed to remove partial download"
        ),
    }
}
