//! Staging locations for tarball downloads.
//!
//! `<downloads_root>/YYYY/MM/DD/<token>-<file name>`. The date bucket bounds
//! directory fan-out; the random token keeps concurrent downloads of the
//! same file name apart.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use url::Url;
use uuid::Uuid;

/// File name used when the URL path has no final segment.
const FALLBACK_FILE_NAME: &str = "tarball";

/// Fresh random token for a staging file name (32 hex chars).
pub fn random_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Final path segment of `url`, ignoring trailing slashes.
pub fn tarball_file_name(url: &Url) -> &str {
    url.path()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(FALLBACK_FILE_NAME)
}

/// Build the staging path for one download.
pub fn staging_path(
    downloads_root: &Path,
    date: NaiveDate,
    token: &str,
    file_name: &str,
) -> PathBuf {
    downloads_root
        .join(date.format("%Y").to_string())
        .join(date.format("%m").to_string())
        .join(date.format("%d").to_string())
        .join(format!("{token}-{file_name}"))
}
