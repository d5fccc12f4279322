//! Platform-specific data directory resolution.

use std::env;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Environment variable that overrides the data root.
pub const DATA_DIR_ENV: &str = "NPMSYNC_DATA_DIR";

/// Name of the subdirectory holding staged tarball downloads.
const DOWNLOADS_DIR: &str = "downloads";

/// Resolve the data root from an optional override.
///
/// A non-empty override wins. Otherwise the platform's local data directory
/// joined with `npmsync` is used.
pub fn resolve_data_root(override_dir: Option<&str>) -> Result<PathBuf, PathError> {
    match override_dir {
        Some(dir) if dir.trim().is_empty() => Err(PathError::EmptyPath),
        Some(dir) => Ok(PathBuf::from(dir.trim())),
        None => dirs::data_local_dir()
            .map(|dir| dir.join("npmsync"))
            .ok_or(PathError::NoDataDir),
    }
}

/// Get the data root, honouring `NPMSYNC_DATA_DIR`.
pub fn data_root() -> Result<PathBuf, PathError> {
    let override_dir = env::var(DATA_DIR_ENV).ok();
    resolve_data_root(override_dir.as_deref())
}

/// Root directory for staged tarball downloads under `data_dir`.
pub fn downloads_root(data_dir: &Path) -> PathBuf {
    data_dir.join(DOWNLOADS_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let root = resolve_data_root(Some("/srv/mirror")).unwrap();
        assert_eq!(root, PathBuf::from("/srv/mirror"));
    }

    #[test]
    fn test_override_is_trimmed() {
        let root = resolve_data_root(Some("  /srv/mirror \n")).unwrap();
        assert_eq!(root, PathBuf::from("/srv/mirror"));
    }

    #[test]
    fn test_blank_override_rejected() {
        assert!(matches!(
            resolve_data_root(Some("   ")),
            Err(PathError::EmptyPath)
        ));
    }

    #[test]
    fn test_default_ends_with_app_dir() {
        // Platform dir may be unavailable in minimal containers
        if let Ok(root) = resolve_data_root(None) {
            assert!(root.ends_with("npmsync"));
        }
    }

    #[test]
    fn test_downloads_root() {
        let root = downloads_root(Path::new("/data"));
        assert_eq!(root, PathBuf::from("/data/downloads"));
    }
}
