//! Path utilities for npmsync data directories.
//!
//! # Layout
//!
//! ```text
//! <data_root>/
//!   downloads/YYYY/MM/DD/<hex>-<tarball>   staged tarballs
//! ```
//!
//! Everything below `downloads/` is owned by an external scheduled sweep once
//! a download has completed. Nothing in this workspace deletes completed
//! downloads.

mod error;
mod platform;

pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root, downloads_root, resolve_data_root};
