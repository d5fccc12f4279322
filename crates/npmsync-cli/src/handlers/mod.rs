//! Command handlers.
//!
//! Each handler is a thin wrapper: call the client or the port, then format
//! the result for the terminal. Upstream statuses are printed as they are;
//! a non-2xx reply turns into a failing exit only where the command has no
//! useful output without it.

pub mod download;
pub mod log;
pub mod manifest;
pub mod paths;
pub mod sync;
