//! Caller-side services built on top of the ports.

mod sync_follower;

pub use sync_follower::{SyncFollowOptions, SyncFollowOutcome, SyncFollowStop, SyncFollower};
