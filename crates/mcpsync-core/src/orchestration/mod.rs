//! Run orchestration shared by every frontend.

pub mod service;

pub use service::{SyncOptions, SyncService, TargetInfo};
