//! mcpsync Core Library
//!
//! Keeps the MCP server definitions of many developer tools in step with a
//! single master list. Each tool's config file is regenerated or patched so
//! that only its MCP subtree changes.

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod fs;
pub mod master;
pub mod orchestration;
pub mod report;
pub mod transform;
pub mod types;

/// Re-exports of commonly used types
pub mod prelude {
    // Context and errors
    pub use crate::context::AppContext;
    pub use crate::error::SyncError;

    // Master record
    pub use crate::master::MasterRecord;

    // Configuration
    pub use crate::config::{LayerStore, SyncSettings, deep_merge};

    // Client
    pub use crate::client::{ClientAdapter, ClientRegistry, SyncContext};

    // Orchestration
    pub use crate::orchestration::{SyncOptions, SyncService, TargetInfo};

    // Reporting
    pub use crate::report::{
        MemoryReporter, Reporter, SyncReport, TargetOutcome, TargetReport, TracingReporter,
    };

    // Transforms
    pub use crate::transform::{TargetFormat, set_context};
    pub use crate::types::ServerContainer;
}
