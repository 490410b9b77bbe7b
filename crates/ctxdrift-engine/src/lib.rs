//! ctxdrift Engine - Orchestration layer
//!
//! Provides the command and query surface that coordinates the snapshot
//! registry, the context-directory store and the core diff engine.

pub mod commands;
pub mod config;

pub use commands::dataset::DatasetRef;
pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use commands::engine_query::{
    apply_engine_query, EngineQuery, EngineQueryResult, SnapshotCompareResult,
};
pub use config::EngineConfig;
