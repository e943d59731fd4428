//! Port traits: the engine's boundary to configuration and input files.

pub mod config_port;
pub mod performance_port;
pub mod snapshot_port;
