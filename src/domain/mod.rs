//! Core domain types and the decision engine.

pub mod snapshot;
pub mod selection;
pub mod decision;
pub mod chain;
pub mod variant;
pub mod performance;
pub mod ensemble;
pub mod config_validation;
pub mod error;
