//! klm-engine: multi-variant technical-signal decision engine.
//!
//! Hexagonal architecture: the pure engine in [`domain`], port traits in
//! [`ports`], file-backed implementations in [`adapters`], and the command
//! line front end in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
