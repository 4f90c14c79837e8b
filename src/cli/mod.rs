//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod inspect;
mod register;

pub use inspect::run_inspect;
pub use register::run_register;

// Re-export config types used by handlers
pub use crate::config::{InspectConfig, RegisterConfig};
