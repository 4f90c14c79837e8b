//! Pipeline orchestration for provenance registration.
//!
//! This module provides shared orchestration logic for the acquire → parse →
//! index → graph workflow, reducing duplication across CLI command handlers.

mod acquire;
mod run;

pub use acquire::{acquire_document, source_for_input, ParsedDocument};
pub use run::{run_register, RegisterRun};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - every claim was committed (or strict mode is off)
    pub const SUCCESS: i32 = 0;
    /// One or more claims were skipped in strict mode
    pub const CLAIMS_SKIPPED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 2;
}
