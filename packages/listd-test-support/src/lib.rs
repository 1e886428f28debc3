//! Test support utilities for listd
//!
//! Shared between the crate's integration test binaries: unified logging
//! initialization and assertions over problem-details error responses.

pub mod problem_details;
pub mod test_logging;
