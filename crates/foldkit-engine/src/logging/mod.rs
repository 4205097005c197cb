//! Logging utilities.
//!
//! Library code logs through the `log` facade only. This module centralizes
//! backend installation (`env_logger`) for hosts and demo binaries.

mod init;

pub use init::{init_logging, LoggingConfig};
