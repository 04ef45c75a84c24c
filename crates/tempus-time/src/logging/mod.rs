//! Logging utilities.
//!
//! Centralizes logger initialization for binaries built on this crate. The
//! library itself only emits through the `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig, TimestampPrecision};
