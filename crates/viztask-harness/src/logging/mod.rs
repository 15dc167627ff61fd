//! Logging initialization.
//!
//! Thin wrapper over `env_logger` so hosts get consistent output without
//! wiring the logger themselves.

mod init;

pub use init::{LoggingConfig, init_logging};
