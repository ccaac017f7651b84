//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `seed` - Seed reference data and sample accounts

pub mod args;

pub use args::{Cli, Commands};
