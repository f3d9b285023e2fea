//! Core support library for the mona GitHub CLI.
//!
//! This crate provides the pieces the command-line surface leans on:
//!
//! - [`auth`]: resolving which token and host to use from environment
//!   variables and the persisted hosts configuration
//! - [`config`]: a read-only snapshot of per-host authentication records
//! - [`text`]: RFC 3339 timestamp display, relative ("5 minutes ago") and
//!   layout-based
//!
//! All resolution functions are pure over their inputs apart from reading
//! process environment variables; nothing here writes state.

pub mod auth;
pub mod config;
pub mod logging;
pub mod text;

pub use config::{Config, ConfigError, GitProtocol, HostConfig};
pub use text::TimeError;
