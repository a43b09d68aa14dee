//! # routegen-cli
//!
//! Command-line tool that scaffolds FastAPI route modules.
//!
//! This crate provides the `routegen` binary:
//!
//! | Command | Description |
//! |---------|-------------|
//! | `routegen create-route [name]` | Generate a CRUD route module and register it |
//!
//! Global flags: `--root <dir>`, `--config <file>`, `-v/--verbose`.
//!
//! ## Architecture
//!
//! - [`cli`]: clap definitions
//! - [`config`]: project root discovery and `routegen.yaml` layout
//! - [`commands::resolve`]: name/prefix/tags resolution behind a [`commands::resolve::Prompt`]
//! - [`commands::scaffold`]: conflict check, rendering and aggregator patching
//! - [`commands::aggregator`]: line model of the aggregator file
//! - [`commands::templates`]: template helpers and the route module template

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

pub use error::ScaffoldError;
