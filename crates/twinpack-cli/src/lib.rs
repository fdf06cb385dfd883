//! twinpack CLI - one build description, two bundler backends.
//!
//! This crate provides the `twinpack` command. It loads the declarative
//! build description, reads the `WEBPACK`/`RSPACK` selection signals and
//! runs the resolver from `twinpack-resolver`.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - `resolve`, `classify` and `check`
//! - [`error`] - error types with actionable hints
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages
//!
//! # Example
//!
//! ```rust
//! use twinpack_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
