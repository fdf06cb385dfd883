//! Command implementations for the twinpack CLI.
//!
//! - [`resolve`] - Render the bundler configuration
//! - [`classify`] - Explain one asset's processing
//! - [`check`] - Validate configuration and backend selection
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and the backend selection signals read once by `main`.

pub mod check;
pub mod classify;
pub mod resolve;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use classify::execute as classify_execute;
pub use resolve::execute as resolve_execute;
