//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub fn execute(ctx: &mut CliContext, ...) -> Result<()>`
//! - Thin wrappers that query the status object and format the result
//!
//! Handlers should NOT probe the filesystem or read settings themselves.

pub mod aliases;
pub mod config;
pub mod paths;
pub mod profile;
pub mod status;
