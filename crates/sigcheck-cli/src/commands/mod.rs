//! Command implementations for sigcheck-cli

pub mod check;
pub mod resolve;

pub use check::{run_check, run_requirement};
pub use resolve::run_resolve;
