//! Policy records and branch patterns
//!
//! This module holds the data the resolution engine works on:
//!
//! - [`PolicyRecord`] - the policy as edited at one scope level
//! - [`ProtectedBranches`] - the pattern set a policy applies to
//! - [`PolicyDocument`] - the three records for one repository, parsed
//!   from TOML or JSON

mod branch;
mod document;
mod record;

pub use branch::{ProtectedBranches, matches, matches_any};
pub use document::{PolicyDocument, load_file};
pub use record::{PolicyRecord, VerificationType};
