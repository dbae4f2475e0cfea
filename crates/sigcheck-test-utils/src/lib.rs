//! Shared test utilities for the sigcheck workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: policy records, commits and on-disk policy documents
//! - [`verifier`]: [`StubVerifier`](verifier::StubVerifier) with scripted outcomes

pub mod fixtures;
pub mod verifier;
