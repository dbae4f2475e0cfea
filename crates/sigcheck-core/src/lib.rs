//! Signature-check policy engine
//!
//! Resolves commit-signature policy across a three-level administrative
//! hierarchy and enforces it on pushes:
//!
//! - **Policy model**: per-level [`PolicyRecord`]s with lock and override flags
//! - **Lock resolution**: which levels may override their parent
//! - **Effective policy**: the one record that governs a repository
//! - **Enforcement**: allow or reject a push, delegating signature checks to
//!   an injected [`SignatureVerifier`]
//!
//! # Architecture
//!
//! ```text
//!   policy editors            push pipeline
//!         |                         |
//!   PolicyDocument              PushEvent
//!         |                         |
//!   PolicyChain ── LockState        |
//!         |                         |
//!   EffectivePolicy ───────► enforce::decide ──► Verdict
//!                                   |
//!                           SignatureVerifier
//! ```
//!
//! Everything here is a pure function of its inputs. Resolution for
//! different repositories can run in parallel without coordination.
//!
//! # Example
//!
//! ```
//! use sigcheck_core::enforce::{self, Commit, PushEvent, Verdict, verifier_fn};
//! use sigcheck_core::policy::PolicyRecord;
//! use sigcheck_core::resolve::resolve_effective_policy;
//!
//! let global = PolicyRecord::enabled_for(["main"]);
//! let policy = resolve_effective_policy(&global, &PolicyRecord::default(), &PolicyRecord::default())?;
//!
//! let push = PushEvent::new("main", vec![Commit::new("c0ffee")]);
//! let verdict = enforce::decide(&policy, &push, &verifier_fn(|_, _| Ok(true)))?;
//! assert_eq!(verdict, Verdict::Allow);
//! # Ok::<(), sigcheck_core::Error>(())
//! ```

pub mod enforce;
pub mod error;
pub mod policy;
pub mod resolve;
pub mod scope;

pub use enforce::{Decision, PushEvent, SignatureVerifier, Verdict};
pub use error::{Error, Result, VerifierError};
pub use policy::{PolicyDocument, PolicyRecord, ProtectedBranches, VerificationType};
pub use resolve::{EffectivePolicy, LockState, PolicyChain};
pub use scope::ScopeLevel;
