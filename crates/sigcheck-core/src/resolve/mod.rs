//! Hierarchical policy resolution
//!
//! Resolution is a pure function of the three records. Nothing is cached:
//! callers recompute whenever a record changes.
//!
//! # Precedence
//!
//! ```text
//! global ──lock──► namespace ──lock──► repository
//!    ▲                 │                   │
//!    └──── override ───┘◄──── override ────┘
//! ```
//!
//! A level replaces everything above it when it sets `overwriteParentConfig`
//! and no ancestor has set `childrenConfigDisabled`. The most specific such
//! level wins; otherwise the global record applies.
//!
//! # Example
//!
//! ```
//! use sigcheck_core::policy::PolicyRecord;
//! use sigcheck_core::resolve::resolve_effective_policy;
//! use sigcheck_core::ScopeLevel;
//!
//! let global = PolicyRecord::enabled_for(["main"]);
//! let namespace = PolicyRecord::default().locking_children();
//! let repository = PolicyRecord::default().overriding_parent();
//!
//! let policy = resolve_effective_policy(&global, &namespace, &repository)?;
//! assert_eq!(policy.provenance, ScopeLevel::Global);
//! # Ok::<(), sigcheck_core::Error>(())
//! ```

mod chain;
mod effective;
mod lock;

pub use chain::{ChainLink, PolicyChain};
pub use effective::{EffectivePolicy, resolve_effective};
pub use lock::{LevelState, LockState, resolve_locks};

use crate::error::Result;
use crate::policy::PolicyRecord;

/// Resolve lock/override state for a global/namespace/repository triple.
pub fn resolve_lock_state(
    global: &PolicyRecord,
    namespace: &PolicyRecord,
    repository: &PolicyRecord,
) -> LockState {
    PolicyChain::new(global, namespace, repository).lock_state()
}

/// Resolve the effective policy for a global/namespace/repository triple.
pub fn resolve_effective_policy(
    global: &PolicyRecord,
    namespace: &PolicyRecord,
    repository: &PolicyRecord,
) -> Result<EffectivePolicy> {
    PolicyChain::new(global, namespace, repository).effective_policy()
}
