//! Lock and override resolution
//!
//! Walks the chain from the root down. A level's override is active only if
//! the level asks for it and no ancestor has locked its descendants. The most
//! specific active level becomes the effective one; the root is effective
//! when nothing below it overrides.

use serde::Serialize;

use super::chain::PolicyChain;
use crate::scope::ScopeLevel;

/// Derived lock/override state of one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelState {
    pub level: ScopeLevel,

    /// The level asked to override and no ancestor forbids it
    pub override_active: bool,

    /// Outermost ancestor whose lock applies to this level
    pub locked_by: Option<ScopeLevel>,
}

impl LevelState {
    /// Whether an editor for this level should be offered at all.
    ///
    /// A locked level's record is ignored during resolution, so there is
    /// nothing meaningful to edit.
    pub fn is_configurable(&self) -> bool {
        self.locked_by.is_none()
    }
}

/// Outcome of lock resolution over a whole chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockState {
    effective: ScopeLevel,
    levels: Vec<LevelState>,
}

impl LockState {
    /// The single level whose record governs the repository.
    pub fn effective_level(&self) -> ScopeLevel {
        self.effective
    }

    /// Per-level state, root first.
    pub fn levels(&self) -> &[LevelState] {
        &self.levels
    }

    pub fn level(&self, level: ScopeLevel) -> Option<&LevelState> {
        self.levels.iter().find(|state| state.level == level)
    }

    /// Whether `level` overrides its parent. Always false for the root.
    pub fn is_override_active(&self, level: ScopeLevel) -> bool {
        self.level(level).is_some_and(|state| state.override_active)
    }

    /// Whether `level` may be configured. The root always may.
    pub fn is_configurable(&self, level: ScopeLevel) -> bool {
        self.level(level).is_some_and(LevelState::is_configurable)
    }

    pub fn locked_by(&self, level: ScopeLevel) -> Option<ScopeLevel> {
        self.level(level).and_then(|state| state.locked_by)
    }
}

/// Resolve which levels override their parent.
///
/// Total over all flag combinations: every chain yields exactly one
/// effective level. Flags a level cannot carry (an override at the root, a
/// lock at the leaf) have no effect here; validation of such records is the
/// job of [`PolicyChain::validate`].
pub fn resolve_locks(chain: &PolicyChain<'_>) -> LockState {
    let root = chain.root();
    let mut effective = root.level;
    let mut locked_by = root.record.children_config_disabled.then_some(root.level);
    let mut levels = vec![LevelState {
        level: root.level,
        override_active: false,
        locked_by: None,
    }];

    for link in chain.descendants() {
        let override_active = locked_by.is_none() && link.record.overwrite_parent_config;
        tracing::debug!(
            level = %link.level,
            requested = link.record.overwrite_parent_config,
            locked_by = ?locked_by,
            override_active,
            "Resolved override"
        );

        if override_active {
            effective = link.level;
        }
        levels.push(LevelState {
            level: link.level,
            override_active,
            locked_by,
        });

        // The lock holds whether or not this level overrides itself.
        if locked_by.is_none() && link.record.children_config_disabled {
            locked_by = Some(link.level);
        }
    }

    tracing::debug!(effective = %effective, "Resolved effective level");
    LockState { effective, levels }
}
