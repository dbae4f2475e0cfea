//! Administrative scope levels
//!
//! Policies are edited independently at three levels. Precedence grows with
//! specificity, subject to the lock and override flags of each level.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A level in the administrative hierarchy.
///
/// The derived ordering is the precedence order: `Global < Namespace < Repository`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeLevel {
    /// Platform-wide defaults.
    Global,
    /// Settings shared by every repository in a namespace.
    Namespace,
    /// Settings for a single repository.
    Repository,
}

impl ScopeLevel {
    /// All levels from root to leaf.
    pub const ALL: [ScopeLevel; 3] = [
        ScopeLevel::Global,
        ScopeLevel::Namespace,
        ScopeLevel::Repository,
    ];

    /// The level this one inherits from, if any.
    pub fn parent(self) -> Option<ScopeLevel> {
        match self {
            ScopeLevel::Global => None,
            ScopeLevel::Namespace => Some(ScopeLevel::Global),
            ScopeLevel::Repository => Some(ScopeLevel::Namespace),
        }
    }

    /// The level directly below this one, if any.
    pub fn child(self) -> Option<ScopeLevel> {
        match self {
            ScopeLevel::Global => Some(ScopeLevel::Namespace),
            ScopeLevel::Namespace => Some(ScopeLevel::Repository),
            ScopeLevel::Repository => None,
        }
    }

    /// Whether a record at this level may express `overwriteParentConfig`.
    pub fn can_override(self) -> bool {
        self.parent().is_some()
    }

    /// Whether a record at this level may express `childrenConfigDisabled`.
    pub fn can_lock(self) -> bool {
        self.child().is_some()
    }
}

impl fmt::Display for ScopeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeLevel::Global => write!(f, "global"),
            ScopeLevel::Namespace => write!(f, "namespace"),
            ScopeLevel::Repository => write!(f, "repository"),
        }
    }
}
