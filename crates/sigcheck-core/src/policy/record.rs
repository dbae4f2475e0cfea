//! Per-level signature-check policy records

use std::fmt;

use serde::{Deserialize, Serialize};

use super::branch::ProtectedBranches;
use crate::error::{Error, Result};
use crate::scope::ScopeLevel;

/// The class of signature a protected branch accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationType {
    /// Any cryptographically valid signature.
    #[default]
    AnySignature,
    /// A verified signature whose key belongs to a registered platform user.
    ScmUserSignature,
}

impl fmt::Display for VerificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationType::AnySignature => write!(f, "ANY_SIGNATURE"),
            VerificationType::ScmUserSignature => write!(f, "SCM_USER_SIGNATURE"),
        }
    }
}

/// A signature-check policy as edited at one scope level.
///
/// The same shape is used at every level. `overwrite_parent_config` is only
/// meaningful below the global level and `children_config_disabled` only
/// above the repository level; [`PolicyRecord::validate`] rejects records
/// that set a flag their level cannot carry.
///
/// Disabling a record keeps its branches and verification type so the
/// policy can be re-enabled unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyRecord {
    /// Whether signature checking is active at this level
    pub enabled: bool,

    /// Branch patterns the policy applies to
    pub protected_branches: ProtectedBranches,

    /// Signature class required on protected branches
    pub verification_type: VerificationType,

    /// Lock: descendants may not override this level
    pub children_config_disabled: bool,

    /// Intent to replace the parent level's policy
    pub overwrite_parent_config: bool,
}

impl PolicyRecord {
    /// An enabled record protecting the given branch patterns.
    pub fn enabled_for<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: true,
            protected_branches: ProtectedBranches::new(patterns),
            ..Self::default()
        }
    }

    pub fn with_verification_type(mut self, verification_type: VerificationType) -> Self {
        self.verification_type = verification_type;
        self
    }

    /// Set the lock flag (`childrenConfigDisabled`).
    pub fn locking_children(mut self) -> Self {
        self.children_config_disabled = true;
        self
    }

    /// Set the override flag (`overwriteParentConfig`).
    pub fn overriding_parent(mut self) -> Self {
        self.overwrite_parent_config = true;
        self
    }

    /// Check the record against the rules of the level it was supplied for.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the record carries an override
    /// flag at the global level, a lock flag at the repository level, or an
    /// empty branch pattern.
    pub fn validate(&self, level: ScopeLevel) -> Result<()> {
        if self.overwrite_parent_config && !level.can_override() {
            return Err(Error::configuration(
                level,
                "overwriteParentConfig is set but the level has no parent",
            ));
        }

        if self.children_config_disabled && !level.can_lock() {
            return Err(Error::configuration(
                level,
                "childrenConfigDisabled is set but the level has no children",
            ));
        }

        if self.protected_branches.iter().any(|pattern| pattern.is_empty()) {
            return Err(Error::configuration(
                level,
                "protectedBranches contains an empty pattern",
            ));
        }

        Ok(())
    }
}
