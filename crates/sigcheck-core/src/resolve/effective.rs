//! Effective policy resolution

use serde::{Deserialize, Serialize};

use super::chain::PolicyChain;
use crate::error::Result;
use crate::policy::{PolicyRecord, ProtectedBranches, VerificationType};
use crate::scope::ScopeLevel;

/// The single policy enforced for a repository.
///
/// Carries the fields of the record it was taken from, plus the level that
/// record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectivePolicy {
    pub enabled: bool,
    pub protected_branches: ProtectedBranches,
    pub verification_type: VerificationType,

    /// Level whose record produced this policy
    pub provenance: ScopeLevel,
}

impl EffectivePolicy {
    pub fn from_record(provenance: ScopeLevel, record: &PolicyRecord) -> Self {
        Self {
            enabled: record.enabled,
            protected_branches: record.protected_branches.clone(),
            verification_type: record.verification_type,
            provenance,
        }
    }
}

/// Resolve the effective policy for the repository at the end of `chain`.
///
/// The selected record is taken whole, including `enabled = false`: a level
/// that overrides with a disabled record switches checking off rather than
/// falling back to its parent.
///
/// # Errors
///
/// Returns [`Error::Configuration`](crate::Error::Configuration) if any
/// record in the chain violates the rules of its level, even when that
/// record would not be selected.
pub fn resolve_effective(chain: &PolicyChain<'_>) -> Result<EffectivePolicy> {
    chain.validate()?;

    let level = chain.lock_state().effective_level();
    let record = chain.record(level).unwrap_or(chain.root().record);

    tracing::debug!(
        provenance = %level,
        enabled = record.enabled,
        verification_type = %record.verification_type,
        "Resolved effective policy"
    );
    Ok(EffectivePolicy::from_record(level, record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_takes_fields_of_selected_level() {
        let g = PolicyRecord::enabled_for(["main"]);
        let n = PolicyRecord::enabled_for(["develop"])
            .with_verification_type(VerificationType::ScmUserSignature)
            .overriding_parent();
        let r = PolicyRecord::default();

        let policy = resolve_effective(&PolicyChain::new(&g, &n, &r)).unwrap();
        assert_eq!(policy, EffectivePolicy::from_record(ScopeLevel::Namespace, &n));
        assert!(policy.protected_branches.is_protected("develop"));
        assert!(!policy.protected_branches.is_protected("main"));
    }

    #[test]
    fn test_disabled_override_switches_checking_off() {
        let g = PolicyRecord::enabled_for(["main"]);
        let n = PolicyRecord::default().overriding_parent();
        let r = PolicyRecord::default();

        let policy = resolve_effective(&PolicyChain::new(&g, &n, &r)).unwrap();
        assert_eq!(policy.provenance, ScopeLevel::Namespace);
        assert!(!policy.enabled);
    }

    #[test]
    fn test_rejects_malformed_record_even_if_unselected() {
        let g = PolicyRecord::enabled_for(["main"]).locking_children();
        let n = PolicyRecord::default();
        let r = PolicyRecord::default().locking_children();

        let err = resolve_effective(&PolicyChain::new(&g, &n, &r)).unwrap_err();
        assert!(matches!(err, Error::Configuration { level: ScopeLevel::Repository, .. }));
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let g = PolicyRecord::enabled_for(["main"]);
        let n = PolicyRecord::default().overriding_parent().locking_children();
        let r = PolicyRecord::enabled_for(["x"]).overriding_parent();
        let before = (g.clone(), n.clone(), r.clone());

        let _ = resolve_effective(&PolicyChain::new(&g, &n, &r)).unwrap();
        assert_eq!((g, n, r), before);
    }
}
