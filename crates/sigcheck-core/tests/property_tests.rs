use proptest::prelude::*;
use sigcheck_core::ScopeLevel;
use sigcheck_core::enforce::{self, Commit, PushEvent, Verdict};
use sigcheck_core::policy::{PolicyRecord, ProtectedBranches, VerificationType, matches};
use sigcheck_core::resolve::{PolicyChain, resolve_effective_policy, resolve_lock_state};
use sigcheck_test_utils::verifier::StubVerifier;

fn verification_type() -> impl Strategy<Value = VerificationType> {
    prop_oneof![
        Just(VerificationType::AnySignature),
        Just(VerificationType::ScmUserSignature),
    ]
}

fn pattern() -> impl Strategy<Value = String> {
    "[a-z*/]{1,8}"
}

/// A record that is valid for `level`.
fn record_for(level: ScopeLevel) -> impl Strategy<Value = PolicyRecord> {
    (
        any::<bool>(),
        prop::collection::vec(pattern(), 0..4),
        verification_type(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(move |(enabled, branches, verification_type, lock, overwrite)| PolicyRecord {
            enabled,
            protected_branches: ProtectedBranches::new(branches),
            verification_type,
            children_config_disabled: lock && level.can_lock(),
            overwrite_parent_config: overwrite && level.can_override(),
        })
}

fn records() -> impl Strategy<Value = (PolicyRecord, PolicyRecord, PolicyRecord)> {
    (
        record_for(ScopeLevel::Global),
        record_for(ScopeLevel::Namespace),
        record_for(ScopeLevel::Repository),
    )
}

proptest! {
    #[test]
    fn resolution_is_total_and_deterministic((g, n, r) in records()) {
        let first = resolve_lock_state(&g, &n, &r);
        let second = resolve_lock_state(&g, &n, &r);
        prop_assert_eq!(&first, &second);

        // Exactly one effective level: the root, or the most specific active override.
        let active: Vec<ScopeLevel> = first
            .levels()
            .iter()
            .filter(|state| state.override_active)
            .map(|state| state.level)
            .collect();
        let expected = active.last().copied().unwrap_or(ScopeLevel::Global);
        prop_assert_eq!(first.effective_level(), expected);
    }

    #[test]
    fn global_lock_always_resolves_to_global((g, n, r) in records()) {
        let g = PolicyRecord { children_config_disabled: true, ..g };
        prop_assert_eq!(resolve_lock_state(&g, &n, &r).effective_level(), ScopeLevel::Global);
    }

    #[test]
    fn override_active_only_without_ancestor_lock((g, n, r) in records()) {
        let state = resolve_lock_state(&g, &n, &r);
        prop_assert_eq!(
            state.is_override_active(ScopeLevel::Namespace),
            n.overwrite_parent_config && !g.children_config_disabled
        );
        prop_assert_eq!(
            state.is_override_active(ScopeLevel::Repository),
            r.overwrite_parent_config && !g.children_config_disabled && !n.children_config_disabled
        );
    }

    #[test]
    fn provenance_matches_lock_resolution((g, n, r) in records()) {
        let chain = PolicyChain::new(&g, &n, &r);
        let policy = resolve_effective_policy(&g, &n, &r).unwrap();
        let level = chain.lock_state().effective_level();

        prop_assert_eq!(policy.provenance, level);
        let source = chain.record(level).unwrap();
        prop_assert_eq!(policy.enabled, source.enabled);
        prop_assert_eq!(&policy.protected_branches, &source.protected_branches);
        prop_assert_eq!(policy.verification_type, source.verification_type);
    }

    #[test]
    fn disabled_policy_always_allows(
        (g, n, r) in records(),
        branch in "[a-z/]{1,12}",
        ids in prop::collection::vec("[0-9a-f]{6}", 0..5),
    ) {
        let mut policy = resolve_effective_policy(&g, &n, &r).unwrap();
        policy.enabled = false;
        let push = PushEvent::new(branch, ids.iter().map(Commit::new).collect());

        let verifier = StubVerifier::rejecting_all();
        prop_assert_eq!(enforce::decide(&policy, &push, &verifier).unwrap(), Verdict::Allow);
        prop_assert!(verifier.calls().is_empty());
    }

    #[test]
    fn literal_pattern_matches_only_itself(name in "[a-z/.-]{0,12}", other in "[a-z/.-]{0,12}") {
        prop_assert!(matches(&name, &name));
        prop_assert_eq!(matches(&name, &other), name == other);
    }

    #[test]
    fn star_suffix_matches_every_extension(prefix in "[a-z/]{0,8}", rest in "[a-z/.]{0,8}") {
        let pattern = format!("{prefix}*");
        let branch = format!("{prefix}{rest}");
        prop_assert!(matches(&pattern, &branch));
    }
}
