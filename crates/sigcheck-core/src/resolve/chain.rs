//! The ordered chain of policy records resolution walks over

use crate::error::Result;
use crate::policy::PolicyRecord;
use crate::scope::ScopeLevel;

use super::effective::{EffectivePolicy, resolve_effective};
use super::lock::{LockState, resolve_locks};

/// One level of the chain and the record supplied for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainLink<'a> {
    pub level: ScopeLevel,
    pub record: &'a PolicyRecord,
}

/// Records ordered from the root level down to the most specific one.
///
/// The chain borrows the records; resolution never mutates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyChain<'a> {
    root: ChainLink<'a>,
    descendants: Vec<ChainLink<'a>>,
}

impl<'a> PolicyChain<'a> {
    pub fn new(
        global: &'a PolicyRecord,
        namespace: &'a PolicyRecord,
        repository: &'a PolicyRecord,
    ) -> Self {
        Self {
            root: ChainLink {
                level: ScopeLevel::Global,
                record: global,
            },
            descendants: vec![
                ChainLink {
                    level: ScopeLevel::Namespace,
                    record: namespace,
                },
                ChainLink {
                    level: ScopeLevel::Repository,
                    record: repository,
                },
            ],
        }
    }

    pub fn root(&self) -> ChainLink<'a> {
        self.root
    }

    /// Every level below the root, most general first.
    pub fn descendants(&self) -> &[ChainLink<'a>] {
        &self.descendants
    }

    /// All links, root first.
    pub fn links(&self) -> impl Iterator<Item = ChainLink<'a>> + '_ {
        std::iter::once(self.root).chain(self.descendants.iter().copied())
    }

    pub fn record(&self, level: ScopeLevel) -> Option<&'a PolicyRecord> {
        self.links()
            .find(|link| link.level == level)
            .map(|link| link.record)
    }

    /// Validate every record against the rules of its level.
    pub fn validate(&self) -> Result<()> {
        self.links().try_for_each(|link| link.record.validate(link.level))
    }

    /// Which levels override their parent, and which one is effective.
    pub fn lock_state(&self) -> LockState {
        resolve_locks(self)
    }

    /// The policy that governs the repository at the end of the chain.
    pub fn effective_policy(&self) -> Result<EffectivePolicy> {
        resolve_effective(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_are_ordered_root_first() {
        let (g, n, r) = (
            PolicyRecord::default(),
            PolicyRecord::enabled_for(["main"]),
            PolicyRecord::default(),
        );
        let chain = PolicyChain::new(&g, &n, &r);
        let levels: Vec<ScopeLevel> = chain.links().map(|link| link.level).collect();
        assert_eq!(levels, ScopeLevel::ALL);
        assert_eq!(chain.record(ScopeLevel::Namespace), Some(&n));
    }

    #[test]
    fn test_validate_reports_first_bad_level() {
        let g = PolicyRecord::default().overriding_parent();
        let n = PolicyRecord::default();
        let r = PolicyRecord::default().locking_children();
        let err = PolicyChain::new(&g, &n, &r).validate().unwrap_err();
        assert!(err.to_string().starts_with("Invalid global policy"));
    }
}
