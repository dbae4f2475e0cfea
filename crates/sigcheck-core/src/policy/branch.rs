//! Protected-branch patterns
//!
//! Patterns are glob-like: `*` stands for any sequence of characters,
//! including `/`, and the pattern must cover the whole branch name.
//! Matching is case-sensitive.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Returns true if `pattern` matches the full `branch` name.
///
/// # Example
///
/// ```
/// use sigcheck_core::policy::matches;
///
/// assert!(matches("release/*", "release/1.0"));
/// assert!(!matches("release/*", "main"));
/// ```
pub fn matches(pattern: &str, branch: &str) -> bool {
    let mut segments = pattern.split('*');
    let head = segments.next().unwrap_or_default();
    let rest: Vec<&str> = segments.collect();

    let Some((tail, middle)) = rest.split_last() else {
        return pattern == branch;
    };

    if branch.len() < head.len() + tail.len()
        || !branch.starts_with(head)
        || !branch.ends_with(tail)
    {
        return false;
    }

    // Middle segments must appear in order between the anchored head and tail.
    let mut window = &branch[head.len()..branch.len() - tail.len()];
    for segment in middle {
        match window.find(segment) {
            Some(pos) => window = &window[pos + segment.len()..],
            None => return false,
        }
    }
    true
}

/// Returns true if any of `patterns` matches `branch`.
///
/// An empty pattern collection matches nothing.
pub fn matches_any<'a, I>(patterns: I, branch: &str) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    patterns.into_iter().any(|pattern| matches(pattern, branch))
}

/// The set of branch patterns a policy applies to.
///
/// Duplicates collapse; iteration order is lexicographic so resolution
/// output is stable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtectedBranches(BTreeSet<String>);

impl ProtectedBranches {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(patterns.into_iter().map(Into::into).collect())
    }

    /// Add a pattern. Returns false if it was already present.
    pub fn insert(&mut self, pattern: impl Into<String>) -> bool {
        self.0.insert(pattern.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the first pattern (in set order) that matches `branch`.
    pub fn find_match(&self, branch: &str) -> Option<&str> {
        self.iter().find(|pattern| matches(pattern, branch))
    }

    /// Returns true if `branch` is covered by any pattern in the set.
    pub fn is_protected(&self, branch: &str) -> bool {
        matches_any(self.iter(), branch)
    }
}

impl<S: Into<String>> FromIterator<S> for ProtectedBranches {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}
