//! Scripted signature verifier.

use std::cell::RefCell;
use std::collections::HashSet;

use sigcheck_core::VerifierError;
use sigcheck_core::enforce::{Commit, SignatureVerifier, Verification};
use sigcheck_core::policy::VerificationType;

/// A verifier whose answers are fixed up front.
///
/// Commits listed as rejected fail, commits listed as broken make the
/// verifier itself error, everything else passes (or fails, for
/// [`StubVerifier::rejecting_all`]). Every call is recorded.
#[derive(Debug, Default)]
pub struct StubVerifier {
    reject_all: bool,
    rejected: HashSet<String>,
    broken: HashSet<String>,
    calls: RefCell<Vec<(String, VerificationType)>>,
}

impl StubVerifier {
    pub fn accepting() -> Self {
        Self::default()
    }

    pub fn rejecting_all() -> Self {
        Self {
            reject_all: true,
            ..Self::default()
        }
    }

    pub fn rejecting<'a>(commits: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            rejected: commits.into_iter().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    /// Make the verifier error out on `commit`.
    pub fn broken_on(mut self, commit: &str) -> Self {
        self.broken.insert(commit.to_string());
        self
    }

    /// Commit ids the verifier was asked about, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(id, _)| id.clone()).collect()
    }

    /// Verification types the verifier was asked for, in call order.
    pub fn requested_types(&self) -> Vec<VerificationType> {
        self.calls.borrow().iter().map(|(_, t)| *t).collect()
    }
}

impl SignatureVerifier for StubVerifier {
    fn verify(
        &self,
        commit: &Commit,
        verification_type: VerificationType,
    ) -> Result<Verification, VerifierError> {
        self.calls
            .borrow_mut()
            .push((commit.id.clone(), verification_type));

        if self.broken.contains(&commit.id) {
            return Err(format!("key lookup failed for {}", commit.id).into());
        }
        if self.reject_all || self.rejected.contains(&commit.id) {
            return Ok(Verification::failed("stub rejected signature"));
        }
        Ok(Verification::Passed)
    }
}
