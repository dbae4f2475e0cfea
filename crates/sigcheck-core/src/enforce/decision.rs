//! Push enforcement decisions

use std::fmt;

use serde::{Deserialize, Serialize};

use super::verifier::{Commit, SignatureVerifier, Verification};
use crate::error::{Error, Result};
use crate::policy::VerificationType;
use crate::resolve::EffectivePolicy;
use crate::scope::ScopeLevel;

/// A push attempt: the target branch and the commits it would add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushEvent {
    pub branch: String,
    #[serde(default)]
    pub commits: Vec<Commit>,
}

impl PushEvent {
    pub fn new(branch: impl Into<String>, commits: Vec<Commit>) -> Self {
        Self {
            branch: branch.into(),
            commits,
        }
    }
}

/// Why a push was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectReason {
    /// First commit, in push order, that failed verification
    pub commit: String,
    pub verification_type: VerificationType,
    pub message: String,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "commit {} rejected: {} (required: {})",
            self.commit, self.message, self.verification_type
        )
    }
}

/// What the enforcement pipeline must do with a push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "detail", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// The push may proceed.
    Allow,
    /// Commits to this branch need a signature of the given type.
    /// Only returned by [`requirement`], before commits are inspected.
    RequireVerification(VerificationType),
    /// The push must be blocked.
    Reject(RejectReason),
}

impl Verdict {
    pub fn is_allow(&self) -> bool {
        matches!(self, Verdict::Allow)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Allow => write!(f, "allow"),
            Verdict::RequireVerification(verification_type) => {
                write!(f, "require verification ({verification_type})")
            }
            Verdict::Reject(reason) => write!(f, "reject: {reason}"),
        }
    }
}

/// A verdict together with what led to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub verdict: Verdict,
    /// Level whose policy was applied
    pub provenance: ScopeLevel,
    pub branch: String,
    /// Pattern that made the branch protected, if any
    pub matched_pattern: Option<String>,
}

/// What a push to `branch` would need, without looking at commits.
///
/// Returns [`Verdict::Allow`] when the policy is disabled or the branch is
/// not protected, and [`Verdict::RequireVerification`] otherwise.
pub fn requirement(policy: &EffectivePolicy, branch: &str) -> Verdict {
    if policy.enabled && policy.protected_branches.is_protected(branch) {
        Verdict::RequireVerification(policy.verification_type)
    } else {
        Verdict::Allow
    }
}

/// Decide whether `push` may proceed under `policy`.
///
/// Commits are checked in push order; the first one that fails verification
/// is named in the [`Verdict::Reject`].
///
/// # Errors
///
/// Returns [`Error::VerificationCapability`] when the verifier cannot decide
/// for some commit. This is distinct from a rejection.
pub fn decide<V>(policy: &EffectivePolicy, push: &PushEvent, verifier: &V) -> Result<Verdict>
where
    V: SignatureVerifier + ?Sized,
{
    evaluate(policy, push, verifier).map(|decision| decision.verdict)
}

/// Like [`decide`], but also reports provenance and the matched pattern.
pub fn evaluate<V>(policy: &EffectivePolicy, push: &PushEvent, verifier: &V) -> Result<Decision>
where
    V: SignatureVerifier + ?Sized,
{
    let mut decision = Decision {
        verdict: Verdict::Allow,
        provenance: policy.provenance,
        branch: push.branch.clone(),
        matched_pattern: None,
    };

    if !policy.enabled {
        tracing::debug!(provenance = %policy.provenance, "Signature check disabled");
        return Ok(decision);
    }

    let Some(pattern) = policy.protected_branches.find_match(&push.branch) else {
        tracing::debug!(branch = %push.branch, "Branch is not protected");
        return Ok(decision);
    };
    decision.matched_pattern = Some(pattern.to_string());

    let verification_type = policy.verification_type;
    for commit in &push.commits {
        let verification = verifier
            .verify(commit, verification_type)
            .map_err(|source| Error::VerificationCapability {
                commit: commit.id.clone(),
                source,
            })?;

        tracing::debug!(
            commit = %commit.id,
            verification_type = %verification_type,
            passed = verification.is_passed(),
            "Verified commit"
        );

        if let Verification::Failed { message } = verification {
            let reason = RejectReason {
                commit: commit.id.clone(),
                verification_type,
                message,
            };
            tracing::warn!(branch = %push.branch, provenance = %policy.provenance, "{}", reason);
            decision.verdict = Verdict::Reject(reason);
            return Ok(decision);
        }
    }

    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enforce::verifier_fn;
    use crate::policy::{PolicyRecord, ProtectedBranches};

    fn policy(enabled: bool, branches: &[&str]) -> EffectivePolicy {
        EffectivePolicy {
            enabled,
            protected_branches: ProtectedBranches::new(branches.iter().copied()),
            verification_type: VerificationType::AnySignature,
            provenance: ScopeLevel::Global,
        }
    }

    #[test]
    fn test_requirement_for_protected_branch() {
        let policy = policy(true, &["main", "release/*"]);
        assert_eq!(
            requirement(&policy, "release/1.0"),
            Verdict::RequireVerification(VerificationType::AnySignature)
        );
        assert_eq!(requirement(&policy, "feature/x"), Verdict::Allow);
    }

    #[test]
    fn test_requirement_for_disabled_policy() {
        let record = PolicyRecord {
            enabled: false,
            ..PolicyRecord::enabled_for(["main"])
        };
        let policy = EffectivePolicy::from_record(ScopeLevel::Namespace, &record);
        assert_eq!(requirement(&policy, "main"), Verdict::Allow);
    }

    #[test]
    fn test_empty_push_to_protected_branch_is_allowed() {
        let verifier = verifier_fn(|_, _| Ok(false));
        let push = PushEvent::new("main", Vec::new());
        let decision = evaluate(&policy(true, &["main"]), &push, &verifier).unwrap();
        assert_eq!(decision.verdict, Verdict::Allow);
        assert_eq!(decision.matched_pattern.as_deref(), Some("main"));
    }

    #[test]
    fn test_reject_reason_display() {
        let reason = RejectReason {
            commit: "abc123".to_string(),
            verification_type: VerificationType::ScmUserSignature,
            message: "missing a signature".to_string(),
        };
        assert_eq!(
            Verdict::Reject(reason).to_string(),
            "reject: commit abc123 rejected: missing a signature (required: SCM_USER_SIGNATURE)"
        );
    }

    #[test]
    fn test_verdict_serializes_with_tag() {
        let json = serde_json::to_value(Verdict::RequireVerification(
            VerificationType::AnySignature,
        ))
        .unwrap();
        assert_eq!(json["verdict"], "REQUIRE_VERIFICATION");
        assert_eq!(json["detail"], "ANY_SIGNATURE");
        assert_eq!(serde_json::to_value(Verdict::Allow).unwrap()["verdict"], "ALLOW");
    }
}
