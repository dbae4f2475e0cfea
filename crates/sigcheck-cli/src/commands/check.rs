//! Check and requirement command implementations

use std::path::Path;

use colored::Colorize;
use sigcheck_core::enforce::{self, SignatureStatusVerifier};
use sigcheck_core::policy::load_file;
use sigcheck_core::{PolicyDocument, PushEvent, Verdict};

use super::resolve::format_branches;
use crate::error::{CliError, Result};

/// Run the requirement command
pub fn run_requirement(policy_path: &Path, branch: &str) -> Result<()> {
    let document = PolicyDocument::load(policy_path)?;
    let policy = document.chain().effective_policy()?;

    match enforce::requirement(&policy, branch) {
        Verdict::RequireVerification(verification_type) => {
            println!(
                "{} {} requires {} ({} policy)",
                "!".yellow().bold(),
                branch.cyan(),
                verification_type.to_string().bold(),
                policy.provenance
            );
        }
        _ => {
            println!(
                "{} {} is not protected ({} policy, branches: {})",
                "+".green(),
                branch.cyan(),
                policy.provenance,
                format_branches(&policy)
            );
        }
    }

    Ok(())
}

/// Run the check command
///
/// Signatures are judged from the check results recorded in the push
/// description, using [`SignatureStatusVerifier`].
pub fn run_check(policy_path: &Path, push_path: &Path, json: bool) -> Result<()> {
    let document = PolicyDocument::load(policy_path)?;
    let policy = document.chain().effective_policy()?;
    let push: PushEvent = load_file(push_path)?;
    tracing::debug!(branch = %push.branch, commits = push.commits.len(), "Checking push");

    let decision = enforce::evaluate(&policy, &push, &SignatureStatusVerifier)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
    } else {
        match &decision.verdict {
            Verdict::Reject(reason) => {
                println!("{} push to {} rejected", "x".red().bold(), push.branch.cyan());
                println!("  {}: {}", "Commit".dimmed(), reason.commit);
                println!("  {}: {}", "Reason".dimmed(), reason.message);
                println!("  {}: {}", "Required".dimmed(), reason.verification_type);
                println!("  {}: {}", "Policy".dimmed(), decision.provenance);
            }
            _ => {
                let detail = match &decision.matched_pattern {
                    Some(pattern) => format!("{} commit(s) verified against '{}'", push.commits.len(), pattern),
                    None => "branch not protected or checking disabled".to_string(),
                };
                println!("{} push to {} allowed ({})", "+".green().bold(), push.branch.cyan(), detail);
            }
        }
    }

    if decision.verdict.is_allow() {
        Ok(())
    } else {
        Err(CliError::user(decision.verdict.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigcheck_test_utils::fixtures::TestDocuments;

    const POLICY: &str = r#"
[global]
enabled = true
protectedBranches = ["main"]
"#;

    #[test]
    fn run_check_allows_signed_push() {
        let documents = TestDocuments::new();
        let policy = documents.write("policy.toml", POLICY);
        let push = documents.write(
            "push.json",
            r#"{"branch": "main", "commits": [
                {"id": "c1", "signatures": [{"keyId": "k1", "status": "VERIFIED", "owner": "arthur"}]}
            ]}"#,
        );

        assert!(run_check(&policy, &push, false).is_ok());
    }

    #[test]
    fn run_check_fails_on_rejection() {
        let documents = TestDocuments::new();
        let policy = documents.write("policy.toml", POLICY);
        let push = documents.write("push.json", r#"{"branch": "main", "commits": [{"id": "c1"}]}"#);

        let err = run_check(&policy, &push, true).unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
        assert_eq!(
            err.to_string(),
            "reject: commit c1 rejected: missing a signature (required: ANY_SIGNATURE)"
        );
    }

    #[test]
    fn run_requirement_accepts_unprotected_branch() {
        let documents = TestDocuments::new();
        let policy = documents.write("policy.toml", POLICY);
        assert!(run_requirement(&policy, "feature/x").is_ok());
    }
}
