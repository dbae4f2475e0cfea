//! Resolve command implementation

use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use sigcheck_core::{EffectivePolicy, LockState, PolicyDocument};

use crate::error::Result;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveOutput<'a> {
    effective_policy: &'a EffectivePolicy,
    lock_state: &'a LockState,
}

/// Run the resolve command
pub fn run_resolve(policy_path: &Path, json: bool) -> Result<()> {
    let document = PolicyDocument::load(policy_path)?;
    let chain = document.chain();
    let policy = chain.effective_policy()?;
    let lock_state = chain.lock_state();

    if json {
        let output = ResolveOutput {
            effective_policy: &policy,
            lock_state: &lock_state,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Effective Policy".bold());
    println!();
    println!("{}:         {}", "Level".dimmed(), policy.provenance.to_string().cyan());
    println!("{}:       {}", "Enabled".dimmed(), yes_no(policy.enabled));
    println!("{}:  {}", "Verification".dimmed(), policy.verification_type);
    println!("{}:      {}", "Branches".dimmed(), format_branches(&policy));
    println!();

    println!("{}:", "Levels".bold());
    for state in lock_state.levels() {
        let access = match state.locked_by {
            Some(parent) => format!("locked by {parent}").yellow(),
            None => "configurable".green(),
        };
        let marker = if state.level == policy.provenance {
            "*".green()
        } else {
            " ".normal()
        };
        let overriding = if state.override_active { "  overrides parent" } else { "" };
        println!("  {} {:<11} {}{}", marker, state.level.to_string(), access, overriding);
    }

    Ok(())
}

fn yes_no(value: bool) -> colored::ColoredString {
    if value { "yes".green() } else { "no".red() }
}

pub(crate) fn format_branches(policy: &EffectivePolicy) -> String {
    if policy.protected_branches.is_empty() {
        "(none)".to_string()
    } else {
        policy.protected_branches.iter().collect::<Vec<_>>().join(", ")
    }
}
