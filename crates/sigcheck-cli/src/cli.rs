//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// sigcheck - Resolve and enforce commit-signature policies
#[derive(Parser, Debug)]
#[command(name = "sigcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show which level's policy applies and which levels are locked
    ///
    /// The policy document is a TOML or JSON file with `global`,
    /// `namespace` and `repository` sections.
    Resolve {
        /// Policy document (.toml or .json)
        policy: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show what a push to a branch would require
    Requirement {
        /// Policy document (.toml or .json)
        policy: PathBuf,

        /// Target branch name
        #[arg(short, long)]
        branch: String,
    },

    /// Check a push against the effective policy
    ///
    /// Exits with status 1 when the push is rejected.
    ///
    /// Examples:
    ///   sigcheck check policy.toml push.json
    ///   sigcheck check policy.toml push.json --json
    Check {
        /// Policy document (.toml or .json)
        policy: PathBuf,

        /// Push description: branch and commits with signature results
        push: PathBuf,

        /// Output as JSON for CI/CD integration
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_check_with_json() {
        let cli = Cli::parse_from(["sigcheck", "check", "policy.toml", "push.json", "--json"]);
        assert_eq!(
            cli.command,
            Commands::Check {
                policy: PathBuf::from("policy.toml"),
                push: PathBuf::from("push.json"),
                json: true,
            }
        );
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_requirement_with_global_verbose() {
        let cli = Cli::parse_from(["sigcheck", "requirement", "p.toml", "-b", "main", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Requirement { branch, .. } if branch == "main"));
    }
}
