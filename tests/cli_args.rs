//! Integration tests for CLI argument handling
//!
//! Exercises the compiled binary for help/usage behavior and the parser for
//! subcommand handling. Nothing here performs a network call: every
//! invocation either stops at argument parsing or at configuration loading.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
///
/// Credentials are stripped from the environment so no invocation can get
/// past configuration loading.
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_nutrifetch"))
        .args(args)
        .env_remove("FATSECRET_CLIENT_ID")
        .env_remove("FATSECRET_CLIENT_SECRET")
        .output()
        .expect("Failed to execute nutrifetch")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("nutrifetch"), "Help should mention nutrifetch");
    assert!(stdout.contains("nutrition"), "Help should list the nutrition subcommand");
    assert!(stdout.contains("suggest"), "Help should list the suggest subcommand");
}

#[test]
fn test_missing_subcommand_prints_usage_and_fails() {
    let output = run_cli(&[]);
    assert!(!output.status.success(), "Expected bare invocation to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Usage") || stderr.contains("usage"),
        "Should print usage information: {}",
        stderr
    );
}

#[test]
fn test_unknown_subcommand_fails() {
    let output = run_cli(&["defragment"]);
    assert!(!output.status.success());
}

#[test]
fn test_missing_credentials_fail_before_any_request() {
    let output = run_cli(&["nutrition", "kale"]);
    assert!(
        !output.status.success(),
        "Expected missing credentials to fail the run"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("FATSECRET_CLIENT_ID"),
        "Error should name the missing variable: {}",
        stderr
    );
}

#[cfg(test)]
mod unit_tests {
    //! Parser-level tests that don't require running the binary

    use clap::Parser;
    use nutrifetch::cli::{Cli, Command};

    #[test]
    fn test_nutrition_subcommand_captures_food_name() {
        let cli = Cli::parse_from(["nutrifetch", "nutrition", "greek yogurt"]);
        match cli.command {
            Command::Nutrition { food } => assert_eq!(food, "greek yogurt"),
            other => panic!("Expected Nutrition, got {:?}", other),
        }
    }

    #[test]
    fn test_suggest_region_flag_round_trips() {
        let cli = Cli::parse_from(["nutrifetch", "suggest", "chick", "--region", "US"]);
        match cli.command {
            Command::Suggest { region, .. } => assert_eq!(region.as_deref(), Some("US")),
            other => panic!("Expected Suggest, got {:?}", other),
        }
    }

    #[test]
    fn test_no_cache_flag_after_subcommand() {
        let cli = Cli::parse_from(["nutrifetch", "details", "35718", "--no-cache"]);
        assert!(cli.no_cache);
        match cli.command {
            Command::Details { food_id } => assert_eq!(food_id, "35718"),
            other => panic!("Expected Details, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_max_is_rejected() {
        let result = Cli::try_parse_from(["nutrifetch", "search", "kale", "--max", "-2"]);
        assert!(result.is_err());
    }
}
