//! Integration tests comparing CLI output with the core Display
//! implementations the MCP server also uses.

use std::process::Command;

use lesson_core::{
    display::{PlanSummaries, Thread},
    params::{AddComment, ChangeCategory, Id, ListPlans, ListStages, ShowThread},
    Planner, PlannerBuilder,
};
use tempfile::TempDir;

/// Helper function to create a test planner with temporary database
async fn create_test_planner() -> (Planner, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    let planner = PlannerBuilder::new()
        .with_database_path(db_path)
        .build()
        .await
        .expect("Failed to create planner");

    (planner, temp_dir)
}

/// Run a CLI command and capture its output
fn run_cli_command(temp_dir: &TempDir, args: &[&str]) -> String {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lp"));
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(temp_dir.path().join("test.db"));

    for arg in args {
        cmd.arg(arg);
    }

    let output = cmd.output().expect("Failed to run CLI command");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

#[tokio::test]
async fn test_show_plan_matches_display() {
    let (planner, temp_dir) = create_test_planner().await;

    run_cli_command(
        &temp_dir,
        &["plan", "create", "lexis", "--class", "C1", "--main-aim", "Phrasal verbs"],
    );
    run_cli_command(
        &temp_dir,
        &["plan", "set", "1", "stages.contextualisation.interactionPattern", "S-S"],
    );

    let plan = planner
        .show_plan(&Id { id: 1 })
        .await
        .expect("Failed to load plan")
        .expect("Plan created through the CLI should exist");

    let cli_output = run_cli_command(&temp_dir, &["plan", "show", "1"]);
    assert_eq!(cli_output, plan.to_string());
    assert!(cli_output.contains("*S-S*"));
}

#[tokio::test]
async fn test_plan_list_matches_display() {
    let (planner, temp_dir) = create_test_planner().await;

    run_cli_command(&temp_dir, &["plan", "create", "grammar"]);
    run_cli_command(&temp_dir, &["plan", "create", "listening"]);

    let summaries: PlanSummaries = planner
        .list_plans_summary(&ListPlans::default())
        .await
        .expect("Failed to list plans");
    assert_eq!(summaries.len(), 2);

    let cli_output = run_cli_command(&temp_dir, &["plan", "list"]);
    assert_eq!(cli_output, summaries.to_string());
}

#[tokio::test]
async fn test_thread_written_by_planner_is_shown_by_cli() {
    let (planner, temp_dir) = create_test_planner().await;

    run_cli_command(&temp_dir, &["plan", "create", "grammar"]);
    planner
        .add_comment(&AddComment {
            id: 1,
            stage: "clarification".to_string(),
            author: "Bea".to_string(),
            role: "coordinator".to_string(),
            message: "Clarify ICQs".to_string(),
        })
        .await
        .expect("Failed to add comment");

    // The thread survives a round trip through a category without the stage
    for category in ["reading", "grammar"] {
        planner
            .change_category(&ChangeCategory {
                id: 1,
                category: category.to_string(),
            })
            .await
            .expect("Failed to change category");
    }

    let thread: Thread = planner
        .show_thread(&ShowThread {
            id: 1,
            stage: "clarification".to_string(),
        })
        .await
        .expect("Failed to show thread");
    assert_eq!(thread.comments.len(), 1);

    let cli_output = run_cli_command(&temp_dir, &["comment", "list", "1", "clarification"]);
    assert_eq!(cli_output, thread.to_string());
}

#[tokio::test]
async fn test_stage_listing_matches_display() {
    let (planner, temp_dir) = create_test_planner().await;

    let listing = planner
        .list_stages(&ListStages {
            category: "listening".to_string(),
        })
        .expect("Failed to list stages");

    let cli_output = run_cli_command(&temp_dir, &["stages", "listening"]);
    assert_eq!(cli_output, listing.to_string());
}
