//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

mod common;

use common::{assert_contains, parse_json, TestEnv};
use serde_json::Value;

#[test]
fn test_status_seeds_on_first_run() {
    let env = TestEnv::new();
    let stdout = env.run_cli_success(&["status", "--json"]);
    let report: Value = parse_json(&stdout);

    let epics = report.as_array().expect("status is a list");
    assert_eq!(epics.len(), 6);
    assert_eq!(epics[2]["epic"]["id"], "epic_003");
    assert_eq!(epics[2]["stats"]["commitHistory"].as_array().unwrap().len(), 52);
    assert_eq!(epics[2]["directives"][0]["stats"]["daysActive"], 1);
    assert_eq!(epics[2]["directives"][0]["stats"]["isOverdue"], false);
}

#[test]
fn test_status_text() {
    let env = TestEnv::new();
    let stdout = env.run_cli_success(&["status"]);
    assert_contains(&stdout, "Deep Reading");
    assert_contains(&stdout, "Book reading");
    assert_contains(&stdout, "not yet");
}

#[test]
fn test_suggest_json_respects_max() {
    let env = TestEnv::new();
    let actions: Value = parse_json(&env.run_cli_success(&["suggest", "--json"]));
    let actions = actions.as_array().unwrap();
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0]["reason"], "neglected");
    assert_eq!(actions[0]["directive"]["id"], "dir_002");

    let one: Value = parse_json(&env.run_cli_success(&["suggest", "--max", "1", "--json"]));
    assert_eq!(one.as_array().unwrap().len(), 1);
}

#[test]
fn test_checkin_appends_log() {
    let env = TestEnv::new();
    let log: Value = parse_json(&env.run_cli_success(&[
        "checkin", "epic_001", "dir_002", "--minutes", "45", "--note", "Fold test", "--json",
    ]));
    assert_eq!(log["directiveId"], "dir_002");
    assert_eq!(log["durationMinutes"], 45);
    assert_eq!(log["source"], "manual");

    let data: Value = parse_json(&env.run_cli_success(&["data", "export"]));
    assert_eq!(data["logs"].as_array().unwrap().len(), 5);

    // dir_002 is no longer neglected
    let actions: Value = parse_json(&env.run_cli_success(&["suggest", "--json"]));
    assert_eq!(actions[0]["directive"]["id"], "dir_003");
}

#[test]
fn test_checkin_rejects_foreign_directive() {
    let env = TestEnv::new();
    let stderr = env.run_cli_failure(&["checkin", "epic_001", "dir_008"]);
    assert_contains(&stderr, "does not belong to epic");
}

#[test]
fn test_epic_phase_and_target() {
    let env = TestEnv::new();
    env.run_cli_success(&["epic", "phase", "epic_005", "active"]);
    env.run_cli_success(&["epic", "target", "epic_003", "3"]);

    let shown: Value = parse_json(&env.run_cli_success(&["epic", "show", "epic_003", "--json"]));
    assert_eq!(shown["epic"]["target"]["current"], 3);

    let epics: Value = parse_json(&env.run_cli_success(&["epic", "list", "--json"]));
    assert_eq!(epics[4]["phase"], "active");

    env.run_cli_failure(&["epic", "phase", "epic_005", "finished"]);
    env.run_cli_failure(&["epic", "target", "epic_001", "1"]);
}

#[test]
fn test_data_reset_drops_checkins() {
    let env = TestEnv::new();
    env.run_cli_success(&["checkin", "epic_006", "dir_014"]);
    env.run_cli_success(&["data", "reset"]);

    let data: Value = parse_json(&env.run_cli_success(&["data", "export"]));
    assert_eq!(data["logs"].as_array().unwrap().len(), 4);
}

#[test]
fn test_config_roundtrip() {
    let env = TestEnv::new();
    assert_eq!(env.run_cli_success(&["config", "get", "suggestions.max_actions"]).trim(), "4");

    env.run_cli_success(&["config", "set", "suggestions.max_actions", "1"]);
    let actions: Value = parse_json(&env.run_cli_success(&["suggest", "--json"]));
    assert_eq!(actions.as_array().unwrap().len(), 1);

    env.run_cli_failure(&["config", "set", "suggestions.max_actions", "zero"]);
    env.run_cli_failure(&["config", "get", "no.such.key"]);

    env.run_cli_success(&["config", "reset"]);
    assert_eq!(env.run_cli_success(&["config", "get", "suggestions.max_actions"]).trim(), "4");
}

#[test]
fn test_user_name_from_config_is_used_for_seed() {
    let env = TestEnv::new();
    env.run_cli_success(&["config", "set", "user.name", "Sam"]);
    let data: Value = parse_json(&env.run_cli_success(&["data", "export"]));
    assert_eq!(data["user"]["name"], "Sam");
}

#[test]
fn test_data_clear_reports_removed_logs() {
    let env = TestEnv::new();
    env.run_cli_success(&["checkin", "epic_006", "dir_014"]);
    let stdout = env.run_cli_success(&["data", "clear"]);
    assert_contains(&stdout, "5 logs removed");

    let data: Value = parse_json(&env.run_cli_success(&["data", "export"]));
    assert_eq!(data["logs"].as_array().unwrap().len(), 4);
}
