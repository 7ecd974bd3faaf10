use arena_reader::cli::commands::load_scenarios;
use arena_reader::report::console::format_console_report;
use arena_reader::report::report_model::SuiteReport;
use arena_reader::scenario::runner::ScenarioRunner;
use arena_reader::scenario::scenario_model::{Scenario, ScenarioStep};

// =========================================================================
// YAML round-trip
// =========================================================================

#[test]
fn scenario_yaml_deserializes_steps_and_checks() {
    let yaml = r#"
name: smoke
screen: HomeScene
nodes:
  - name: DeckTile
    path: [MainMenu]
    text: Deck A
steps:
  - action: press
    command: next_element
  - action: tick
    count: 3
  - action: expect
    checks:
      - type: spoken_contains
        expected: Deck
      - type: nothing_spoken
"#;
    let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(scenario.name, "smoke");
    assert_eq!(scenario.steps.len(), 3);
    assert!(matches!(scenario.steps[1], ScenarioStep::Tick { count: 3 }));
}

#[test]
fn unknown_commands_fail_the_run_with_a_message() {
    let yaml = r#"
name: bad command
nodes:
  - name: DeckTile
    path: [MainMenu]
    text: Deck A
steps:
  - action: press
    command: teleport
"#;
    let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
    let result = ScenarioRunner::run(&scenario);
    assert!(!result.passed);
    assert!(result.error.unwrap().contains("teleport"));
}

// =========================================================================
// Shipped scenarios
// =========================================================================

#[test]
fn shipped_scenarios_all_pass() {
    let scenarios = load_scenarios("scenarios").expect("scenarios/ directory exists");
    assert!(scenarios.len() >= 4, "The regression set ships with the crate");

    let results: Vec<_> = scenarios.iter().map(ScenarioRunner::run).collect();
    let report = SuiteReport::from_results("scenarios", results);
    assert!(
        report.all_passed(),
        "Failures:\n{}",
        format_console_report(&report)
    );
}

#[test]
fn scenarios_load_in_deterministic_name_order() {
    let scenarios = load_scenarios("scenarios").unwrap();
    let mut names: Vec<String> = scenarios.iter().map(|s| s.name.clone()).collect();
    let sorted = {
        let mut s = names.clone();
        s.sort();
        s
    };
    assert_eq!(names, sorted);
    names.dedup();
    assert_eq!(names.len(), scenarios.len(), "Scenario names are unique");
}
