use crate::engine::{Engine, NavCommand};
use crate::host::fake::{FakeInput, FakeNode, FakeSceneGraph, RecordingSink, SharedScene, SpeechLog};
use crate::host::locale::StaticLocale;
use crate::host::scene_model::SceneNodeDump;
use crate::nav::cursor::NavLevel;
use crate::scenario::scenario_model::{
    CheckResult, CheckSpec, Scenario, ScenarioResult, ScenarioStep,
};
use crate::trace::logger::TraceLogger;

/// Replays a Scenario against a fresh engine on the fake host.
pub struct ScenarioRunner;

impl ScenarioRunner {
    /// Run a complete scenario.
    ///
    /// Returns a ScenarioResult with pass/fail status, every check result,
    /// and any error that stopped the run early.
    pub fn run(scenario: &Scenario) -> ScenarioResult {
        Self::run_traced(scenario, TraceLogger::disabled())
    }

    /// Run with navigation tracing, for diagnosing a failing scenario.
    pub fn run_traced(scenario: &Scenario, tracer: TraceLogger) -> ScenarioResult {
        let scene = SharedScene::new(FakeSceneGraph::with_nodes(
            scenario.nodes.iter().map(dump_to_fake).collect(),
        ));
        let log = SpeechLog::new();
        let mut engine = Engine::new(
            Box::new(scene.clone()),
            Box::new(FakeInput::new(scene.clone())),
            Box::new(RecordingSink::new(log.clone())),
            Box::new(StaticLocale),
            tracer,
        );
        engine.on_scene_loaded(&scenario.screen);

        let mut check_results: Vec<CheckResult> = Vec::new();
        // Log length at the last step boundary, for NothingSpoken
        let mut spoken_mark = log.lines().len();

        for (i, step) in scenario.steps.iter().enumerate() {
            match step {
                ScenarioStep::Press { command } => {
                    spoken_mark = log.lines().len();
                    match parse_command(command) {
                        Some(cmd) => engine.tick(Some(cmd)),
                        None => {
                            return ScenarioResult {
                                scenario_name: scenario.name.clone(),
                                passed: false,
                                steps_run: i + 1,
                                check_results,
                                error: Some(format!("Step {}: unknown command '{}'", i, command)),
                            };
                        }
                    }
                }

                ScenarioStep::Tick { count } => {
                    spoken_mark = log.lines().len();
                    for _ in 0..*count {
                        engine.tick(None);
                    }
                }

                ScenarioStep::ReplaceScene { nodes } => {
                    scene
                        .0
                        .borrow_mut()
                        .replace_all(nodes.iter().map(dump_to_fake).collect());
                }

                ScenarioStep::Expect { checks } => {
                    for spec in checks {
                        check_results.push(Self::evaluate_one(
                            spec,
                            i,
                            &engine,
                            &log,
                            spoken_mark,
                        ));
                    }
                }
            }
        }

        let passed = check_results.iter().all(|r| r.passed);
        ScenarioResult {
            scenario_name: scenario.name.clone(),
            passed,
            steps_run: scenario.steps.len(),
            check_results,
            error: None,
        }
    }

    fn evaluate_one(
        spec: &CheckSpec,
        step_index: usize,
        engine: &Engine,
        log: &SpeechLog,
        spoken_mark: usize,
    ) -> CheckResult {
        match spec {
            CheckSpec::Spoken { expected } => {
                let actual = log.last();
                let passed = actual.as_deref() == Some(expected.as_str());
                CheckResult {
                    step_index,
                    spec: spec.clone(),
                    passed,
                    actual: actual.clone(),
                    message: if passed {
                        None
                    } else {
                        Some(format!("Last utterance is not '{}'", expected))
                    },
                }
            }

            CheckSpec::SpokenContains { expected } => {
                let actual = log.last();
                let passed = actual
                    .as_deref()
                    .map(|t| t.contains(expected.as_str()))
                    .unwrap_or(false);
                CheckResult {
                    step_index,
                    spec: spec.clone(),
                    passed,
                    actual,
                    message: if passed {
                        None
                    } else {
                        Some(format!("Last utterance does not contain '{}'", expected))
                    },
                }
            }

            CheckSpec::NothingSpoken => {
                let since = log.lines().len() - spoken_mark.min(log.lines().len());
                let passed = since == 0;
                CheckResult {
                    step_index,
                    spec: spec.clone(),
                    passed,
                    actual: Some(format!("{} utterances", since)),
                    message: if passed {
                        None
                    } else {
                        Some(format!("Expected silence but {} utterances spoken", since))
                    },
                }
            }

            CheckSpec::CursorGroup { expected } => {
                let actual = engine.menu().nav.cursor().group;
                numeric_check(spec, step_index, actual, *expected, "cursor group")
            }

            CheckSpec::CursorElement { expected } => {
                let actual = engine.menu().nav.cursor().element;
                numeric_check(spec, step_index, actual, *expected, "cursor element")
            }

            CheckSpec::CursorLevel { expected } => {
                let actual = match engine.menu().nav.cursor().level {
                    NavLevel::GroupList => "group_list",
                    NavLevel::InsideGroup => "inside_group",
                };
                let passed = actual == expected;
                CheckResult {
                    step_index,
                    spec: spec.clone(),
                    passed,
                    actual: Some(actual.to_string()),
                    message: if passed {
                        None
                    } else {
                        Some(format!("Cursor level is {} but expected {}", actual, expected))
                    },
                }
            }

            CheckSpec::GroupCount { expected } => {
                let actual = engine.menu().nav.group_count();
                numeric_check(spec, step_index, actual, *expected, "group count")
            }
        }
    }
}

fn numeric_check(
    spec: &CheckSpec,
    step_index: usize,
    actual: usize,
    expected: usize,
    what: &str,
) -> CheckResult {
    let passed = actual == expected;
    CheckResult {
        step_index,
        spec: spec.clone(),
        passed,
        actual: Some(actual.to_string()),
        message: if passed {
            None
        } else {
            Some(format!("{} is {} but expected {}", what, actual, expected))
        },
    }
}

/// Command names as they appear in scenario files.
pub fn parse_command(name: &str) -> Option<NavCommand> {
    match name {
        "next_element" => Some(NavCommand::NextElement),
        "previous_element" => Some(NavCommand::PreviousElement),
        "activate" => Some(NavCommand::Activate),
        "back" => Some(NavCommand::Back),
        "next_zone" => Some(NavCommand::NextZone),
        "previous_zone" => Some(NavCommand::PreviousZone),
        "cycle_highlight" => Some(NavCommand::CycleHighlight),
        "read_current" => Some(NavCommand::ReadCurrent),
        _ => None,
    }
}

fn dump_to_fake(dump: &SceneNodeDump) -> FakeNode {
    let mut node = FakeNode::new(&dump.name);
    node.ancestors = dump.ancestors();
    if let Some(text) = &dump.text {
        node.text.push(text.clone());
    }
    node.markers = dump.markers.clone();
    node
}
