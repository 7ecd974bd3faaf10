use crate::group::classifier::determine_group;
use crate::host::scene_model::SceneNodeDump;
use crate::label::symbols::resolve_symbols;
use crate::report::console::format_console_report;
use crate::report::report_model::SuiteReport;
use crate::scenario::runner::ScenarioRunner;
use crate::scenario::scenario_model::Scenario;
use crate::trace::logger::TraceLogger;

// ============================================================================
// simulate subcommand
// ============================================================================

/// Run scenarios and return whether all passed.
pub fn cmd_simulate(
    scenario_path: &str,
    output: Option<&str>,
    trace_path: Option<&str>,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let scenarios = load_scenarios(scenario_path)?;

    if scenarios.is_empty() {
        eprintln!("No scenarios found at: {}", scenario_path);
        return Ok(true);
    }

    if verbose > 0 {
        eprintln!("Running {} scenarios...", scenarios.len());
    }

    let start = std::time::Instant::now();

    let mut results = Vec::new();
    for scenario in &scenarios {
        if verbose > 0 {
            eprintln!("  Running: {}", scenario.name);
        }
        let tracer = match trace_path {
            Some(path) => TraceLogger::new(path),
            None => TraceLogger::disabled(),
        };
        results.push(ScenarioRunner::run_traced(scenario, tracer));
    }

    let duration = start.elapsed().as_millis();

    let report = SuiteReport::from_results(scenario_path, results).with_duration(duration);
    let all_passed = report.all_passed();

    let output_content = format_console_report(&report);
    match output {
        Some(path) => std::fs::write(path, &output_content)?,
        None => print!("{}", output_content),
    }

    Ok(all_passed)
}

/// Load scenarios from a single YAML file or a directory of YAML files.
pub fn load_scenarios(path: &str) -> Result<Vec<Scenario>, Box<dyn std::error::Error>> {
    let metadata = std::fs::metadata(path)?;
    if metadata.is_dir() {
        let mut scenarios = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let p = entry.path();
            if p.extension().map_or(false, |e| e == "yaml" || e == "yml") {
                let content = std::fs::read_to_string(&p)?;
                let scenario: Scenario = serde_yaml::from_str(&content)?;
                scenarios.push(scenario);
            }
        }
        // Sort by name for deterministic order
        scenarios.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(scenarios)
    } else {
        let content = std::fs::read_to_string(path)?;
        let scenario: Scenario = serde_yaml::from_str(&content)?;
        Ok(vec![scenario])
    }
}

// ============================================================================
// classify subcommand
// ============================================================================

/// Classify every node in a captured scene dump and print one line per
/// node. For diagnosing misgrouped elements without the host attached.
pub fn cmd_classify(dump_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(dump_path)?;
    let dumps: Vec<SceneNodeDump> = serde_json::from_str(&content)?;

    for dump in &dumps {
        let ancestors = dump.ancestors();
        let group = determine_group(&dump.name, &ancestors);
        let label = dump
            .text
            .as_deref()
            .map(resolve_symbols)
            .unwrap_or_default();
        if label.is_empty() {
            println!("{:<18} {}", group.display_name(), dump.name);
        } else {
            println!("{:<18} {} \"{}\"", group.display_name(), dump.name, label);
        }
    }

    println!("\n{} nodes classified", dumps.len());
    Ok(())
}
