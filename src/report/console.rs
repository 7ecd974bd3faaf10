use crate::report::report_model::SuiteReport;
use crate::scenario::scenario_model::CheckSpec;

// ============================================================================
// Console reporter — formatted terminal output
// ============================================================================

/// Format a suite report for terminal output.
///
/// Produces output like:
/// ```text
/// === Scenario Suite: scenarios ===
///
/// ✓ PASS  Single group auto-enter (4 steps, 2 checks)
/// ✗ FAIL  Folder restore (6 steps, 3 checks)
///     [FAIL] Step 5: Spoken — Last utterance is not '1 of 4: Deck A'
///
/// === Results: 1 passed, 1 failed (2 total) ===
/// ```
pub fn format_console_report(report: &SuiteReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Scenario Suite: {} ===\n\n", report.suite_name));

    for result in &report.scenario_results {
        let check_count = result.check_results.len();
        let marker = if result.passed {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };

        out.push_str(&format!(
            "{}  {} ({} steps, {} checks)\n",
            marker, result.scenario_name, result.steps_run, check_count
        ));

        // Show error if the scenario failed due to an execution error
        if let Some(ref error) = result.error {
            out.push_str(&format!("    [ERROR] {}\n", error));
        }

        // Show failed checks
        if !result.passed {
            for cr in &result.check_results {
                if !cr.passed {
                    let check_name = format_check_type(&cr.spec);
                    let detail = cr.message.as_deref().unwrap_or("check failed");
                    out.push_str(&format!(
                        "    [FAIL] Step {}: {} — {}\n",
                        cr.step_index, check_name, detail
                    ));
                }
            }
        }
    }

    // Summary line
    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed ({} total)",
        report.passed, report.failed, report.total
    ));

    if let Some(ms) = report.duration_ms {
        let secs = ms as f64 / 1000.0;
        out.push_str(&format!(" in {:.1}s", secs));
    }

    out.push_str(" ===\n");

    out
}

/// Format a CheckSpec variant name for display.
fn format_check_type(spec: &CheckSpec) -> &'static str {
    match spec {
        CheckSpec::Spoken { .. } => "Spoken",
        CheckSpec::SpokenContains { .. } => "SpokenContains",
        CheckSpec::NothingSpoken => "NothingSpoken",
        CheckSpec::CursorGroup { .. } => "CursorGroup",
        CheckSpec::CursorElement { .. } => "CursorElement",
        CheckSpec::CursorLevel { .. } => "CursorLevel",
        CheckSpec::GroupCount { .. } => "GroupCount",
    }
}
