use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use crate::tester::ScenarioResult;

fn success_rate(results: &[ScenarioResult]) -> f64 {
    let passed = results.iter().filter(|r| r.passed).count();
    if results.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = passed as f64 / results.len() as f64 * 100.0;
    rate
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out)?;
    writeln!(out, "{}", "📊 Board Sweep Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "======================".cyan())?;
    writeln!(out, "Total runs: {}", results.len())?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (results.len() - passed).to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            out,
            "{status} {} [{} seed {}]",
            result.scenario_name.bold(),
            result.catalog,
            result.seed
        )?;
        writeln!(
            out,
            "   Iterations: {}/{} successful, avg {:?}",
            result.successful_iterations, result.iterations_run, result.average_duration
        )?;
        for failure in &result.failures {
            writeln!(out, "     • {}", failure.red())?;
        }
    }

    if let (Some(fastest), Some(slowest)) = (
        results.iter().min_by_key(|r| r.average_duration),
        results.iter().max_by_key(|r| r.average_duration),
    ) {
        writeln!(out)?;
        writeln!(out, "{}", "⚡ Performance".bright_yellow().bold())?;
        writeln!(
            out,
            "Fastest: {} on {} ({:?})",
            fastest.scenario_name.green(),
            fastest.catalog,
            fastest.average_duration
        )?;
        writeln!(
            out,
            "Slowest: {} on {} ({:?})",
            slowest.scenario_name.yellow(),
            slowest.catalog,
            slowest.average_duration
        )?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    generated_at: DateTime<Utc>,
) -> Result<()> {
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "# Scratch Board Sweep Results\n")?;
    writeln!(out, "_Generated {}_\n", generated_at.to_rfc3339())?;
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total runs**: {}", results.len())?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", results.len() - passed)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", success_rate(results))?;
    writeln!(out, "## Detailed Results\n")?;
    writeln!(out, "| | Scenario | Catalog | Seed | Iterations | Avg time |")?;
    writeln!(out, "|---|---|---|---|---|---|")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(
            out,
            "| {status} | {} | {} | {} | {}/{} | {:?} |",
            result.scenario_name,
            result.catalog,
            result.seed,
            result.successful_iterations,
            result.iterations_run,
            result.average_duration
        )?;
    }
    let failing: Vec<_> = results.iter().filter(|r| !r.failures.is_empty()).collect();
    if !failing.is_empty() {
        writeln!(out, "\n## Failures\n")?;
        for result in failing {
            writeln!(out, "### {} on {}\n", result.scenario_name, result.catalog)?;
            for failure in &result.failures {
                writeln!(out, "- {failure}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(
        out,
        "scenario,catalog,seed,passed,iterations,successes,avg_nanos"
    )?;
    for result in results {
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            result.scenario_name,
            result.catalog,
            result.seed,
            result.passed,
            result.iterations_run,
            result.successful_iterations,
            result.average_duration.as_nanos()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: String::from("winning-board"),
            catalog: String::from("classic"),
            seed: 1337,
            passed,
            iterations_run: 4,
            successful_iterations: if passed { 4 } else { 3 },
            failures: if passed {
                Vec::new()
            } else {
                vec![String::from("Iteration 2 (seed 1337): board has 8 cells")]
            },
            average_duration: Duration::from_micros(12),
        }
    }

    #[test]
    fn markdown_lists_failures() {
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &[sample(true), sample(false)], Utc::now()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("- **Success rate**: 50.0%"));
        assert!(text.contains("board has 8 cells"));
    }

    #[test]
    fn csv_has_one_row_per_result() {
        let mut buf = Vec::new();
        generate_csv_report(&mut buf, &[sample(true), sample(false)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("winning-board,classic,1337,false,4,3,12000"));
    }

    #[test]
    fn json_round_trips_durations() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &[sample(true)]).unwrap();
        let parsed: Vec<ScenarioResult> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed[0].average_duration, Duration::from_micros(12));
    }
}
