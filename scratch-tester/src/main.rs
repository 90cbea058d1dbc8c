mod catalogs;
mod reports;
mod scenarios;
mod tester;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use tester::{LogicTester, ScenarioResult};

#[derive(Debug, Parser)]
#[command(name = "scratch-tester", version)]
#[command(about = "Seeded property sweeps for the scratch-card board renderer")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and catalogs, then exit
    #[arg(long)]
    list_scenarios: bool,

    /// Catalogs to draw boards from (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    catalogs: String,

    /// Seeds to run (comma-separated integers; `random` draws one)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Boards built per scenario, catalog and seed
    #[arg(long, default_value_t = 200)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console", "csv"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();
    let start_time = Instant::now();
    let seeds = resolve_seeds(&split_csv(&args.seeds))?;
    let catalogs = catalogs::select(&split_csv(&args.catalogs));
    if catalogs.is_empty() {
        bail!("no catalog matches {:?}", args.catalogs);
    }
    log::info!(
        "sweeping {} catalogs x {} seeds x {} iterations",
        catalogs.len(),
        seeds.len(),
        args.iterations
    );

    let tester = LogicTester::new(args.verbose);
    let mut results: Vec<ScenarioResult> = Vec::new();
    for key in scenarios::expand(&split_csv(&args.scenarios)) {
        match scenarios::find(&key) {
            Some(scenario) => {
                results.extend(tester.run_scenario(&scenario, &catalogs, &seeds, args.iterations));
            }
            None => eprintln!("⚠️  Unknown scenario: {}", key.yellow()),
        }
    }

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for scenario in &scenarios::SCENARIOS {
        writeln!(
            output_target.writer(),
            "  {:20} - {}",
            scenario.key,
            scenario.description
        )?;
    }
    writeln!(output_target.writer(), "Available catalogs:")?;
    for catalog in catalogs::all() {
        writeln!(
            output_target.writer(),
            "  {:20} - {} prizes",
            catalog.name,
            catalog.prizes.len()
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎟️  Scratch Board Tester".bright_cyan().bold());
    println!("{}", "========================".cyan());
}

fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn resolve_seeds(tokens: &[String]) -> Result<Vec<u64>> {
    if tokens.is_empty() {
        bail!("at least one seed is required");
    }
    tokens
        .iter()
        .map(|token| {
            if token.eq_ignore_ascii_case("random") {
                let seed = rand::random::<u64>();
                println!("🎲 Random seed: {seed}");
                Ok(seed)
            } else {
                token
                    .parse::<u64>()
                    .with_context(|| format!("invalid seed {token:?}"))
            }
        })
        .collect()
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, results)?,
        "markdown" => {
            reports::generate_markdown_report(&mut output_target, results, chrono::Utc::now())?;
        }
        "csv" => reports::generate_csv_report(&mut output_target, results)?,
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_tokens_are_trimmed() {
        assert_eq!(split_csv(" a, ,b "), ["a", "b"]);
    }

    #[test]
    fn seeds_parse_or_fail_loudly() {
        assert_eq!(resolve_seeds(&split_csv("1,42")).unwrap(), [1, 42]);
        assert_eq!(resolve_seeds(&split_csv("random")).unwrap().len(), 1);
        assert!(resolve_seeds(&split_csv("CL-ORANGE42")).is_err());
        assert!(resolve_seeds(&[]).is_err());
    }

    #[test]
    fn file_output_receives_reports() {
        let path = std::env::temp_dir().join(format!("scratch-tester-{}.json", std::process::id()));
        let args = Args::parse_from([
            "scratch-tester",
            "--report",
            "json",
            "--output",
            path.to_str().unwrap(),
        ]);
        write_reports(&args, &[], Instant::now()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "[]");
        let _ = std::fs::remove_file(path);
    }
}
