use colored::Colorize;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::catalogs::Catalog;
use crate::scenarios::Scenario;

/// Failures kept per result; the rest are only counted.
const MAX_RECORDED_FAILURES: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub catalog: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
}

pub struct LogicTester {
    verbose: bool,
}

impl LogicTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Run `scenario` over every catalog and seed.
    pub fn run_scenario(
        &self,
        scenario: &Scenario,
        catalogs: &[Catalog],
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::new();
        for catalog in catalogs {
            for &seed in seeds {
                if self.verbose {
                    println!(
                        "🧪 {} on {} (seed {seed})",
                        scenario.key.bright_white(),
                        catalog.name
                    );
                }
                results.push(self.run_single(scenario, catalog, seed, iterations));
            }
        }
        results
    }

    fn run_single(
        &self,
        scenario: &Scenario,
        catalog: &Catalog,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut total = Duration::ZERO;

        for i in 0..iterations {
            let start = Instant::now();
            let outcome = (scenario.check)(catalog, &mut rng);
            total += start.elapsed();
            match outcome {
                Ok(()) => successes += 1,
                Err(err) => {
                    log::debug!("{} failed at iteration {}: {err}", scenario.key, i + 1);
                    if self.verbose {
                        println!("  ❌ Iteration {}/{iterations}: {}", i + 1, err.red());
                    }
                    if failures.len() < MAX_RECORDED_FAILURES {
                        failures.push(format!("Iteration {} (seed {seed}): {err}", i + 1));
                    }
                }
            }
        }

        let average_duration = if iterations == 0 {
            Duration::ZERO
        } else {
            total / u32::try_from(iterations).unwrap_or(u32::MAX)
        };
        ScenarioResult {
            scenario_name: scenario.key.to_string(),
            catalog: catalog.name.to_string(),
            seed,
            passed: successes == iterations,
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        u64::try_from(duration.as_nanos())
            .unwrap_or(u64::MAX)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nanos = u64::deserialize(deserializer)?;
        Ok(Duration::from_nanos(nanos))
    }
}
