use std::path::PathBuf;

use anyhow::Context as _;
use intercept_engine::{Scenario, Vec2};
use intercept_training::{
    config::{EvolutionConfig, MutationClamp, OffspringPolicy},
    genetic::EvolutionDriver,
    progress::GenerationReport,
};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;

use crate::{schema::solution::SolutionRecord, util::Output};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum PolicyArg {
    HalfBrood,
    FullBrood,
}

impl From<PolicyArg> for OffspringPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::HalfBrood => Self::HalfBrood,
            PolicyArg::FullBrood => Self::FullBrood,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ClampArg {
    OnMutation,
    Always,
}

impl From<ClampArg> for MutationClamp {
    fn from(arg: ClampArg) -> Self {
        match arg {
            ClampArg::OnMutation => Self::OnMutation,
            ClampArg::Always => Self::Always,
        }
    }
}

/// Fixed target; without `--target-x/--target-y` the target is drawn from the
/// configured scenario ranges.
#[derive(Debug, Clone, Copy, clap::Args)]
struct TargetArg {
    /// Initial target x position
    #[arg(long, requires = "target_y", allow_negative_numbers = true)]
    target_x: Option<f64>,
    /// Initial target y position
    #[arg(long, requires = "target_x", allow_negative_numbers = true)]
    target_y: Option<f64>,
    /// Target x velocity [default: 0]
    #[arg(long, requires = "target_x", allow_negative_numbers = true)]
    target_vx: Option<f64>,
    /// Target y velocity [default: 0]
    #[arg(long, requires = "target_x", allow_negative_numbers = true)]
    target_vy: Option<f64>,
}

impl TargetArg {
    fn scenario(&self) -> Option<Scenario> {
        let position = Vec2::new(self.target_x?, self.target_y?);
        let velocity = Vec2::new(
            self.target_vx.unwrap_or_default(),
            self.target_vy.unwrap_or_default(),
        );
        Some(Scenario::new(position, velocity))
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvolveArg {
    /// Configuration file (JSON); fields it omits keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed of the random generator [default: random]
    #[arg(long)]
    seed: Option<u64>,
    /// Population size
    #[arg(long)]
    population: Option<usize>,
    /// Number of generations
    #[arg(long)]
    generations: Option<usize>,
    /// Probability that a child is mutated
    #[arg(long)]
    mutation_rate: Option<f64>,
    /// Children per parent pair
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
    /// Which candidates are clamped into the mutation bounds
    #[arg(long, value_enum)]
    clamp: Option<ClampArg>,
    #[command(flatten)]
    target: TargetArg,
    /// Name stored in the solution file
    #[arg(long, default_value = "intercept")]
    name: String,
    /// Output file path [default: stdout]
    #[arg(long)]
    output: Option<PathBuf>,
    /// Print the effective configuration and exit
    #[arg(long)]
    dump_config: bool,
    /// Do not print per-generation progress
    #[arg(long, short)]
    quiet: bool,
}

impl EvolveArg {
    fn effective_config(&self) -> anyhow::Result<EvolutionConfig> {
        let mut config = match &self.config {
            Some(path) => crate::util::read_json_file("configuration", path)?,
            None => EvolutionConfig::default(),
        };
        let genetic = &mut config.genetic;
        if let Some(population) = self.population {
            genetic.population_size = population;
        }
        if let Some(generations) = self.generations {
            genetic.generations = generations;
        }
        if let Some(rate) = self.mutation_rate {
            genetic.mutation_rate = rate;
        }
        if let Some(policy) = self.policy {
            genetic.offspring = policy.into();
        }
        if let Some(clamp) = self.clamp {
            genetic.clamp = clamp.into();
        }
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

/// Runs the genetic search and writes the resulting [`SolutionRecord`].
///
/// Progress goes to stderr so that stdout carries only the JSON record.
pub(crate) fn run(arg: &EvolveArg) -> anyhow::Result<()> {
    let config = arg.effective_config()?;
    if arg.dump_config {
        return Output::save_json(&config, arg.output.clone());
    }

    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg64::seed_from_u64(seed);
    let driver = match arg.target.scenario() {
        Some(scenario) => EvolutionDriver::new(&config, scenario),
        None => EvolutionDriver::with_random_scenario(&config, &mut rng),
    }
    .context("Invalid configuration")?;

    let scenario = driver.scenario();
    eprintln!("Seed: {seed}");
    eprintln!(
        "Target: position ({:.3}, {:.3}), velocity ({:.3}, {:.3})",
        scenario.target_position().x,
        scenario.target_position().y,
        scenario.target_velocity().x,
        scenario.target_velocity().y,
    );

    let quiet = arg.quiet;
    let evolution = driver
        .run(&mut rng, |report| {
            if !quiet {
                print_report(report);
            }
        })
        .context("Evolution produced no offspring")?;

    let record = SolutionRecord::new(arg.name.clone(), seed, config, &evolution);
    Output::save_json(&record, arg.output.clone())?;

    eprintln!();
    eprintln!("Solution saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", record.name);
    eprintln!("  Created at: {}", record.created_at);
    eprintln!(
        "  Angle: {:.6} rad, speed: {:.3}",
        record.candidate.angle(),
        record.candidate.speed(),
    );
    eprintln!("  Fitness: {:.6}", record.fitness);
    eprintln!("  Outcome: {:?}", record.outcome);

    Ok(())
}

fn print_report(report: &GenerationReport) {
    let hit = if report.hit { " (hit)" } else { "" };
    eprintln!(
        "Generation #{}: best fitness = {:.6}{hit} | generation min/mean/max = {:.6}/{:.6}/{:.6}",
        report.generation,
        report.best_ever.fitness,
        report.fitness.min,
        report.fitness.mean,
        report.fitness.max,
    );
}
