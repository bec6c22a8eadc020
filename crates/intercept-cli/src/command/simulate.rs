use std::path::PathBuf;

use intercept_evaluator::outcome_fitness;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Solution file written by `evolve` (JSON format)
    solution_file: PathBuf,
    /// Output file path [default: stdout]
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Re-simulates a saved solution and writes its trajectory.
pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        solution_file,
        output,
    } = arg;

    eprintln!("Loading solution from {}", solution_file.display());
    let record = util::read_solution_file(solution_file)?;
    let trajectory = record.trajectory();
    if trajectory.outcome != record.outcome {
        log::warn!(
            "recorded outcome {:?} differs from simulated outcome {:?}",
            record.outcome,
            trajectory.outcome,
        );
    }

    eprintln!("Recorded {} positions", trajectory.points.len());
    eprintln!("  Outcome: {:?}", trajectory.outcome);
    eprintln!("  Fitness: {:.6}", outcome_fitness(&trajectory.outcome));
    Output::save_json(&trajectory, output.clone())?;

    Ok(())
}
