use clap::{ArgAction, Parser, Subcommand};

use self::{evolve::EvolveArg, replay::ReplayArg, simulate::SimulateArg};

mod evolve;
mod replay;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v: info, -vv: debug, -vvv: trace); `RUST_LOG` overrides it
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Search launch parameters that intercept the target with a genetic algorithm
    Evolve(#[clap(flatten)] EvolveArg),
    /// Re-run the flight of a saved solution and write its trajectory as JSON
    Simulate(#[clap(flatten)] SimulateArg),
    /// Animate the flight of a saved solution in the terminal
    Replay(#[clap(flatten)] ReplayArg),
}

fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Parses the command line, sets up logging and runs the selected subcommand.
pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let env = env_logger::Env::default().default_filter_or(log_filter(args.verbose));
    env_logger::Builder::from_env(env).init();

    match args.mode {
        Mode::Evolve(arg) => evolve::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Replay(arg) => replay::run(&arg)?,
    }
    Ok(())
}
