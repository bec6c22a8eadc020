use std::path::PathBuf;

use crate::{command::replay::app::ReplayApp, tui::Tui, util};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Solution file written by `evolve` (JSON format)
    solution_file: PathBuf,
    /// Playback speed in simulation steps per second
    #[arg(long, default_value_t = 10.0)]
    fps: f64,
}

/// Opens the replay viewer on the flight of a saved solution.
pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg { solution_file, fps } = arg;
    anyhow::ensure!(
        fps.is_finite() && *fps > 0.0,
        "--fps must be a positive number, got {fps}"
    );

    eprintln!("Loading solution from {}", solution_file.display());
    let record = util::read_solution_file(solution_file)?;
    let trajectory = record.trajectory();
    eprintln!("Loaded {} positions", trajectory.points.len());

    let mut app = ReplayApp::new(solution_file.clone(), trajectory, *fps);
    Tui::new().run(&mut app)?;

    Ok(())
}
