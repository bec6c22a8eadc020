use std::path::PathBuf;

use crossterm::event::{Event, KeyCode, KeyEvent};
use intercept_engine::{Outcome, Trajectory, TrajectoryPoint, Vec2};
use ratatui::{
    Frame,
    layout::{Constraint, HorizontalAlignment, Layout, Spacing},
    style::{Color, Style},
    symbols::{Marker, merge::MergeStrategy},
    text::{Line, Span, Text},
    widgets::{
        Block as BlockWidget, Padding, Paragraph,
        canvas::{Canvas, Line as CanvasLine, Points},
    },
};

use crate::tui::{App, Tui};

/// Fraction of the flight extent added around the canvas.
const CANVAS_MARGIN: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    TogglePlay,
    Prev(usize),
    Next(usize),
    First,
    Last,
    Quit,
}

impl Action {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        match event.code {
            KeyCode::Char(' ') => Some(Self::TogglePlay),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::Prev(1)),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::Next(1)),
            KeyCode::Char('h') | KeyCode::Left => Some(Self::Prev(10)),
            KeyCode::Char('l') | KeyCode::Right => Some(Self::Next(10)),
            KeyCode::Char('g') | KeyCode::Home => Some(Self::First),
            KeyCode::Char('G') | KeyCode::End => Some(Self::Last),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Animates a recorded flight step by step.
#[derive(Debug)]
pub struct ReplayApp {
    path: PathBuf,
    trajectory: Trajectory,
    fps: f64,
    index: usize,
    play: bool,
    should_exit: bool,
}

impl ReplayApp {
    /// Creates a viewer that starts playing from the launch.
    ///
    /// # Arguments
    ///
    /// * `path` - shown in the title bar
    /// * `trajectory` - recorded flight to animate
    /// * `fps` - playback speed in steps per second
    pub fn new(path: PathBuf, trajectory: Trajectory, fps: f64) -> Self {
        Self {
            path,
            trajectory,
            fps,
            index: 0,
            play: true,
            should_exit: false,
        }
    }

    fn update_tick_rate(&self, tui: &mut Tui) {
        tui.set_tick_rate(self.play.then_some(self.fps));
    }

    fn last_index(&self) -> usize {
        self.trajectory.points.len().saturating_sub(1)
    }

    fn step_forward(&mut self, amount: usize) {
        self.index = usize::min(self.index + amount, self.last_index());
    }

    fn step_backward(&mut self, amount: usize) {
        self.index = self.index.saturating_sub(amount);
    }

    fn is_at_end(&self) -> bool {
        self.index >= self.last_index()
    }

    fn header(&self, point: &TrajectoryPoint) -> Vec<Line<'static>> {
        let outcome = if self.is_at_end() {
            match self.trajectory.outcome {
                Outcome::Hit { time, distance } => Span::styled(
                    format!("HIT at t={time} (distance {distance:.2})"),
                    Color::Green,
                ),
                Outcome::Miss { time, distance } => Span::styled(
                    format!("MISS at t={time} (distance {distance:.2})"),
                    Color::Red,
                ),
            }
        } else if self.play {
            Span::raw("playing")
        } else {
            Span::raw("paused")
        };
        vec![
            Line::from(format!(
                "Step: {:5}/{:5}  Time: {:8.2}  Angle: {:.4} rad  Speed: {:.2}",
                self.index,
                self.last_index(),
                point.time,
                self.trajectory.candidate.angle(),
                self.trajectory.candidate.speed(),
            )),
            Line::from(format!(
                "Projectile: ({:9.2}, {:9.2})  Target: ({:9.2}, {:9.2})  Distance: {:9.2}",
                point.projectile.x,
                point.projectile.y,
                point.target.x,
                point.target.y,
                point.projectile.distance(point.target),
            )),
            Line::from(outcome),
        ]
    }
}

impl App for ReplayApp {
    fn init(&mut self, tui: &mut Tui) {
        self.update_tick_rate(tui);
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn handle_event(&mut self, tui: &mut Tui, event: &Event) {
        if let Some(event) = event.as_key_event()
            && let Some(action) = Action::from_key_event(&event)
        {
            match action {
                Action::TogglePlay => {
                    if !self.play && self.is_at_end() {
                        self.index = 0;
                    }
                    self.play = !self.play;
                    self.update_tick_rate(tui);
                }
                Action::Prev(amount) => self.step_backward(amount),
                Action::Next(amount) => self.step_forward(amount),
                Action::First => self.index = 0,
                Action::Last => self.index = self.last_index(),
                Action::Quit => self.should_exit = true,
            }
        }
    }

    fn update(&mut self, tui: &mut Tui) {
        self.step_forward(1);
        if self.is_at_end() {
            self.play = false;
            self.update_tick_rate(tui);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let top_block = BlockWidget::bordered()
            .title(format!("Replay: {}", self.path.display()))
            .title_alignment(HorizontalAlignment::Center)
            .padding(Padding::symmetric(1, 0));
        let viewport = frame.area();

        let Some(point) = self.trajectory.points.get(self.index) else {
            let text_area = top_block
                .inner(viewport)
                .centered_vertically(Constraint::Length(1));
            let text = Text::from("NO POSITIONS RECORDED")
                .centered()
                .style(Color::Red);
            frame.render_widget(top_block, viewport);
            frame.render_widget(text, text_area);
            return;
        };

        let [top_area, mid_area, bottom_area] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .spacing(Spacing::Overlap(1))
        .areas(viewport);

        let header = Paragraph::new(self.header(point))
            .block(top_block.merge_borders(MergeStrategy::Exact));

        let shown = &self.trajectory.points[..=self.index];
        let projectile_path = shown
            .iter()
            .map(|p| (p.projectile.x, p.projectile.y))
            .collect::<Vec<_>>();
        let target_path = shown
            .iter()
            .map(|p| (p.target.x, p.target.y))
            .collect::<Vec<_>>();
        let (min, max) = canvas_bounds(&self.trajectory);
        let canvas = Canvas::default()
            .block(BlockWidget::bordered().merge_borders(MergeStrategy::Exact))
            .marker(Marker::Braille)
            .x_bounds([min.x, max.x])
            .y_bounds([min.y, max.y])
            .paint(|ctx| {
                ctx.draw(&CanvasLine::new(min.x, 0.0, max.x, 0.0, Color::DarkGray));
                ctx.draw(&Points {
                    coords: &target_path,
                    color: Color::Red,
                });
                ctx.draw(&Points {
                    coords: &projectile_path,
                    color: Color::Yellow,
                });
                ctx.print(
                    point.target.x,
                    point.target.y,
                    Span::styled("X", Style::new().fg(Color::Red)),
                );
                ctx.print(
                    point.projectile.x,
                    point.projectile.y,
                    Span::styled("o", Style::new().fg(Color::Yellow)),
                );
            });

        let help = Paragraph::new(vec![
            Line::from("Space (Play/Pause) | j/k or ↓/↑ (1 step) | h/l or ←/→ (10 steps) | g/Home (First) | G/End (Last) | q/Esc (Quit)").centered(),
        ]).style(Color::DarkGray)
        .block(BlockWidget::bordered().merge_borders(MergeStrategy::Exact));

        frame.render_widget(header, top_area);
        frame.render_widget(canvas, mid_area);
        frame.render_widget(help, bottom_area);
    }
}

/// World-space box shown on the canvas: the flight extent plus the launch site and the
/// ground line, with a margin.
fn canvas_bounds(trajectory: &Trajectory) -> (Vec2, Vec2) {
    let (min, max) = trajectory.bounds().unwrap_or((Vec2::ZERO, Vec2::ZERO));
    let min = Vec2::new(min.x.min(0.0), min.y.min(0.0));
    let max = Vec2::new(max.x.max(0.0), max.y.max(0.0));
    let size = max - min;
    let margin = Vec2::new(
        (size.x * CANVAS_MARGIN).max(1.0),
        (size.y * CANVAS_MARGIN).max(1.0),
    );
    (min - margin, max + margin)
}
