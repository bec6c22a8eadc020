//! Minimal terminal runtime: a tick-driven event loop that redraws on change.

mod app;
mod event_loop;
mod runner;

pub use self::{app::App, runner::Tui};
