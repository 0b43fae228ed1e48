//! Input adapter - crossterm key events to per-frame [`FrameInput`].

mod collector;

pub use collector::{should_quit, InputCollector};
