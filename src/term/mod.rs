//! Terminal presentation adapter.
//!
//! `view` composes grid, active piece, and ghost into styled rows (pure, no
//! I/O); `renderer` owns the terminal session and flushes rows to it.

mod renderer;
mod view;

pub use renderer::TerminalRenderer;
pub use view::{GameView, ViewCell};
