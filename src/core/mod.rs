//! Core module - pure game logic with no terminal or I/O dependencies
//!
//! Everything here is synchronous and frame-driven: the driver calls
//! [`Game::update`] once per frame with the polled input and elapsed time,
//! then reads grid, active piece, and ghost for presentation.

pub mod catalog;
pub mod game;
pub mod ghost;
pub mod grid;
pub mod piece;
pub mod rng;

pub use catalog::{CatalogError, ShapeCatalog, ShapeData, ShapeDef};
pub use game::Game;
pub use grid::{Bounds, Grid};
pub use piece::{ActivePiece, StepOutcome};
pub use rng::SimpleRng;
