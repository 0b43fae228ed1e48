//! gridfall - a falling-block puzzle engine with a terminal front end.
//!
//! The `core` module is the engine proper (grid, pieces, wall kicks, ghost,
//! game loop); `input` and `term` are thin adapters around crossterm.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
