//! Arcade shooter simulation core plus the terminal front end's building blocks.
//!
//! The binary in `main.rs` is thin I/O glue; everything it drives lives here so
//! integration tests in `tests/` can step the world tick by tick.

pub mod actors;
pub mod compute;
pub mod config;
pub mod display;
pub mod driver;
pub mod entities;
pub mod error;
pub mod input;
pub mod math;
pub mod sprites;
pub mod tuning;
