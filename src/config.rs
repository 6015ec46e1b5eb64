use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

use crate::error::GameError;
use crate::math::Playfield;

// Runtime/terminal settings (gameplay constants live in `tuning`).

pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 12;
/// Rows reserved for the HUD (top) and the controls hint (bottom).
pub const CHROME_ROWS: u16 = 2;

#[derive(Debug, Clone, Parser)]
#[command(name = "sky-ace", version, about = "Top-down arcade shooter in the terminal")]
pub struct Config {
    /// Frames per second of the game loop.
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Playfield pixels covered by one terminal column.
    #[arg(long, default_value_t = 10.0)]
    pub cell_width: f32,

    /// Playfield pixels covered by one terminal row.
    #[arg(long, default_value_t = 20.0)]
    pub cell_height: f32,

    /// Seed for enemy spawning; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write log records to this file. Logging is off without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Config {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.fps == 0 {
            return Err(GameError::Config("fps must be greater than zero".to_string()));
        }
        if !(self.cell_width > 0.0 && self.cell_height > 0.0) {
            return Err(GameError::Config(format!(
                "cell size must be positive, got {}x{}",
                self.cell_width, self.cell_height
            )));
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }

    /// Playfield in pixels for a terminal of `cols` x `rows` cells.
    pub fn playfield(&self, cols: u16, rows: u16) -> Result<Playfield, GameError> {
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(GameError::TerminalTooSmall { cols, rows });
        }
        Ok(Playfield::new(
            f32::from(cols) * self.cell_width,
            f32::from(rows - CHROME_ROWS) * self.cell_height,
        ))
    }
}
