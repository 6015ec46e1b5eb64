//! Game-loop driver: turns the frame scheduler's timestamps into world ticks.

use log::{info, trace};
use rand::Rng;

use crate::compute::{World, WorldEvent};
use crate::entities::RenderSink;
use crate::input::InputSnapshot;

/// Receives one monotonic timestamp per displayed frame.
///
/// While paused the scheduler keeps calling [`FrameDriver::frame`] but the
/// world is not updated. Timers inside the world compare wall-clock
/// timestamps, so cool-downs that ran out during the pause are ready on the
/// first frame after resuming.
#[derive(Clone, Debug, Default)]
pub struct FrameDriver {
    last_timestamp: Option<u64>,
    last_dt: u64,
    paused: bool,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Milliseconds between the two most recent frames. Informational only:
    /// motion is per tick, not per millisecond.
    pub fn last_dt(&self) -> u64 {
        self.last_dt
    }

    /// Flip the pause state on a discrete key press.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!("paused: {}", self.paused);
    }

    /// Handle one frame. Returns the tick's events, or `None` when paused.
    pub fn frame(
        &mut self,
        timestamp: u64,
        world: &mut World,
        input: &InputSnapshot,
        rng: &mut impl Rng,
        sink: &mut impl RenderSink,
    ) -> Option<Vec<WorldEvent>> {
        self.last_dt = self
            .last_timestamp
            .map(|last| timestamp.saturating_sub(last))
            .unwrap_or(0);
        self.last_timestamp = Some(timestamp);

        if self.paused {
            return None;
        }
        trace!("tick at {timestamp}ms, dt {}ms", self.last_dt);
        Some(world.update(timestamp, input, rng, sink))
    }
}
