/// Logical keys held during one tick. Sampled once per tick by the world;
/// the pause toggle is a discrete press and lives on the frame driver instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub spawn: bool,
}

impl InputSnapshot {
    pub fn idle() -> Self {
        Self::default()
    }
}
