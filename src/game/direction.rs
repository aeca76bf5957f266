use crate::consts;
use ratatui::layout::Position;
use std::time::Duration;

/// The direction the snake's head is travelling in
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub(super) fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    /// How long to wait for input before the next tick.  Vertical travel
    /// uses a longer timeout so that the snake covers rows and columns at
    /// roughly the same visual speed.
    pub(super) fn tick_period(self) -> Duration {
        match self.axis() {
            Axis::Vertical => consts::VERTICAL_TICK,
            Axis::Horizontal => consts::HORIZONTAL_TICK,
        }
    }

    /// Move `pos` one cell in this direction.  Returns `None` if the
    /// result would leave the addressable grid.
    pub(super) fn step(self, pos: Position) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => y = y.checked_sub(1)?,
            Direction::Down => y = y.checked_add(1)?,
            Direction::Left => x = x.checked_sub(1)?,
            Direction::Right => x = x.checked_add(1)?,
        }
        Some(Position { x, y })
    }
}

/// Grid axis of a [`Direction`]; input on the snake's current axis is
/// ignored so that a single keypress can never reverse the snake into
/// itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Axis {
    Vertical,
    Horizontal,
}
