use super::arena::Arena;
use super::direction::Direction;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The segment chain.
///
/// `cells` holds the rendered segments in order, tail at the front and
/// head at the back.  `target_len` is the length the chain is converging
/// toward: the head is appended immediately each tick, while the tail is
/// trimmed toward the target over subsequent ticks.  Poison can push the
/// target negative; the chain then empties and the next loss check ends
/// the game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    pub(super) cells: VecDeque<Position>,
    pub(super) target_len: i64,
    pub(super) direction: Direction,
}

impl Snake {
    /// Lay out a new snake of `target_len` cells in a horizontal line
    /// centered on `center`, head at the right end, moving right.
    pub(super) fn new(center: Position, target_len: i64) -> Snake {
        let half = u16::try_from(target_len / 2).unwrap_or(0);
        let start = center.x.saturating_sub(half);
        let cells = (0..target_len.max(0))
            .map(|i| Position::new(start.saturating_add(u16::try_from(i).unwrap_or(0)), center.y))
            .collect();
        Snake {
            cells,
            target_len,
            direction: Direction::Right,
        }
    }

    pub(super) fn head(&self) -> Option<Position> {
        self.cells.back().copied()
    }

    pub(super) fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Turn toward `direction`.  Input on the snake's current axis
    /// (including a direct reversal) is ignored.
    pub(super) fn turn(&mut self, direction: Direction) {
        if direction.axis() != self.direction.axis() {
            self.direction = direction;
        }
    }

    /// Append a new head one cell onward in the current direction,
    /// reflecting off walls in wrap mode.  Returns the new head, or
    /// `None` if the snake is gone or the head left the grid.
    pub(super) fn advance(&mut self, arena: &Arena) -> Option<Position> {
        let head = self.head()?;
        let mut pos = self.direction.step(head)?;
        if arena.wrap() {
            pos = arena.reflect(pos, self.direction);
        }
        self.cells.push_back(pos);
        Some(pos)
    }

    /// Drop tail cells until the rendered length is within the target
    pub(super) fn trim(&mut self) {
        let target = usize::try_from(self.target_len).unwrap_or(0);
        while self.cells.len() > target {
            let _ = self.cells.pop_front();
        }
    }

    pub(super) fn grow(&mut self, delta: i64) {
        self.target_len += delta;
    }

    /// Does the head share a coordinate with any other cell?
    pub(super) fn self_collision(&self) -> bool {
        let Some(head) = self.head() else {
            return false;
        };
        self.cells.iter().rev().skip(1).any(|&p| p == head)
    }
}
