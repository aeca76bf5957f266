use super::direction::Direction;
use rand::Rng;
use ratatui::layout::{Position, Rect, Size};
use thiserror::Error;

/// Fixed geometry of a game's playing field.
///
/// Coordinates are absolute terminal coordinates.  The walls sit
/// `padding` cells in from the terminal edge; the interior is everything
/// strictly inside the walls.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Arena {
    size: Size,
    padding: u16,
    interior: Size,
    perimeter: u32,
    wrap: bool,
}

impl Arena {
    pub(super) fn new(size: Size, padding: u16, wrap: bool) -> Result<Arena, ArenaError> {
        let trim = 2 * padding + 2;
        let interior = Size {
            width: size.width.saturating_sub(trim),
            height: size.height.saturating_sub(trim),
        };
        // The food-spawn band sits one cell inside the interior, so each
        // interior span must be at least three cells.
        if interior.width < 3 || interior.height < 3 {
            return Err(ArenaError::TooSmall {
                width: size.width,
                height: size.height,
                padding,
            });
        }
        let perimeter = 2 * (u32::from(interior.width) + u32::from(interior.height));
        Ok(Arena {
            size,
            padding,
            interior,
            perimeter,
            wrap,
        })
    }

    pub(super) fn size(&self) -> Size {
        self.size
    }

    pub(super) fn perimeter(&self) -> u32 {
        self.perimeter
    }

    pub(super) fn wrap(&self) -> bool {
        self.wrap
    }

    pub(super) fn center(&self) -> Position {
        Position::new(self.size.width / 2, self.size.height / 2)
    }

    /// The rectangle the wall is drawn on
    pub(super) fn border_rect(&self) -> Rect {
        Rect::new(
            self.padding,
            self.padding,
            self.size.width - 2 * self.padding,
            self.size.height - 2 * self.padding,
        )
    }

    pub(super) fn is_border_row(&self, y: u16) -> bool {
        y == self.padding || y == self.size.height - self.padding - 1
    }

    pub(super) fn is_border_col(&self, x: u16) -> bool {
        x == self.padding || x == self.size.width - self.padding - 1
    }

    /// In wrap mode, a head landing exactly on a wall is carried to the
    /// opposite edge of the interior by the interior span.  Positions not
    /// on a wall are returned unchanged.
    pub(super) fn reflect(&self, pos: Position, direction: Direction) -> Position {
        let Position { mut x, mut y } = pos;
        match direction {
            Direction::Down if self.is_border_row(y) => y -= self.interior.height,
            Direction::Up if self.is_border_row(y) => y += self.interior.height,
            Direction::Right if self.is_border_col(x) => x -= self.interior.width,
            Direction::Left if self.is_border_col(x) => x += self.interior.width,
            _ => (),
        }
        Position { x, y }
    }

    /// Pick a position in the spawn band, one cell in from the walls on
    /// every side.
    pub(super) fn random_food_position<R: Rng>(&self, rng: &mut R) -> Position {
        let x = rng.random_range(self.padding + 2..=self.size.width - self.padding - 3);
        let y = rng.random_range(self.padding + 2..=self.size.height - self.padding - 3);
        Position::new(x, y)
    }

    /// Convert a unit growth request into an arena-scaled delta.
    ///
    /// The result keeps the sign of `units` and always has magnitude at
    /// least one; the scale rises with the arena perimeter and flattens
    /// as the snake lengthens.  A zero `target_len` cannot be scaled and
    /// yields `None`; the engine treats that as a terminal condition.
    pub(super) fn scaled_growth(&self, units: f64, target_len: i64) -> Option<i64> {
        if target_len == 0 {
            return None;
        }
        let polarity = if units < 0.0 { -1 } else { 1 };
        let curve = 1.0 - 1.0 / target_len as f64;
        let scale = f64::from(self.perimeter).sqrt() / 2.0;
        let magnitude = (units.abs() * scale * curve) as i64;
        Some(polarity * magnitude.max(1))
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum ArenaError {
    #[error("terminal is too small for the game: {width}x{height} cells with a padding of {padding}")]
    TooSmall { width: u16, height: u16, padding: u16 },
}
