//! Assorted constants & hard-coded configuration
use ratatui::style::{Color, Style};
use std::time::Duration;

/// Poll timeout between ticks while the snake is moving vertically.
///
/// Vertical movement is slower than horizontal movement because terminal
/// cells are taller than they are wide.
pub(crate) const VERTICAL_TICK: Duration = Duration::from_millis(150);

/// Poll timeout between ticks while the snake is moving horizontally
pub(crate) const HORIZONTAL_TICK: Duration = Duration::from_millis(100);

/// Number of cells between the terminal edge and the arena wall
pub(crate) const PADDING: u16 = 3;

/// Unscaled snake length at the start of a game; the actual starting
/// length is this value run through the growth-scale function.
pub(crate) const INITIAL_SNAKE_LENGTH: i64 = 3;

/// Unscaled amount by which the snake shrinks when attrition strikes
pub(crate) const SHRINK_UNITS: f64 = 0.25;

/// A 1–100 draw above this value selects the next tier in the nested
/// special-food distribution.
pub(crate) const FOOD_TIER_THRESHOLD: u32 = 33;

/// A 1–100 draw above this value drops a bonus special food after a meal.
pub(crate) const SPECIAL_FOOD_THRESHOLD: u32 = 66;

/// Glyph for snake and food cells; everything is a colored cell
pub(crate) const CELL_SYMBOL: char = ' ';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().bg(Color::White);

/// Style for ordinary (+1) food
pub(crate) const ORDINARY_FOOD_STYLE: Style = Style::new().bg(Color::Blue);

/// Style for poison (−1) food
pub(crate) const POISON_FOOD_STYLE: Style = Style::new().bg(Color::Red);

/// Style for tier-three (+3) food
pub(crate) const TIER_THREE_FOOD_STYLE: Style = Style::new().bg(Color::Green);

/// Style for tier-nine (+9) food
pub(crate) const TIER_NINE_FOOD_STYLE: Style = Style::new().bg(Color::Yellow);
