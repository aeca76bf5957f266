mod arena;
mod direction;
mod food;
mod snake;
pub(crate) use self::arena::ArenaError;
use self::arena::Arena;
use self::direction::Direction;
use self::food::{Food, FoodKind};
use self::snake::Snake;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::options::Options;
use crate::util::center_rect;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Widget},
    Frame,
};
use std::collections::HashMap;
use std::io;
use std::time::Instant;

/// The whole game state: arena geometry, the snake, the food on the
/// floor, and the score accumulator.
///
/// The tick order is load-bearing: move, consume, shrink check, trim,
/// loss check, score update.  A shrink can drop the target length below
/// the occupied cell count on the same tick the trim resolves, and the
/// loss check must only see the post-trim chain.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    arena: Arena,
    snake: Snake,
    food: HashMap<Position, Food>,
    score: f64,
    int_score: i64,
    state: GameState,
    next_tick: Option<Instant>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(size: Size, options: Options) -> Result<Self, ArenaError> {
        Game::new_with_rng(size, options, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(
        size: Size,
        options: Options,
        rng: R,
    ) -> Result<Game<R>, ArenaError> {
        let arena = Arena::new(size, consts::PADDING, options.borderless)?;
        let target_len = arena
            .scaled_growth(
                consts::INITIAL_SNAKE_LENGTH as f64,
                consts::INITIAL_SNAKE_LENGTH,
            )
            .expect("INITIAL_SNAKE_LENGTH should be nonzero");
        let snake = Snake::new(arena.center(), target_len);
        let mut game = Game {
            rng,
            arena,
            snake,
            food: HashMap::new(),
            score: 0.0,
            int_score: 0,
            state: GameState::Running,
            next_tick: None,
        };
        game.drop_food(false);
        Ok(game)
    }

    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        if self.state == GameState::Running {
            if self.next_tick.is_none() {
                self.next_tick = Some(Instant::now() + self.snake.direction.tick_period());
            }
            let when = self.next_tick.expect("next_tick should be Some");
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.advance();
                self.next_tick = None;
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            // Paused and game-over both block on input
            Ok(self.handle_event(read()?))
        }
    }

    /// Run one tick of the simulation
    fn advance(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        let Some(head) = self.snake.advance(&self.arena) else {
            // The head left the addressable grid (or the chain has
            // emptied); end the game here and skip the rest of the tick.
            self.state = GameState::Over;
            return;
        };
        self.eat(head);
        self.check_shrink();
        self.snake.trim();
        self.check_loss();
        self.update_score();
    }

    fn eat(&mut self, head: Position) {
        if let Some(food) = self.food.remove(&head) {
            self.snake.grow(food.growth);
            self.score += self.snake.target_len as f64;
            self.drop_food(false);
            if self.rng.random_range(1..=100) > consts::SPECIAL_FOOD_THRESHOLD {
                self.drop_food(true);
            }
        }
    }

    fn drop_food(&mut self, special: bool) {
        let kind = if special {
            FoodKind::draw_special(&mut self.rng)
        } else {
            FoodKind::Ordinary
        };
        let mut pos = self.arena.random_food_position(&mut self.rng);
        while self.snake.contains(pos) || self.food.contains_key(&pos) {
            pos = self.arena.random_food_position(&mut self.rng);
        }
        let growth = self.scaled(kind.growth_units());
        self.food.insert(pos, Food { kind, growth });
    }

    /// Organic attrition: the odds of shrinking rise as the snake takes
    /// up more of the arena.
    fn check_shrink(&mut self) {
        let roll = self
            .rng
            .random_range(1..=i64::from(self.arena.perimeter()) * 2);
        if roll <= self.snake.target_len {
            let delta = self.scaled(consts::SHRINK_UNITS);
            self.snake.grow(-delta);
        }
    }

    fn check_loss(&mut self) {
        match self.snake.head() {
            None => self.state = GameState::Over,
            Some(head) => {
                if self.snake.self_collision()
                    || self.arena.is_border_row(head.y)
                    || self.arena.is_border_col(head.x)
                {
                    self.state = GameState::Over;
                }
            }
        }
    }

    fn update_score(&mut self) {
        self.score += 10.0 / f64::from(self.arena.perimeter()) * self.snake.target_len as f64;
        self.int_score = self.score as i64;
    }

    /// Scale a unit growth request to the arena.  A zero target length
    /// cannot be scaled; the game ends and the delta is neutral.
    fn scaled(&mut self, units: f64) -> i64 {
        match self.arena.scaled_growth(units, self.snake.target_len) {
            Some(delta) => delta,
            None => {
                self.state = GameState::Over;
                0
            }
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match self.state {
            GameState::Running => {
                match Command::from_key_event(event.as_key_press_event()?)? {
                    Command::Quit => return Some(Screen::Quit),
                    Command::Q => self.state = GameState::Over,
                    Command::Pause => self.state = GameState::Paused,
                    Command::Up => self.snake.turn(Direction::Up),
                    Command::Down => self.snake.turn(Direction::Down),
                    Command::Left => self.snake.turn(Direction::Left),
                    Command::Right => self.snake.turn(Direction::Right),
                    Command::Enter => (),
                }
            }
            GameState::Paused => {
                // Any keypress resumes
                let ev = event.as_key_press_event()?;
                if Command::from_key_event(ev) == Some(Command::Quit) {
                    return Some(Screen::Quit);
                }
                self.state = GameState::Running;
                self.next_tick = None;
            }
            GameState::Over => match Command::from_key_event(event.as_key_press_event()?)? {
                Command::Quit | Command::Enter => return Some(Screen::Quit),
                _ => (),
            },
        }
        None
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::bordered().render(self.arena.border_rect(), buf);
        let mut canvas = Canvas { area, buf };
        for &pos in &self.snake.cells {
            canvas.draw_cell(pos, consts::CELL_SYMBOL, consts::SNAKE_STYLE);
        }
        for (&pos, food) in &self.food {
            canvas.draw_cell(pos, consts::CELL_SYMBOL, food.kind.style());
        }
        self.render_score(buf);
        match self.state {
            GameState::Running => (),
            GameState::Paused => {
                Span::from("Paused!").render(
                    Rect {
                        width: area.width.min(7),
                        height: area.height.min(1),
                        ..area
                    },
                    buf,
                );
            }
            GameState::Over => self.render_game_over(area, buf),
        }
    }
}

impl<R> Game<R> {
    /*
     * ┌────────┐
     * │Score: 0│
     * └────────┘
     */
    fn render_score(&self, buf: &mut Buffer) {
        let text = format!("Score: {}", self.int_score);
        let width = u16::try_from(text.len()).unwrap_or(u16::MAX);
        let x = (self.arena.size().width / 2).saturating_sub(width / 2);
        let score_rect = Rect::new(
            x.saturating_sub(1),
            0,
            width.saturating_add(2),
            consts::PADDING,
        );
        let block = Block::bordered();
        let inner = block.inner(score_rect);
        block.render(score_rect, buf);
        Span::from(text).render(inner, buf);
    }

    /*
     * ┌──────────────┐
     * │  GAME OVER   │
     * │Final Score: 0│
     * │<press enter> │
     * └──────────────┘
     */
    fn render_game_over(&self, area: Rect, buf: &mut Buffer) {
        let final_score = format!("Final Score: {}", self.int_score);
        let messages = ["GAME OVER", final_score.as_str(), "<press enter>"];
        let width = messages
            .iter()
            .map(|m| u16::try_from(m.len()).unwrap_or(u16::MAX))
            .max()
            .unwrap_or(0);
        let panel = center_rect(
            area,
            Size::new(
                width.saturating_add(2),
                u16::try_from(messages.len()).unwrap_or(u16::MAX).saturating_add(2),
            ),
        );
        Clear.render(panel, buf);
        let block = Block::bordered();
        let inner = block.inner(panel);
        block.render(panel, buf);
        for (message, row) in messages.iter().zip(inner.rows()) {
            Line::from(*message).centered().render(row, buf);
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

/// Lifecycle state; `Over` is terminal
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    Paused,
    Over,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use rand::RngCore;
    use std::collections::VecDeque;

    /// An all-zeroes generator, so that every bounded draw comes out at
    /// the lower bound: food always spawns at (5, 5), the shrink check
    /// fires whenever the target length is positive, and no bonus
    /// special food ever drops.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    struct MinRng;

    impl RngCore for MinRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn game(size: Size, borderless: bool) -> Game<MinRng> {
        let options = Options { borderless };
        Game::new_with_rng(size, options, MinRng).expect("arena should fit")
    }

    #[test]
    fn first_tick_moves_right() {
        let mut game = game(Size::new(80, 24), false);
        assert_eq!(game.snake.target_len, 13);
        assert_eq!(game.snake.head(), Some(Position::new(46, 12)));
        game.advance();
        assert_eq!(game.snake.head(), Some(Position::new(47, 12)));
        assert_eq!(game.state, GameState::Running);
        // The shrink check fired, so the chain trimmed to the new target
        let shrink = game
            .arena
            .scaled_growth(consts::SHRINK_UNITS, 13)
            .expect("nonzero length should scale");
        assert_eq!(game.snake.target_len, 13 - shrink);
        assert_eq!(game.snake.cells.len(), 12);
        assert_eq!(game.int_score, 0);
        let expected = 10.0 / 176.0 * 12.0;
        assert!((game.score - expected).abs() < 1e-9, "score: {}", game.score);
    }

    #[test]
    fn eating_grows_and_scores() {
        let mut game = game(Size::new(80, 24), false);
        game.food.clear();
        game.food.insert(
            Position::new(47, 12),
            Food {
                kind: FoodKind::TierThree,
                growth: 13,
            },
        );
        game.advance();
        // Target went 13 + 13, then the shrink check took its cut
        let shrink = game
            .arena
            .scaled_growth(consts::SHRINK_UNITS, 26)
            .expect("nonzero length should scale");
        assert_eq!(game.snake.target_len, 26 - shrink);
        assert_eq!(game.state, GameState::Running);
        // Score: the post-growth target on consumption plus this tick's
        // survival points
        let expected = 26.0 + 10.0 / 176.0 * (26 - shrink) as f64;
        assert!((game.score - expected).abs() < 1e-9, "score: {}", game.score);
        // The eaten coordinate is gone and exactly one ordinary
        // replacement dropped
        assert!(!game.food.contains_key(&Position::new(47, 12)));
        assert_eq!(game.food.len(), 1);
        let replacement = game
            .food
            .get(&Position::new(5, 5))
            .expect("replacement food should spawn at the band corner");
        assert_eq!(replacement.kind, FoodKind::Ordinary);
    }

    #[test]
    fn poison_below_zero_is_fatal() {
        let mut game = game(Size::new(80, 24), false);
        game.food.clear();
        game.snake.cells = VecDeque::from([Position::new(45, 12), Position::new(46, 12)]);
        game.snake.target_len = 2;
        game.food.insert(
            Position::new(47, 12),
            Food {
                kind: FoodKind::Poison,
                growth: -5,
            },
        );
        game.advance();
        assert_eq!(game.snake.target_len, -3);
        assert!(game.snake.cells.is_empty());
        assert_eq!(game.state, GameState::Over);
    }

    #[test]
    fn wraparound_reflects_at_wall() {
        let mut game = game(Size::new(80, 24), true);
        game.food.clear();
        game.snake.cells = VecDeque::from([Position::new(74, 12), Position::new(75, 12)]);
        game.snake.target_len = 2;
        game.advance();
        assert_eq!(game.snake.head(), Some(Position::new(4, 12)));
        assert_eq!(game.state, GameState::Running);
    }

    #[test]
    fn wall_is_fatal_without_wraparound() {
        let mut game = game(Size::new(80, 24), false);
        game.food.clear();
        game.snake.cells = VecDeque::from([Position::new(74, 12), Position::new(75, 12)]);
        game.snake.target_len = 2;
        game.advance();
        assert_eq!(game.snake.head(), Some(Position::new(76, 12)));
        assert_eq!(game.state, GameState::Over);
    }

    #[test]
    fn self_collision_is_fatal() {
        let mut game = game(Size::new(80, 24), false);
        game.food.clear();
        // A hook shape about to bite its own flank; the bitten cell is
        // far enough from the tail that this tick's trim can't vacate it
        game.snake.cells = VecDeque::from([
            Position::new(44, 12),
            Position::new(45, 12),
            Position::new(46, 12),
            Position::new(47, 12),
            Position::new(47, 13),
            Position::new(46, 13),
        ]);
        game.snake.target_len = 7;
        game.snake.direction = Direction::Up;
        game.advance();
        assert_eq!(game.snake.head(), Some(Position::new(46, 12)));
        assert_eq!(game.state, GameState::Over);
    }

    #[test]
    fn zero_target_length_ends_the_game() {
        let mut game = game(Size::new(80, 24), false);
        game.snake.target_len = 0;
        assert_eq!(game.scaled(1.0), 0);
        assert_eq!(game.state, GameState::Over);
    }

    #[test]
    fn same_axis_input_is_ignored() {
        let mut game = game(Size::new(80, 24), false);
        assert!(game
            .handle_event(Event::Key(KeyCode::Left.into()))
            .is_none());
        assert_eq!(game.snake.direction, Direction::Right);
        assert!(game.handle_event(Event::Key(KeyCode::Up.into())).is_none());
        assert_eq!(game.snake.direction, Direction::Up);
        assert!(game
            .handle_event(Event::Key(KeyCode::Down.into()))
            .is_none());
        assert_eq!(game.snake.direction, Direction::Up);
    }

    #[test]
    fn pause_and_resume() {
        let mut game = game(Size::new(80, 24), false);
        assert!(game
            .handle_event(Event::Key(KeyCode::Char('p').into()))
            .is_none());
        assert_eq!(game.state, GameState::Paused);
        assert!(game
            .handle_event(Event::Key(KeyCode::Char('x').into()))
            .is_none());
        assert_eq!(game.state, GameState::Running);
    }

    #[test]
    fn quit_key_ends_the_game() {
        let mut game = game(Size::new(80, 24), false);
        assert!(game
            .handle_event(Event::Key(KeyCode::Char('q').into()))
            .is_none());
        assert_eq!(game.state, GameState::Over);
        // Only Enter acknowledges the end panel
        assert!(game
            .handle_event(Event::Key(KeyCode::Char('x').into()))
            .is_none());
        assert_eq!(game.state, GameState::Over);
        assert!(matches!(
            game.handle_event(Event::Key(KeyCode::Enter.into())),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn new_game_render() {
        let game = game(Size::new(80, 24), false);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "                                   ┌────────┐                                   ",
            "                                   │Score: 0│                                   ",
            "                                   └────────┘                                   ",
            "   ┌────────────────────────────────────────────────────────────────────────┐   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   └────────────────────────────────────────────────────────────────────────┘   ",
            "                                                                                ",
            "                                                                                ",
            "                                                                                ",
        ]);
        expected.set_style(Rect::new(34, 12, 13, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(5, 5, 1, 1), consts::ORDINARY_FOOD_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn game_over_render() {
        let mut game = game(Size::new(80, 25), false);
        game.state = GameState::Over;
        let area = Rect::new(0, 0, 80, 25);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "                                   ┌────────┐                                   ",
            "                                   │Score: 0│                                   ",
            "                                   └────────┘                                   ",
            "   ┌────────────────────────────────────────────────────────────────────────┐   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                            ┌──────────────┐                            │   ",
            "   │                            │  GAME OVER   │                            │   ",
            "   │                            │Final Score: 0│                            │   ",
            "   │                            │<press enter> │                            │   ",
            "   │                            └──────────────┘                            │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   │                                                                        │   ",
            "   └────────────────────────────────────────────────────────────────────────┘   ",
            "                                                                                ",
            "                                                                                ",
            "                                                                                ",
        ]);
        expected.set_style(Rect::new(5, 5, 1, 1), consts::ORDINARY_FOOD_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }
}
