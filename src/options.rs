use lexopt::{Arg, Parser};

/// Help text, including the legend the original curses game printed in
/// its argparse epilog
pub(crate) static USAGE: &str = "\
Usage: slither [-b|--borderless]

Eat food, stay alive, get the high score!

Options:
  -b, --borderless  enable wrap-around at arena borders
  -h, --help        show this help and exit

Eat food to stay alive and grow longer.
Gain points for survival.
Don't hit the borders, starve to death, or eat yourself!

Food Types:
- Blue:   Grow by 1
- Green:  Grow by 3
- Yellow: Grow by 9
- Red:    Poison!  Shrink by 1
";

/// Gameplay options selected on the command line
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Options {
    /// Wrap around at the arena borders instead of dying on them
    pub(crate) borderless: bool,
}

/// Result of parsing the command line
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Cli {
    Run(Options),
    Help,
}

impl Cli {
    pub(crate) fn from_env() -> Result<Cli, lexopt::Error> {
        Cli::from_parser(Parser::from_env())
    }

    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut options = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('b') | Arg::Long("borderless") => options.borderless = true,
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                other => return Err(other.unexpected()),
            }
        }
        Ok(Cli::Run(options))
    }
}
