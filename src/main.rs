mod app;
mod command;
mod consts;
mod game;
mod options;
mod util;
use crate::app::App;
use crate::game::ArenaError;
use crate::options::{Cli, Options, USAGE};
use anyhow::Context;
use ratatui::{backend::Backend, Terminal};
use std::io::{self, ErrorKind};
use std::process::ExitCode;

fn main() -> ExitCode {
    let options = match Cli::from_env() {
        Ok(Cli::Run(options)) => options,
        Ok(Cli::Help) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("slither: {e}");
            eprintln!("Usage: slither [-b|--borderless]");
            return ExitCode::from(2);
        }
    };
    let mut terminal = ratatui::init();
    let r = run(&mut terminal, options);
    ratatui::restore();
    exit_code(r)
}

fn run<B: Backend>(terminal: &mut Terminal<B>, options: Options) -> anyhow::Result<()> {
    let size = terminal.size().context("failed to query terminal size")?;
    let app = App::new(size, options)?;
    app.run(terminal)?;
    Ok(())
}

fn exit_code(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is::<ArenaError>() => {
            eprintln!("slither: {e}");
            ExitCode::from(3)
        }
        Err(e)
            if e.downcast_ref::<io::Error>()
                .is_some_and(|ioe| ioe.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("slither: {e:#}");
            ExitCode::from(2)
        }
    }
}
