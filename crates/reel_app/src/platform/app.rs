use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use reel_core::{update, AppState, Msg};
use reel_engine::Engine;
use reel_logging::{reel_info, reel_warn};

use super::config::{AppConfig, API_KEY_ENV, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui::commands::{self, Command};
use super::ui::render;

const TICK: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let config = AppConfig::load(&config_path)?
        .with_api_key_override(std::env::var(API_KEY_ENV).ok());

    logging::initialize(LogDestination::from_flag(config.log_to_terminal));
    reel_info!("reel starting with config {:?}", config_path);

    let engine = Engine::new(config.api_config()?).context("starting fetch engine")?;
    let mut runner = EffectRunner::new(&engine);
    let lines = spawn_stdin_reader();

    let mut state = AppState::new();
    println!("{}", commands::HELP);
    print_screen(&state).context("writing to the terminal")?;

    loop {
        let msg = match lines.recv_timeout(TICK) {
            Ok(line) => match commands::parse(&line) {
                Command::Quit => break,
                Command::Help => {
                    println!("{}", commands::HELP);
                    Msg::NoOp
                }
                command => command_to_msg(command, &state),
            },
            Err(RecvTimeoutError::Timeout) => Msg::Tick,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        let mut inbox = vec![msg];
        inbox.extend(runner.poll());
        for msg in inbox {
            let (next, effects) = update(std::mem::take(&mut state), msg);
            state = next;
            runner.enqueue(effects);
        }

        if state.consume_dirty() {
            print_screen(&state).context("writing to the terminal")?;
        }
    }

    reel_info!("reel exiting with {} watched movies", state.watched().len());
    Ok(())
}

fn command_to_msg(command: Command, state: &AppState) -> Msg {
    match command {
        Command::Query(text) => Msg::QueryEdited(text),
        Command::Open(index) => match state.view().results.get(index - 1) {
            Some(row) => Msg::MovieClicked(row.id.clone()),
            None => {
                println!("No result number {index}.");
                Msg::NoOp
            }
        },
        Command::Close => Msg::MovieClosed,
        Command::Rate(value) => Msg::UserRated(value),
        Command::Add => Msg::AddWatchedClicked,
        Command::Invalid(reason) => {
            println!("{reason} (:help lists commands)");
            Msg::NoOp
        }
        Command::Help | Command::Quit => Msg::NoOp,
    }
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    reel_warn!("stdin read failed: {}", err);
                    break;
                }
            }
        }
    });
    rx
}

fn print_screen(state: &AppState) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}> ", render::render(&state.view()))?;
    stdout.flush()
}
