use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{LevelFilter, info};
use nibbles::audio::BellSink;
use nibbles::config::{ConfigError, FRAME_INTERVAL_MS, GameConfig};
use nibbles::game::GameSession;
use nibbles::input::{GameInput, InputHandler};
use nibbles::level::Level;
use nibbles::renderer::{self, HudInfo};
use nibbles::terminal_runtime::{TerminalError, TerminalSession};
use simplelog::{Config, WriteLogger};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(version, about = "Nibbles: eat apples, grow, don't crash")]
struct Cli {
    /// JSON config file; defaults to the platform config dir when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in cells, walls included.
    #[arg(long)]
    width: Option<u16>,

    /// Board height in cells, walls included.
    #[arg(long)]
    height: Option<u16>,

    /// Starting speed in moves per second.
    #[arg(long)]
    speed: Option<f64>,

    /// Write logs to this file. Nothing is logged without it.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    #[arg(long = "log-level", default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Terminal(#[from] TerminalError),
    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        WriteLogger::init(cli.log_level, Config::default(), File::create(path)?)?;
    }

    let config = load_config(&cli)?;
    run(config)
}

fn load_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let mut config = GameConfig::load(cli.config.as_deref())?;

    if let Some(width) = cli.width {
        config.board_width_cells = width;
    }
    if let Some(height) = cli.height {
        config.board_height_cells = height;
    }
    if let Some(speed) = cli.speed {
        config.initial_speed = speed;
    }

    config.validate()?;
    Ok(config)
}

fn run(config: GameConfig) -> Result<(), AppError> {
    let walls = Level::bordered(config.board_width_cells, config.board_height_cells);
    let mut session = GameSession::new(config, walls, BellSink::stdout());
    let mut input = InputHandler::new(Duration::ZERO);
    let mut terminal = TerminalSession::enter()?;

    info!("terminal session started");
    let mut last_frame = Instant::now();

    loop {
        let info = HudInfo {
            muted: session.sink().is_muted(),
        };
        terminal
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &session, info))?;

        if let Some(game_input) = input.poll_input()? {
            if game_input == GameInput::Quit {
                break;
            }

            session.apply_input(game_input);
        }

        let now = Instant::now();
        session.update(now - last_frame);
        last_frame = now;

        thread::sleep(Duration::from_millis(FRAME_INTERVAL_MS));
    }

    info!(
        "quit with score {} after {} apples",
        session.score(),
        session.apples_eaten()
    );
    Ok(())
}
