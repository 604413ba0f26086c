use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

use crate::direction::Direction;
use crate::snake::{Cell, Position};

const APP_DIR_NAME: &str = "nibbles";
const CONFIG_FILE_NAME: &str = "config.json";

/// Pixel size of one grid cell.
pub const DEFAULT_GRID_CELL_SIZE: i32 = 8;

/// Board width in cells, walls included.
pub const DEFAULT_BOARD_WIDTH_CELLS: u16 = 20;

/// Board height in cells, walls included.
pub const DEFAULT_BOARD_HEIGHT_CELLS: u16 = 15;

/// Movement ticks per second at the start of a session.
pub const DEFAULT_INITIAL_SPEED: f64 = 1.5;

/// Speed multiplier applied on every apple.
pub const DEFAULT_SPEED_GROWTH_FACTOR: f64 = 1.1;

/// Segments added per apple.
pub const DEFAULT_GROWTH_PER_FOOD: u32 = 4;

/// Apples needed per level counter increase.
pub const DEFAULT_APPLES_PER_LEVEL: u32 = 5;

/// Segment count of a fresh snake.
pub const DEFAULT_START_LENGTH: usize = 3;

/// Head cell of a fresh snake.
pub const DEFAULT_START_CELL: (i32, i32) = (4, 4);

/// Smallest board that still has an interior inside the walls.
pub const MIN_BOARD_CELLS: u16 = 3;

/// Largest number of segments a single apple may add.
pub const MAX_GROWTH_PER_FOOD: u32 = 1_000;

/// Static game parameters.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid_cell_size: i32,
    pub board_width_cells: u16,
    pub board_height_cells: u16,
    pub initial_speed: f64,
    pub speed_growth_factor: f64,
    pub growth_per_food: u32,
    pub apples_per_level: u32,
    pub start_length: usize,
    pub start_cell: (i32, i32),
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_cell_size: DEFAULT_GRID_CELL_SIZE,
            board_width_cells: DEFAULT_BOARD_WIDTH_CELLS,
            board_height_cells: DEFAULT_BOARD_HEIGHT_CELLS,
            initial_speed: DEFAULT_INITIAL_SPEED,
            speed_growth_factor: DEFAULT_SPEED_GROWTH_FACTOR,
            growth_per_food: DEFAULT_GROWTH_PER_FOOD,
            apples_per_level: DEFAULT_APPLES_PER_LEVEL,
            start_length: DEFAULT_START_LENGTH,
            start_cell: DEFAULT_START_CELL,
        }
    }
}

/// Failures while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("grid cell size must be positive, got {0}")]
    CellSize(i32),
    #[error("board must be at least {min}x{min} cells, got {width}x{height}")]
    BoardTooSmall { width: u16, height: u16, min: u16 },
    #[error("board of {width}x{height} cells at cell size {cell_size} is too large")]
    BoardTooLarge {
        width: u16,
        height: u16,
        cell_size: i32,
    },
    #[error("growth per food must be at most {max}, got {value}")]
    GrowthPerFood { value: u32, max: u32 },
    #[error("initial speed must be a positive number, got {0}")]
    Speed(f64),
    #[error("speed growth factor must be at least 1.0, got {0}")]
    SpeedGrowth(f64),
    #[error("apples per level must be positive")]
    ApplesPerLevel,
    #[error("starting snake of length {length} at {cell:?} does not fit inside the walls")]
    StartOutsideBoard { length: usize, cell: (i32, i32) },
}

impl GameConfig {
    /// Parses a JSON document on top of the defaults.
    pub fn from_json(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the config from `path`, or from the default location when `path`
    /// is `None`. A missing default file yields the built-in defaults; a
    /// missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        Self::from_json(&raw, &path)
    }

    /// Checks that the parameters describe a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_cell_size <= 0 {
            return Err(ConfigError::CellSize(self.grid_cell_size));
        }

        if self.board_width_cells < MIN_BOARD_CELLS || self.board_height_cells < MIN_BOARD_CELLS {
            return Err(ConfigError::BoardTooSmall {
                width: self.board_width_cells,
                height: self.board_height_cells,
                min: MIN_BOARD_CELLS,
            });
        }

        // Pixel extents must fit in i32, and the board plus the HUD row in u16.
        let width_fits = i32::from(self.board_width_cells)
            .checked_mul(self.grid_cell_size)
            .is_some();
        let height_fits = i32::from(self.board_height_cells)
            .checked_mul(self.grid_cell_size)
            .is_some();
        if !width_fits || !height_fits || self.board_height_cells.checked_add(1).is_none() {
            return Err(ConfigError::BoardTooLarge {
                width: self.board_width_cells,
                height: self.board_height_cells,
                cell_size: self.grid_cell_size,
            });
        }

        if self.growth_per_food > MAX_GROWTH_PER_FOOD {
            return Err(ConfigError::GrowthPerFood {
                value: self.growth_per_food,
                max: MAX_GROWTH_PER_FOOD,
            });
        }

        if !(self.initial_speed.is_finite() && self.initial_speed > 0.0) {
            return Err(ConfigError::Speed(self.initial_speed));
        }

        if !(self.speed_growth_factor.is_finite() && self.speed_growth_factor >= 1.0) {
            return Err(ConfigError::SpeedGrowth(self.speed_growth_factor));
        }

        if self.apples_per_level == 0 {
            return Err(ConfigError::ApplesPerLevel);
        }

        if !self.start_fits_inside_walls() {
            return Err(ConfigError::StartOutsideBoard {
                length: self.start_length,
                cell: self.start_cell,
            });
        }

        Ok(())
    }

    /// Board width in pixels.
    #[must_use]
    pub fn width_px(&self) -> i32 {
        i32::from(self.board_width_cells) * self.grid_cell_size
    }

    /// Board height in pixels.
    #[must_use]
    pub fn height_px(&self) -> i32 {
        i32::from(self.board_height_cells) * self.grid_cell_size
    }

    /// Head position of a freshly started snake.
    #[must_use]
    pub fn start_position(&self) -> Position {
        Cell::new(self.start_cell.0, self.start_cell.1).position(self.grid_cell_size)
    }

    /// Facing of a freshly started snake.
    #[must_use]
    pub fn start_direction(&self) -> Direction {
        Direction::Right
    }

    fn start_fits_inside_walls(&self) -> bool {
        let (col, row) = self.start_cell;
        let Ok(length) = i32::try_from(self.start_length) else {
            return false;
        };
        let tail_col = col - (length - 1);

        length >= 1
            && row >= 1
            && row < i32::from(self.board_height_cells) - 1
            && tail_col >= 1
            && col < i32::from(self.board_width_cells) - 1
    }
}

/// Returns the platform-correct default config path, if the platform has one.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Colors applied to all visual elements of the terminal front end.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub wall: Color,
    pub play_bg: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const THEME: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::Red,
    wall: Color::Blue,
    play_bg: Color::Black,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Terminal columns drawn per board cell; two keeps cells roughly square.
pub const TERMINAL_COLUMNS_PER_CELL: u16 = 2;

pub const GLYPH_WALL: &str = "██";
pub const GLYPH_FOOD: &str = "()";
pub const GLYPH_SNAKE_BODY: &str = "▓▓";
pub const GLYPH_SNAKE_HEAD_UP: &str = "/\\";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "\\/";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "<:";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = ":>";

/// Frame pacing of the terminal loop.
pub const FRAME_INTERVAL_MS: u64 = 16;
