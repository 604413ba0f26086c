use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::direction::Direction;
use crate::events::{EventSink, GameEvent};
use crate::food::{Board, Food, FoodError};
use crate::geometry::overlaps;
use crate::input::GameInput;
use crate::input_queue::InputQueue;
use crate::level::WallQuery;
use crate::snake::{Position, Segment, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameState {
    Running,
    Paused,
    GameOver,
    /// The snake filled every free cell, so no apple could be placed.
    Victory,
}

impl GameState {
    /// Returns true once the session has ended and only a restart continues it.
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}

/// One play session: owns the snake, apple, pending turns and counters.
///
/// Level layout and the event sink are injected collaborators; the session
/// only queries walls and fires events at them.
#[derive(Debug, Clone)]
pub struct GameSession<S, W> {
    pub snake: Snake,
    pub food: Food,
    config: GameConfig,
    queue: InputQueue,
    state: GameState,
    score: u32,
    apples_eaten: u32,
    level: u32,
    speed: f64,
    since_last_move: Duration,
    tick_count: u64,
    rng: StdRng,
    sink: S,
    walls: W,
}

impl<S: EventSink, W: WallQuery> GameSession<S, W> {
    /// Creates a session seeded from OS entropy.
    #[must_use]
    pub fn new(config: GameConfig, walls: W, sink: S) -> Self {
        Self::with_rng(config, walls, sink, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, walls: W, sink: S, seed: u64) -> Self {
        Self::with_rng(config, walls, sink, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, walls: W, sink: S, rng: StdRng) -> Self {
        let snake = start_snake(&config);
        let food = Food::new(
            snake.head_position().stepped(Direction::Right, config.grid_cell_size),
            config.grid_cell_size,
        );

        let mut session = Self {
            snake,
            food,
            speed: config.initial_speed,
            config,
            queue: InputQueue::new(),
            state: GameState::Running,
            score: 0,
            apples_eaten: 0,
            level: 1,
            since_last_move: Duration::ZERO,
            tick_count: 0,
            rng,
            sink,
            walls,
        };
        session.restart();
        session
    }

    /// Resets snake, apple, pending turns and counters, and resumes play.
    pub fn restart(&mut self) {
        self.snake = start_snake(&self.config);
        self.queue.clear();
        self.score = 0;
        self.apples_eaten = 0;
        self.level = 1;
        self.speed = self.config.initial_speed;
        self.since_last_move = Duration::ZERO;
        self.tick_count = 0;
        self.state = GameState::Running;

        if let Err(error) = self.place_food() {
            warn!("cannot place food on a fresh board: {error}");
            self.state = GameState::Victory;
        }

        info!(
            "new game on a {}x{} board at {:.2} moves/s",
            self.config.board_width_cells, self.config.board_height_cells, self.speed
        );
    }

    /// Adds frame time and runs a movement tick once `1 / speed` seconds have
    /// built up. Returns true when a tick ran.
    pub fn update(&mut self, elapsed: Duration) -> bool {
        if self.state != GameState::Running {
            return false;
        }

        self.since_last_move += elapsed;
        if self.since_last_move < self.move_interval() {
            return false;
        }

        self.since_last_move = Duration::ZERO;
        self.tick();
        true
    }

    /// Advances the simulation by one movement step.
    pub fn tick(&mut self) {
        if self.state != GameState::Running {
            return;
        }

        self.tick_count += 1;
        let direction = self
            .queue
            .dequeue_if_any()
            .unwrap_or_else(|| self.snake.direction());
        self.snake.advance(direction);

        if overlaps(&self.food, self.head_segment()) {
            self.eat_food();
            if self.state != GameState::Running {
                return;
            }
        }

        if self.snake.self_collision() {
            self.crash("ran into itself");
        }

        let head_cell = self.snake.head_position().cell(self.config.grid_cell_size);
        if self.state == GameState::Running && self.walls.is_wall(head_cell) {
            self.crash("hit a wall");
        }

        if self.state == GameState::Running {
            let length = u32::try_from(self.snake.len()).unwrap_or(u32::MAX);
            self.score = self
                .score
                .saturating_add(length.saturating_mul(self.apples_eaten))
                .saturating_add(1);
        }
    }

    /// Flips between running and paused. Finished games stay finished.
    ///
    /// Resuming drops any partially accumulated frame time, so the first move
    /// after a pause waits a full interval.
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Running => GameState::Paused,
            GameState::Paused => {
                self.since_last_move = Duration::ZERO;
                GameState::Running
            }
            other => other,
        };
    }

    /// Queues a turn for a later tick; ignored unless the game is running.
    pub fn handle_direction_press(&mut self, candidate: Direction) {
        if self.state != GameState::Running {
            return;
        }

        self.queue.try_enqueue(candidate, self.snake.direction());
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => self.handle_direction_press(direction),
            GameInput::Pause => self.toggle_pause(),
            GameInput::Restart => {
                if self.state.is_finished() {
                    self.restart();
                }
            }
            GameInput::ToggleMute => self.sink.toggle_mute(),
            GameInput::Quit => {}
        }
    }

    fn eat_food(&mut self) {
        self.speed *= self.config.speed_growth_factor;
        self.snake.grow(self.config.growth_per_food);
        self.apples_eaten += 1;
        self.level = 1 + self.apples_eaten / self.config.apples_per_level;
        debug!(
            "apple {} eaten at {:?}, speed now {:.2}",
            self.apples_eaten,
            self.food.position(),
            self.speed
        );

        match self.place_food() {
            Ok(_) => self.sink.emit(GameEvent::FoodEaten),
            Err(FoodError::BoardFull) => {
                warn!("board is full after {} apples", self.apples_eaten);
                self.state = GameState::Victory;
                self.sink.emit(GameEvent::FoodEaten);
                self.sink.emit(GameEvent::BoardFull);
            }
        }
    }

    fn crash(&mut self, cause: &str) {
        info!(
            "game over: snake {cause} at {:?} with score {}",
            self.snake.head_position(),
            self.score
        );
        self.state = GameState::GameOver;
        self.sink.emit(GameEvent::Crashed);
    }

    fn place_food(&mut self) -> Result<Position, FoodError> {
        let board = self.board();
        let cell_size = self.config.grid_cell_size;
        let mut avoid: Vec<Position> = self.snake.positions().collect();
        avoid.extend(
            board
                .interior()
                .filter(|position| self.walls.is_wall(position.cell(cell_size))),
        );

        self.food.relocate(&mut self.rng, &avoid, board)
    }

    fn head_segment(&self) -> &Segment {
        self.snake
            .segments()
            .next()
            .expect("snake body must always contain at least one segment")
    }

    /// Playable area in pixels.
    #[must_use]
    pub fn board(&self) -> Board {
        Board {
            width_px: self.config.width_px(),
            height_px: self.config.height_px(),
            cell_size: self.config.grid_cell_size,
        }
    }

    /// Time between movement ticks at the current speed.
    #[must_use]
    pub fn move_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.speed)
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn apples_eaten(&self) -> u32 {
        self.apples_eaten
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Movement ticks per second.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn walls(&self) -> &W {
        &self.walls
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Iterates over queued turns, oldest first.
    pub fn pending_directions(&self) -> impl Iterator<Item = &Direction> {
        self.queue.iter()
    }
}

fn start_snake(config: &GameConfig) -> Snake {
    Snake::new(
        config.start_position(),
        config.start_length,
        config.start_direction(),
        config.grid_cell_size,
    )
}
