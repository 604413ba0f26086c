use std::time::Duration;

use nibbles::config::GameConfig;
use nibbles::events::GameEvent;
use nibbles::food::Food;
use nibbles::game::{GameSession, GameState};
use nibbles::geometry::overlaps;
use nibbles::input::{Direction, GameInput};
use nibbles::level::Level;
use nibbles::snake::{Position, Snake};

type Session = GameSession<Vec<GameEvent>, Level>;

fn new_session(seed: u64) -> Session {
    let config = GameConfig::default();
    let walls = Level::bordered(config.board_width_cells, config.board_height_cells);
    GameSession::new_with_seed(config, walls, Vec::new(), seed)
}

#[test]
fn apple_under_the_head_is_eaten() {
    let mut session = new_session(42);
    session.snake = Snake::new(Position::new(56, 32), 3, Direction::Right, 8);
    session.food = Food::new(Position::new(64, 32), 8);

    session.tick();

    assert_eq!(session.snake.head_position(), Position::new(64, 32));
    assert_eq!(session.apples_eaten(), 1);
    assert_eq!(session.snake.pending_growth(), 4);
    assert_ne!(session.food.position(), Position::new(64, 32));
    assert!(
        session
            .snake
            .segments()
            .all(|segment| !overlaps(&session.food, segment))
    );
    assert_eq!(session.sink(), &vec![GameEvent::FoodEaten]);
}

#[test]
fn queued_turns_chain_one_per_tick() {
    let mut session = new_session(7);
    session.food = Food::new(Position::new(144, 104), 8);

    session.apply_input(GameInput::Direction(Direction::Right));
    session.apply_input(GameInput::Direction(Direction::Left));
    assert_eq!(session.pending_directions().count(), 0);

    session.apply_input(GameInput::Direction(Direction::Down));
    session.apply_input(GameInput::Direction(Direction::Left));
    assert_eq!(session.pending_directions().count(), 2);

    session.tick();
    assert_eq!(session.snake.head_position(), Position::new(32, 40));
    session.tick();
    assert_eq!(session.snake.head_position(), Position::new(24, 40));
    session.tick();
    assert_eq!(session.snake.head_position(), Position::new(16, 40));
    assert_eq!(session.state(), GameState::Running);
}

#[test]
fn crash_then_restart_resets_the_session() {
    let mut session = new_session(3);
    session.food = Food::new(Position::new(144, 104), 8);

    // The right wall sits at column 19; the head starts at column 4.
    for _ in 0..14 {
        session.tick();
        assert_eq!(session.state(), GameState::Running);
    }
    assert!(session.score() > 0);

    session.apply_input(GameInput::Direction(Direction::Up));
    session.apply_input(GameInput::Direction(Direction::Right));
    session.apply_input(GameInput::Direction(Direction::Down));
    session.tick();
    session.tick();
    assert_eq!(session.state(), GameState::GameOver);
    assert_eq!(session.sink().last(), Some(&GameEvent::Crashed));

    let head = session.snake.head_position();
    session.apply_input(GameInput::Direction(Direction::Down));
    session.apply_input(GameInput::Pause);
    session.tick();
    assert!(!session.update(Duration::from_secs(5)));
    assert_eq!(session.snake.head_position(), head);
    assert_eq!(session.state(), GameState::GameOver);

    session.apply_input(GameInput::Restart);

    assert_eq!(session.state(), GameState::Running);
    assert_eq!(session.score(), 0);
    assert_eq!(session.apples_eaten(), 0);
    assert_eq!(session.level(), 1);
    assert_eq!(session.pending_directions().count(), 0);
    assert!((session.speed() - 1.5).abs() < f64::EPSILON);
    let positions: Vec<_> = session.snake.positions().collect();
    assert_eq!(
        positions,
        vec![
            Position::new(32, 32),
            Position::new(24, 32),
            Position::new(16, 32)
        ]
    );
}

#[test]
fn frame_time_drives_movement_and_speeds_up_with_apples() {
    let mut session = new_session(9);
    session.food = Food::new(Position::new(40, 32), 8);
    let frame = Duration::from_millis(16);

    let mut frames = 0;
    while session.tick_count() == 0 {
        session.update(frame);
        frames += 1;
    }
    // 1.5 moves per second needs 667 ms of frames.
    assert_eq!(frames, 42);
    assert_eq!(session.apples_eaten(), 1);

    session.food = Food::new(Position::new(144, 104), 8);
    let mut frames = 0;
    while session.tick_count() == 1 {
        session.update(frame);
        frames += 1;
    }
    // 1.65 moves per second needs 607 ms.
    assert_eq!(frames, 38);
}

#[test]
fn level_counter_follows_apples() {
    let mut session = new_session(5);

    for apple in 1..=6 {
        let ahead = session
            .snake
            .head_position()
            .stepped(session.snake.direction(), 8);
        session.food = Food::new(ahead, 8);

        session.tick();

        assert_eq!(session.state(), GameState::Running);
        assert_eq!(session.apples_eaten(), apple);
        assert_eq!(session.level(), 1 + apple / 5);
    }

    assert_eq!(session.level(), 2);
    assert_eq!(session.snake.len(), 3 + 5);
}
