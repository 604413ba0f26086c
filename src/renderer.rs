use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::config::{
    GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN, GLYPH_SNAKE_HEAD_LEFT,
    GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GLYPH_WALL, TERMINAL_COLUMNS_PER_CELL, THEME,
};
use crate::direction::Direction;
use crate::events::EventSink;
use crate::game::{GameSession, GameState};
use crate::level::WallQuery;
use crate::snake::Cell;
use crate::ui::hud::{render_hud, HudStats};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_victory_menu};

/// Front-end state that is not part of the simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudInfo {
    pub muted: bool,
}

/// Renders the full game frame from immutable session state.
pub fn render<S: EventSink, W: WallQuery>(
    frame: &mut Frame<'_>,
    session: &GameSession<S, W>,
    info: HudInfo,
) {
    let theme = &THEME;
    let config = session.config();
    let board_columns = config.board_width_cells.saturating_mul(TERMINAL_COLUMNS_PER_CELL);
    // Board plus one HUD row underneath.
    let total_rows = config.board_height_cells.saturating_add(1);

    let area = frame.area();
    if area.width < board_columns || area.height < total_rows {
        render_too_small(frame, area, board_columns, total_rows);
        return;
    }

    let outer = Rect {
        x: area.x + (area.width - board_columns) / 2,
        y: area.y + (area.height - total_rows) / 2,
        width: board_columns,
        height: total_rows,
    };
    let board = render_hud(
        frame,
        outer,
        HudStats {
            score: session.score(),
            apples: session.apples_eaten(),
            level: session.level(),
            length: session.snake.len(),
            speed: session.speed(),
            muted: info.muted,
        },
        theme,
    );

    frame.render_widget(Block::new().style(Style::new().bg(theme.play_bg)), board);
    render_walls(frame, board, session);
    draw_cell(
        frame,
        board,
        session.food.position().cell(config.grid_cell_size),
        GLYPH_FOOD,
        Style::new().fg(theme.food),
    );
    render_snake(frame, board, session);

    match session.state() {
        GameState::Paused => render_pause_menu(frame, board, theme),
        GameState::GameOver => render_game_over_menu(
            frame,
            board,
            session.score(),
            session.apples_eaten(),
            theme,
        ),
        GameState::Victory => render_victory_menu(frame, board, session.score(), theme),
        GameState::Running => {}
    }
}

fn render_walls<S: EventSink, W: WallQuery>(
    frame: &mut Frame<'_>,
    board: Rect,
    session: &GameSession<S, W>,
) {
    let config = session.config();
    let style = Style::new().fg(THEME.wall);

    for row in 0..i32::from(config.board_height_cells) {
        for col in 0..i32::from(config.board_width_cells) {
            let cell = Cell::new(col, row);
            if session.walls().is_wall(cell) {
                draw_cell(frame, board, cell, GLYPH_WALL, style);
            }
        }
    }
}

fn render_snake<S: EventSink, W: WallQuery>(
    frame: &mut Frame<'_>,
    board: Rect,
    session: &GameSession<S, W>,
) {
    let cell_size = session.config().grid_cell_size;
    let body_style = Style::new().fg(THEME.snake_body);
    let head_style = Style::new()
        .fg(THEME.snake_head)
        .add_modifier(Modifier::BOLD);

    // Tail first so the head wins when segments share a cell.
    for segment in session.snake.segments().collect::<Vec<_>>().into_iter().rev() {
        let cell = segment.position.cell(cell_size);
        if segment.is_head {
            let glyph = head_glyph(session.snake.direction());
            draw_cell(frame, board, cell, glyph, head_style);
        } else {
            draw_cell(frame, board, cell, GLYPH_SNAKE_BODY, body_style);
        }
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn draw_cell(frame: &mut Frame<'_>, board: Rect, cell: Cell, glyph: &str, style: Style) {
    let Some((x, y)) = cell_to_terminal(board, cell) else {
        return;
    };

    frame.buffer_mut().set_string(x, y, glyph, style);
}

/// Maps a board cell to the terminal coordinate of its left column.
#[must_use]
pub fn cell_to_terminal(board: Rect, cell: Cell) -> Option<(u16, u16)> {
    let col = u16::try_from(cell.col).ok()?;
    let row = u16::try_from(cell.row).ok()?;

    let x = board
        .x
        .saturating_add(col.saturating_mul(TERMINAL_COLUMNS_PER_CELL));
    let y = board.y.saturating_add(row);
    if x.saturating_add(TERMINAL_COLUMNS_PER_CELL) > board.right() || y >= board.bottom() {
        return None;
    }

    Some((x, y))
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, columns: u16, rows: u16) {
    frame.render_widget(
        Paragraph::new(vec![
            Line::from("Terminal too small"),
            Line::from(format!("need {columns}x{rows}")),
        ])
        .alignment(Alignment::Center),
        area,
    );
}
