use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let lines = vec![
        title_line("PAUSED", theme),
        Line::from(""),
        Line::from("[P]/[Space] Resume"),
        Line::from("[Q]/[Esc] Quit"),
    ];

    render_popup(frame, area, " pause ", lines, theme);
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    apples: u32,
    theme: &Theme,
) {
    let lines = vec![
        title_line("GAME OVER", theme),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(format!("Apples: {apples}")),
        Line::from(""),
        Line::from("[Enter]/[R] Play Again"),
        Line::from("[Q]/[Esc] Quit"),
    ];

    render_popup(frame, area, " game over ", lines, theme);
}

/// Draws the screen shown when the snake has filled the board.
pub fn render_victory_menu(frame: &mut Frame<'_>, area: Rect, score: u32, theme: &Theme) {
    let lines = vec![
        title_line("BOARD CLEARED", theme),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(""),
        Line::from("[Enter]/[R] Play Again"),
        Line::from("[Q]/[Esc] Quit"),
    ];

    render_popup(frame, area, " victory ", lines, theme);
}

fn title_line(text: &'static str, theme: &Theme) -> Line<'static> {
    Line::styled(
        text,
        Style::default()
            .fg(theme.menu_title)
            .add_modifier(Modifier::BOLD),
    )
}

fn render_popup(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &'static str,
    lines: Vec<Line<'static>>,
    theme: &Theme,
) {
    // Two rows for the border; never taller than the board it covers.
    let height = u16::try_from(lines.len() + 2)
        .unwrap_or(u16::MAX)
        .min(area.height);
    let popup = centered_popup(area, 80, height);
    frame.render_widget(Clear, popup);

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::bordered()
                .title(title)
                .border_style(Style::default().fg(theme.menu_footer)),
        ),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
