use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;

const SEPARATOR: &str = " │ ";

/// Values shown on the status line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudStats {
    pub score: u32,
    pub apples: u32,
    pub level: u32,
    pub length: usize,
    /// Movement ticks per second.
    pub speed: f64,
    pub muted: bool,
}

/// Renders the one-line HUD below the board and returns the area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, stats: HudStats, theme: &Theme) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(info_line(stats, usize::from(hud_area.width), theme))
            .alignment(Alignment::Center),
        hud_area,
    );

    play_area
}

fn fields(stats: HudStats, compact: bool) -> [(&'static str, String); 6] {
    let labels = if compact {
        ["S", "A", "Lv", "Len", "Spd", "Snd"]
    } else {
        ["Score", "Apples", "Level", "Length", "Speed", "Sound"]
    };

    [
        (labels[0], stats.score.to_string()),
        (labels[1], stats.apples.to_string()),
        (labels[2], stats.level.to_string()),
        (labels[3], stats.length.to_string()),
        (labels[4], format!("{:.1}/s", stats.speed)),
        (labels[5], if stats.muted { "off" } else { "on" }.to_owned()),
    ]
}

fn line_width(fields: &[(&'static str, String)]) -> usize {
    let content: usize = fields
        .iter()
        .map(|(label, value)| label.width() + ": ".width() + value.width())
        .sum();
    content + SEPARATOR.width() * fields.len().saturating_sub(1)
}

/// Builds the status line, switching to short labels when the full line
/// does not fit in `available_width` columns.
#[must_use]
pub fn info_line(stats: HudStats, available_width: usize, theme: &Theme) -> Line<'static> {
    let full = fields(stats, false);
    let chosen = if line_width(&full) > available_width {
        fields(stats, true)
    } else {
        full
    };

    let label_style = Style::default().fg(theme.hud_label);
    let value_style = Style::default()
        .fg(theme.hud_value)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::with_capacity(chosen.len() * 3);
    for (index, (label, value)) in chosen.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(SEPARATOR, label_style));
        }
        spans.push(Span::styled(format!("{label}: "), label_style));
        spans.push(Span::styled(value, value_style));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::{info_line, HudStats};
    use crate::config::THEME;

    const STATS: HudStats = HudStats {
        score: 120,
        apples: 3,
        level: 1,
        length: 11,
        speed: 1.9965,
        muted: true,
    };

    fn text(width: usize) -> String {
        info_line(STATS, width, &THEME)
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn wide_hud_uses_full_labels() {
        let line = text(200);

        assert!(line.starts_with("Score: 120"));
        assert!(line.contains("Speed: 2.0/s"));
        assert!(line.ends_with("Sound: off"));
    }

    #[test]
    fn narrow_hud_falls_back_to_short_labels() {
        let line = text(40);

        assert!(line.starts_with("S: 120"));
        assert!(line.contains("Len: 11"));
    }
}
