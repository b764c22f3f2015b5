use super::{padded, paragraph};
use crate::document::Document;
use crate::theme::Palette;
use crate::video::format_clock;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use std::ops::Range;

/// Section lines plus the rows (relative to the first line) the player uses.
pub fn lines(doc: &Document, palette: &Palette, width: u16) -> (Vec<Line<'static>>, Range<u16>) {
    let showcase = &doc.portfolio().showcase;
    let mut lines = vec![padded(vec![Span::styled(
        showcase.title.clone(),
        Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
    )])];
    lines.extend(paragraph(&showcase.description, Style::default().fg(palette.muted), width));
    lines.push(Line::from(""));

    let start = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    lines.extend(player(doc, palette, width));
    let end = u16::try_from(lines.len()).unwrap_or(u16::MAX);

    lines.push(padded(vec![Span::styled(
        "space play/pause · ←/→ seek 5s · m mute",
        Style::default().fg(palette.muted),
    )]));
    (lines, start..end)
}

fn player(doc: &Document, palette: &Palette, width: u16) -> Vec<Line<'static>> {
    let video = &doc.video;
    let track = usize::from(width).saturating_sub(8).clamp(10, 60);

    let (state, state_style) = if video.is_paused() {
        ("❚❚ paused", Style::default().fg(palette.muted))
    } else {
        ("▶ playing", Style::default().fg(palette.success))
    };
    let sound = if video.is_muted() { "🔇 muted" } else { "🔊 sound on" };

    let played = ((video.progress() * track as f64).round() as usize).min(track);
    let remaining = track - played;
    let mut bar = vec![Span::styled("━".repeat(played), Style::default().fg(palette.accent))];
    bar.push(Span::styled("●", Style::default().fg(palette.accent)));
    bar.push(Span::styled("─".repeat(remaining), Style::default().fg(palette.border)));

    vec![
        padded(vec![
            Span::styled(state, state_style),
            Span::raw("   "),
            Span::styled(sound, Style::default().fg(palette.muted)),
        ]),
        padded(bar),
        padded(vec![Span::styled(
            format!("{} / {}", format_clock(video.position()), format_clock(video.duration())),
            Style::default().fg(palette.fg),
        )]),
    ]
}
