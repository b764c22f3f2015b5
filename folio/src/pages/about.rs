use super::{padded, paragraph};
use crate::document::Document;
use crate::theme::Palette;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

pub fn lines(doc: &Document, palette: &Palette, width: u16) -> Vec<Line<'static>> {
    let profile = &doc.portfolio().profile;
    let mut lines = vec![padded(vec![Span::styled(
        profile.name.clone(),
        Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
    )])];
    lines.extend(paragraph(&profile.title, Style::default().fg(palette.accent), width));
    if let Some(location) = &profile.location {
        lines.push(padded(vec![Span::styled(
            format!("⌖ {location}"),
            Style::default().fg(palette.muted),
        )]));
    }

    for bio in &profile.bio {
        lines.push(Line::from(""));
        lines.extend(paragraph(bio, Style::default().fg(palette.fg), width));
    }

    if !profile.highlights.is_empty() {
        lines.push(Line::from(""));
        for highlight in &profile.highlights {
            lines.push(padded(vec![
                Span::styled("• ", Style::default().fg(palette.accent)),
                Span::styled(highlight.clone(), Style::default().fg(palette.fg)),
            ]));
        }
    }
    lines
}
