use super::padded;
use crate::document::Document;
use crate::theme::Palette;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

const BAR_WIDTH: usize = 20;

pub fn lines(doc: &Document, palette: &Palette, width: u16) -> Vec<Line<'static>> {
    let groups = &doc.portfolio().skills;
    let name_width = groups
        .iter()
        .flat_map(|g| g.skills.iter())
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(usize::from(width / 3));

    let mut lines = Vec::new();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(padded(vec![Span::styled(
            group.name.clone(),
            Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
        )]));
        for skill in &group.skills {
            let level = skill.level.min(100);
            let (filled, empty) = bar(level);
            lines.push(padded(vec![
                Span::styled(
                    format!("  {:<name_width$}  ", skill.name),
                    Style::default().fg(palette.fg),
                ),
                Span::styled(filled, Style::default().fg(palette.accent)),
                Span::styled(empty, Style::default().fg(palette.border)),
                Span::styled(format!(" {level:>3}%"), Style::default().fg(palette.muted)),
            ]));
        }
    }
    lines
}

fn bar(level: u8) -> (String, String) {
    let filled = usize::from(level) * BAR_WIDTH / 100;
    ("█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
