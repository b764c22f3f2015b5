use super::{padded, paragraph};
use crate::document::Document;
use crate::theme::Palette;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use std::time::Instant;

pub fn lines(doc: &Document, palette: &Palette, width: u16) -> Vec<Line<'static>> {
    let board = &doc.projects;
    let mut buttons = Vec::new();
    for (i, button) in board.buttons().iter().enumerate() {
        let mut style = if button.active {
            Style::default().fg(palette.accent_fg).bg(palette.accent)
        } else {
            Style::default().fg(palette.fg)
        };
        if i == board.focused() {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        buttons.push(Span::styled(format!(" {} ", button.filter.label()), style));
        buttons.push(Span::raw(" "));
    }

    let mut lines = vec![
        padded(buttons),
        padded(vec![Span::styled(
            "←/→ choose filter · enter apply",
            Style::default().fg(palette.muted),
        )]),
    ];

    let projects = &doc.portfolio().projects;
    for card in board.cards().iter().filter(|c| c.is_displayed()) {
        let Some(project) = projects.get(card.project) else {
            continue;
        };
        let faded = !card.is_revealed();
        let dim = |style: Style| {
            if faded {
                style.fg(palette.border).add_modifier(Modifier::DIM)
            } else {
                style
            }
        };

        lines.push(Line::from(""));
        lines.push(padded(vec![
            Span::styled(
                project.title.clone(),
                dim(Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)),
            ),
            Span::styled(
                format!("  [{}]", project.category),
                dim(Style::default().fg(palette.muted)),
            ),
        ]));
        lines.extend(paragraph(&project.description, dim(Style::default().fg(palette.fg)), width));
        if !project.tags.is_empty() {
            let tags: Vec<String> = project.tags.iter().map(|t| format!("#{t}")).collect();
            lines.push(padded(vec![Span::styled(
                tags.join(" "),
                dim(Style::default().fg(palette.accent)),
            )]));
        }
        if let Some(link) = &project.link {
            lines.push(padded(vec![Span::styled(
                format!("↗ {link}"),
                dim(Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC)),
            )]));
        }
    }
    lines
}

pub fn handle_key(doc: &mut Document, key: KeyEvent, now: Instant) -> bool {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => doc.projects.focus_prev(),
        KeyCode::Right | KeyCode::Char('l') => doc.projects.focus_next(),
        KeyCode::Enter | KeyCode::Char(' ') => doc.projects.apply_focused(now),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Portfolio;
    use crate::filters::Filter;
    use crate::theme::Theme;
    use std::sync::Arc;

    #[test]
    fn test_keys_pick_and_apply_filter() {
        let mut doc = Document::new(Arc::new(Portfolio::embedded().unwrap()), Theme::Dark);
        let now = Instant::now();
        assert!(handle_key(&mut doc, KeyEvent::from(KeyCode::Right), now));
        assert!(handle_key(&mut doc, KeyEvent::from(KeyCode::Enter), now));
        assert_eq!(doc.projects.active_filter(), Some(&Filter::Category("web".into())));
        assert!(!handle_key(&mut doc, KeyEvent::from(KeyCode::Char('z')), now));
    }
}
