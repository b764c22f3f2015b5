use super::padded;
use crate::document::Document;
use crate::form::Field;
use crate::theme::Palette;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

const LABEL_WIDTH: usize = 8;

pub fn lines(doc: &Document, palette: &Palette, width: u16) -> Vec<Line<'static>> {
    let info = &doc.portfolio().contact;
    let label = Style::default().fg(palette.muted);
    let value = Style::default().fg(palette.fg);

    let mut lines = vec![padded(vec![
        Span::styled(format!("{:<LABEL_WIDTH$}", "Email"), label),
        Span::styled(info.email.clone(), value),
    ])];
    if let Some(phone) = &info.phone {
        lines.push(padded(vec![
            Span::styled(format!("{:<LABEL_WIDTH$}", "Phone"), label),
            Span::styled(phone.clone(), value),
        ]));
    }
    if let Some(location) = &info.location {
        lines.push(padded(vec![
            Span::styled(format!("{:<LABEL_WIDTH$}", "Where"), label),
            Span::styled(location.clone(), value),
        ]));
    }
    for social in &info.socials {
        lines.push(padded(vec![
            Span::styled(format!("{:<LABEL_WIDTH$}", social.name), label),
            Span::styled(social.url.clone(), value.add_modifier(Modifier::UNDERLINED)),
        ]));
    }

    lines.push(Line::from(""));
    let form = &doc.contact;
    let field_width = usize::from(width).saturating_sub(LABEL_WIDTH + 8).clamp(10, 60);
    for field in Field::ALL {
        let focused = form.focus() == Some(field);
        let text = form.value(field);
        // Keep the tail visible while typing past the box.
        let shown: String = {
            let len = text.chars().count();
            text.chars().skip(len.saturating_sub(field_width - 1)).collect()
        };
        let cursor = if focused { "▏" } else { "" };
        let box_style = if focused {
            Style::default().fg(palette.fg).bg(palette.border)
        } else {
            Style::default().fg(palette.fg).add_modifier(Modifier::UNDERLINED)
        };
        let label_style = if focused {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            label
        };
        let filler = field_width.saturating_sub(shown.chars().count() + cursor.chars().count());
        lines.push(padded(vec![
            Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style),
            Span::styled(format!("{shown}{cursor}{}", " ".repeat(filler)), box_style),
        ]));
    }

    let hint = if form.focus().is_some() {
        "tab next field · enter send · esc leave form"
    } else {
        "i or enter to write a message"
    };
    lines.push(padded(vec![Span::styled(hint, Style::default().fg(palette.muted))]));
    lines
}
