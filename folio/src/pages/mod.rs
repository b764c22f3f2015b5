//! Pages shown in the content region.
//!
//! Every section is rendered to a list of pre-wrapped lines so the pages know
//! exactly which rows each section (and the video player) occupies. The home
//! page stacks all sections, a section page shows one.

pub mod about;
pub mod contact;
pub mod home;
pub mod projects;
pub mod section;
pub mod showcase;
pub mod skills;

pub use home::HomePage;
pub use section::SectionPage;

use crate::document::{Document, Section, View};
use crate::theme::Palette;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use folio_nexus::{AppContext, Entity, Event, TaskTracker};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::ops::Range;
use std::time::{Duration, Instant};

/// Rows below a section's first row that still count as "in view" for the
/// home page scroll spy; roughly the header height.
pub const SPY_OFFSET: u16 = 4;

/// Share of the player, in percent, that keeps a playing video running.
const VIDEO_THRESHOLD_PERCENT: u16 = 20;

const LEFT_PAD: &str = "  ";

/// Rendered content of a view.
#[derive(Debug, Default)]
pub struct Fragment {
    pub lines: Vec<Line<'static>>,
    /// First row of each section.
    pub starts: Vec<(Section, u16)>,
    /// Rows of the video player, if shown.
    pub video: Option<Range<u16>>,
}

impl Fragment {
    pub fn height(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }

    fn push_section(&mut self, doc: &Document, section: Section, palette: &Palette, width: u16) {
        let start = self.height();
        self.starts.push((section, start));
        self.lines.push(heading(section.title(), palette));
        self.lines.push(Line::from(""));

        let body_start = self.height();
        let (lines, video) = match section {
            Section::About => (about::lines(doc, palette, width), None),
            Section::Skills => (skills::lines(doc, palette, width), None),
            Section::Showcase => {
                let (lines, video) = showcase::lines(doc, palette, width);
                (lines, Some(video))
            }
            Section::Projects => (projects::lines(doc, palette, width), None),
            Section::Contact => (contact::lines(doc, palette, width), None),
        };
        self.lines.extend(lines);
        self.video = self
            .video
            .take()
            .or_else(|| video.map(|r| body_start + r.start..body_start + r.end));
        self.lines.push(Line::from(""));
    }
}

/// Lay out `view` for a content region `width` columns wide.
pub fn build_fragment(doc: &Document, view: View, palette: &Palette, width: u16) -> Fragment {
    let mut fragment = Fragment::default();
    match view {
        View::Home => {
            for section in Section::ALL {
                fragment.push_section(doc, section, palette, width);
            }
        }
        View::Section(section) => fragment.push_section(doc, section, palette, width),
    }
    fragment
}

/// What the last render measured; key handling works from it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewport {
    pub height: u16,
    pub max_scroll: u16,
    pub video_visible: bool,
}

/// Draw `view` into `area`.
///
/// Clamps the scroll offset, updates the home page scroll spy and pauses a
/// playing video once less than a fifth of the player is inside the
/// viewport. Video keys only need [`Viewport::video_visible`].
pub fn draw_view(frame: &mut Frame, area: Rect, document: &Entity<Document>, view: View) -> Viewport {
    let layout = |doc: &Document| build_fragment(doc, view, &doc.theme.palette(), area.width);
    let mut fragment = match document.read(layout) {
        Ok(fragment) => fragment,
        Err(e) => {
            tracing::warn!(error = %e, "document unavailable, skipping frame");
            return Viewport::default();
        }
    };

    let max_scroll = fragment.height().saturating_sub(area.height);
    let measured = document.update(|doc| {
        doc.scroll = doc.scroll.min(max_scroll);
        if view == View::Home {
            // The last section can be too short to reach the spy row.
            doc.spy = if max_scroll > 0 && doc.scroll == max_scroll {
                fragment.starts.last().map(|(section, _)| *section)
            } else {
                spy_at(&fragment.starts, doc.scroll)
            };
        }
        let video_visible = fragment
            .video
            .as_ref()
            .is_some_and(|rows| fully_visible(rows, doc.scroll, area.height));
        let in_view = fragment.video.as_ref().is_some_and(|rows| {
            visible_rows(rows, doc.scroll, area.height) >= min_visible_rows(rows)
        });
        let stopped = !in_view && !doc.video.is_paused();
        if stopped {
            doc.video.pause();
            tracing::debug!("video left the viewport, paused");
        }
        (doc.scroll, video_visible, stopped.then(|| layout(&*doc)))
    });

    let (scroll, video_visible) = match measured {
        Ok((scroll, video_visible, relaid)) => {
            if let Some(relaid) = relaid {
                fragment = relaid;
            }
            (scroll, video_visible)
        }
        Err(e) => {
            tracing::warn!(error = %e, "document unavailable, skipping frame");
            return Viewport::default();
        }
    };

    frame.render_widget(Paragraph::new(fragment.lines).scroll((scroll, 0)), area);
    Viewport {
        height: area.height,
        max_scroll,
        video_visible,
    }
}

/// Keys and mouse wheel for a page showing `section` (or the spied section
/// on the home page). Returns true if the event was used.
pub fn page_event(doc: &mut Document, section: Section, event: &Event, viewport: Viewport) -> bool {
    match event {
        Event::Key(key) => {
            section_key(doc, section, *key, viewport.video_visible)
                || scroll_key(doc, *key, viewport.max_scroll, viewport.height.saturating_sub(1))
        }
        Event::Mouse(mouse) => scroll_mouse(doc, *mouse, viewport.max_scroll),
        Event::Paste(text) => doc.contact.paste(text),
        _ => false,
    }
}

/// Section whose span holds the row `scroll + SPY_OFFSET`.
pub fn spy_at(starts: &[(Section, u16)], scroll: u16) -> Option<Section> {
    let row = scroll.saturating_add(SPY_OFFSET);
    starts
        .iter()
        .take_while(|(_, start)| *start <= row)
        .last()
        .map(|(section, _)| *section)
}

/// Whether `rows` lie completely inside the viewport.
pub fn fully_visible(rows: &Range<u16>, scroll: u16, height: u16) -> bool {
    rows.start >= scroll && rows.end <= scroll.saturating_add(height)
}

/// Number of `rows` inside the viewport.
pub fn visible_rows(rows: &Range<u16>, scroll: u16, height: u16) -> u16 {
    let top = rows.start.max(scroll);
    let bottom = rows.end.min(scroll.saturating_add(height));
    bottom.saturating_sub(top)
}

/// Rows of the player that must stay visible to keep it playing: a fifth,
/// rounded up.
fn min_visible_rows(rows: &Range<u16>) -> u16 {
    let len = rows.end.saturating_sub(rows.start);
    len.saturating_mul(VIDEO_THRESHOLD_PERCENT).div_ceil(100).max(1)
}

/// Scrolling shared by every page. Returns true if the key scrolled.
pub fn scroll_key(doc: &mut Document, key: KeyEvent, max_scroll: u16, page: u16) -> bool {
    let page = page.max(1);
    let scroll = doc.scroll;
    doc.scroll = match key.code {
        KeyCode::Up | KeyCode::Char('k') => scroll.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => scroll.saturating_add(1),
        KeyCode::PageUp => scroll.saturating_sub(page),
        KeyCode::PageDown | KeyCode::Char(' ') => scroll.saturating_add(page),
        KeyCode::Home | KeyCode::Char('g') => 0,
        KeyCode::End | KeyCode::Char('G') => max_scroll,
        _ => return false,
    }
    .min(max_scroll);
    true
}

pub fn scroll_mouse(doc: &mut Document, mouse: MouseEvent, max_scroll: u16) -> bool {
    doc.scroll = match mouse.kind {
        MouseEventKind::ScrollUp => doc.scroll.saturating_sub(3),
        MouseEventKind::ScrollDown => doc.scroll.saturating_add(3).min(max_scroll),
        _ => return false,
    };
    true
}

/// Keys for the interactive widgets of `section`. The contact form keeps
/// every key while a field is focused or its alert is up.
pub fn section_key(doc: &mut Document, section: Section, key: KeyEvent, video_visible: bool) -> bool {
    if doc.contact.focus().is_some() || doc.contact.alert().is_some() {
        return doc.contact.handle_key(key);
    }
    if video_visible && doc.video.handle_key(key) {
        return true;
    }
    match section {
        Section::Projects => projects::handle_key(doc, key, Instant::now()),
        Section::Contact => doc.contact.handle_key(key),
        _ => false,
    }
}

/// Drive `doc.tick` every `tick` while the page is shown.
pub fn start_ticker(app: &AppContext, tasks: &mut TaskTracker, document: Entity<Document>, tick: Duration) {
    let handle = app.spawn_task(move |app| async move {
        let mut interval = tokio::time::interval(tick);
        loop {
            interval.tick().await;
            match document.update(|doc| doc.tick(Instant::now())) {
                Ok(true) => app.refresh(),
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "ticker stopped");
                    break;
                }
            }
        }
    });
    tasks.track(handle);
}

pub fn heading(title: &str, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled("▍", Style::default().fg(palette.accent)),
        Span::styled(
            format!(" {}", title.to_uppercase()),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
    ])
}

/// Indented, word-wrapped paragraph.
pub fn paragraph(text: &str, style: Style, width: u16) -> Vec<Line<'static>> {
    let usable = usize::from(width).saturating_sub(LEFT_PAD.len() * 2);
    wrap(text, usable)
        .into_iter()
        .map(|line| Line::from(vec![Span::raw(LEFT_PAD), Span::styled(line, style)]))
        .collect()
}

/// Greedy word wrap; words longer than `width` get a line of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(10);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub fn padded(spans: Vec<Span<'static>>) -> Line<'static> {
    let mut all = vec![Span::raw(LEFT_PAD)];
    all.extend(spans);
    Line::from(all)
}
