//! A single section on a page of its own.

use super::{draw_view, page_event, start_ticker, Viewport};
use crate::document::{Document, Section, View};
use folio_nexus::{Action, Component, Context, Entity, Event, EventContext, TaskTracker};
use std::time::Duration;

pub struct SectionPage {
    section: Section,
    document: Entity<Document>,
    tasks: TaskTracker,
    tick: Duration,
    viewport: Viewport,
}

impl SectionPage {
    pub fn new(section: Section, document: Entity<Document>, tick: Duration) -> Self {
        Self {
            section,
            document,
            tasks: TaskTracker::new(),
            tick,
            viewport: Viewport::default(),
        }
    }
}

impl Component for SectionPage {
    fn on_enter(&mut self, cx: &mut Context<Self>) {
        if self.section.animates() {
            start_ticker(&cx.app, &mut self.tasks, Entity::clone(&self.document), self.tick);
        }
    }

    fn on_exit(&mut self, _cx: &mut Context<Self>) {
        self.tasks.abort_all();
        if let Err(e) = self.document.update(|doc| doc.video.pause()) {
            tracing::warn!(error = %e, section = self.section.id(), "failed to pause on exit");
        }
    }

    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>) {
        self.viewport = draw_view(frame, cx.area, &self.document, View::Section(self.section));
    }

    fn handle_event(&mut self, event: Event, _cx: &mut EventContext<Self>) -> Option<Action> {
        let (section, viewport) = (self.section, self.viewport);
        match self.document.update(|doc| page_event(doc, section, &event, viewport)) {
            Ok(true) => Some(Action::Noop),
            Ok(false) => None,
            Err(e) => {
                tracing::warn!(error = %e, "event dropped");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Portfolio;
    use crate::pages::build_fragment;
    use crate::form::Field;
    use crate::theme::Theme;
    use crossterm::event::{KeyCode, KeyEvent};
    use folio_nexus::AppContext;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::Terminal;
    use std::sync::Arc;
    use std::time::Instant;

    fn document(section: Section) -> Entity<Document> {
        let mut doc = Document::new(Arc::new(Portfolio::embedded().unwrap()), Theme::Dark);
        doc.swap(View::Section(section), Instant::now());
        Entity::new(doc)
    }

    fn draw(page: &mut SectionPage, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let mut cx = Context::<SectionPage>::new(AppContext::detached(), frame.area());
                page.render(frame, &mut cx);
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn key(page: &mut SectionPage, code: KeyCode) -> Option<Action> {
        let mut cx = Context::<SectionPage>::new(AppContext::detached(), Rect::new(0, 0, 80, 24));
        page.handle_event(Event::Key(KeyEvent::from(code)), &mut cx)
    }

    #[test]
    fn test_renders_section_heading() {
        let doc = document(Section::Skills);
        let mut page = SectionPage::new(Section::Skills, doc, Duration::from_millis(100));
        let screen = draw(&mut page, 80, 30);
        assert!(screen.contains("SKILLS"));
    }

    #[test]
    fn test_video_keys_only_while_player_in_view() {
        let doc = document(Section::Showcase);
        let mut page = SectionPage::new(Section::Showcase, Entity::clone(&doc), Duration::from_millis(100));

        draw(&mut page, 80, 30);
        assert_eq!(key(&mut page, KeyCode::Char('m')), Some(Action::Noop));
        assert!(doc.read(|d| d.video.is_muted()).unwrap());

        // Two rows tall: the player cannot be fully visible.
        draw(&mut page, 80, 2);
        assert_eq!(key(&mut page, KeyCode::Char('m')), None);
        assert!(doc.read(|d| d.video.is_muted()).unwrap());
    }

    #[test]
    fn test_playing_video_pauses_when_scrolled_out() {
        let doc = document(Section::Showcase);
        let mut page = SectionPage::new(Section::Showcase, Entity::clone(&doc), Duration::from_millis(100));
        draw(&mut page, 80, 30);
        key(&mut page, KeyCode::Char(' '));
        assert!(!doc.read(|d| d.video.is_paused()).unwrap());

        draw(&mut page, 80, 3);
        assert!(doc.read(|d| d.video.is_paused()).unwrap());
    }

    #[test]
    fn test_partly_visible_video_keeps_playing() {
        let doc = document(Section::Showcase);
        let player = doc
            .read(|d| {
                let palette = d.theme.palette();
                build_fragment(d, View::Section(Section::Showcase), &palette, 80).video
            })
            .unwrap()
            .unwrap();
        assert_eq!(player.len(), 3);
        let mut page = SectionPage::new(Section::Showcase, Entity::clone(&doc), Duration::from_millis(100));

        doc.update(|d| {
            d.scroll = player.start;
            d.video.toggle_play();
        })
        .unwrap();
        draw(&mut page, 80, 3);
        assert!(!doc.read(|d| d.video.is_paused()).unwrap());

        // Top row scrolled off: two of three rows still show.
        doc.update(|d| d.scroll = player.start + 1).unwrap();
        draw(&mut page, 80, 3);
        assert!(!doc.read(|d| d.video.is_paused()).unwrap());
        assert!(!page.viewport.video_visible);

        // Last row only: a third is still above the threshold.
        doc.update(|d| d.scroll = player.start + 2).unwrap();
        draw(&mut page, 80, 3);
        assert!(!doc.read(|d| d.video.is_paused()).unwrap());

        // Only the hint line and trailing blank below the player.
        doc.update(|d| d.scroll = player.end).unwrap();
        draw(&mut page, 80, 2);
        assert!(doc.read(|d| d.video.is_paused()).unwrap());
    }

    #[test]
    fn test_paste_fills_focused_contact_field() {
        let doc = document(Section::Contact);
        let mut page = SectionPage::new(Section::Contact, Entity::clone(&doc), Duration::from_millis(100));
        draw(&mut page, 80, 30);
        let mut cx = Context::<SectionPage>::new(AppContext::detached(), Rect::new(0, 0, 80, 24));

        let paste = || Event::Paste("Ada Lovelace".to_string());
        assert_eq!(page.handle_event(paste(), &mut cx), None);

        assert_eq!(key(&mut page, KeyCode::Char('i')), Some(Action::Noop));
        assert_eq!(page.handle_event(paste(), &mut cx), Some(Action::Noop));
        assert_eq!(doc.read(|d| d.contact.value(Field::Name).to_string()).unwrap(), "Ada Lovelace");
    }

    #[test]
    fn test_scroll_is_clamped_on_render() {
        let doc = document(Section::About);
        let mut page = SectionPage::new(Section::About, Entity::clone(&doc), Duration::from_millis(100));
        doc.update(|d| d.scroll = 500).unwrap();
        draw(&mut page, 80, 10);
        let scroll = doc.read(|d| d.scroll).unwrap();
        assert!(scroll < 500);
        assert_eq!(scroll, page.viewport.max_scroll);
    }

    #[tokio::test]
    async fn test_ticker_runs_only_while_shown() {
        let doc = document(Section::Projects);
        let mut page = SectionPage::new(Section::Projects, doc, Duration::from_millis(10));
        let mut cx = Context::<SectionPage>::new(AppContext::detached(), Rect::new(0, 0, 80, 24));

        page.on_enter(&mut cx);
        assert!(page.tasks.has_active_tasks());
        page.on_exit(&mut cx);
        assert!(!page.tasks.has_active_tasks());
    }
}
