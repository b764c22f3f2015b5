//! The home page: every section on one scrolling page.
//!
//! Keys that are not scrolling go to whichever section the scroll spy
//! reports, so the filters and the contact form work here too. The video
//! player takes its keys only while it is fully on screen.

use super::{draw_view, page_event, start_ticker, Viewport};
use crate::document::{Document, Section, View};
use folio_nexus::{Action, Component, Context, Entity, Event, EventContext, TaskTracker};
use std::time::Duration;

pub struct HomePage {
    document: Entity<Document>,
    tasks: TaskTracker,
    tick: Duration,
    viewport: Viewport,
}

impl HomePage {
    pub fn new(document: Entity<Document>, tick: Duration) -> Self {
        Self {
            document,
            tasks: TaskTracker::new(),
            tick,
            viewport: Viewport::default(),
        }
    }
}

impl Component for HomePage {
    fn on_enter(&mut self, cx: &mut Context<Self>) {
        start_ticker(&cx.app, &mut self.tasks, Entity::clone(&self.document), self.tick);
    }

    fn on_exit(&mut self, _cx: &mut Context<Self>) {
        self.tasks.abort_all();
        if let Err(e) = self.document.update(|doc| doc.video.pause()) {
            tracing::warn!(error = %e, "failed to pause on exit");
        }
    }

    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>) {
        self.viewport = draw_view(frame, cx.area, &self.document, View::Home);
    }

    fn handle_event(&mut self, event: Event, _cx: &mut EventContext<Self>) -> Option<Action> {
        let viewport = self.viewport;
        let used = self.document.update(|doc| {
            let section = doc.spy.unwrap_or(Section::About);
            page_event(doc, section, &event, viewport)
        });
        match used {
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
    use crate::filters::Filter;
    use crate::form::Field;
    use crate::theme::Theme;
    use crossterm::event::{KeyCode, KeyEvent};
    use folio_nexus::AppContext;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::Terminal;
    use std::sync::Arc;
    use std::time::Instant;

    fn document() -> Entity<Document> {
        let mut doc = Document::new(Arc::new(Portfolio::embedded().unwrap()), Theme::Light);
        doc.swap(View::Home, Instant::now());
        Entity::new(doc)
    }

    fn draw(page: &mut HomePage, height: u16) {
        let mut terminal = Terminal::new(TestBackend::new(90, height)).unwrap();
        terminal
            .draw(|frame| {
                let mut cx = Context::<HomePage>::new(AppContext::detached(), frame.area());
                page.render(frame, &mut cx);
            })
            .unwrap();
    }

    fn press(page: &mut HomePage, code: KeyCode) -> Option<Action> {
        let mut cx = Context::<HomePage>::new(AppContext::detached(), Rect::new(0, 0, 90, 20));
        page.handle_event(Event::Key(KeyEvent::from(code)), &mut cx)
    }

    #[test]
    fn test_scroll_spy_follows_scrolling() {
        let doc = document();
        let mut page = HomePage::new(Entity::clone(&doc), Duration::from_millis(100));
        draw(&mut page, 20);
        assert_eq!(doc.read(|d| d.spy).unwrap(), Some(Section::About));

        press(&mut page, KeyCode::End);
        draw(&mut page, 20);
        assert_eq!(doc.read(|d| d.spy).unwrap(), Some(Section::Contact));

        press(&mut page, KeyCode::Home);
        draw(&mut page, 20);
        assert_eq!(doc.read(|d| d.spy).unwrap(), Some(Section::About));
    }

    #[test]
    fn test_keys_reach_spied_section() {
        let doc = document();
        let mut page = HomePage::new(Entity::clone(&doc), Duration::from_millis(100));
        draw(&mut page, 3);

        doc.update(|d| d.spy = Some(Section::Projects)).unwrap();
        assert_eq!(press(&mut page, KeyCode::Char('l')), Some(Action::Noop));
        press(&mut page, KeyCode::Enter);
        assert_eq!(
            doc.read(|d| d.projects.active_filter().cloned()).unwrap(),
            Some(Filter::Category("web".into()))
        );

        doc.update(|d| d.spy = Some(Section::Contact)).unwrap();
        press(&mut page, KeyCode::Char('i'));
        press(&mut page, KeyCode::Char('q'));
        assert_eq!(doc.read(|d| d.contact.value(Field::Name).to_string()).unwrap(), "q");
    }

    #[test]
    fn test_unused_keys_fall_through() {
        let doc = document();
        let mut page = HomePage::new(doc, Duration::from_millis(100));
        draw(&mut page, 20);
        assert_eq!(press(&mut page, KeyCode::Char('t')), None);
        assert_eq!(press(&mut page, KeyCode::Down), Some(Action::Noop));
    }

    #[tokio::test]
    async fn test_enter_starts_ticker() {
        let mut page = HomePage::new(document(), Duration::from_millis(10));
        let mut cx = Context::<HomePage>::new(AppContext::detached(), Rect::new(0, 0, 90, 20));
        page.on_enter(&mut cx);
        assert!(page.tasks.has_active_tasks());
        page.on_exit(&mut cx);
        assert!(!page.tasks.has_active_tasks());
    }
}
