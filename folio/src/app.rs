//! Root component: header with the link bar, the routed content region and
//! a footer. Owns the router and the pages it switches between.

use crate::content::Portfolio;
use crate::document::{Document, Section, View, HOME_PATH};
use crate::menu::{is_compact, MenuDrawer};
use crate::pages::{HomePage, SectionPage};
use crate::theme::{Palette, ThemePreference};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_nexus::{
    Action, AnyComponent, Component, Context, Entity, Event, EventContext, NavLink, NavLinks,
    Resolution, Router, SessionHistory,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct ShellOptions {
    /// Location the session history starts at.
    pub start_path: String,
    /// Terminals narrower than this get the menu drawer.
    pub compact_width: u16,
    pub tick: Duration,
}

/// Home followed by one link per section; digits 0-5 follow them.
pub fn nav_links() -> NavLinks {
    let mut links = vec![NavLink::new("Home", HOME_PATH)];
    links.extend(Section::ALL.iter().map(|s| NavLink::new(s.title(), s.path())));
    NavLinks::new(links)
}

fn show(document: &Entity<Document>, view: View) -> impl FnMut() + Send + Sync + 'static {
    let document = Entity::clone(document);
    move || {
        if let Err(e) = document.update(|doc| doc.swap(view, Instant::now())) {
            tracing::warn!(error = %e, path = view.path(), "failed to swap content");
        }
    }
}

pub struct Shell {
    router: Router<SessionHistory, Entity<NavLinks>>,
    document: Entity<Document>,
    links: Entity<NavLinks>,
    theme: ThemePreference,
    menu: MenuDrawer,
    home: HomePage,
    sections: Vec<SectionPage>,
    /// View and document generation the pages were last switched for.
    shown: Option<(View, u64)>,
    compact_width: u16,
    width: u16,
}

impl Shell {
    pub fn new(portfolio: Arc<Portfolio>, theme: ThemePreference, options: ShellOptions) -> Self {
        let document = Entity::new(Document::new(portfolio, theme.theme()));
        let links = Entity::new(nav_links());

        let mut router = Router::new(
            SessionHistory::new(options.start_path),
            Entity::clone(&links),
            HOME_PATH,
            show(&document, View::Home),
        );
        for section in Section::ALL {
            router.register(section.path(), show(&document, View::Section(section)));
        }

        let home = HomePage::new(Entity::clone(&document), options.tick);
        let sections = Section::ALL
            .iter()
            .map(|section| SectionPage::new(*section, Entity::clone(&document), options.tick))
            .collect();

        Self {
            router,
            document,
            links,
            theme,
            menu: MenuDrawer::default(),
            home,
            sections,
            shown: None,
            compact_width: options.compact_width,
            width: 0,
        }
    }

    fn compact(&self) -> bool {
        is_compact(self.width, self.compact_width)
    }

    fn page_mut(&mut self, view: View) -> &mut dyn AnyComponent {
        match view {
            View::Home => &mut self.home,
            View::Section(section) => &mut self.sections[section.index()],
        }
    }

    /// Run page lifecycles if the router swapped the content since the last
    /// call. A swap to the same view counts as a new page.
    fn sync_page(&mut self, cx: &Context<Self>) {
        let next = match self.document.read(|doc| doc.view().map(|v| (v, doc.generation()))) {
            Ok(Some(next)) => next,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, "document unavailable, page not switched");
                return;
            }
        };
        if self.shown == Some(next) {
            return;
        }
        if let Some((old, _)) = self.shown.take() {
            self.page_mut(old).on_exit_any(&mut cx.cast());
        }
        self.shown = Some(next);
        self.page_mut(next.0).on_enter_any(&mut cx.cast());
    }

    fn follow_link(&mut self, path: &str, cx: &Context<Self>) {
        let resolution = self.router.navigate_to(path);
        self.after_route(resolution, cx);
    }

    fn back(&mut self, cx: &Context<Self>) {
        match self.router.go_back() {
            Some(resolution) => self.after_route(resolution, cx),
            None => tracing::trace!("already at the first entry"),
        }
    }

    fn forward(&mut self, cx: &Context<Self>) {
        match self.router.go_forward() {
            Some(resolution) => self.after_route(resolution, cx),
            None => tracing::trace!("already at the last entry"),
        }
    }

    fn after_route(&mut self, resolution: Resolution, cx: &Context<Self>) {
        if let Resolution::Redirected { from, to } = &resolution {
            tracing::info!(%from, %to, "no such page, showing fallback");
        }
        if let Err(e) = self.document.update(Document::scroll_to_top) {
            tracing::warn!(error = %e, "failed to reset scroll");
        }
        self.menu.close();
        self.sync_page(cx);
    }

    fn toggle_theme(&mut self) {
        let theme = self.theme.toggle();
        if let Err(e) = self.document.update(|doc| doc.theme = theme) {
            tracing::warn!(error = %e, "failed to apply theme");
        }
        tracing::debug!(theme = theme.as_str(), "theme toggled");
    }

    fn link_path(&self, index: usize) -> Option<String> {
        self.links
            .read(|links| links.get(index).map(|l| l.path.clone()))
            .ok()
            .flatten()
    }

    fn handle_menu_key(&mut self, key: KeyEvent, cx: &Context<Self>) {
        let len = self.links.read(NavLinks::len).unwrap_or(0);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.menu.select_prev(len),
            KeyCode::Down | KeyCode::Char('j') => self.menu.select_next(len),
            KeyCode::Enter => {
                if let Some(path) = self.link_path(self.menu.selected()) {
                    self.follow_link(&path, cx);
                }
            }
            KeyCode::Esc | KeyCode::Tab => self.menu.close(),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, cx: &mut EventContext<Self>) -> Option<Action> {
        let alert_open = self
            .document
            .read(|doc| doc.contact.alert().is_some())
            .unwrap_or(false);
        if alert_open {
            if let Err(e) = self.document.update(|doc| doc.contact.dismiss_alert()) {
                tracing::warn!(error = %e, "failed to dismiss alert");
            }
            return None;
        }

        if self.menu.is_open() {
            self.handle_menu_key(key, cx);
            return None;
        }

        if key.modifiers.contains(KeyModifiers::ALT) {
            match key.code {
                KeyCode::Left => {
                    self.back(cx);
                    return None;
                }
                KeyCode::Right => {
                    self.forward(cx);
                    return None;
                }
                _ => {}
            }
        }

        if let Some((view, _)) = self.shown {
            match self.page_mut(view).handle_event_any(Event::Key(key), &mut cx.cast()) {
                Some(Action::Quit) => return Some(Action::Quit),
                Some(Action::Noop) => return None,
                None => {}
            }
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('t') => {
                self.toggle_theme();
                None
            }
            KeyCode::Tab if self.compact() => {
                let active = self
                    .links
                    .read(|links| links.active().and_then(|l| links.position(&l.path)))
                    .ok()
                    .flatten();
                self.menu.select(active.unwrap_or(0));
                self.menu.toggle();
                None
            }
            KeyCode::Char('[') => {
                self.back(cx);
                None
            }
            KeyCode::Char(']') => {
                self.forward(cx);
                None
            }
            KeyCode::Char(c) => {
                let path = c
                    .to_digit(10)
                    .and_then(|digit| self.link_path(digit as usize))?;
                self.follow_link(&path, cx);
                None
            }
            _ => None,
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, palette: &Palette, spy: Option<Section>) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(palette.border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let profile = self
            .document
            .read(|doc| (doc.portfolio().profile.name.clone(), doc.portfolio().profile.title.clone()))
            .unwrap_or_default();
        let brand = Line::from(vec![
            Span::styled(
                format!(" {}", profile.0),
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", profile.1), Style::default().fg(palette.muted)),
        ]);
        frame.render_widget(Paragraph::new(brand), inner);

        let mut right: Vec<Span<'static>> = Vec::new();
        if self.compact() {
            right.push(Span::styled(
                format!(" {} ", self.menu.icon()),
                Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
            ));
        } else {
            let links = self.links.read(|links| links.links().to_vec()).unwrap_or_default();
            let spied = spy.map(|s| s.path());
            for (i, link) in links.iter().enumerate() {
                let style = if link.active {
                    Style::default()
                        .fg(palette.accent_fg)
                        .bg(palette.accent)
                        .add_modifier(Modifier::BOLD)
                } else if spied == Some(link.path.as_str()) {
                    Style::default().fg(palette.accent).add_modifier(Modifier::UNDERLINED)
                } else {
                    Style::default().fg(palette.fg)
                };
                right.push(Span::styled(format!(" {i} {} ", link.label), style));
                right.push(Span::raw(" "));
            }
        }
        right.push(Span::styled(
            format!(" {} ", self.theme.theme().toggle_icon()),
            Style::default().fg(palette.warning),
        ));
        frame.render_widget(
            Paragraph::new(Line::from(right)).alignment(Alignment::Right),
            inner,
        );
    }

    fn render_drawer(&self, frame: &mut Frame, below: Rect, palette: &Palette) {
        let links = self.links.read(|links| links.links().to_vec()).unwrap_or_default();
        let width = 24.min(below.width);
        let height = (links.len() as u16 + 2).min(below.height);
        let area = Rect::new(below.right().saturating_sub(width), below.y, width, height);

        let items: Vec<ListItem> = links
            .iter()
            .enumerate()
            .map(|(i, link)| {
                let marker = if link.active { "●" } else { " " };
                ListItem::new(format!(" {marker} {i} {}", link.label))
            })
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(palette.accent))
                    .title(" Menu "),
            )
            .style(Style::default().fg(palette.fg).bg(palette.bg))
            .highlight_style(Style::default().fg(palette.accent_fg).bg(palette.accent));
        let mut state = ListState::default().with_selected(Some(self.menu.selected()));

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let nav = |enabled: bool, text: &'static str| {
            let color = if enabled { palette.fg } else { palette.border };
            Span::styled(text, Style::default().fg(color))
        };
        let path = self.router.current_path().unwrap_or(HOME_PATH).to_string();
        let hints = if self.compact() {
            "  q quit · t theme · tab menu"
        } else {
            "  q quit · t theme · 0-5 go · ↑↓ scroll"
        };
        let line = Line::from(vec![
            nav(self.router.can_go_back(), " ◀ ["),
            Span::raw("  "),
            nav(self.router.can_go_forward(), "] ▶"),
            Span::styled(format!("   {path}"), Style::default().fg(palette.accent)),
            Span::styled(hints, Style::default().fg(palette.muted)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_alert(&self, frame: &mut Frame, message: &str, palette: &Palette) {
        let area = frame.area();
        let width = (area.width / 5 * 3).clamp(20.min(area.width), area.width);
        let inner_width = usize::from(width.saturating_sub(4)).max(1);
        let height = (message.chars().count().div_ceil(inner_width) as u16 + 4).min(area.height);
        let popup = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        let body = Paragraph::new(vec![
            Line::from(message.to_string()),
            Line::from(""),
            Line::from(Span::styled("press any key", Style::default().fg(palette.muted))),
        ])
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.fg).bg(palette.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(palette.accent))
                .title(" Message "),
        );
        frame.render_widget(Clear, popup);
        frame.render_widget(body, popup);
    }
}

impl Component for Shell {
    fn on_mount(&mut self, _cx: &mut Context<Self>) {
        let resolution = self.router.resolve_current_route();
        match &resolution {
            Resolution::Matched(path) => tracing::info!(%path, "initial route"),
            Resolution::Redirected { from, to } => {
                tracing::info!(%from, %to, "initial route not found, showing fallback")
            }
        }
    }

    fn on_enter(&mut self, cx: &mut Context<Self>) {
        self.sync_page(cx);
    }

    fn on_exit(&mut self, cx: &mut Context<Self>) {
        if let Some((view, _)) = self.shown.take() {
            self.page_mut(view).on_exit_any(&mut cx.cast());
        }
    }

    fn on_shutdown(&mut self, _cx: &mut Context<Self>) {
        tracing::info!(
            path = self.router.current_path().unwrap_or_default(),
            entries = self.router.history().entries().len(),
            "shell shut down"
        );
    }

    fn render(&mut self, frame: &mut Frame, cx: &mut Context<Self>) {
        let area = cx.area;
        self.width = area.width;

        let (palette, spy, alert) = match self.document.read(|doc| {
            (doc.theme.palette(), doc.spy, doc.contact.alert().map(|a| a.message()))
        }) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "document unavailable, skipping frame");
                return;
            }
        };

        frame.render_widget(
            Block::default().style(Style::default().fg(palette.fg).bg(palette.bg)),
            area,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let spy = match self.shown {
            Some((View::Home, _)) => spy,
            _ => None,
        };
        self.render_header(frame, chunks[0], &palette, spy);

        if let Some((view, _)) = self.shown {
            let body = chunks[1].inner(ratatui::layout::Margin::new(1, 0));
            self.page_mut(view).render_any(frame, &mut cx.with_area(body));
        }

        self.render_footer(frame, chunks[2], &palette);

        if self.menu.is_open() {
            self.render_drawer(frame, chunks[1], &palette);
        }
        if let Some(message) = alert {
            self.render_alert(frame, &message, &palette);
        }
    }

    fn handle_event(&mut self, event: Event, cx: &mut EventContext<Self>) -> Option<Action> {
        match event {
            Event::Key(key) => self.handle_key(key, cx),
            Event::Resize(width, _) => {
                self.width = width;
                self.menu.on_resize(width, self.compact_width);
                None
            }
            Event::Mouse(_) | Event::Paste(_) => {
                let (view, _) = self.shown?;
                match self.page_mut(view).handle_event_any(event, &mut cx.cast()) {
                    Some(Action::Quit) => Some(Action::Quit),
                    _ => None,
                }
            }
        }
    }
}
