//! The document the router swaps content in.
//!
//! `Document` is the live content region: which view is displayed plus the
//! interactive state of the displayed sections. Every swap builds that state
//! from scratch, the way re-inserting a section's markup gives fresh,
//! re-initialized widgets.

use crate::content::Portfolio;
use crate::filters::ProjectBoard;
use crate::form::ContactForm;
use crate::theme::Theme;
use crate::video::VideoPlayer;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Path of the home page, also the router fallback.
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Skills,
    Showcase,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::About,
        Section::Skills,
        Section::Showcase,
        Section::Projects,
        Section::Contact,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Section::About => "about",
            Section::Skills => "skills",
            Section::Showcase => "showcase",
            Section::Projects => "projects",
            Section::Contact => "contact",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Section::About => "/about",
            Section::Skills => "/skills",
            Section::Showcase => "/showcase",
            Section::Projects => "/projects",
            Section::Contact => "/contact",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Skills => "Skills",
            Section::Showcase => "Showcase",
            Section::Projects => "Projects",
            Section::Contact => "Contact",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Section::About => 0,
            Section::Skills => 1,
            Section::Showcase => 2,
            Section::Projects => 3,
            Section::Contact => 4,
        }
    }

    /// Sections with something moving on their own.
    pub fn animates(&self) -> bool {
        matches!(self, Section::Showcase | Section::Projects)
    }
}

/// What the content region displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Every section stacked on one scrolling page.
    Home,
    Section(Section),
}

impl View {
    pub fn path(&self) -> &'static str {
        match self {
            View::Home => HOME_PATH,
            View::Section(section) => section.path(),
        }
    }

    pub fn shows(&self, section: Section) -> bool {
        match self {
            View::Home => true,
            View::Section(shown) => *shown == section,
        }
    }
}

pub struct Document {
    portfolio: Arc<Portfolio>,
    view: Option<View>,
    generation: u64,
    pub theme: Theme,
    /// First visible row of the content region.
    pub scroll: u16,
    /// Section in view on the home page.
    pub spy: Option<Section>,
    pub projects: ProjectBoard,
    pub contact: ContactForm,
    pub video: VideoPlayer,
    last_tick: Option<Instant>,
}

impl Document {
    pub fn new(portfolio: Arc<Portfolio>, theme: Theme) -> Self {
        let now = Instant::now();
        let projects = ProjectBoard::new(&portfolio.projects, &portfolio.categories(), now);
        let video = VideoPlayer::new(Duration::from_secs(portfolio.showcase.duration_secs.into()));
        Self {
            portfolio,
            view: None,
            generation: 0,
            theme,
            scroll: 0,
            spy: None,
            projects,
            contact: ContactForm::default(),
            video,
            last_tick: None,
        }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// `None` until the router resolved its first route.
    pub fn view(&self) -> Option<View> {
        self.view
    }

    /// Bumped on every swap, including a swap to the view already shown.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the content region with a fresh `view` and re-run the
    /// section initializers.
    pub fn swap(&mut self, view: View, now: Instant) {
        self.view = Some(view);
        self.generation += 1;
        self.spy = match view {
            View::Home => Some(Section::About),
            View::Section(_) => None,
        };

        if view.shows(Section::Projects) {
            self.projects =
                ProjectBoard::new(&self.portfolio.projects, &self.portfolio.categories(), now);
        }
        if view.shows(Section::Contact) {
            self.contact = ContactForm::default();
        }
        if view.shows(Section::Showcase) {
            self.video = VideoPlayer::new(self.video.duration());
        }
        self.last_tick = None;
        tracing::debug!(path = view.path(), generation = self.generation, "content swapped");
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    /// Advance the video clock and card transitions. Returns true if a
    /// redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let elapsed = self
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_tick = Some(now);

        let played = self.video.advance(elapsed);
        let moved = self.projects.tick(now);
        played || moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{Filter, REVEAL_DELAY};
    use crate::form::Field;

    fn document() -> Document {
        Document::new(Arc::new(Portfolio::embedded().unwrap()), Theme::Dark)
    }

    #[test]
    fn test_swap_reinitializes_displayed_sections() {
        let mut doc = document();
        let t0 = Instant::now();
        doc.swap(View::Section(Section::Projects), t0);
        doc.projects.apply(Filter::Category("web".into()), t0);
        doc.contact.set_value(Field::Name, "draft");

        doc.swap(View::Section(Section::Projects), t0);
        assert_eq!(doc.projects.active_filter(), Some(&Filter::All));
        assert_eq!(doc.contact.value(Field::Name), "draft");

        doc.swap(View::Section(Section::Contact), t0);
        assert_eq!(doc.contact.value(Field::Name), "");
        assert_eq!(doc.generation(), 3);
    }

    #[test]
    fn test_home_swap_resets_everything_and_spies_first_section() {
        let mut doc = document();
        let t0 = Instant::now();
        doc.video.toggle_play();
        doc.contact.set_value(Field::Email, "x");

        doc.swap(View::Home, t0);
        assert!(doc.video.is_paused());
        assert_eq!(doc.contact.value(Field::Email), "");
        assert_eq!(doc.spy, Some(Section::About));
        assert_eq!(doc.view(), Some(View::Home));
    }

    #[test]
    fn test_tick_drives_video_and_cards() {
        let mut doc = document();
        let t0 = Instant::now();
        doc.swap(View::Home, t0);
        doc.video.toggle_play();

        assert!(!doc.tick(t0));
        assert!(doc.tick(t0 + REVEAL_DELAY + Duration::from_millis(1)));
        assert!(doc.video.position() > Duration::ZERO);
        assert!(doc.projects.cards().iter().all(|c| c.is_revealed()));
    }

    #[test]
    fn test_section_paths() {
        for section in Section::ALL {
            assert_eq!(section.path(), format!("/{}", section.id()));
            assert_eq!(Section::ALL[section.index()], section);
        }
        assert!(View::Home.shows(Section::Contact));
        assert!(!View::Section(Section::About).shows(Section::Contact));
    }
}
