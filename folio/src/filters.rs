//! Project filter buttons and card transitions.
//!
//! Applying a filter shows matching cards at once and reveals them after a
//! short delay; cards that stop matching fade first and drop out of the
//! layout when the fade is over. Time is passed in so the transitions can be
//! driven by the page ticker and tested without sleeping.

use crate::content::Project;
use std::time::{Duration, Instant};

pub const REVEAL_DELAY: Duration = Duration::from_millis(100);
pub const HIDE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    Category(String),
}

impl Filter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(wanted) => wanted == category,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Filter::All => "all",
            Filter::Category(category) => category,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterButton {
    pub filter: Filter,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Reveal,
    Hide,
}

/// Presentation state of one project card.
#[derive(Debug, Clone)]
pub struct Card {
    pub project: usize,
    category: String,
    displayed: bool,
    revealed: bool,
    pending: Option<(Instant, Step)>,
}

impl Card {
    /// Takes part in the layout.
    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    /// Fully visible (not fading in or out).
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}

#[derive(Debug, Clone)]
pub struct ProjectBoard {
    buttons: Vec<FilterButton>,
    focused: usize,
    cards: Vec<Card>,
}

impl ProjectBoard {
    /// Fresh board with the `all` filter applied.
    pub fn new(projects: &[Project], categories: &[String], now: Instant) -> Self {
        let buttons = std::iter::once(Filter::All)
            .chain(categories.iter().cloned().map(Filter::Category))
            .map(|filter| FilterButton { filter, active: false })
            .collect();
        let cards = projects
            .iter()
            .enumerate()
            .map(|(project, p)| Card {
                project,
                category: p.category.clone(),
                displayed: true,
                revealed: false,
                pending: None,
            })
            .collect();

        let mut board = Self { buttons, focused: 0, cards };
        board.apply(Filter::All, now);
        board
    }

    pub fn buttons(&self) -> &[FilterButton] {
        &self.buttons
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn active_filter(&self) -> Option<&Filter> {
        self.buttons.iter().find(|b| b.active).map(|b| &b.filter)
    }

    pub fn focus_next(&mut self) {
        if !self.buttons.is_empty() {
            self.focused = (self.focused + 1) % self.buttons.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.buttons.is_empty() {
            self.focused = (self.focused + self.buttons.len() - 1) % self.buttons.len();
        }
    }

    /// Apply the button under focus.
    pub fn apply_focused(&mut self, now: Instant) {
        if let Some(button) = self.buttons.get(self.focused) {
            let filter = button.filter.clone();
            self.apply(filter, now);
        }
    }

    pub fn apply(&mut self, filter: Filter, now: Instant) {
        for button in &mut self.buttons {
            button.active = button.filter == filter;
        }
        for card in &mut self.cards {
            if filter.matches(&card.category) {
                card.displayed = true;
                card.pending = Some((now + REVEAL_DELAY, Step::Reveal));
            } else {
                card.revealed = false;
                card.pending = Some((now + HIDE_DELAY, Step::Hide));
            }
        }
        tracing::debug!(filter = filter.label(), "project filter applied");
    }

    /// Complete transitions that are due. Returns true if anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for card in &mut self.cards {
            let Some((due, step)) = card.pending else {
                continue;
            };
            if due > now {
                continue;
            }
            match step {
                Step::Reveal => card.revealed = true,
                Step::Hide => card.displayed = false,
            }
            card.pending = None;
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(title: &str, category: &str) -> Project {
        Project {
            title: title.into(),
            description: String::new(),
            category: category.into(),
            tags: Vec::new(),
            link: None,
        }
    }

    fn board(now: Instant) -> ProjectBoard {
        let projects = vec![project("a", "web"), project("b", "mobile"), project("c", "web")];
        ProjectBoard::new(&projects, &["web".into(), "mobile".into()], now)
    }

    fn displayed(board: &ProjectBoard) -> Vec<usize> {
        board.cards().iter().filter(|c| c.is_displayed()).map(|c| c.project).collect()
    }

    #[test]
    fn test_new_board_shows_all_after_reveal_delay() {
        let t0 = Instant::now();
        let mut board = board(t0);
        assert_eq!(board.active_filter(), Some(&Filter::All));
        assert_eq!(displayed(&board), [0, 1, 2]);
        assert!(board.cards().iter().all(|c| !c.is_revealed()));

        assert!(!board.tick(t0 + Duration::from_millis(50)));
        assert!(board.tick(t0 + REVEAL_DELAY));
        assert!(board.cards().iter().all(|c| c.is_revealed()));
        assert!(board.cards().iter().all(|c| c.pending.is_none()));
    }

    #[test]
    fn test_filter_fades_then_hides_non_matching() {
        let t0 = Instant::now();
        let mut board = board(t0);
        board.tick(t0 + REVEAL_DELAY);

        let t1 = t0 + Duration::from_secs(1);
        board.apply(Filter::Category("web".into()), t1);
        let b = &board.cards()[1];
        assert!(b.is_displayed());
        assert!(!b.is_revealed());

        board.tick(t1 + REVEAL_DELAY);
        assert_eq!(displayed(&board), [0, 1, 2]);
        board.tick(t1 + HIDE_DELAY);
        assert_eq!(displayed(&board), [0, 2]);
    }

    #[test]
    fn test_only_applied_button_is_active() {
        let t0 = Instant::now();
        let mut board = board(t0);
        board.focus_next();
        board.focus_next();
        board.apply_focused(t0);

        let active: Vec<_> = board.buttons().iter().filter(|b| b.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].filter, Filter::Category("mobile".into()));
    }

    #[test]
    fn test_reapplying_before_hide_keeps_card() {
        let t0 = Instant::now();
        let mut board = board(t0);
        board.apply(Filter::Category("mobile".into()), t0);
        board.apply(Filter::All, t0 + Duration::from_millis(50));

        board.tick(t0 + Duration::from_secs(1));
        assert_eq!(displayed(&board), [0, 1, 2]);
    }

    #[test]
    fn test_focus_wraps() {
        let mut board = board(Instant::now());
        board.focus_prev();
        assert_eq!(board.focused(), 2);
        board.focus_next();
        assert_eq!(board.focused(), 0);
    }
}
