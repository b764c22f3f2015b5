//! In-page router.
//!
//! Maps string paths to view activations and keeps the displayed view in
//! step with a [`History`]. Unregistered locations are never displayed: the
//! router pushes the fallback path and activates it instead. The fallback is
//! handed over together with its activation when the router is built, so it
//! is always registered and a redirect never chains.
//!
//! # Example
//! ```ignore
//! let mut router = Router::new(SessionHistory::new("/"), links, "/", show_home);
//! router.register("/about", show_about);
//!
//! router.navigate_to("/about");
//! assert_eq!(router.current_path(), Some("/about"));
//! router.navigate_to("/missing");
//! assert_eq!(router.current_path(), Some("/"));
//! ```

pub mod links;
pub mod traits;

pub use links::{LinkBar, NavLink, NavLinks};
pub use traits::{Activate, NavEvent, Resolution};

use crate::history::History;
use std::collections::HashMap;

pub struct Router<H: History, L: LinkBar> {
    routes: HashMap<String, Box<dyn Activate>>,
    current: Option<String>,
    fallback: String,
    history: H,
    links: L,
}

impl<H: History, L: LinkBar> Router<H, L> {
    /// Build a router. Nothing is activated until the first resolution.
    pub fn new(
        history: H,
        links: L,
        fallback: impl Into<String>,
        on_fallback: impl Activate + 'static,
    ) -> Self {
        let fallback = fallback.into();
        let mut routes: HashMap<String, Box<dyn Activate>> = HashMap::new();
        routes.insert(fallback.clone(), Box::new(on_fallback));
        Self {
            routes,
            current: None,
            fallback,
            history,
            links,
        }
    }

    /// Register or replace the activation for `path`.
    pub fn register(
        &mut self,
        path: impl Into<String>,
        on_activate: impl Activate + 'static,
    ) -> &mut Self {
        let path = path.into();
        if self.routes.insert(path.clone(), Box::new(on_activate)).is_some() {
            tracing::debug!(%path, "route replaced");
        }
        self
    }

    /// Push `path` onto the history and resolve it.
    pub fn navigate_to(&mut self, path: &str) -> Resolution {
        self.history.push(path);
        self.resolve_current_route()
    }

    /// Activate whatever the history currently points at.
    pub fn resolve_current_route(&mut self) -> Resolution {
        let location = self.history.location().to_string();

        let Some(on_activate) = self.routes.get_mut(&location) else {
            tracing::debug!(from = %location, to = %self.fallback, "unregistered path, redirecting");
            let fallback = self.fallback.clone();
            return match self.navigate_to(&fallback) {
                Resolution::Matched(to) => Resolution::Redirected { from: location, to },
                redirected => redirected,
            };
        };

        self.current = Some(location.clone());
        on_activate.activate();
        self.links.mark_active(&location);
        tracing::trace!(path = %location, "route resolved");
        Resolution::Matched(location)
    }

    pub fn handle(&mut self, event: NavEvent) -> Resolution {
        match event {
            NavEvent::Changed => self.resolve_current_route(),
            NavEvent::LinkActivated(path) => self.navigate_to(&path),
        }
    }

    /// Step back in the history and resolve. `None` at the first entry.
    pub fn go_back(&mut self) -> Option<Resolution> {
        self.history
            .back()
            .then(|| self.handle(NavEvent::Changed))
    }

    /// Step forward in the history and resolve. `None` at the last entry.
    pub fn go_forward(&mut self) -> Option<Resolution> {
        self.history
            .forward()
            .then(|| self.handle(NavEvent::Changed))
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    pub fn current_path(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn is_registered(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    /// Registered paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn links(&self) -> &L {
        &self.links
    }
}

impl<H: History + std::fmt::Debug, L: LinkBar> std::fmt::Debug for Router<H, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("paths", &self.paths())
            .field("current", &self.current)
            .field("fallback", &self.fallback)
            .field("history", &self.history)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::SessionHistory;
    use crate::state::Entity;
    use std::sync::{Arc, Mutex};

    type Calls = Arc<Mutex<Vec<&'static str>>>;

    fn record(calls: &Calls, name: &'static str) -> impl Activate + 'static {
        let calls = Arc::clone(calls);
        move || calls.lock().unwrap().push(name)
    }

    fn links() -> Entity<NavLinks> {
        Entity::new(NavLinks::new(vec![
            NavLink::new("Home", "/"),
            NavLink::new("About", "/about"),
            NavLink::new("Skills", "/skills"),
        ]))
    }

    fn router(calls: &Calls) -> Router<SessionHistory, Entity<NavLinks>> {
        let mut router = Router::new(SessionHistory::new("/"), links(), "/", record(calls, "home"));
        router
            .register("/about", record(calls, "about"))
            .register("/skills", record(calls, "skills"));
        router
    }

    fn active_paths(router: &Router<SessionHistory, Entity<NavLinks>>) -> Vec<String> {
        router
            .links()
            .read(|bar| {
                bar.links()
                    .iter()
                    .filter(|l| l.active)
                    .map(|l| l.path.clone())
                    .collect()
            })
            .unwrap()
    }

    #[test]
    fn test_unresolved_until_first_resolution() {
        let calls = Calls::default();
        let router = router(&calls);
        assert_eq!(router.current_path(), None);
        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(router.paths(), ["/", "/about", "/skills"]);
    }

    #[test]
    fn test_registered_path_runs_its_callback_once() {
        let calls = Calls::default();
        let mut router = router(&calls);

        let resolution = router.navigate_to("/skills");
        assert_eq!(resolution, Resolution::Matched("/skills".into()));
        assert_eq!(router.current_path(), Some("/skills"));
        assert_eq!(*calls.lock().unwrap(), ["skills"]);
    }

    #[test]
    fn test_unregistered_path_redirects_to_fallback() {
        let calls = Calls::default();
        let mut router = router(&calls);

        let resolution = router.navigate_to("/missing");
        assert_eq!(
            resolution,
            Resolution::Redirected { from: "/missing".into(), to: "/".into() }
        );
        assert_eq!(router.current_path(), Some("/"));
        assert_eq!(*calls.lock().unwrap(), ["home"]);
        assert_eq!(router.history().entries(), ["/", "/missing", "/"]);
    }

    #[test]
    fn test_repeat_navigation_reactivates() {
        let calls = Calls::default();
        let mut router = router(&calls);

        router.navigate_to("/about");
        router.navigate_to("/about");
        assert_eq!(*calls.lock().unwrap(), ["about", "about"]);
        assert_eq!(router.current_path(), Some("/about"));
    }

    #[test]
    fn test_single_active_link_follows_current_path() {
        let calls = Calls::default();
        let mut router = router(&calls);

        router.navigate_to("/about");
        assert_eq!(active_paths(&router), ["/about"]);
        router.navigate_to("/skills");
        assert_eq!(active_paths(&router), ["/skills"]);
        router.navigate_to("/nope");
        assert_eq!(active_paths(&router), ["/"]);
    }

    #[test]
    fn test_no_active_link_when_path_has_no_link() {
        let calls = Calls::default();
        let mut router = router(&calls);
        router.register("/hidden", record(&calls, "hidden"));

        router.navigate_to("/hidden");
        assert!(active_paths(&router).is_empty());
    }

    #[test]
    fn test_back_after_two_navigations_restores_first() {
        let calls = Calls::default();
        let mut router = router(&calls);

        router.navigate_to("/about");
        router.navigate_to("/skills");
        let resolution = router.go_back();
        assert_eq!(resolution, Some(Resolution::Matched("/about".into())));
        assert_eq!(router.current_path(), Some("/about"));
        assert_eq!(router.history().len(), 3);

        assert_eq!(router.go_forward(), Some(Resolution::Matched("/skills".into())));
        assert_eq!(router.go_forward(), None);
    }

    #[test]
    fn test_back_at_first_entry_is_noop() {
        let calls = Calls::default();
        let mut router = router(&calls);
        router.resolve_current_route();
        assert!(!router.can_go_back());
        assert_eq!(router.go_back(), None);
        assert_eq!(*calls.lock().unwrap(), ["home"]);
    }

    #[test]
    fn test_changed_signal_does_not_grow_history() {
        let calls = Calls::default();
        let mut router = router(&calls);
        router.navigate_to("/about");

        router.handle(NavEvent::Changed);
        assert_eq!(router.history().len(), 2);
        assert_eq!(*calls.lock().unwrap(), ["about", "about"]);

        router.handle(NavEvent::LinkActivated("/skills".into()));
        assert_eq!(router.history().len(), 3);
    }

    #[test]
    fn test_late_registration_affects_future_navigation_only() {
        let calls = Calls::default();
        let mut router = router(&calls);

        router.navigate_to("/contact");
        assert_eq!(router.current_path(), Some("/"));

        router.register("/contact", record(&calls, "contact"));
        router.navigate_to("/contact");
        assert_eq!(router.current_path(), Some("/contact"));
        assert_eq!(*calls.lock().unwrap(), ["home", "contact"]);
    }

    #[test]
    fn test_register_overwrites_silently() {
        let calls = Calls::default();
        let mut router = router(&calls);
        router.register("/about", record(&calls, "about-v2"));

        router.navigate_to("/about");
        assert_eq!(*calls.lock().unwrap(), ["about-v2"]);
    }

    #[test]
    fn test_end_to_end_home_and_about() {
        let calls = Calls::default();
        let mut router = Router::new(
            SessionHistory::new("/"),
            links(),
            "/",
            record(&calls, "home"),
        );
        router.register("/about", record(&calls, "about"));

        router.navigate_to("/about");
        assert_eq!(router.current_path(), Some("/about"));
        assert_eq!(*calls.lock().unwrap(), ["about"]);

        let resolution = router.navigate_to("/missing");
        assert!(resolution.is_redirect());
        assert_eq!(resolution.path(), "/");
        assert_eq!(router.current_path(), Some("/"));
        assert_eq!(*calls.lock().unwrap(), ["about", "home"]);
    }
}
