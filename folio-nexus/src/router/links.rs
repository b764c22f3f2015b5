//! Navigation links and their active marker.

use crate::state::Entity;

/// Whatever renders navigation links and needs to know the active path.
pub trait LinkBar: Send + Sync {
    /// Mark every link whose path equals `current` as active and clear the rest.
    fn mark_active(&mut self, current: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub path: String,
    pub active: bool,
}

impl NavLink {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            active: false,
        }
    }
}

/// Ordered navigation links, as shown in the header.
#[derive(Debug, Clone, Default)]
pub struct NavLinks {
    links: Vec<NavLink>,
}

impl NavLinks {
    pub fn new(links: Vec<NavLink>) -> Self {
        Self { links }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn get(&self, index: usize) -> Option<&NavLink> {
        self.links.get(index)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn active(&self) -> Option<&NavLink> {
        self.links.iter().find(|link| link.active)
    }

    pub fn position(&self, path: &str) -> Option<usize> {
        self.links.iter().position(|link| link.path == path)
    }
}

impl LinkBar for NavLinks {
    fn mark_active(&mut self, current: &str) {
        for link in &mut self.links {
            link.active = link.path == current;
        }
    }
}

impl<T: LinkBar> LinkBar for Entity<T> {
    fn mark_active(&mut self, current: &str) {
        if self.update(|bar| bar.mark_active(current)).is_err() {
            tracing::warn!(current, "link bar lock poisoned, active marker not updated");
        }
    }
}
