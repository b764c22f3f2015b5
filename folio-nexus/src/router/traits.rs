/// View activation registered for a path.
///
/// Called with no arguments each time its path is resolved. Closures are the
/// usual implementation; they capture whatever content region they swap.
pub trait Activate: Send + Sync {
    fn activate(&mut self);
}

impl<F> Activate for F
where
    F: FnMut() + Send + Sync,
{
    fn activate(&mut self) {
        self()
    }
}

/// Signals the router reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// The history cursor moved (back/forward). The location is re-read from
    /// the history, nothing is pushed.
    Changed,
    /// A navigation link was activated.
    LinkActivated(String),
}

/// Outcome of a route resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The location was registered and its view activated.
    Matched(String),
    /// The location was not registered; the fallback was pushed and activated.
    Redirected { from: String, to: String },
}

impl Resolution {
    /// Path that ended up displayed.
    pub fn path(&self) -> &str {
        match self {
            Resolution::Matched(path) => path,
            Resolution::Redirected { to, .. } => to,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Resolution::Redirected { .. })
    }
}
