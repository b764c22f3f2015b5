//! Light and dark themes, and the persisted preference.

use folio_nexus::KeyValueStore;
use ratatui::style::Color;

/// Store key holding `"dark"` or `"light"`.
pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Glyph of the toggle button: shows what pressing it switches to.
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            Theme::Light => "☾",
            Theme::Dark => "☀",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Dark => Palette {
                bg: Color::Rgb(18, 18, 28),
                fg: Color::Rgb(225, 225, 235),
                muted: Color::Rgb(130, 130, 150),
                accent: Color::Rgb(120, 170, 255),
                accent_fg: Color::Rgb(10, 10, 20),
                border: Color::Rgb(70, 70, 95),
                success: Color::Rgb(110, 210, 140),
                warning: Color::Rgb(240, 190, 90),
            },
            Theme::Light => Palette {
                bg: Color::Rgb(250, 250, 252),
                fg: Color::Rgb(30, 30, 40),
                muted: Color::Rgb(110, 110, 125),
                accent: Color::Rgb(40, 90, 200),
                accent_fg: Color::Rgb(250, 250, 252),
                border: Color::Rgb(190, 190, 205),
                success: Color::Rgb(30, 140, 70),
                warning: Color::Rgb(190, 120, 20),
            },
        }
    }
}

/// Colors the pages draw with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub accent_fg: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
}

/// Saved preference wins; without one (or with an empty one), follow the
/// terminal.
pub fn initial_theme(saved: Option<&str>, system_dark: bool) -> Theme {
    match saved.filter(|value| !value.is_empty()) {
        Some("dark") => Theme::Dark,
        None if system_dark => Theme::Dark,
        _ => Theme::Light,
    }
}

/// Guess whether the terminal background is dark from `COLORFGBG`.
pub fn system_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| colorfgbg_is_dark(&value))
        .unwrap_or(true)
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); ANSI 7 and 15 are
/// light backgrounds, the rest of 0..=15 dark.
pub fn colorfgbg_is_dark(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match bg {
        7 | 15 => Some(false),
        0..=15 => Some(true),
        _ => None,
    }
}

/// Current theme plus the store it is saved in.
pub struct ThemePreference {
    theme: Theme,
    store: Box<dyn KeyValueStore>,
}

impl ThemePreference {
    pub fn load(store: Box<dyn KeyValueStore>, system_dark: bool) -> Self {
        let saved = store.get(THEME_KEY);
        let theme = initial_theme(saved.as_deref(), system_dark);
        tracing::debug!(?saved, system_dark, theme = theme.as_str(), "theme resolved");
        Self { theme, store }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and save it. A failed save keeps the new theme for
    /// this session.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.store.set(THEME_KEY, self.theme.as_str()) {
            tracing::warn!(error = %e, "failed to persist theme preference");
        }
        self.theme
    }
}
