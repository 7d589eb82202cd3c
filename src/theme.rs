//! Theme resolution, toggle and persistence.
//!
//! DESIGN
//! ======
//! The browser keeps the visible theme in `<html data-theme>` and the durable
//! preference in `localStorage`. [`ThemeState`] owns the in-memory copy and
//! talks to both through [`ThemeHost`], so the policy can be exercised without
//! a document. The `web` shell supplies the browser-backed host.
//!
//! Resolution order on load: stored value, then OS preference, then the
//! configured default. Unrecognized stored strings count as unset.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ThemeConfig;

/// Binary display theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Attribute / storage spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored or attribute value. Only the exact spellings `light`
    /// and `dark` are recognized.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the theme policy needs from its environment.
pub trait ThemeHost {
    /// Raw value persisted under `key`, if any.
    fn stored_theme(&self, key: &str) -> Option<String>;

    /// Persist `theme` under `key`.
    fn store_theme(&mut self, key: &str, theme: Theme);

    /// OS color-scheme preference; `None` when the query is unavailable.
    fn prefers_dark(&self) -> Option<bool>;

    /// Current value of the root theme attribute.
    fn root_theme(&self) -> Option<String>;

    /// Write the root theme attribute.
    fn apply_root_theme(&mut self, theme: Theme);
}

/// First match wins: valid stored value, OS preference, `fallback`.
#[must_use]
pub fn resolve_theme(stored: Option<&str>, prefers_dark: Option<bool>, fallback: Theme) -> Theme {
    stored
        .and_then(Theme::parse)
        .or_else(|| prefers_dark.map(Theme::from_prefers_dark))
        .unwrap_or(fallback)
}

/// Callback run after every toggle with the new theme.
pub type ThemeObserver = Box<dyn FnMut(Theme)>;

/// Owned theme state: the single source of truth for the active theme.
pub struct ThemeState {
    storage_key: String,
    current: Theme,
    observers: Vec<ThemeObserver>,
}

impl ThemeState {
    /// Resolve the initial theme and apply it to the document root.
    ///
    /// Runs before the first paint so the page never flashes the wrong
    /// palette. Nothing is written to storage until the user toggles.
    pub fn resolve_initial<H: ThemeHost + ?Sized>(host: &mut H, config: &ThemeConfig) -> Self {
        let stored = host.stored_theme(&config.storage_key);
        let prefers_dark = host.prefers_dark();
        let current = resolve_theme(stored.as_deref(), prefers_dark, config.default_theme);
        host.apply_root_theme(current);
        log::debug!("theme resolved to {current} (stored={stored:?}, prefers_dark={prefers_dark:?})");
        Self { storage_key: config.storage_key.clone(), current, observers: Vec::new() }
    }

    #[must_use]
    pub fn current(&self) -> Theme {
        self.current
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Register an observer. Observers run in registration order.
    pub fn subscribe(&mut self, observer: impl FnMut(Theme) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Flip the theme, write it to the root and to storage, notify observers.
    ///
    /// The root attribute is read back first so an external edit to
    /// `data-theme` is honored; an absent or invalid attribute falls back to
    /// the in-memory theme.
    pub fn toggle<H: ThemeHost + ?Sized>(&mut self, host: &mut H) -> Theme {
        let shown = host
            .root_theme()
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or(self.current);
        let next = shown.toggled();

        host.apply_root_theme(next);
        host.store_theme(&self.storage_key, next);
        self.current = next;
        log::info!("theme changed to {next}");

        for observer in &mut self.observers {
            observer(next);
        }
        next
    }
}

impl fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeState")
            .field("storage_key", &self.storage_key)
            .field("current", &self.current)
            .field("observers", &self.observers.len())
            .finish()
    }
}
