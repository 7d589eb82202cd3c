//! Site configuration.
//!
//! Pages may pass a JSON object to `start_with_config`; every field is
//! optional and falls back to the defaults in [`crate::consts`]. Unknown
//! fields are rejected so a typo in a page template fails loudly in the
//! console instead of silently using a default.
//!
//! ```json
//! { "theme": { "default_theme": "dark" }, "backdrop": { "particle_count": 40 } }
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BACKDROP_CANVAS_ID, HEADER_SCROLL_THRESHOLD, HEADER_SCROLLED_CLASS, HEADER_SELECTOR, MENU_CLOSE_DELAY_MS,
    NAV_LINK_SELECTOR, OFFCANVAS_ID, PARTICLE_COUNT, PARTICLE_COUNT_MAX, PARTICLE_MAX_RADIUS, PARTICLE_MAX_SPEED,
    REVEAL_SELECTOR, REVEAL_THRESHOLD, REVEAL_VISIBLE_CLASS, THEME_STORAGE_KEY, THEME_TOGGLE_SELECTOR,
};
use crate::error::Error;
use crate::particles::Palette;
use crate::theme::Theme;

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    pub theme: ThemeConfig,
    pub backdrop: BackdropConfig,
    pub nav: NavConfig,
    pub reveal: RevealConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
            theme: ThemeConfig::default(),
            backdrop: BackdropConfig::default(),
            nav: NavConfig::default(),
            reveal: RevealConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] for malformed JSON or unknown fields,
    /// [`Error::InvalidConfig`] when a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), Error> {
        self.log_level()?;
        if self.theme.storage_key.trim().is_empty() {
            return Err(invalid("theme.storage_key must not be empty"));
        }
        if self.backdrop.canvas_id.trim().is_empty() {
            return Err(invalid("backdrop.canvas_id must not be empty"));
        }
        if self.backdrop.particle_count > PARTICLE_COUNT_MAX {
            return Err(invalid(&format!(
                "backdrop.particle_count must be at most {PARTICLE_COUNT_MAX}"
            )));
        }
        if !self.backdrop.max_speed.is_finite() || self.backdrop.max_speed < 0.0 {
            return Err(invalid("backdrop.max_speed must be finite and non-negative"));
        }
        if !self.backdrop.max_radius.is_finite() || self.backdrop.max_radius <= 0.0 {
            return Err(invalid("backdrop.max_radius must be finite and positive"));
        }
        if !self.nav.scroll_threshold.is_finite() {
            return Err(invalid("nav.scroll_threshold must be finite"));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(invalid("reveal.threshold must be within [0, 1]"));
        }
        Ok(())
    }

    /// The configured log level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `log_level` is not a level name.
    pub fn log_level(&self) -> Result<log::Level, Error> {
        log::Level::from_str(self.log_level.trim())
            .map_err(|_| invalid(&format!("unknown log_level {:?}", self.log_level)))
    }
}

fn invalid(msg: &str) -> Error {
    Error::InvalidConfig(msg.to_owned())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub default_theme: Theme,
    /// CSS selector matching every toggle control.
    pub toggle_selector: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: THEME_STORAGE_KEY.to_owned(),
            default_theme: Theme::Light,
            toggle_selector: THEME_TOGGLE_SELECTOR.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackdropConfig {
    pub canvas_id: String,
    pub particle_count: usize,
    pub max_speed: f64,
    pub max_radius: f64,
    pub light_palette: Palette,
    pub dark_palette: Palette,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            canvas_id: BACKDROP_CANVAS_ID.to_owned(),
            particle_count: PARTICLE_COUNT,
            max_speed: PARTICLE_MAX_SPEED,
            max_radius: PARTICLE_MAX_RADIUS,
            light_palette: Palette::LIGHT,
            dark_palette: Palette::DARK,
        }
    }
}

impl BackdropConfig {
    #[must_use]
    pub fn palette(&self, theme: Theme) -> &Palette {
        match theme {
            Theme::Light => &self.light_palette,
            Theme::Dark => &self.dark_palette,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    pub header_selector: String,
    pub scrolled_class: String,
    pub scroll_threshold: f64,
    pub offcanvas_id: String,
    pub link_selector: String,
    pub close_delay_ms: u32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            header_selector: HEADER_SELECTOR.to_owned(),
            scrolled_class: HEADER_SCROLLED_CLASS.to_owned(),
            scroll_threshold: HEADER_SCROLL_THRESHOLD,
            offcanvas_id: OFFCANVAS_ID.to_owned(),
            link_selector: NAV_LINK_SELECTOR.to_owned(),
            close_delay_ms: MENU_CLOSE_DELAY_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    pub selector: String,
    pub visible_class: String,
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: REVEAL_SELECTOR.to_owned(),
            visible_class: REVEAL_VISIBLE_CLASS.to_owned(),
            threshold: REVEAL_THRESHOLD,
        }
    }
}
