//! Navigation helpers: header scroll state and in-page link targets.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

/// Whether the header should carry its scrolled style.
#[must_use]
pub fn header_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Where a menu link should take the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavTarget {
    /// `#`: scroll to the top of the page.
    Top,
    /// `#id`: scroll to the element with that id.
    Section(String),
    /// Anything else: let the browser navigate.
    Passthrough,
}

impl NavTarget {
    #[must_use]
    pub fn from_href(href: Option<&str>) -> Self {
        match href.map(str::trim).and_then(|h| h.strip_prefix('#')) {
            Some("") => Self::Top,
            Some(id) => Self::Section(id.to_owned()),
            None => Self::Passthrough,
        }
    }

    /// In-page targets suppress the default jump and scroll smoothly.
    #[must_use]
    pub fn is_in_page(&self) -> bool {
        !matches!(self, Self::Passthrough)
    }
}
