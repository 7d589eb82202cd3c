//! `localStorage` + `matchMedia` + `<html data-theme>` as a [`ThemeHost`].
//!
//! Storage can be disabled (private browsing, sandboxed iframes); every
//! failure degrades to "nothing stored" and is logged.

use web_sys::{Element, Storage, Window};

use crate::consts::{PREFERS_DARK_QUERY, THEME_ATTRIBUTE};
use crate::theme::{Theme, ThemeHost};

pub struct BrowserHost {
    window: Window,
}

impl BrowserHost {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn storage(&self) -> Option<Storage> {
        match self.window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::warn!("localStorage unavailable: {err:?}");
                None
            }
        }
    }

    fn root(&self) -> Option<Element> {
        self.window.document()?.document_element()
    }
}

impl ThemeHost for BrowserHost {
    fn stored_theme(&self, key: &str) -> Option<String> {
        match self.storage()?.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("localStorage read of {key} failed: {err:?}");
                None
            }
        }
    }

    fn store_theme(&mut self, key: &str, theme: Theme) {
        let Some(storage) = self.storage() else {
            return;
        };
        if let Err(err) = storage.set_item(key, theme.as_str()) {
            log::warn!("localStorage write of {key} failed: {err:?}");
        }
    }

    fn prefers_dark(&self) -> Option<bool> {
        match self.window.match_media(PREFERS_DARK_QUERY) {
            Ok(query) => query.map(|mq| mq.matches()),
            Err(err) => {
                log::warn!("matchMedia failed: {err:?}");
                None
            }
        }
    }

    fn root_theme(&self) -> Option<String> {
        self.root()?.get_attribute(THEME_ATTRIBUTE)
    }

    fn apply_root_theme(&mut self, theme: Theme) {
        let Some(root) = self.root() else {
            return;
        };
        if let Err(err) = root.set_attribute(THEME_ATTRIBUTE, theme.as_str()) {
            log::warn!("setting {THEME_ATTRIBUTE} failed: {err:?}");
        }
    }
}
