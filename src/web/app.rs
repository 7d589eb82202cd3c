//! JavaScript entry points and page wiring.
//!
//! Pages load the module and call `start()` (or `startWithConfig(json)`)
//! once the DOM is ready. The theme is applied before anything else is
//! wired so the first paint already uses the right palette.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::config::{SiteConfig, ThemeConfig};
use crate::error::Error;
use crate::theme::ThemeState;
use crate::web::backdrop::Backdrop;
use crate::web::host::BrowserHost;
use crate::web::{elements, nav, reveal};

/// Mount every behavior with the default configuration.
///
/// # Errors
///
/// Returns the error message if the page cannot be wired.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    mount(SiteConfig::default())?;
    Ok(())
}

/// Mount every behavior with a JSON [`SiteConfig`].
///
/// # Errors
///
/// Returns the error message for malformed config or a page that cannot be
/// wired.
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(config: &str) -> Result<(), JsValue> {
    let config = SiteConfig::from_json(config)?;
    mount(config)?;
    Ok(())
}

fn mount(config: SiteConfig) -> Result<(), Error> {
    console_error_panic_hook::set_once();
    init_logging(&config)?;

    let window = web_sys::window().ok_or_else(|| Error::Js("no global window".to_owned()))?;
    let document = window
        .document()
        .ok_or_else(|| Error::Js("window has no document".to_owned()))?;

    let mut host = BrowserHost::new(window.clone());
    let theme = Rc::new(RefCell::new(ThemeState::resolve_initial(&mut host, &config.theme)));

    let backdrop = Backdrop::new(window.clone(), &config.backdrop);
    if let Err(err) = backdrop.restart(theme.borrow().current()) {
        log::warn!("backdrop disabled: {err}");
    }
    theme.borrow_mut().subscribe(move |next| {
        if let Err(err) = backdrop.restart(next) {
            log::warn!("backdrop restart failed: {err}");
        }
    });

    install_theme_toggles(&window, &document, &theme, &config.theme)?;
    nav::install_header_scroll(&window, &document, &config.nav)?;
    reveal::install_scroll_reveal(&document, &config.reveal)?;
    nav::install_mobile_menu(&window, &document, &config.nav)?;

    log::info!("site scripts mounted (theme={})", theme.borrow().current());
    Ok(())
}

fn init_logging(config: &SiteConfig) -> Result<(), Error> {
    let level = config.log_level()?;
    if let Err(err) = console_log::init_with_level(level) {
        // start() called twice: the first logger stays.
        log::debug!("console logger already installed: {err}");
    }
    Ok(())
}

/// Every matching control toggles the same shared theme.
fn install_theme_toggles(
    window: &Window,
    document: &Document,
    theme: &Rc<RefCell<ThemeState>>,
    config: &ThemeConfig,
) -> Result<(), Error> {
    let controls = document.query_selector_all(&config.toggle_selector)?;
    for control in elements(&controls) {
        let win = window.clone();
        let state = Rc::clone(theme);
        let listener = Closure::<dyn FnMut()>::new(move || {
            let mut host = BrowserHost::new(win.clone());
            state.borrow_mut().toggle(&mut host);
        });
        control.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
        listener.forget();
    }
    Ok(())
}
