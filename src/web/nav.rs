//! Header scroll class and the mobile off-canvas menu.
//!
//! The mobile menu scrolls to the tapped section first and closes after a
//! short delay so the movement is visible behind the closing panel.

use gloo_timers::callback::Timeout;
use js_sys::{Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions, Window};

use crate::config::NavConfig;
use crate::error::Error;
use crate::nav::{NavTarget, header_scrolled};
use crate::web::elements;

/// Toggle the scrolled class on the header as the page scrolls.
///
/// # Errors
///
/// Returns `Err` if the selector is invalid or the listener cannot be added.
pub fn install_header_scroll(window: &Window, document: &Document, config: &NavConfig) -> Result<(), Error> {
    let Some(header) = document.query_selector(&config.header_selector)? else {
        return Ok(());
    };
    let win = window.clone();
    let class = config.scrolled_class.clone();
    let threshold = config.scroll_threshold;

    let listener = Closure::<dyn FnMut()>::new(move || {
        let scroll_y = match win.scroll_y() {
            Ok(y) => y,
            Err(err) => {
                log::warn!("scrollY unavailable: {err:?}");
                return;
            }
        };
        let classes = header.class_list();
        let result = if header_scrolled(scroll_y, threshold) {
            classes.add_1(&class)
        } else {
            classes.remove_1(&class)
        };
        if let Err(err) = result {
            log::warn!("header class update failed: {err:?}");
        }
    });
    window.add_event_listener_with_callback("scroll", listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

/// Wire every in-page link of the off-canvas menu.
///
/// # Errors
///
/// Returns `Err` if the selector is invalid or a listener cannot be added.
pub fn install_mobile_menu(window: &Window, document: &Document, config: &NavConfig) -> Result<(), Error> {
    let Some(offcanvas) = document.get_element_by_id(&config.offcanvas_id) else {
        return Ok(());
    };
    let links = offcanvas.query_selector_all(&config.link_selector)?;

    for link in elements(&links) {
        let win = window.clone();
        let doc = document.clone();
        let menu = offcanvas.clone();
        let anchor = link.clone();
        let delay_ms = config.close_delay_ms;

        let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let target = NavTarget::from_href(anchor.get_attribute("href").as_deref());
            if !target.is_in_page() {
                return;
            }
            event.prevent_default();
            if scroll_to(&win, &doc, &target) {
                close_later(menu.clone(), delay_ms);
            }
        });
        link.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
        listener.forget();
    }
    Ok(())
}

/// Smooth-scroll to `target`. `false` when the section does not exist.
fn scroll_to(window: &Window, document: &Document, target: &NavTarget) -> bool {
    match target {
        NavTarget::Top => {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
            true
        }
        NavTarget::Section(id) => {
            let Some(section) = document.get_element_by_id(id) else {
                log::debug!("menu link points at missing #{id}");
                return false;
            };
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            section.scroll_into_view_with_scroll_into_view_options(&options);
            true
        }
        NavTarget::Passthrough => false,
    }
}

fn close_later(menu: Element, delay_ms: u32) {
    Timeout::new(delay_ms, move || {
        if let Err(err) = hide_offcanvas(&menu) {
            log::warn!("closing the mobile menu failed: {err:?}");
        }
    })
    .forget();
}

/// `bootstrap.Offcanvas.getInstance(menu)?.hide()`, skipped when Bootstrap
/// is not loaded or the menu was never opened.
fn hide_offcanvas(menu: &Element) -> Result<(), JsValue> {
    let bootstrap = Reflect::get(&js_sys::global(), &JsValue::from_str("bootstrap"))?;
    if bootstrap.is_undefined() {
        return Ok(());
    }
    let offcanvas = Reflect::get(&bootstrap, &JsValue::from_str("Offcanvas"))?;
    let get_instance = Reflect::get(&offcanvas, &JsValue::from_str("getInstance"))?.dyn_into::<Function>()?;
    let instance = get_instance.call1(&offcanvas, menu)?;
    if instance.is_null() || instance.is_undefined() {
        return Ok(());
    }
    let hide = Reflect::get(&instance, &JsValue::from_str("hide"))?.dyn_into::<Function>()?;
    hide.call0(&instance)?;
    Ok(())
}
