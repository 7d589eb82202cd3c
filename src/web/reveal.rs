//! Reveal marked elements once they scroll into view.

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::RevealConfig;
use crate::error::Error;
use crate::web::elements;

/// Observe every element matching the reveal selector and add the visible
/// class the first time it intersects the viewport.
///
/// # Errors
///
/// Returns `Err` if the selector is invalid or the observer cannot be built.
pub fn install_scroll_reveal(document: &Document, config: &RevealConfig) -> Result<(), Error> {
    let targets = document.query_selector_all(&config.selector)?;
    if targets.length() == 0 {
        return Ok(());
    }

    let class = config.visible_class.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry = entry.unchecked_into::<IntersectionObserverEntry>();
                if !entry.is_intersecting() {
                    continue;
                }
                if let Err(err) = entry.target().class_list().add_1(&class) {
                    log::warn!("reveal class update failed: {err:?}");
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.threshold));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    let mut observed = 0_usize;
    for element in elements(&targets) {
        observer.observe(&element);
        observed += 1;
    }
    callback.forget();
    log::debug!("scroll reveal observing {observed} elements");
    Ok(())
}
