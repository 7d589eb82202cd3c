//! Browser shell around the platform-free core.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module is the only place that touches `web_sys`. It supplies the
//! browser implementations of the core traits ([`host::BrowserHost`] for
//! theme storage, [`canvas::CanvasSurface`] for drawing), drives the frame
//! loop, and wires DOM events. Missing optional elements are skipped;
//! failing browser calls are logged and never panic.

pub mod app;
pub mod backdrop;
pub mod canvas;
pub mod frame;
pub mod host;
pub mod nav;
pub mod reveal;

use wasm_bindgen::JsCast;
use web_sys::{Element, NodeList};

/// The `Element`s of a `NodeList`, skipping non-element nodes.
pub(crate) fn elements(list: &NodeList) -> impl Iterator<Item = Element> + '_ {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| match node.dyn_into::<Element>() {
            Ok(element) => Some(element),
            Err(_) => None,
        })
}
