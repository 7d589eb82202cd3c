//! Canvas 2D drawing surface.
//!
//! This is the only place that touches [`web_sys::CanvasRenderingContext2d`].

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::animator::Surface;
use crate::error::Error;
use crate::particles::{Bounds, Rgba};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up `<canvas id=...>` and acquire its 2D context.
    ///
    /// Returns `Ok(None)` when the page has no such canvas (the background is
    /// optional per page).
    ///
    /// # Errors
    ///
    /// [`Error::ContextUnavailable`] if the canvas exists but has no 2D context.
    pub fn find(document: &Document, id: &str) -> Result<Option<Self>, Error> {
        let Some(element) = document.get_element_by_id(id) else {
            return Ok(None);
        };
        let Ok(canvas) = element.dyn_into::<HtmlCanvasElement>() else {
            log::warn!("#{id} is not a canvas element");
            return Ok(None);
        };
        let unavailable = || Error::ContextUnavailable { id: id.to_owned() };
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(unavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| unavailable())?;
        Ok(Some(Self { canvas, ctx }))
    }

    /// Resize the backing store to the window's inner size.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the window dimensions cannot be read.
    pub fn fit_to_viewport(&self, window: &Window) -> Result<Bounds, Error> {
        let width = css_pixels(&window.inner_width()?);
        let height = css_pixels(&window.inner_height()?);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        Ok(Bounds::new(f64::from(width), f64::from(height)))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn css_pixels(value: &JsValue) -> u32 {
    match value.as_f64() {
        Some(px) if px.is_finite() && px > 0.0 => px.min(f64::from(u32::MAX)) as u32,
        _ => 0,
    }
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    fn clear(&mut self, bounds: Bounds) -> Result<(), JsValue> {
        self.ctx.clear_rect(0.0, 0.0, bounds.width, bounds.height);
        Ok(())
    }

    fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Rgba) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.begin_path();
        self.ctx.arc(x, y, radius, 0.0, TAU)?;
        self.ctx.fill();
        Ok(())
    }
}
