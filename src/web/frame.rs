//! `requestAnimationFrame` as a future.

use js_sys::Promise;
use wasm_bindgen_futures::JsFuture;
use web_sys::Window;

use crate::error::Error;

/// Resolve just before the next repaint with the frame timestamp (ms).
///
/// # Errors
///
/// Returns `Err` if the frame could not be scheduled.
pub async fn next_frame(window: &Window) -> Result<f64, Error> {
    let mut scheduled = Ok(0);
    let promise = Promise::new(&mut |resolve, _reject| {
        scheduled = window.request_animation_frame(&resolve);
    });
    scheduled?;
    let stamp = JsFuture::from(promise).await?;
    Ok(stamp.as_f64().unwrap_or_default())
}
