//! Toplink Web Platform
//!
//! Browser implementation of the [`toplink_platform`] traits on top of
//! `web-sys`:
//!
//! - [`WebPage`]: `window.scrollY` / `scrollTo` and the link's `classList`
//! - [`WebEvents`]: `addEventListener`, with ready delivered immediately when
//!   the document has already loaded
//! - [`WebFrames`]: `requestAnimationFrame`
//! - [`logging`]: a `tracing` subscriber that writes to the browser console
//!
//! Only compiled for `wasm32`.

#![cfg(target_arch = "wasm32")]

pub mod events;
pub mod frames;
pub mod logging;
pub mod page;

pub use events::WebEvents;
pub use frames::WebFrames;
pub use page::WebPage;

use toplink_platform::{PlatformError, Result};
use wasm_bindgen::JsValue;

pub(crate) fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or(PlatformError::NoWindow)
}

pub(crate) fn document(window: &web_sys::Window) -> Result<web_sys::Document> {
    window.document().ok_or(PlatformError::NoDocument)
}

/// Readable text for a thrown JS value
pub(crate) fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}
