//! Animation frames via `requestAnimationFrame`

use toplink_platform::{FrameCallback, FrameScheduler, PlatformError, Result};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::{js_error, window};

#[derive(Clone, Debug)]
pub struct WebFrames {
    window: Window,
}

impl WebFrames {
    pub fn new() -> Result<Self> {
        Ok(Self { window: window()? })
    }
}

impl FrameScheduler for WebFrames {
    fn request_frame(&self, callback: FrameCallback) -> Result<()> {
        // The JS function frees itself after its single invocation.
        let function = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        self.window
            .request_animation_frame(function.unchecked_ref())
            .map(|_handle| ())
            .map_err(|err| PlatformError::FrameRequest(js_error(&err)))
    }
}
