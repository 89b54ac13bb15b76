//! Toplink Platform Abstraction
//!
//! The capabilities a host must provide for the scroll-to-top widget:
//!
//! - [`Page`]: read and write the viewport offset and the link's presentation
//! - [`EventSource`]: subscribe handlers to page events
//! - [`FrameScheduler`]: run a callback before the next repaint
//!
//! Browser hosts live in platform extensions. [`headless`] is an in-memory
//! host for tests and simulations.

pub mod error;
pub mod headless;

pub use error::{PlatformError, Result};
pub use headless::{HeadlessFrames, HeadlessPage};

use toplink_core::{EventDispatcher, EventHandler, EventKind, EventTarget, LinkSnapshot, ViewState};

/// Live page state the widget reads and writes
pub trait Page {
    /// Vertical viewport offset in pixels
    fn scroll_offset(&self) -> f64;

    /// Scroll the viewport; hosts may clamp or round
    fn set_scroll_offset(&mut self, offset: f64);

    /// Presentation of element `id`, `None` if it is not in the document
    fn link(&self, id: &str) -> Option<LinkSnapshot>;

    /// Write `next` to element `id`, touching only what differs
    fn update_link(&mut self, id: &str, next: &LinkSnapshot) -> Result<()>;

    /// Offset and link presentation in one snapshot
    fn view_state(&self, id: &str) -> ViewState {
        ViewState::new(self.scroll_offset(), self.link(id))
    }
}

/// Event subscription capability
pub trait EventSource {
    fn subscribe(&self, target: EventTarget, kind: EventKind, handler: EventHandler) -> Result<()>;
}

impl EventSource for EventDispatcher {
    fn subscribe(&self, target: EventTarget, kind: EventKind, handler: EventHandler) -> Result<()> {
        self.register_handler(target, kind, handler);
        Ok(())
    }
}

/// Frame callback, receives the frame timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// One-shot "before next repaint" scheduling
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<()>;
}
