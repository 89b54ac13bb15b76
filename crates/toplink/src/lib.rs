//! Toplink
//!
//! A "back to top" link for web pages. The link gets a `shown` class once the
//! page is scrolled, and clicking it eases the viewport back to the top, one
//! step per animation frame.
//!
//! In the browser the crate mounts itself on load (see the `wasm32` entry
//! points). Elsewhere, mount it on the headless host:
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use toplink::{mount, ScrollTopWidget};
//! use toplink_core::{ClassList, EventDispatcher, EventKind, EventTarget, LinkSnapshot};
//! use toplink_platform::{HeadlessFrames, HeadlessPage, Page};
//!
//! let page = HeadlessPage::new().with_element("top-link", LinkSnapshot::new(ClassList::new()));
//! let page = Rc::new(RefCell::new(page));
//! let events = EventDispatcher::new();
//! let frames = HeadlessFrames::new();
//!
//! mount(ScrollTopWidget::default(), page.clone(), &events, frames.clone()).unwrap();
//! events.emit(EventKind::Ready, EventTarget::Document);
//!
//! page.borrow_mut().user_scroll_to(300.0);
//! events.emit(EventKind::Click, EventTarget::element("top-link"));
//! frames.run_until_idle(200);
//! assert_eq!(page.borrow().scroll_offset(), 0.0);
//! ```

pub mod mount;
pub mod widget;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use mount::{mount, MountedWidget};
pub use widget::ScrollTopWidget;
