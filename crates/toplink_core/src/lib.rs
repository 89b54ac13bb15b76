//! Toplink Core
//!
//! Host-agnostic building blocks for the scroll-to-top widget:
//!
//! - **Events**: event kinds, targets, and an in-memory dispatcher
//! - **View State**: snapshots of scroll offset and link presentation, with
//!   pure transitions between them
//! - **Configuration**: element names and animation tuning, loadable from TOML
//!
//! # Example
//!
//! ```rust
//! use toplink_core::{ClassList, LinkSnapshot, ViewState, Visibility, WidgetConfig};
//!
//! let config = WidgetConfig::default();
//! let state = ViewState::new(120.0, Some(LinkSnapshot::new(ClassList::new())));
//!
//! let next = state.after_scroll(&config);
//! assert_eq!(next.visibility(&config), Some(Visibility::Shown));
//! ```

pub mod config;
pub mod events;
pub mod view;

pub use config::{ConfigError, WidgetConfig};
pub use events::{Event, EventDispatcher, EventHandler, EventKind, EventTarget};
pub use view::{ClassList, LinkSnapshot, ViewState, Visibility};
