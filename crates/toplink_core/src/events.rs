//! Event dispatch system
//!
//! The handful of page events the widget reacts to, and an in-memory
//! dispatcher that hosts (and tests) can drive directly.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Kind of page event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Viewport scrolled
    Scroll,
    /// Document finished parsing (`DOMContentLoaded`)
    Ready,
    /// Element activated
    Click,
    /// CSS transition finished on an element
    TransitionEnd,
}

impl EventKind {
    /// DOM event name used by browser hosts
    pub const fn dom_name(self) -> &'static str {
        match self {
            EventKind::Scroll => "scroll",
            EventKind::Ready => "DOMContentLoaded",
            EventKind::Click => "click",
            EventKind::TransitionEnd => "transitionend",
        }
    }
}

/// Where an event is delivered
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Window,
    Document,
    /// Element looked up by its `id` attribute
    Element(String),
}

impl EventTarget {
    pub fn element(id: impl Into<String>) -> Self {
        EventTarget::Element(id.into())
    }
}

impl fmt::Display for EventTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTarget::Window => f.write_str("window"),
            EventTarget::Document => f.write_str("document"),
            EventTarget::Element(id) => write!(f, "#{id}"),
        }
    }
}

/// A page event with its dispatch flags
#[derive(Clone, Debug)]
pub struct Event {
    pub kind: EventKind,
    pub target: EventTarget,
    /// Host timestamp in milliseconds
    pub timestamp: f64,
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl Event {
    pub fn new(kind: EventKind, target: EventTarget) -> Self {
        Self {
            kind,
            target,
            timestamp: 0.0,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Ask the host to skip its default action (e.g. following a link)
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Event handler function type
///
/// Handlers are reference counted so a dispatch can run them while other
/// handlers are being registered.
pub type EventHandler = Rc<dyn Fn(&mut Event)>;

type HandlerTable = FxHashMap<(EventTarget, EventKind), SmallVec<[EventHandler; 2]>>;

/// Dispatches events to registered handlers
///
/// Cloning yields another handle to the same handler table.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Rc<RefCell<HandlerTable>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler for a target and event kind
    pub fn register<F>(&self, target: EventTarget, kind: EventKind, handler: F)
    where
        F: Fn(&mut Event) + 'static,
    {
        self.register_handler(target, kind, Rc::new(handler));
    }

    pub fn register_handler(&self, target: EventTarget, kind: EventKind, handler: EventHandler) {
        self.handlers
            .borrow_mut()
            .entry((target, kind))
            .or_default()
            .push(handler);
    }

    /// Dispatch an event to all registered handlers, returning how many ran
    pub fn dispatch(&self, event: &mut Event) -> usize {
        // Snapshot the handlers so they may register more while running.
        let handlers: SmallVec<[EventHandler; 2]> = match self
            .handlers
            .borrow()
            .get(&(event.target.clone(), event.kind))
        {
            Some(handlers) => handlers.clone(),
            None => {
                tracing::trace!(kind = ?event.kind, target = %event.target, "no handlers for event");
                return 0;
            }
        };

        let mut ran = 0;
        for handler in handlers {
            if event.propagation_stopped {
                tracing::trace!(kind = ?event.kind, target = %event.target, ran, "propagation stopped");
                break;
            }
            handler(event);
            ran += 1;
        }
        ran
    }

    /// Build and dispatch an event, returning it with its final flags
    pub fn emit(&self, kind: EventKind, target: EventTarget) -> Event {
        let mut event = Event::new(kind, target);
        self.dispatch(&mut event);
        event
    }

    /// Number of handlers registered for a target and kind
    pub fn handler_count(&self, target: &EventTarget, kind: EventKind) -> usize {
        self.handlers
            .borrow()
            .get(&(target.clone(), kind))
            .map_or(0, |handlers| handlers.len())
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("subscriptions", &self.handlers.borrow().len())
            .finish()
    }
}
