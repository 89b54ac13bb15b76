//! DOM event subscription

use toplink_core::{Event, EventHandler, EventKind, EventTarget};
use toplink_platform::{EventSource, PlatformError, Result};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Window};

use crate::{document, js_error, window};

/// Subscribes handlers with `addEventListener`
///
/// Listeners stay attached for the life of the page.
#[derive(Clone, Debug)]
pub struct WebEvents {
    window: Window,
    document: Document,
}

impl WebEvents {
    pub fn new() -> Result<Self> {
        let window = window()?;
        let document = document(&window)?;
        Ok(Self { window, document })
    }

    fn dom_target(&self, target: &EventTarget) -> Result<web_sys::EventTarget> {
        match target {
            EventTarget::Window => Ok(self.window.clone().into()),
            EventTarget::Document => Ok(self.document.clone().into()),
            EventTarget::Element(id) => self
                .document
                .get_element_by_id(id)
                .map(Into::into)
                .ok_or_else(|| PlatformError::Listener {
                    event: "any",
                    target: target.to_string(),
                    reason: "element not in document".to_string(),
                }),
        }
    }
}

impl EventSource for WebEvents {
    fn subscribe(&self, target: EventTarget, kind: EventKind, handler: EventHandler) -> Result<()> {
        if kind == EventKind::Ready && self.document.ready_state() != "loading" {
            // DOMContentLoaded already fired; it will not fire again.
            handler(&mut Event::new(kind, target));
            return Ok(());
        }

        let dom_target = self.dom_target(&target)?;
        let label = target.to_string();
        let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |dom_event: web_sys::Event| {
            let mut event = Event::new(kind, target.clone()).with_timestamp(dom_event.time_stamp());
            handler(&mut event);
            if event.default_prevented {
                dom_event.prevent_default();
            }
            if event.propagation_stopped {
                dom_event.stop_propagation();
            }
        });

        dom_target
            .add_event_listener_with_callback(kind.dom_name(), listener.as_ref().unchecked_ref())
            .map_err(|err| PlatformError::Listener {
                event: kind.dom_name(),
                target: label.clone(),
                reason: js_error(&err),
            })?;
        listener.forget();

        tracing::trace!(event = kind.dom_name(), target = %label, "listener attached");
        Ok(())
    }
}
