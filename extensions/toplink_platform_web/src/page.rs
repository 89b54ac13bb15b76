//! Browser page access

use toplink_core::{ClassList, LinkSnapshot};
use toplink_platform::{Page, PlatformError, Result};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::{document, js_error, window};

/// The live document viewport
#[derive(Clone, Debug)]
pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    pub fn new() -> Result<Self> {
        let window = window()?;
        let document = document(&window)?;
        Ok(Self { window, document })
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }
}

impl Page for WebPage {
    fn scroll_offset(&self) -> f64 {
        if let Ok(offset) = self.window.scroll_y() {
            return offset;
        }
        // Quirks-mode pages report the offset on <body> instead.
        let root = self
            .document
            .document_element()
            .map_or(0, |element| element.scroll_top());
        let body = self.document.body().map_or(0, |body| body.scroll_top());
        f64::from(root.max(body))
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        // Instant, or a page-wide `scroll-behavior: smooth` eases every write.
        let options = ScrollToOptions::new();
        options.set_top(offset);
        options.set_behavior(ScrollBehavior::Instant);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn link(&self, id: &str) -> Option<LinkSnapshot> {
        let element = self.element(id)?;
        let classes = ClassList::parse(&element.class_name());

        let inline_display = element
            .dyn_ref::<HtmlElement>()
            .and_then(|html| html.style().get_property_value("display").ok())
            .filter(|display| !display.is_empty());

        Some(LinkSnapshot {
            classes,
            inline_display,
        })
    }

    fn update_link(&mut self, id: &str, next: &LinkSnapshot) -> Result<()> {
        let element = self.element(id).ok_or_else(|| PlatformError::ElementUpdate {
            id: id.to_string(),
            reason: "element not in document".to_string(),
        })?;

        let current = ClassList::parse(&element.class_name());
        let (added, removed) = current.diff(&next.classes);
        let class_list = element.class_list();

        for class in removed {
            class_list
                .remove_1(class)
                .map_err(|err| PlatformError::ElementUpdate {
                    id: id.to_string(),
                    reason: js_error(&err),
                })?;
        }
        for class in added {
            class_list
                .add_1(class)
                .map_err(|err| PlatformError::ElementUpdate {
                    id: id.to_string(),
                    reason: js_error(&err),
                })?;
        }
        Ok(())
    }
}
