//! Browser entry points

use std::cell::RefCell;
use std::rc::Rc;

use toplink_core::WidgetConfig;
use toplink_platform_web::{logging, WebEvents, WebFrames, WebPage};
use wasm_bindgen::prelude::*;

use crate::mount::mount_once;
use crate::{mount, ScrollTopWidget};

fn mount_in_browser(config: WidgetConfig) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init(&config.log_filter);

    mount_once(|| {
        let page = WebPage::new()?;
        let events = WebEvents::new()?;
        let frames = WebFrames::new()?;
        mount(
            ScrollTopWidget::new(config),
            Rc::new(RefCell::new(page)),
            &events,
            frames,
        )
    })
    .map_err(|err| JsValue::from_str(&err.to_string()))?;
    Ok(())
}

/// Mounts with default settings when the module loads
///
/// Pages that call [`mount_with_config`] instead should load the module
/// with `data-toplink-manual` on the `<html>` element.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let manual = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
        .is_some_and(|root| root.has_attribute("data-toplink-manual"));
    if manual {
        return Ok(());
    }
    mount_in_browser(WidgetConfig::default())
}

/// Mount with a TOML configuration
///
/// Throws on invalid configuration, or when a widget is already mounted.
#[wasm_bindgen(js_name = mountWithConfig)]
pub fn mount_with_config(toml: &str) -> Result<(), JsValue> {
    let config = WidgetConfig::from_toml_str(toml).map_err(|err| JsValue::from_str(&err.to_string()))?;
    mount_in_browser(config)
}
