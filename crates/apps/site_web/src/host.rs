use foundation::LocationId;
use foundation::time::Millis;
use gloo_timers::callback::Timeout;
use page::{Host, Slot};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

const ACTIVE_CLASS: &str = "active";
const SIDEBAR_ITEM_SELECTOR: &str = ".location-item";

/// [`Host`] over the live document.
pub struct BrowserHost {
    window: web_sys::Window,
    document: web_sys::Document,
    on_wake: fn(),
}

impl BrowserHost {
    /// `on_wake` runs when a scheduled wake fires.
    pub fn new(on_wake: fn()) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self {
            window,
            document,
            on_wake,
        })
    }

    pub fn window(&self) -> &web_sys::Window {
        &self.window
    }

    fn element(&self, slot: Slot) -> Option<web_sys::Element> {
        self.document.get_element_by_id(slot.dom_id())
    }
}

impl Host for BrowserHost {
    fn now(&self) -> Millis {
        Millis(js_sys::Date::now().max(0.0) as u64)
    }

    fn patch(&mut self, slot: Slot, html: &str) {
        if let Some(el) = self.element(slot) {
            el.set_inner_html(html);
        }
    }

    fn set_visible(&mut self, slot: Slot, visible: bool) {
        if let Some(el) = self
            .element(slot)
            .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
        {
            el.set_hidden(!visible);
        }
    }

    fn set_enabled(&mut self, slot: Slot, enabled: bool) {
        let Some(el) = self.element(slot) else {
            return;
        };
        let result = if enabled {
            el.remove_attribute("disabled")
        } else {
            el.set_attribute("disabled", "")
        };
        if let Err(err) = result {
            web_sys::console::error_1(&err);
        }
    }

    fn highlight_sidebar(&mut self, id: Option<LocationId>) {
        if let Ok(items) = self.document.query_selector_all(SIDEBAR_ITEM_SELECTOR) {
            for i in 0..items.length() {
                let Some(el) = items
                    .item(i)
                    .and_then(|n| n.dyn_into::<web_sys::Element>().ok())
                else {
                    continue;
                };
                if let Err(err) = el.class_list().remove_1(ACTIVE_CLASS) {
                    web_sys::console::error_1(&err);
                }
            }
        }
        let Some(id) = id else {
            return;
        };
        let Some(el) = self
            .document
            .get_element_by_id(&ui::templates::sidebar_element_id(id))
        else {
            return;
        };
        if let Err(err) = el.class_list().add_1(ACTIVE_CLASS) {
            web_sys::console::error_1(&err);
        }
        let opts = web_sys::ScrollIntoViewOptions::new();
        opts.set_behavior(web_sys::ScrollBehavior::Smooth);
        opts.set_block(web_sys::ScrollLogicalPosition::Nearest);
        el.scroll_into_view_with_scroll_into_view_options(&opts);
    }

    fn reset_form(&mut self, slot: Slot) {
        if let Some(form) = self
            .element(slot)
            .and_then(|e| e.dyn_into::<web_sys::HtmlFormElement>().ok())
        {
            form.reset();
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn navigate(&mut self, url: &str) {
        if let Err(err) = self.window.location().set_href(url) {
            web_sys::console::error_1(&err);
        }
    }

    fn schedule_wake(&mut self, delay_ms: u64) {
        let wake = self.on_wake;
        Timeout::new(delay_ms.min(u32::MAX as u64) as u32, move || wake()).forget();
    }
}
