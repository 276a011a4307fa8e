use console_error_panic_hook::set_once;
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use catalog::Catalog;
use foundation::LocationId;
use i18n::Locale;
use mediakit::{PdfError, RenderRequest};
use order::OrderForm;
use page::{MapPage, MediaKitPage, SiteConfig, Slot};
use ui::Action;

mod host;
mod leaflet;
mod pdf;
mod storage;

use host::BrowserHost;
use leaflet::{LeafletBackend, LeafletSurface};
use storage::SiteCartStorage;

type SiteMapPage = MapPage<BrowserHost, LeafletSurface, SiteCartStorage>;

#[derive(Default)]
struct SiteState {
    config: SiteConfig,
    map_page: Option<SiteMapPage>,
    media_kit: Option<MediaKitPage<BrowserHost>>,
    pdf_doc: Option<JsValue>,
}

thread_local! {
    static STATE: RefCell<SiteState> = RefCell::new(SiteState::default());
}

/// TLS access that yields a default during teardown instead of panicking.
fn with_state<F, R>(f: F) -> R
where
    F: FnOnce(&RefCell<SiteState>) -> R,
    R: Default,
{
    STATE.try_with(f).unwrap_or_default()
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

fn current_locale() -> Locale {
    Locale::from_path(&current_path())
}

fn log_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    install_listeners()
}

/// Overrides the defaults with a (partial) JSON configuration. Call before
/// the `init_*` functions.
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let config = SiteConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    with_state(|s| s.borrow_mut().config = config);
    Ok(())
}

/// Starts the map page. Returns `false` when the map itself could not be
/// created; the cart keeps working in that case.
#[wasm_bindgen]
pub fn init_map_page(container_id: &str) -> bool {
    let locale = current_locale();
    let catalog = match Catalog::for_locale(locale) {
        Ok(c) => c,
        Err(err) => {
            log_error(&format!("location dataset unavailable: {err}"));
            return false;
        }
    };
    let host = match BrowserHost::new(tick) {
        Ok(h) => h,
        Err(err) => {
            web_sys::console::error_1(&err);
            return false;
        }
    };
    let config = with_state(|s| s.borrow().config.clone());
    let mut backend = LeafletBackend::new(on_marker_click);
    let page = MapPage::init(
        host,
        catalog,
        SiteCartStorage::new(),
        config,
        &mut backend,
        container_id,
    );
    let ready = page.map().is_some();
    with_state(|s| s.borrow_mut().map_page = Some(page));
    web_sys::console::log_1(&JsValue::from_str(&format!(
        "map page ready (locale={}, map={ready})",
        locale.tag()
    )));
    ready
}

/// Starts the media-kit viewer and loads the document.
#[wasm_bindgen]
pub fn init_media_kit() -> bool {
    let host = match BrowserHost::new(tick) {
        Ok(h) => h,
        Err(err) => {
            web_sys::console::error_1(&err);
            return false;
        }
    };
    let config = with_state(|s| s.borrow().config.media_kit.clone());
    let mut page = MediaKitPage::new(host, current_locale(), config);
    let url = page.begin_load();
    with_state(|s| s.borrow_mut().media_kit = Some(page));
    let Some(url) = url else {
        return false;
    };

    spawn_local(async move {
        match pdf::load_document(&url).await {
            Ok((doc, count)) => {
                let next = with_state(|s| {
                    let mut s = s.borrow_mut();
                    s.pdf_doc = Some(doc);
                    s.media_kit.as_mut().and_then(|p| p.on_loaded(count))
                });
                if let Some(req) = next {
                    run_render(req);
                }
            }
            Err(reason) => {
                log_error(&format!("media kit failed to load: {reason}"));
                with_state(|s| {
                    if let Some(p) = s.borrow_mut().media_kit.as_mut() {
                        p.on_load_failed(PdfError::Load(reason));
                    }
                });
            }
        }
    });
    true
}

/// Runs due deferred work (toast expiry, post-order reset).
#[wasm_bindgen]
pub fn tick() {
    with_state(|s| {
        if let Some(p) = s.borrow_mut().map_page.as_mut() {
            p.tick();
        }
    });
}

#[wasm_bindgen]
pub fn resize() {
    with_state(|s| {
        if let Some(p) = s.borrow_mut().map_page.as_mut() {
            p.handle_resize();
        }
    });
}

/// Submits the order from a JSON object of the form fields. Returns the
/// `mailto:` URI that was opened, if any.
#[wasm_bindgen]
pub fn submit_order(form_json: &str) -> Result<Option<String>, JsValue> {
    let form: OrderForm =
        serde_json::from_str(form_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(submit(&form))
}

/// Same dispatch as the delegated click listener.
#[wasm_bindgen]
pub fn handle_action(name: &str, id: Option<String>) -> bool {
    match Action::parse(name, id.as_deref()) {
        Some(action) => {
            dispatch_action(action);
            true
        }
        None => false,
    }
}

/// Path of the current page in the other language, if it has one.
#[wasm_bindgen]
pub fn alternate_language_path() -> Option<String> {
    i18n::alternate_path(&current_path())
}

fn submit(form: &OrderForm) -> Option<String> {
    with_state(|s| {
        s.borrow_mut()
            .map_page
            .as_mut()
            .and_then(|p| p.submit_order(form))
    })
}

fn on_marker_click(id: u32) {
    with_state(|s| {
        if let Some(p) = s.borrow_mut().map_page.as_mut() {
            p.on_marker_click(LocationId(id));
        }
    });
}

fn dispatch_action(action: Action) {
    let handled = with_state(|s| {
        s.borrow_mut()
            .map_page
            .as_mut()
            .is_some_and(|p| p.handle_action(action))
    });
    if handled {
        return;
    }
    let next = with_state(|s| {
        s.borrow_mut()
            .media_kit
            .as_mut()
            .and_then(|p| p.handle_action(action))
    });
    if let Some(req) = next {
        run_render(req);
    }
}

/// Draws one page; when it finishes, draws the page queued meanwhile.
fn run_render(req: RenderRequest) {
    let Some(doc) = with_state(|s| s.borrow().pdf_doc.clone()) else {
        return;
    };
    spawn_local(async move {
        let result = pdf::render_page(&doc, req.page, req.scale, Slot::PdfCanvas.dom_id()).await;
        let next = with_state(|s| {
            let mut s = s.borrow_mut();
            let p = s.media_kit.as_mut()?;
            match &result {
                Ok(()) => p.on_render_complete(),
                Err(reason) => p.on_render_failed(reason),
            }
        });
        if let Some(next) = next {
            run_render(next);
        }
    });
}

fn install_listeners() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Capture phase: Leaflet stops click propagation inside popups.
    let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(|event: web_sys::Event| {
        let Some(target) = event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        else {
            return;
        };
        let Ok(Some(el)) = target.closest("[data-action]") else {
            return;
        };
        let name = el.get_attribute("data-action").unwrap_or_default();
        if let Some(action) = Action::parse(&name, el.get_attribute("data-id").as_deref()) {
            dispatch_action(action);
        }
    });
    document.add_event_listener_with_callback_and_bool(
        "click",
        on_click.as_ref().unchecked_ref(),
        true,
    )?;
    on_click.forget();

    let on_submit = Closure::<dyn FnMut(web_sys::Event)>::new(|event: web_sys::Event| {
        let Some(form) = event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlFormElement>().ok())
        else {
            return;
        };
        if form.id() != Slot::OrderForm.dom_id() {
            return;
        }
        event.prevent_default();
        match read_order_form(&form) {
            Ok(order) => {
                submit(&order);
            }
            Err(err) => web_sys::console::error_1(&err),
        }
    });
    document.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    let on_resize = Closure::<dyn FnMut()>::new(resize);
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    Ok(())
}

fn read_order_form(form: &web_sys::HtmlFormElement) -> Result<OrderForm, JsValue> {
    let data = web_sys::FormData::new_with_form(form)?;
    let field = |name: &str| data.get(name).as_string().unwrap_or_default();
    let message = field("message");
    Ok(OrderForm {
        company: field("company"),
        contact: field("contact"),
        email: field("email"),
        phone: field("phone"),
        duration: field("duration"),
        message: (!message.trim().is_empty()).then_some(message),
    })
}
