use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

// PDF.js exposes itself as `pdfjsLib` when loaded from its CDN build.
#[wasm_bindgen(inline_js = "
export function site_pdf_available() {
    return typeof pdfjsLib !== 'undefined';
}

export function site_pdf_load(url) {
    return pdfjsLib.getDocument(url).promise;
}

export function site_pdf_page_count(doc) {
    return doc.numPages;
}

export function site_pdf_render(doc, pageNum, scale, canvasId) {
    return doc.getPage(pageNum).then((page) => {
        const canvas = document.getElementById(canvasId);
        if (!canvas) {
            throw new Error('missing canvas #' + canvasId);
        }
        const viewport = page.getViewport({ scale: scale });
        canvas.height = viewport.height;
        canvas.width = viewport.width;
        return page.render({ canvasContext: canvas.getContext('2d'), viewport: viewport }).promise;
    });
}
")]
extern "C" {
    fn site_pdf_available() -> bool;

    #[wasm_bindgen(catch)]
    fn site_pdf_load(url: &str) -> Result<js_sys::Promise, JsValue>;

    fn site_pdf_page_count(doc: &JsValue) -> u32;

    #[wasm_bindgen(catch)]
    fn site_pdf_render(
        doc: &JsValue,
        page_num: u32,
        scale: f64,
        canvas_id: &str,
    ) -> Result<js_sys::Promise, JsValue>;
}

/// Fetches and parses the document; returns it with its page count.
pub async fn load_document(url: &str) -> Result<(JsValue, u32), String> {
    if !site_pdf_available() {
        return Err("PDF.js is not loaded".to_string());
    }
    let promise = site_pdf_load(url).map_err(|e| format!("{:?}", e))?;
    let doc = JsFuture::from(promise)
        .await
        .map_err(|e| format!("{:?}", e))?;
    let count = site_pdf_page_count(&doc);
    Ok((doc, count))
}

pub async fn render_page(
    doc: &JsValue,
    page: u32,
    scale: f64,
    canvas_id: &str,
) -> Result<(), String> {
    let promise = site_pdf_render(doc, page, scale, canvas_id).map_err(|e| format!("{:?}", e))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| format!("{:?}", e))?;
    Ok(())
}
