use i18n::{Locale, Strings, strings};
use mediakit::{MediaKitConfig, MediaKitViewer, PdfError, RenderRequest};
use ui::{Action, templates};

use crate::host::{Host, Slot};

/// Controller of the media-kit page. Render requests are returned to the
/// caller, which draws them on the canvas and reports completion.
pub struct MediaKitPage<H: Host> {
    host: H,
    strings: &'static Strings,
    viewer: MediaKitViewer,
}

impl<H: Host> MediaKitPage<H> {
    pub fn new(host: H, locale: Locale, config: MediaKitConfig) -> Self {
        Self {
            host,
            strings: strings(locale),
            viewer: MediaKitViewer::new(locale, config),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn viewer(&self) -> &MediaKitViewer {
        &self.viewer
    }

    /// Document URL to fetch, once.
    pub fn begin_load(&mut self) -> Option<String> {
        let url = self.viewer.begin_load().map(str::to_string);
        let (prev, next) = templates::pdf_nav_buttons(self.strings);
        self.host.patch(Slot::PdfPrev, &prev.into_string());
        self.host.patch(Slot::PdfNext, &next.into_string());
        self.sync_controls();
        url
    }

    pub fn on_loaded(&mut self, page_count: u32) -> Option<RenderRequest> {
        let next = self.viewer.on_loaded(page_count);
        if self.viewer.is_failed() {
            self.show_error();
        } else {
            self.host.set_visible(Slot::PdfCanvas, true);
            self.host.set_visible(Slot::PdfError, false);
        }
        self.sync_controls();
        next
    }

    pub fn on_load_failed(&mut self, err: PdfError) {
        self.viewer.on_load_failed(err);
        self.show_error();
        self.sync_controls();
    }

    pub fn on_render_complete(&mut self) -> Option<RenderRequest> {
        let next = self.viewer.on_render_complete();
        self.sync_controls();
        next
    }

    pub fn on_render_failed(&mut self, reason: &str) -> Option<RenderRequest> {
        let next = self.viewer.on_render_failed(reason);
        self.sync_controls();
        next
    }

    /// Handles the viewer's buttons; other actions return `None` untouched.
    pub fn handle_action(&mut self, action: Action) -> Option<RenderRequest> {
        let next = match action {
            Action::PdfPrevious => self.viewer.prev_page(),
            Action::PdfNext => self.viewer.next_page(),
            Action::PdfZoomIn => self.viewer.zoom_in(),
            Action::PdfZoomOut => self.viewer.zoom_out(),
            Action::PdfZoomReset => self.viewer.reset_zoom(),
            _ => return None,
        };
        self.sync_controls();
        next
    }

    fn show_error(&mut self) {
        self.host.set_visible(Slot::PdfCanvas, false);
        self.host
            .patch(Slot::PdfError, &templates::pdf_error(self.strings).into_string());
        self.host.set_visible(Slot::PdfError, true);
    }

    fn sync_controls(&mut self) {
        let controls = self.viewer.controls();
        self.host.set_enabled(Slot::PdfPrev, controls.prev_enabled);
        self.host.set_enabled(Slot::PdfNext, controls.next_enabled);
        self.host.patch(
            Slot::PdfPageInfo,
            &templates::pdf_page_info(&controls.page_label).into_string(),
        );
    }
}
