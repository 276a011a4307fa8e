use i18n::{Locale, strings};
use serde::{Deserialize, Serialize};

use crate::request::RenderRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaKitConfig {
    pub document_url: String,
    pub initial_scale: f64,
    pub min_scale: f64,
    pub scale_step: f64,
}

impl Default for MediaKitConfig {
    fn default() -> Self {
        Self {
            document_url: "/assets/documents/xtranumerik-media-kit.pdf".to_string(),
            initial_scale: 1.5,
            min_scale: 0.5,
            scale_step: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfError {
    Load(String),
    EmptyDocument,
}

impl std::fmt::Display for PdfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PdfError::Load(msg) => write!(f, "media kit failed to load: {msg}"),
            PdfError::EmptyDocument => write!(f, "media kit has no pages"),
        }
    }
}

impl std::error::Error for PdfError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfState {
    Idle,
    Loading,
    Ready,
    Rendering,
    /// Terminal; never retried.
    Error(PdfError),
}

/// Enablement and label of the pagination controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavControls {
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub page_label: String,
}

/// Paginated viewer of the media kit.
///
/// Rendering discipline: at most one render in flight and at most one
/// pending. A request made while busy overwrites the pending page; the
/// pending render starts only after the in-flight one completes.
#[derive(Debug)]
pub struct MediaKitViewer {
    config: MediaKitConfig,
    locale: Locale,
    state: PdfState,
    page_num: u32,
    page_count: u32,
    scale: f64,
    page_num_pending: Option<u32>,
}

impl MediaKitViewer {
    pub fn new(locale: Locale, config: MediaKitConfig) -> Self {
        let scale = config.initial_scale.max(config.min_scale);
        Self {
            config,
            locale,
            state: PdfState::Idle,
            page_num: 1,
            page_count: 0,
            scale,
            page_num_pending: None,
        }
    }

    pub fn state(&self) -> &PdfState {
        &self.state
    }

    pub fn page_num(&self) -> u32 {
        self.page_num
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn page_rendering(&self) -> bool {
        self.state == PdfState::Rendering
    }

    pub fn pending_page(&self) -> Option<u32> {
        self.page_num_pending
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, PdfState::Error(_))
    }

    /// `Idle -> Loading`. Returns the document URL to fetch, or `None` if a
    /// load already started.
    pub fn begin_load(&mut self) -> Option<&str> {
        if self.state != PdfState::Idle {
            return None;
        }
        self.state = PdfState::Loading;
        Some(&self.config.document_url)
    }

    /// Document parsed; renders page 1.
    pub fn on_loaded(&mut self, page_count: u32) -> Option<RenderRequest> {
        if self.state != PdfState::Loading {
            return None;
        }
        if page_count == 0 {
            self.on_load_failed(PdfError::EmptyDocument);
            return None;
        }
        self.page_count = page_count;
        self.page_num = 1;
        tracing::debug!(page_count, "media kit loaded");
        self.state = PdfState::Ready;
        self.start_render(1)
    }

    pub fn on_load_failed(&mut self, err: PdfError) {
        if self.is_failed() {
            return;
        }
        tracing::warn!(%err, "media kit unavailable");
        self.state = PdfState::Error(err);
        self.page_num_pending = None;
    }

    /// Requests page `n` (clamped to the document). Returns a render to start
    /// now, or `None` when busy (the page is remembered) or not loaded.
    pub fn queue_render_page(&mut self, n: u32) -> Option<RenderRequest> {
        match self.state {
            PdfState::Ready => self.start_render(self.clamp_page(n)),
            PdfState::Rendering => {
                self.page_num_pending = Some(self.clamp_page(n));
                None
            }
            _ => None,
        }
    }

    /// The in-flight render finished. Starts the pending page, if any.
    pub fn on_render_complete(&mut self) -> Option<RenderRequest> {
        if self.state != PdfState::Rendering {
            return None;
        }
        self.state = PdfState::Ready;
        let pending = self.page_num_pending.take()?;
        self.start_render(pending)
    }

    /// The in-flight render failed; the document stays usable.
    pub fn on_render_failed(&mut self, reason: &str) -> Option<RenderRequest> {
        tracing::warn!(reason, page = self.page_num, "media kit page render failed");
        self.on_render_complete()
    }

    pub fn prev_page(&mut self) -> Option<RenderRequest> {
        let target = self.requested_page();
        if target <= 1 {
            return None;
        }
        self.queue_render_page(target - 1)
    }

    pub fn next_page(&mut self) -> Option<RenderRequest> {
        let target = self.requested_page();
        if target >= self.page_count {
            return None;
        }
        self.queue_render_page(target + 1)
    }

    pub fn zoom_in(&mut self) -> Option<RenderRequest> {
        self.set_scale(self.scale + self.config.scale_step)
    }

    pub fn zoom_out(&mut self) -> Option<RenderRequest> {
        self.set_scale(self.scale - self.config.scale_step)
    }

    pub fn reset_zoom(&mut self) -> Option<RenderRequest> {
        self.set_scale(self.config.initial_scale)
    }

    pub fn controls(&self) -> NavControls {
        let s = strings(self.locale);
        let loaded = self.page_count > 0 && !self.is_failed();
        let page = self.requested_page();
        NavControls {
            prev_enabled: loaded && page > 1,
            next_enabled: loaded && page < self.page_count,
            page_label: if loaded {
                i18n::fill(
                    s.pdf_page_label,
                    &[
                        ("page", &page.to_string()),
                        ("count", &self.page_count.to_string()),
                    ],
                )
            } else {
                String::new()
            },
        }
    }

    /// Page the viewer is heading to: the pending page while busy.
    fn requested_page(&self) -> u32 {
        self.page_num_pending.unwrap_or(self.page_num)
    }

    fn set_scale(&mut self, scale: f64) -> Option<RenderRequest> {
        let clamped = scale.max(self.config.min_scale);
        if (clamped - self.scale).abs() < f64::EPSILON {
            return None;
        }
        self.scale = clamped;
        self.queue_render_page(self.requested_page())
    }

    fn clamp_page(&self, n: u32) -> u32 {
        n.clamp(1, self.page_count.max(1))
    }

    fn start_render(&mut self, page: u32) -> Option<RenderRequest> {
        self.page_num = page;
        self.state = PdfState::Rendering;
        Some(RenderRequest {
            page,
            scale: self.scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{MediaKitConfig, MediaKitViewer, PdfError, PdfState};
    use crate::request::RenderRequest;
    use i18n::Locale;

    fn loaded(pages: u32) -> MediaKitViewer {
        let mut v = MediaKitViewer::new(Locale::En, MediaKitConfig::default());
        assert!(v.begin_load().is_some());
        let first = v.on_loaded(pages).unwrap();
        assert_eq!(first.page, 1);
        assert!(v.on_render_complete().is_none());
        v
    }

    #[test]
    fn load_lifecycle() {
        let mut v = MediaKitViewer::new(Locale::En, MediaKitConfig::default());
        assert_eq!(v.state(), &PdfState::Idle);
        assert_eq!(
            v.begin_load(),
            Some("/assets/documents/xtranumerik-media-kit.pdf")
        );
        assert!(v.begin_load().is_none());
        assert_eq!(
            v.on_loaded(4),
            Some(RenderRequest {
                page: 1,
                scale: 1.5
            })
        );
        assert!(v.page_rendering());
        assert!(v.on_render_complete().is_none());
        assert_eq!(v.state(), &PdfState::Ready);
    }

    #[test]
    fn rapid_requests_while_busy_render_only_the_last() {
        let mut v = loaded(10);
        let first = v.queue_render_page(2).unwrap();
        assert_eq!(first.page, 2);

        for n in [3, 4, 5, 6, 7] {
            assert!(v.queue_render_page(n).is_none());
        }
        assert_eq!(v.pending_page(), Some(7));

        let next = v.on_render_complete().unwrap();
        assert_eq!(next.page, 7);
        assert!(v.on_render_complete().is_none());
        assert_eq!(v.page_num(), 7);
    }

    #[test]
    fn pages_are_clamped() {
        let mut v = loaded(3);
        assert_eq!(v.queue_render_page(9).unwrap().page, 3);
        v.on_render_complete();
        assert_eq!(v.queue_render_page(0).unwrap().page, 1);
    }

    #[test]
    fn navigation_disables_at_both_ends() {
        let mut v = loaded(2);
        let c = v.controls();
        assert!(!c.prev_enabled);
        assert!(c.next_enabled);
        assert_eq!(c.page_label, "Page 1 of 2");
        assert!(v.prev_page().is_none());

        assert_eq!(v.next_page().unwrap().page, 2);
        v.on_render_complete();
        let c = v.controls();
        assert!(c.prev_enabled);
        assert!(!c.next_enabled);
        assert!(v.next_page().is_none());
    }

    #[test]
    fn next_while_busy_advances_from_pending_page() {
        let mut v = loaded(5);
        v.next_page();
        assert!(v.next_page().is_none());
        assert!(v.next_page().is_none());
        assert_eq!(v.pending_page(), Some(4));
        assert_eq!(v.on_render_complete().unwrap().page, 4);
    }

    #[test]
    fn zoom_is_clamped_below() {
        let mut v = loaded(1);
        for _ in 0..10 {
            if v.zoom_out().is_some() {
                v.on_render_complete();
            }
        }
        assert_eq!(v.scale(), 0.5);
        assert!(v.zoom_out().is_none());
        let r = v.zoom_in().unwrap();
        assert_eq!(r.scale, 0.75);
        v.on_render_complete();
        assert_eq!(v.reset_zoom().unwrap().scale, 1.5);
    }

    #[test]
    fn load_failure_is_terminal() {
        let mut v = MediaKitViewer::new(Locale::Fr, MediaKitConfig::default());
        v.begin_load();
        v.on_load_failed(PdfError::Load("404".to_string()));
        assert!(v.is_failed());
        assert!(v.on_loaded(3).is_none());
        assert!(v.queue_render_page(1).is_none());
        assert!(v.begin_load().is_none());
        let c = v.controls();
        assert!(!c.prev_enabled && !c.next_enabled);
    }

    #[test]
    fn empty_document_is_a_load_failure() {
        let mut v = MediaKitViewer::new(Locale::En, MediaKitConfig::default());
        v.begin_load();
        assert!(v.on_loaded(0).is_none());
        assert_eq!(v.state(), &PdfState::Error(PdfError::EmptyDocument));
    }
}
