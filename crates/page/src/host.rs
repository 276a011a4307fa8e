use std::collections::BTreeMap;

use foundation::LocationId;
use foundation::time::Millis;

/// Named regions of the page the controllers write to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    CartCount,
    CartItems,
    CartEmpty,
    OrderButton,
    FloatingCartButton,
    Notifications,
    OrderModal,
    OrderSummary,
    OrderForm,
    LocationsList,
    PdfCanvas,
    PdfError,
    PdfPrev,
    PdfNext,
    PdfPageInfo,
}

impl Slot {
    pub const ALL: [Slot; 15] = [
        Slot::CartCount,
        Slot::CartItems,
        Slot::CartEmpty,
        Slot::OrderButton,
        Slot::FloatingCartButton,
        Slot::Notifications,
        Slot::OrderModal,
        Slot::OrderSummary,
        Slot::OrderForm,
        Slot::LocationsList,
        Slot::PdfCanvas,
        Slot::PdfError,
        Slot::PdfPrev,
        Slot::PdfNext,
        Slot::PdfPageInfo,
    ];

    pub fn dom_id(self) -> &'static str {
        match self {
            Slot::CartCount => "cart-count",
            Slot::CartItems => "cart-items",
            Slot::CartEmpty => "cart-empty",
            Slot::OrderButton => "order-button",
            Slot::FloatingCartButton => "floating-cart-button",
            Slot::Notifications => "notifications",
            Slot::OrderModal => "order-modal",
            Slot::OrderSummary => "order-summary",
            Slot::OrderForm => "order-form",
            Slot::LocationsList => "locations-list",
            Slot::PdfCanvas => "pdf-canvas",
            Slot::PdfError => "pdf-error",
            Slot::PdfPrev => "pdf-prev",
            Slot::PdfNext => "pdf-next",
            Slot::PdfPageInfo => "pdf-page-info",
        }
    }
}

/// The environment a page controller drives.
///
/// Every call is fire-and-forget except [`Host::confirm`], which blocks until
/// the visitor answers.
pub trait Host {
    fn now(&self) -> Millis;
    /// Replaces the inner HTML of a slot. `html` is already escaped.
    fn patch(&mut self, slot: Slot, html: &str);
    fn set_visible(&mut self, slot: Slot, visible: bool);
    fn set_enabled(&mut self, slot: Slot, enabled: bool);
    /// Marks one sidebar entry active (exclusive) and scrolls it into view.
    fn highlight_sidebar(&mut self, id: Option<LocationId>);
    /// Clears the inputs of a form slot.
    fn reset_form(&mut self, slot: Slot);
    fn confirm(&mut self, message: &str) -> bool;
    fn navigate(&mut self, url: &str);
    /// Asks to be woken (through `tick`) after `delay_ms`.
    fn schedule_wake(&mut self, delay_ms: u64);
}

/// Host double that records every call. The clock only moves when told.
#[derive(Debug)]
pub struct RecordingHost {
    pub now: Millis,
    pub slots: BTreeMap<Slot, String>,
    pub visible: BTreeMap<Slot, bool>,
    pub enabled: BTreeMap<Slot, bool>,
    pub highlighted: Option<LocationId>,
    pub forms_reset: Vec<Slot>,
    pub confirm_answer: bool,
    pub confirms: Vec<String>,
    pub navigations: Vec<String>,
    pub wakes: Vec<u64>,
    pub patches: usize,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            now: Millis(0),
            slots: BTreeMap::new(),
            visible: BTreeMap::new(),
            enabled: BTreeMap::new(),
            highlighted: None,
            forms_reset: Vec::new(),
            confirm_answer: true,
            confirms: Vec::new(),
            navigations: Vec::new(),
            wakes: Vec::new(),
            patches: 0,
        }
    }
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, slot: Slot) -> &str {
        self.slots.get(&slot).map(String::as_str).unwrap_or("")
    }

    pub fn is_visible(&self, slot: Slot) -> Option<bool> {
        self.visible.get(&slot).copied()
    }

    pub fn is_enabled(&self, slot: Slot) -> Option<bool> {
        self.enabled.get(&slot).copied()
    }

    pub fn advance(&mut self, ms: u64) {
        self.now = self.now.after(ms);
    }
}

impl Host for RecordingHost {
    fn now(&self) -> Millis {
        self.now
    }

    fn patch(&mut self, slot: Slot, html: &str) {
        self.patches += 1;
        self.slots.insert(slot, html.to_string());
    }

    fn set_visible(&mut self, slot: Slot, visible: bool) {
        self.visible.insert(slot, visible);
    }

    fn set_enabled(&mut self, slot: Slot, enabled: bool) {
        self.enabled.insert(slot, enabled);
    }

    fn highlight_sidebar(&mut self, id: Option<LocationId>) {
        self.highlighted = id;
    }

    fn reset_form(&mut self, slot: Slot) {
        self.forms_reset.push(slot);
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.confirm_answer
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_string());
    }

    fn schedule_wake(&mut self, delay_ms: u64) {
        self.wakes.push(delay_ms);
    }
}
