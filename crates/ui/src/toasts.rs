use foundation::time::Millis;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastKind {
    pub fn css_class(self) -> &'static str {
        match self {
            ToastKind::Success => "notification notification-success",
            ToastKind::Info => "notification notification-info",
            ToastKind::Warning => "notification notification-warning",
            ToastKind::Error => "notification notification-error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "fas fa-check-circle",
            ToastKind::Info => "fas fa-info-circle",
            ToastKind::Warning => "fas fa-exclamation-triangle",
            ToastKind::Error => "fas fa-times-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
    pub expires_at: Millis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Lifetime of a notification.
    pub toast_ttl_ms: u64,
    /// Visible notifications at once; the oldest is evicted beyond this.
    pub max_toasts: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_ttl_ms: 3_000,
            max_toasts: 3,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Shown(u64),
    /// An identical toast was still visible; its expiry was refreshed.
    Merged(u64),
}

impl PushOutcome {
    pub fn id(self) -> u64 {
        match self {
            PushOutcome::Shown(id) | PushOutcome::Merged(id) => id,
        }
    }
}

/// Visible notifications, oldest first.
///
/// Policy: at most `max_toasts` entries; a toast equal in kind and text to a
/// visible one refreshes that one instead of stacking.
#[derive(Debug, Default)]
pub struct ToastStack {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn push(
        &mut self,
        now: Millis,
        kind: ToastKind,
        text: impl Into<String>,
        config: &UiConfig,
    ) -> PushOutcome {
        let text = text.into();
        let expires_at = now.after(config.toast_ttl_ms);

        if let Some(pos) = self
            .toasts
            .iter()
            .position(|t| t.kind == kind && t.text == text)
        {
            // Move to the end so refresh order matches eviction order.
            let mut existing = self.toasts.remove(pos);
            existing.expires_at = expires_at;
            let id = existing.id;
            self.toasts.push(existing);
            return PushOutcome::Merged(id);
        }

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.toasts.push(Toast {
            id,
            kind,
            text,
            expires_at,
        });
        let cap = config.max_toasts.max(1);
        if self.toasts.len() > cap {
            let excess = self.toasts.len() - cap;
            self.toasts.drain(0..excess);
        }
        PushOutcome::Shown(id)
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Drops expired toasts; returns `true` if any were removed.
    pub fn expire(&mut self, now: Millis) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.expires_at > now);
        self.toasts.len() != before
    }
}
