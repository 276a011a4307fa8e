use cart::CartItem;
use i18n::{Locale, fill, strings};
use serde::{Deserialize, Serialize};

use crate::form::OrderForm;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Fixed recipient of every inquiry.
    pub recipient: String,
    /// Delay between launching the mail client and resetting the cart.
    pub reset_delay_ms: u64,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            recipient: "info@xtranumerik.ca".to_string(),
            reset_delay_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEmail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl OrderEmail {
    /// `mailto:` URI with percent-encoded subject and body.
    pub fn mailto_url(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body)
        )
    }
}

pub fn build_order_email(
    locale: Locale,
    form: &OrderForm,
    items: &[CartItem],
    config: &OrderConfig,
) -> OrderEmail {
    let s = strings(locale);
    let form = form.normalized();
    let count = items.len().to_string();

    let mut lines: Vec<String> = Vec::new();
    lines.push(s.order_greeting.to_string());
    lines.push(String::new());
    lines.push(s.order_contact_heading.to_string());
    lines.push(format!("{}: {}", s.field_company, form.company));
    lines.push(format!("{}: {}", s.field_contact, form.contact));
    lines.push(format!("{}: {}", s.field_email, form.email));
    lines.push(format!("{}: {}", s.field_phone, form.phone));
    lines.push(format!("{}: {}", s.field_duration, form.duration));
    if let Some(message) = &form.message {
        lines.push(format!("{}: {}", s.field_message, message));
    }
    lines.push(String::new());
    lines.push(fill(s.order_locations_heading, &[("count", &count)]));
    for (n, item) in items.iter().enumerate() {
        lines.push(format!("{}. {} ({})", n + 1, item.name, item.visitors));
    }
    lines.push(String::new());
    lines.push(s.order_closing.to_string());

    OrderEmail {
        recipient: config.recipient.clone(),
        subject: fill(s.order_subject, &[("count", &count)]),
        body: lines.join("\n"),
    }
}
