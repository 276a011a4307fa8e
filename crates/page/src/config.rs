use cart::CartConfig;
use map::MapConfig;
use mediakit::MediaKitConfig;
use order::OrderConfig;
use serde::{Deserialize, Serialize};
use ui::UiConfig;

/// Everything tunable on the site. Missing JSON fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub map: MapConfig,
    pub cart: CartConfig,
    pub ui: UiConfig,
    pub order: OrderConfig,
    pub media_kit: MediaKitConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "invalid site configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl SiteConfig {
    /// Parses a (possibly partial) override. Blank input yields the defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::SiteConfig;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = SiteConfig::from_json(
            r#"{"ui":{"max_toasts":5},"order":{"recipient":"sales@example.com"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.ui.max_toasts, 5);
        assert_eq!(cfg.ui.toast_ttl_ms, 3_000);
        assert_eq!(cfg.order.recipient, "sales@example.com");
        assert_eq!(cfg.order.reset_delay_ms, 1_000);
        assert_eq!(cfg.map, map::MapConfig::default());
        assert_eq!(cfg.cart.storage_key, "xtranumerik_cart");
    }

    #[test]
    fn blank_and_invalid_input() {
        assert_eq!(SiteConfig::from_json("  ").unwrap(), SiteConfig::default());
        assert!(SiteConfig::from_json("{\"ui\":").is_err());
        assert!(SiteConfig::from_json("{\"ui\":{\"max_toasts\":\"x\"}}").is_err());
    }
}
