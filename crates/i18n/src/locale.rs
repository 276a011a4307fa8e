use serde::{Deserialize, Serialize};

/// Display language of a page.
///
/// The site publishes one static page per locale; the locale is derived from
/// the URL path at each entry point and never persisted.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Fr, Locale::En];

    pub fn tag(self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::En => "en",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "fr" | "fr-ca" | "fr-fr" => Some(Locale::Fr),
            "en" | "en-ca" | "en-us" | "en-gb" => Some(Locale::En),
            _ => None,
        }
    }

    /// Locale for a URL path: a `/en/` segment selects English, a `/fr/`
    /// segment French, anything else falls back to French (the site default).
    pub fn from_path(path: &str) -> Self {
        path.split('/')
            .filter(|seg| !seg.is_empty())
            .find_map(|seg| match seg {
                "en" => Some(Locale::En),
                "fr" => Some(Locale::Fr),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn other(self) -> Self {
        match self {
            Locale::Fr => Locale::En,
            Locale::En => Locale::Fr,
        }
    }
}
