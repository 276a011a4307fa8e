use crate::locale::Locale;

/// Pages that exist in both languages under different slugs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SlugPair {
    pub fr: &'static str,
    pub en: &'static str,
}

impl SlugPair {
    pub fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Fr => self.fr,
            Locale::En => self.en,
        }
    }
}

pub const MAP_PAGE: SlugPair = SlugPair {
    fr: "carte-publicitaire",
    en: "advertising-map",
};

pub const MEDIA_KIT_PAGE: SlugPair = SlugPair {
    fr: "trousse-media",
    en: "media-kit",
};

pub const SLUGS: &[SlugPair] = &[MAP_PAGE, MEDIA_KIT_PAGE];

/// Path of the same page in the other locale, e.g.
/// `/fr/carte-publicitaire.html` -> `/en/advertising-map.html`.
///
/// Returns `None` when the path carries no locale segment.
pub fn alternate_path(path: &str) -> Option<String> {
    let mut segments: Vec<&str> = path.split('/').collect();
    let locale_idx = segments.iter().position(|s| *s == "fr" || *s == "en")?;
    let from = Locale::from_path(segments[locale_idx]);
    let to = from.other();
    segments[locale_idx] = to.tag();

    let mut out: Vec<String> = Vec::with_capacity(segments.len());
    for seg in segments {
        let (stem, ext) = match seg.rsplit_once('.') {
            Some((stem, ext)) => (stem, Some(ext)),
            None => (seg, None),
        };
        let mapped = SLUGS
            .iter()
            .find(|pair| pair.get(from) == stem)
            .map(|pair| pair.get(to))
            .unwrap_or(stem);
        out.push(match ext {
            Some(ext) => format!("{mapped}.{ext}"),
            None => mapped.to_string(),
        });
    }
    Some(out.join("/"))
}
