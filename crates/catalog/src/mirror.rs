use std::collections::BTreeMap;

use foundation::LocationId;

use crate::dataset::Catalog;
use crate::location::Location;

/// A divergence between two locale mirrors of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum MirrorIssue {
    MissingIn { id: LocationId, locale: &'static str },
    PositionMismatch { id: LocationId },
    MapsLinkMismatch { id: LocationId },
    ImageMismatch { id: LocationId },
}

impl std::fmt::Display for MirrorIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MirrorIssue::MissingIn { id, locale } => {
                write!(f, "location {id} is missing from the {locale} dataset")
            }
            MirrorIssue::PositionMismatch { id } => {
                write!(f, "location {id} has different coordinates between locales")
            }
            MirrorIssue::MapsLinkMismatch { id } => {
                write!(f, "location {id} has a Google Maps link in only one locale")
            }
            MirrorIssue::ImageMismatch { id } => {
                write!(f, "location {id} has a different image between locales")
            }
        }
    }
}

/// Compares two mirrors keyed by id. An empty result means the datasets
/// describe the same venues; only localized text may differ.
pub fn compare_mirrors(a: &Catalog, b: &Catalog) -> Vec<MirrorIssue> {
    let by_id = |c: &Catalog| -> BTreeMap<LocationId, Location> {
        c.iter().map(|l| (l.id, l.clone())).collect()
    };
    let left = by_id(a);
    let right = by_id(b);
    let mut issues = Vec::new();

    for (id, la) in &left {
        let Some(lb) = right.get(id) else {
            issues.push(MirrorIssue::MissingIn {
                id: *id,
                locale: b.locale().tag(),
            });
            continue;
        };
        if la.lat != lb.lat || la.lng != lb.lng {
            issues.push(MirrorIssue::PositionMismatch { id: *id });
        }
        if la.google_maps_url.is_some() != lb.google_maps_url.is_some() {
            issues.push(MirrorIssue::MapsLinkMismatch { id: *id });
        }
        if la.image_url != lb.image_url {
            issues.push(MirrorIssue::ImageMismatch { id: *id });
        }
    }
    for id in right.keys() {
        if !left.contains_key(id) {
            issues.push(MirrorIssue::MissingIn {
                id: *id,
                locale: a.locale().tag(),
            });
        }
    }
    issues
}
