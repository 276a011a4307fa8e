use std::collections::BTreeSet;

use foundation::{LatLngBounds, LocationId};
use i18n::Locale;

use crate::location::Location;

const LOCATIONS_FR: &str = include_str!("../assets/locations.fr.json");
const LOCATIONS_EN: &str = include_str!("../assets/locations.en.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Parse(String),
    InvalidId { index: usize },
    DuplicateId(LocationId),
    InvalidPosition(LocationId),
    EmptyName(LocationId),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Parse(msg) => write!(f, "location dataset is not valid JSON: {msg}"),
            CatalogError::InvalidId { index } => {
                write!(f, "location at index {index} has a non-positive id")
            }
            CatalogError::DuplicateId(id) => write!(f, "duplicate location id {id}"),
            CatalogError::InvalidPosition(id) => {
                write!(f, "location {id} has coordinates outside WGS84 range")
            }
            CatalogError::EmptyName(id) => write!(f, "location {id} has an empty name"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Validated, read-only list of locations for one locale.
///
/// Ordering contract: iteration yields locations in dataset order, which is
/// the order markers and sidebar entries are created in.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    locale: Locale,
    locations: Vec<Location>,
}

impl Catalog {
    /// The dataset shipped with the site for `locale`.
    pub fn for_locale(locale: Locale) -> Result<Self, CatalogError> {
        let raw = match locale {
            Locale::Fr => LOCATIONS_FR,
            Locale::En => LOCATIONS_EN,
        };
        Self::from_json_str(locale, raw)
    }

    pub fn from_json_str(locale: Locale, raw: &str) -> Result<Self, CatalogError> {
        let locations = serde_json::from_str::<Vec<Location>>(raw)
            .map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(locale, locations)
    }

    pub fn new(locale: Locale, locations: Vec<Location>) -> Result<Self, CatalogError> {
        let mut seen: BTreeSet<LocationId> = BTreeSet::new();
        for (index, loc) in locations.iter().enumerate() {
            if !loc.id.is_valid() {
                return Err(CatalogError::InvalidId { index });
            }
            if !seen.insert(loc.id) {
                return Err(CatalogError::DuplicateId(loc.id));
            }
            if !loc.position().is_valid() {
                return Err(CatalogError::InvalidPosition(loc.id));
            }
            if loc.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(loc.id));
            }
        }
        tracing::debug!(
            locale = locale.tag(),
            count = locations.len(),
            "location catalog loaded"
        );
        Ok(Self { locale, locations })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn get(&self, id: LocationId) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> + '_ {
        self.locations.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = LocationId> + '_ {
        self.locations.iter().map(|l| l.id)
    }

    /// Tight bounds around every location, `None` when the catalog is empty.
    pub fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(self.locations.iter().map(Location::position))
    }
}
