use foundation::{LatLng, LocationId};
use serde::{Deserialize, Serialize};

/// A venue hosting a digital display, sellable as advertising inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: LocationId,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    /// Free-text traffic descriptor, displayed verbatim.
    pub visitors: String,
    pub description: String,
    pub facing_to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Location {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}
