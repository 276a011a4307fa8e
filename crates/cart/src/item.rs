use catalog::Location;
use foundation::LocationId;
use serde::{Deserialize, Serialize};

/// Snapshot of a location taken when it was added to the cart.
///
/// This is a copy, not a reference: editing the dataset afterwards does not
/// change items already in a cart (or in a persisted cart).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: LocationId,
    pub name: String,
    pub visitors: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps_url: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl From<&Location> for CartItem {
    fn from(loc: &Location) -> Self {
        CartItem {
            id: loc.id,
            name: loc.name.clone(),
            visitors: loc.visitors.clone(),
            image_url: loc.image_url.clone(),
            google_maps_url: loc.google_maps_url.clone(),
            description: loc.description.clone(),
        }
    }
}
