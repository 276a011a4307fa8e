use foundation::LatLng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: f64,
}

/// Map page defaults. Every field can be overridden from the page's JSON
/// configuration; missing fields keep these values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Initial view and the target of "center map" (Quebec City region).
    pub default_view: MapView,
    pub tile_url: String,
    pub tile_attribution: String,
    pub max_zoom: u8,
    /// Fraction of the bounds span added on every side by "show all".
    pub fit_padding: f64,
    /// Minimum span (degrees) of fitted bounds, so a single location still
    /// yields a non-degenerate view.
    pub min_fit_span_deg: f64,
    /// Zoom used when focusing one location from the sidebar.
    pub focus_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_view: MapView {
                center: LatLng::new(46.8139, -71.2080),
                zoom: 11.0,
            },
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_attribution: "\u{a9} OpenStreetMap contributors".to_string(),
            max_zoom: 19,
            fit_padding: 0.1,
            min_fit_span_deg: 0.01,
            focus_zoom: 15.0,
        }
    }
}
