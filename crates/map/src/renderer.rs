use catalog::Catalog;
use foundation::{LatLng, LatLngBounds, LocationId};
use i18n::{Locale, Strings, strings};
use ui::templates;

use crate::config::{MapConfig, MapView};
use crate::selection::Selection;
use crate::surface::{MapBackend, MapInitError, MapSurface};

/// Markers, popups and the selected location of one map.
#[derive(Debug)]
pub struct MapRenderer<S: MapSurface> {
    surface: S,
    strings: &'static Strings,
    config: MapConfig,
    markers: Vec<(LocationId, LatLng)>,
    selection: Selection,
}

/// Creates the map in `container_id` and places one marker per location.
///
/// Never fails upward: when the container or the map library is missing, an
/// inline error is written where possible and `None` is returned.
pub fn initialize_map<B: MapBackend>(
    backend: &mut B,
    container_id: &str,
    locale: Locale,
    catalog: &Catalog,
    in_cart: &dyn Fn(LocationId) -> bool,
    config: &MapConfig,
) -> Option<MapRenderer<B::Surface>> {
    let strings = strings(locale);
    let error_html = templates::map_error(strings).into_string();

    let result = if !backend.container_exists(container_id) {
        Err(MapInitError::ContainerMissing(container_id.to_string()))
    } else if !backend.library_loaded() {
        Err(MapInitError::LibraryMissing)
    } else {
        backend.create(container_id, config)
    };

    match result {
        Ok(surface) => {
            let mut renderer = MapRenderer::new(surface, strings, config.clone());
            renderer.populate(catalog, in_cart);
            Some(renderer)
        }
        Err(err) => {
            tracing::warn!(%err, container_id, "map initialization failed");
            if !matches!(err, MapInitError::ContainerMissing(_)) {
                backend.show_error(container_id, &error_html);
            }
            None
        }
    }
}

impl<S: MapSurface> MapRenderer<S> {
    pub fn new(surface: S, strings: &'static Strings, config: MapConfig) -> Self {
        Self {
            surface,
            strings,
            config,
            markers: Vec::new(),
            selection: Selection::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn has_marker(&self, id: LocationId) -> bool {
        self.markers.iter().any(|(mid, _)| *mid == id)
    }

    pub fn selected(&self) -> Option<LocationId> {
        self.selection.get()
    }

    /// Adds a marker for every location not already on the map.
    pub fn populate(&mut self, catalog: &Catalog, in_cart: &dyn Fn(LocationId) -> bool) {
        for loc in catalog.iter() {
            if self.has_marker(loc.id) {
                continue;
            }
            let html = templates::popup(self.strings, loc, in_cart(loc.id)).into_string();
            self.surface.add_marker(loc.id, loc.position(), &html);
            self.markers.push((loc.id, loc.position()));
        }
        tracing::debug!(markers = self.markers.len(), "markers placed");
    }

    /// Rebuilds the popup of one marker from current cart membership.
    pub fn refresh_marker(&mut self, catalog: &Catalog, id: LocationId, in_cart: bool) {
        if !self.has_marker(id) {
            return;
        }
        let Some(loc) = catalog.get(id) else {
            return;
        };
        let html = templates::popup(self.strings, loc, in_cart).into_string();
        self.surface.set_popup_content(id, &html);
    }

    pub fn refresh_all(&mut self, catalog: &Catalog, in_cart: &dyn Fn(LocationId) -> bool) {
        let ids: Vec<LocationId> = self.markers.iter().map(|(id, _)| *id).collect();
        for id in ids {
            self.refresh_marker(catalog, id, in_cart(id));
        }
    }

    /// Marker click. Returns `false` for ids without a marker.
    pub fn select(&mut self, id: LocationId) -> bool {
        if !self.has_marker(id) {
            return false;
        }
        self.selection.set(id);
        true
    }

    /// Selects `id`, pans to it and opens its popup (sidebar click).
    pub fn focus(&mut self, id: LocationId) -> bool {
        let Some(at) = self
            .markers
            .iter()
            .find(|(mid, _)| *mid == id)
            .map(|(_, at)| *at)
        else {
            return false;
        };
        self.selection.set(id);
        self.surface.set_view(MapView {
            center: at,
            zoom: self.config.focus_zoom.min(self.config.max_zoom as f64),
        });
        self.surface.open_popup(id);
        true
    }

    /// Bounds used by [`Self::show_all_locations`], `None` without markers.
    pub fn fit_bounds_for_all(&self) -> Option<LatLngBounds> {
        let tight = LatLngBounds::from_points(self.markers.iter().map(|(_, at)| *at))?;
        Some(
            tight
                .with_min_span(self.config.min_fit_span_deg)
                .pad(self.config.fit_padding),
        )
    }

    pub fn show_all_locations(&mut self) -> Option<LatLngBounds> {
        let bounds = self.fit_bounds_for_all()?;
        self.surface.fit_bounds(bounds);
        Some(bounds)
    }

    /// Back to the default view; clears the selection.
    pub fn center_map(&mut self) {
        self.surface.set_view(self.config.default_view);
        self.selection.clear();
    }

    pub fn handle_resize(&mut self) {
        self.surface.invalidate_size();
    }
}

#[cfg(test)]
mod tests {
    use super::{MapRenderer, initialize_map};
    use crate::config::MapConfig;
    use crate::surface::{RecordingBackend, RecordingSurface, SurfaceCall};
    use catalog::{Catalog, Location};
    use foundation::{LatLng, LocationId};
    use i18n::Locale;

    fn loc(id: u32, lat: f64, lng: f64) -> Location {
        Location {
            id: LocationId(id),
            lat,
            lng,
            name: format!("L{id}"),
            visitors: "1,000/month".to_string(),
            description: String::new(),
            facing_to: String::new(),
            google_maps_url: None,
            image_url: None,
        }
    }

    fn catalog(locs: Vec<Location>) -> Catalog {
        Catalog::new(Locale::En, locs).unwrap()
    }

    fn init(backend: &mut RecordingBackend, c: &Catalog) -> MapRenderer<RecordingSurface> {
        initialize_map(backend, "map", Locale::En, c, &|_| false, &MapConfig::default())
            .expect("map")
    }

    #[test]
    fn initialize_places_one_marker_per_location() {
        let c = catalog(vec![loc(1, 46.8, -71.2), loc(3, 46.9, -71.3)]);
        let mut backend = RecordingBackend::with_container("map");
        let in_cart = |id: LocationId| id == LocationId(3);
        let config = MapConfig::default();
        let r = initialize_map(&mut backend, "map", Locale::En, &c, &in_cart, &config)
            .expect("map");
        assert_eq!(r.marker_count(), 2);
        assert!(r.surface().popup(LocationId(1)).unwrap().contains("Add to cart"));
        assert!(r.surface().popup(LocationId(3)).unwrap().contains("Remove from cart"));
        assert_eq!(r.surface().view, Some(MapConfig::default().default_view));
    }

    #[test]
    fn initialize_without_library_writes_inline_error() {
        let c = catalog(vec![loc(1, 46.8, -71.2)]);
        let mut backend = RecordingBackend::with_container("map");
        backend.library_loaded = false;
        let config = MapConfig::default();
        let r = initialize_map(&mut backend, "map", Locale::Fr, &c, &|_| false, &config);
        assert!(r.is_none());
        assert_eq!(backend.errors.len(), 1);
        assert!(backend.errors[0].1.contains("Impossible de charger la carte"));
    }

    #[test]
    fn initialize_without_container_returns_none() {
        let c = catalog(vec![loc(1, 46.8, -71.2)]);
        let mut backend = RecordingBackend::with_container("other");
        let config = MapConfig::default();
        let r = initialize_map(&mut backend, "map", Locale::En, &c, &|_| false, &config);
        assert!(r.is_none());
        assert!(backend.errors.is_empty());
    }

    #[test]
    fn show_all_on_single_location_is_not_degenerate() {
        let c = catalog(vec![loc(9, 46.81, -71.21)]);
        let mut backend = RecordingBackend::with_container("map");
        let mut r = init(&mut backend, &c);
        let b = r.show_all_locations().unwrap();
        assert!(!b.is_degenerate());
        assert!(b.contains(LatLng::new(46.81, -71.21)));
        // min span 0.01 padded by 10% on each side.
        assert!((b.lat_span() - 0.012).abs() < 1e-9);
        assert_eq!(r.surface().fitted, Some(b));
    }

    #[test]
    fn show_all_pads_bounds_of_every_marker() {
        let c = catalog(vec![loc(1, 46.0, -72.0), loc(2, 47.0, -71.0)]);
        let mut backend = RecordingBackend::with_container("map");
        let mut r = init(&mut backend, &c);
        let b = r.show_all_locations().unwrap();
        assert!((b.south_west.lat - 45.9).abs() < 1e-9);
        assert!((b.north_east.lng - -70.9).abs() < 1e-9);
    }

    #[test]
    fn show_all_without_markers_leaves_view() {
        let c = catalog(Vec::new());
        let mut backend = RecordingBackend::with_container("map");
        let mut r = init(&mut backend, &c);
        assert_eq!(r.show_all_locations(), None);
        assert_eq!(r.surface().count(|c| matches!(c, SurfaceCall::FitBounds(_))), 0);
    }

    #[test]
    fn select_center_and_resize() {
        let c = catalog(vec![loc(1, 46.8, -71.2)]);
        let mut backend = RecordingBackend::with_container("map");
        let mut r = init(&mut backend, &c);
        assert!(!r.select(LocationId(42)));
        assert!(r.select(LocationId(1)));
        assert_eq!(r.selected(), Some(LocationId(1)));
        r.center_map();
        assert_eq!(r.selected(), None);
        r.handle_resize();
        assert_eq!(r.surface().count(|c| *c == SurfaceCall::InvalidateSize), 1);
    }

    #[test]
    fn refresh_marker_rebuilds_one_popup() {
        let c = catalog(vec![loc(1, 46.8, -71.2), loc(2, 46.7, -71.1)]);
        let mut backend = RecordingBackend::with_container("map");
        let mut r = init(&mut backend, &c);
        r.refresh_marker(&c, LocationId(2), true);
        assert!(r.surface().popup(LocationId(2)).unwrap().contains("Remove from cart"));
        assert!(r.surface().popup(LocationId(1)).unwrap().contains("Add to cart"));
        assert_eq!(r.surface().count(|c| matches!(c, SurfaceCall::SetPopup(_))), 1);
    }

    #[test]
    fn focus_pans_and_opens_popup() {
        let c = catalog(vec![loc(4, 46.8, -71.2)]);
        let mut backend = RecordingBackend::with_container("map");
        let mut r = init(&mut backend, &c);
        assert!(r.focus(LocationId(4)));
        assert_eq!(r.selected(), Some(LocationId(4)));
        assert_eq!(r.surface().view.unwrap().center, LatLng::new(46.8, -71.2));
        assert_eq!(r.surface().count(|c| *c == SurfaceCall::OpenPopup(LocationId(4))), 1);
    }
}
