use std::collections::BTreeMap;

use foundation::{LatLng, LatLngBounds, LocationId};
use map::{MapBackend, MapConfig, MapInitError, MapSurface, MapView};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

// Thin shims over the global `L` loaded by the page.
#[wasm_bindgen(inline_js = "
export function site_leaflet_available() {
    return typeof L !== 'undefined' && typeof L.map === 'function';
}

export function site_leaflet_create(containerId, lat, lng, zoom, tileUrl, attribution, maxZoom) {
    const map = L.map(containerId).setView([lat, lng], zoom);
    L.tileLayer(tileUrl, { attribution: attribution, maxZoom: maxZoom }).addTo(map);
    return map;
}

export function site_leaflet_set_view(map, lat, lng, zoom) {
    map.setView([lat, lng], zoom);
}

export function site_leaflet_fit_bounds(map, south, west, north, east) {
    map.fitBounds([[south, west], [north, east]]);
}

export function site_leaflet_add_marker(map, id, lat, lng, html, onClick) {
    const marker = L.marker([lat, lng]).addTo(map);
    marker.bindPopup(html);
    marker.on('click', () => onClick(id));
    return marker;
}

export function site_leaflet_set_popup(marker, html) {
    marker.setPopupContent(html);
}

export function site_leaflet_open_popup(marker) {
    marker.openPopup();
}

export function site_leaflet_invalidate_size(map) {
    map.invalidateSize();
}
")]
extern "C" {
    fn site_leaflet_available() -> bool;

    #[wasm_bindgen(catch)]
    fn site_leaflet_create(
        container_id: &str,
        lat: f64,
        lng: f64,
        zoom: f64,
        tile_url: &str,
        attribution: &str,
        max_zoom: u8,
    ) -> Result<JsValue, JsValue>;

    fn site_leaflet_set_view(map: &JsValue, lat: f64, lng: f64, zoom: f64);

    fn site_leaflet_fit_bounds(map: &JsValue, south: f64, west: f64, north: f64, east: f64);

    #[wasm_bindgen(catch)]
    fn site_leaflet_add_marker(
        map: &JsValue,
        id: u32,
        lat: f64,
        lng: f64,
        html: &str,
        on_click: &js_sys::Function,
    ) -> Result<JsValue, JsValue>;

    fn site_leaflet_set_popup(marker: &JsValue, html: &str);

    fn site_leaflet_open_popup(marker: &JsValue);

    fn site_leaflet_invalidate_size(map: &JsValue);
}

#[derive(Debug)]
pub struct LeafletSurface {
    map: JsValue,
    markers: BTreeMap<LocationId, JsValue>,
    on_marker_click: js_sys::Function,
}

impl MapSurface for LeafletSurface {
    fn set_view(&mut self, view: MapView) {
        site_leaflet_set_view(&self.map, view.center.lat, view.center.lng, view.zoom);
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds) {
        site_leaflet_fit_bounds(
            &self.map,
            bounds.south_west.lat,
            bounds.south_west.lng,
            bounds.north_east.lat,
            bounds.north_east.lng,
        );
    }

    fn add_marker(&mut self, id: LocationId, at: LatLng, popup_html: &str) {
        match site_leaflet_add_marker(
            &self.map,
            id.get(),
            at.lat,
            at.lng,
            popup_html,
            &self.on_marker_click,
        ) {
            Ok(marker) => {
                self.markers.insert(id, marker);
            }
            Err(err) => web_sys::console::error_1(&err),
        }
    }

    fn set_popup_content(&mut self, id: LocationId, popup_html: &str) {
        if let Some(marker) = self.markers.get(&id) {
            site_leaflet_set_popup(marker, popup_html);
        }
    }

    fn open_popup(&mut self, id: LocationId) {
        if let Some(marker) = self.markers.get(&id) {
            site_leaflet_open_popup(marker);
        }
    }

    fn invalidate_size(&mut self) {
        site_leaflet_invalidate_size(&self.map);
    }
}

/// Creates Leaflet maps in the current document. Marker clicks are routed to
/// `on_marker_click` with the location id.
pub struct LeafletBackend {
    document: Option<web_sys::Document>,
    on_marker_click: js_sys::Function,
}

impl LeafletBackend {
    pub fn new(on_marker_click: impl FnMut(u32) + 'static) -> Self {
        let closure = Closure::<dyn FnMut(u32)>::new(on_marker_click);
        Self {
            document: web_sys::window().and_then(|w| w.document()),
            on_marker_click: closure.into_js_value().unchecked_into(),
        }
    }
}

impl MapBackend for LeafletBackend {
    type Surface = LeafletSurface;

    fn container_exists(&self, container_id: &str) -> bool {
        self.document
            .as_ref()
            .and_then(|d| d.get_element_by_id(container_id))
            .is_some()
    }

    fn library_loaded(&self) -> bool {
        site_leaflet_available()
    }

    fn create(
        &mut self,
        container_id: &str,
        config: &MapConfig,
    ) -> Result<Self::Surface, MapInitError> {
        let view = config.default_view;
        let map = site_leaflet_create(
            container_id,
            view.center.lat,
            view.center.lng,
            view.zoom,
            &config.tile_url,
            &config.tile_attribution,
            config.max_zoom,
        )
        .map_err(|e| MapInitError::Backend(format!("{:?}", e)))?;
        Ok(LeafletSurface {
            map,
            markers: BTreeMap::new(),
            on_marker_click: self.on_marker_click.clone(),
        })
    }

    fn show_error(&mut self, container_id: &str, html: &str) {
        web_sys::console::error_1(&JsValue::from_str("map could not be initialized"));
        if let Some(el) = self
            .document
            .as_ref()
            .and_then(|d| d.get_element_by_id(container_id))
        {
            el.set_inner_html(html);
        }
    }
}
