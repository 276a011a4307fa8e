use std::collections::BTreeMap;

use foundation::{LatLng, LatLngBounds, LocationId};

use crate::config::{MapConfig, MapView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapInitError {
    ContainerMissing(String),
    LibraryMissing,
    Backend(String),
}

impl std::fmt::Display for MapInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapInitError::ContainerMissing(id) => write!(f, "map container #{id} not found"),
            MapInitError::LibraryMissing => write!(f, "map library is not loaded"),
            MapInitError::Backend(msg) => write!(f, "map backend error: {msg}"),
        }
    }
}

impl std::error::Error for MapInitError {}

/// A live tile map (Leaflet in the browser).
pub trait MapSurface {
    fn set_view(&mut self, view: MapView);
    fn fit_bounds(&mut self, bounds: LatLngBounds);
    fn add_marker(&mut self, id: LocationId, at: LatLng, popup_html: &str);
    fn set_popup_content(&mut self, id: LocationId, popup_html: &str);
    fn open_popup(&mut self, id: LocationId);
    /// Recomputes cached container geometry after a layout change.
    fn invalidate_size(&mut self);
}

/// Creates surfaces; checks the environment first.
pub trait MapBackend {
    type Surface: MapSurface;

    fn container_exists(&self, container_id: &str) -> bool;
    fn library_loaded(&self) -> bool;
    /// Builds the map and its tile layer inside the container.
    fn create(
        &mut self,
        container_id: &str,
        config: &MapConfig,
    ) -> Result<Self::Surface, MapInitError>;
    /// Replaces the container content with an inline error.
    fn show_error(&mut self, container_id: &str, html: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    SetView(MapView),
    FitBounds(LatLngBounds),
    AddMarker(LocationId),
    SetPopup(LocationId),
    OpenPopup(LocationId),
    InvalidateSize,
}

/// In-memory surface recording every call; used by tests and native tools.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub view: Option<MapView>,
    pub fitted: Option<LatLngBounds>,
    pub markers: BTreeMap<LocationId, LatLng>,
    pub popups: BTreeMap<LocationId, String>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn popup(&self, id: LocationId) -> Option<&str> {
        self.popups.get(&id).map(String::as_str)
    }

    pub fn count(&self, pred: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl MapSurface for RecordingSurface {
    fn set_view(&mut self, view: MapView) {
        self.view = Some(view);
        self.calls.push(SurfaceCall::SetView(view));
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds) {
        self.fitted = Some(bounds);
        self.calls.push(SurfaceCall::FitBounds(bounds));
    }

    fn add_marker(&mut self, id: LocationId, at: LatLng, popup_html: &str) {
        self.markers.insert(id, at);
        self.popups.insert(id, popup_html.to_string());
        self.calls.push(SurfaceCall::AddMarker(id));
    }

    fn set_popup_content(&mut self, id: LocationId, popup_html: &str) {
        self.popups.insert(id, popup_html.to_string());
        self.calls.push(SurfaceCall::SetPopup(id));
    }

    fn open_popup(&mut self, id: LocationId) {
        self.calls.push(SurfaceCall::OpenPopup(id));
    }

    fn invalidate_size(&mut self) {
        self.calls.push(SurfaceCall::InvalidateSize);
    }
}

/// Backend over [`RecordingSurface`] with switchable environment checks.
#[derive(Debug)]
pub struct RecordingBackend {
    pub containers: Vec<String>,
    pub library_loaded: bool,
    pub errors: Vec<(String, String)>,
}

impl RecordingBackend {
    pub fn with_container(id: impl Into<String>) -> Self {
        Self {
            containers: vec![id.into()],
            library_loaded: true,
            errors: Vec::new(),
        }
    }
}

impl MapBackend for RecordingBackend {
    type Surface = RecordingSurface;

    fn container_exists(&self, container_id: &str) -> bool {
        self.containers.iter().any(|c| c == container_id)
    }

    fn library_loaded(&self) -> bool {
        self.library_loaded
    }

    fn create(
        &mut self,
        _container_id: &str,
        config: &MapConfig,
    ) -> Result<Self::Surface, MapInitError> {
        let mut surface = RecordingSurface::new();
        surface.set_view(config.default_view);
        Ok(surface)
    }

    fn show_error(&mut self, container_id: &str, html: &str) {
        self.errors.push((container_id.to_string(), html.to_string()));
    }
}
