use serde::{Deserialize, Serialize};

/// WGS84 position in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Axis-aligned lat/lng rectangle (no antimeridian wrapping).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        LatLngBounds {
            south_west,
            north_east,
        }
    }

    pub fn from_point(p: LatLng) -> Self {
        LatLngBounds::new(p, p)
    }

    /// Smallest bounds containing every point, `None` for an empty input.
    pub fn from_points(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = LatLngBounds::from_point(first);
        for p in iter {
            b.extend(p);
        }
        Some(b)
    }

    pub fn extend(&mut self, p: LatLng) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lng = self.south_west.lng.min(p.lng);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lng = self.north_east.lng.max(p.lng);
    }

    pub fn lat_span(&self) -> f64 {
        self.north_east.lat - self.south_west.lat
    }

    pub fn lng_span(&self) -> f64 {
        self.north_east.lng - self.south_west.lng
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) * 0.5,
            (self.south_west.lng + self.north_east.lng) * 0.5,
        )
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south_west.lat
            && p.lat <= self.north_east.lat
            && p.lng >= self.south_west.lng
            && p.lng <= self.north_east.lng
    }

    pub fn is_degenerate(&self) -> bool {
        self.lat_span() <= 0.0 || self.lng_span() <= 0.0
    }

    /// Grows each axis symmetrically so its span is at least `min_span_deg`.
    pub fn with_min_span(&self, min_span_deg: f64) -> Self {
        let c = self.center();
        let half_lat = self.lat_span().max(min_span_deg) * 0.5;
        let half_lng = self.lng_span().max(min_span_deg) * 0.5;
        LatLngBounds::new(
            LatLng::new(c.lat - half_lat, c.lng - half_lng),
            LatLng::new(c.lat + half_lat, c.lng + half_lng),
        )
    }

    /// Extends every side by `ratio` of the span on that axis, like Leaflet's
    /// `LatLngBounds.pad`.
    pub fn pad(&self, ratio: f64) -> Self {
        let dlat = self.lat_span() * ratio;
        let dlng = self.lng_span() * ratio;
        LatLngBounds::new(
            LatLng::new(self.south_west.lat - dlat, self.south_west.lng - dlng),
            LatLng::new(self.north_east.lat + dlat, self.north_east.lng + dlng),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{LatLng, LatLngBounds};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn from_points_covers_all() {
        let pts = [
            LatLng::new(46.8, -71.2),
            LatLng::new(46.9, -71.4),
            LatLng::new(46.7, -71.1),
        ];
        let b = LatLngBounds::from_points(pts).unwrap();
        for p in pts {
            assert!(b.contains(p));
        }
        assert_close(b.lat_span(), 0.2, 1e-9);
        assert_close(b.lng_span(), 0.3, 1e-9);
        assert!(LatLngBounds::from_points([]).is_none());
    }

    #[test]
    fn pad_grows_each_side_by_ratio_of_span() {
        let b = LatLngBounds::new(LatLng::new(0.0, 0.0), LatLng::new(1.0, 2.0));
        let p = b.pad(0.1);
        assert_close(p.south_west.lat, -0.1, 1e-12);
        assert_close(p.south_west.lng, -0.2, 1e-12);
        assert_close(p.north_east.lat, 1.1, 1e-12);
        assert_close(p.north_east.lng, 2.2, 1e-12);
    }

    #[test]
    fn min_span_fixes_single_point() {
        let p = LatLng::new(46.81, -71.21);
        let b = LatLngBounds::from_point(p);
        assert!(b.is_degenerate());
        let w = b.with_min_span(0.01);
        assert!(!w.is_degenerate());
        assert!(w.contains(p));
        assert_close(w.lat_span(), 0.01, 1e-12);
        assert_close(w.center().lat, p.lat, 1e-12);
    }

    #[test]
    fn validity_rejects_out_of_range() {
        assert!(LatLng::new(46.8, -71.2).is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
        assert!(!LatLng::new(0.0, f64::NAN).is_valid());
    }
}
