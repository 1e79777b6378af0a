//! Region-of-interest geometry

use serde::{Deserialize, Serialize};

/// GeoJSON-style polygon as supplied in a snow-data request.
///
/// Callers send vertices in (latitude, longitude) order. The imagery
/// service expects GeoJSON's (longitude, latitude) order, so the ring
/// must be swapped with [`Polygon::to_lonlat`] before leaving the
/// process. Ring closure and winding stay the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    #[serde(rename = "type")]
    pub kind: String,
    /// Rings of vertex pairs; the first ring is the outer boundary.
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl Polygon {
    /// Returns the polygon with every vertex pair swapped into
    /// (longitude, latitude) order.
    pub fn to_lonlat(&self) -> Polygon {
        Polygon {
            kind: self.kind.clone(),
            coordinates: self
                .coordinates
                .iter()
                .map(|ring| ring.iter().map(|&[a, b]| [b, a]).collect())
                .collect(),
        }
    }

    /// Returns the (latitude, longitude) vertex mean of the outer ring,
    /// ignoring a closing vertex that repeats the first one.
    ///
    /// Good enough as a geocoding anchor; this is not an area-weighted
    /// centroid.
    pub fn centroid_latlon(&self) -> Option<(f64, f64)> {
        let ring = self.coordinates.first()?;
        let closed = ring.len() > 1 && ring.first() == ring.last();
        let vertices = if closed { &ring[..ring.len() - 1] } else { &ring[..] };
        if vertices.is_empty() {
            return None;
        }

        let (lat_sum, lon_sum) = vertices
            .iter()
            .fold((0.0, 0.0), |(lat, lon), &[a, b]| (lat + a, lon + b));
        let n = vertices.len() as f64;
        Some((lat_sum / n, lon_sum / n))
    }
}
