//! Imagery query service integration
//!
//! Scene search, snow-cover statistics, and preview rendering are all
//! delegated to an external imagery query service; this module defines
//! the request constants, the service trait the handlers depend on, and
//! the HTTP client implementing it.

mod client;

pub use client::ImageryClient;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::Polygon;

/// Sentinel-2 surface-reflectance collection every search runs against.
pub const COLLECTION: &str = "COPERNICUS/S2_SR_HARMONIZED";

/// Scenes above this cloud-cover percentage are excluded from searches.
pub const MAX_CLOUD_COVER_PCT: f64 = 20.0;

/// Band pair the service uses for the normalized-difference snow index.
pub const NDSI_BANDS: [&str; 2] = ["B3", "B11"];

/// NDSI cutoff above which a pixel counts as snow.
pub const SNOW_NDSI_THRESHOLD: f64 = 0.4;

/// Stricter NDSI cutoff above which a pixel counts as permanent snowpack.
pub const PERMANENT_SNOW_NDSI_THRESHOLD: f64 = 0.8;

/// Reduction scale in meters; one pixel covers `SCALE_M`² square meters.
pub const SCALE_M: u32 = 10;

/// Elevation dataset joined for minimum snow-elevation queries.
pub const ELEVATION_DATASET: &str = "USGS/SRTMGL1_003";

/// Thumbnail edge length in pixels.
pub const THUMBNAIL_DIMENSIONS: u32 = 500;

/// Bands and reflectance stretch for true-color previews.
pub const TRUE_COLOR_BANDS: [&str; 3] = ["B4", "B3", "B2"];
pub const REFLECTANCE_MIN: f64 = 0.0;
pub const REFLECTANCE_MAX: f64 = 3000.0;

/// One catalog entry returned by a scene search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Opaque scene identifier, usable as a URL path segment.
    pub id: String,
    /// Acquisition timestamp.
    pub acquired: DateTime<Utc>,
    /// Scene-wide cloud cover in percent.
    pub cloud_cover_pct: f64,
}

/// Pixel counts from a snow-cover reduction over one scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnowCover {
    /// Pixels with NDSI above [`SNOW_NDSI_THRESHOLD`].
    pub snow_pixels: f64,
    /// All unmasked pixels inside the region.
    pub valid_pixels: f64,
    /// Pixels with NDSI above [`PERMANENT_SNOW_NDSI_THRESHOLD`].
    pub permanent_snow_pixels: f64,
}

/// Preview URLs rendered for one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Previews {
    pub rgb_url: String,
    pub snow_url: String,
}

/// Raster search and statistics operations the handlers depend on.
///
/// All `region` arguments use GeoJSON (longitude, latitude) vertex
/// order; callers swap request coordinates before reaching this seam.
#[async_trait]
pub trait ImageryService: Send + Sync {
    /// Lists scenes whose footprint fully contains `region`, restricted
    /// to the date range and the cloud ceiling, sorted by ascending
    /// cloud cover.
    async fn search_scenes(
        &self,
        region: &Polygon,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Scene>>;

    /// Counts snow, valid, and permanent-snow pixels for one scene.
    async fn snow_cover(&self, scene_id: &str, region: &Polygon) -> Result<SnowCover>;

    /// Minimum elevation among snow-classified pixels, when any exist.
    async fn min_snow_elevation(&self, scene_id: &str, region: &Polygon)
        -> Result<Option<f64>>;

    /// Renders true-color and snow-mask previews for one scene.
    async fn render_previews(&self, scene_id: &str, region: &Polygon) -> Result<Previews>;
}
