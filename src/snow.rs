//! Snow statistics arithmetic
//!
//! Pure helpers the snow-data handler composes: month labeling,
//! per-month scene selection, pixel-to-area scaling, and the running
//! summary behind the permanent-snow block of the response.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::imagery::{Scene, SCALE_M};

/// Ground area of one reduced pixel in square meters.
pub const PIXEL_AREA_M2: f64 = (SCALE_M * SCALE_M) as f64;

/// Formats an acquisition timestamp as a `YYYY-MM` month label.
pub fn month_label(acquired: &DateTime<Utc>) -> String {
    acquired.format("%Y-%m").to_string()
}

/// Groups a cloud-sorted scene list by calendar month, keeping the
/// first scene seen per month.
///
/// The scene search returns ascending cloud cover, so the kept scene is
/// the least cloudy of its month. `YYYY-MM` keys sort chronologically,
/// which gives the response its ascending month order.
pub fn least_cloudy_per_month(scenes: Vec<Scene>) -> BTreeMap<String, Scene> {
    let mut months = BTreeMap::new();
    for scene in scenes {
        months.entry(month_label(&scene.acquired)).or_insert(scene);
    }
    months
}

/// Converts a pixel count into square meters.
pub fn pixels_to_area_m2(pixels: f64) -> f64 {
    pixels * PIXEL_AREA_M2
}

/// Running aggregate over the monthly results.
///
/// Permanent snow is approximated by per-month maxima, not sums: the
/// same snowpack shows up month after month and must not be counted
/// twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnowSummary {
    max_snow_area_m2: f64,
    max_permanent_area_m2: f64,
    min_positive_elevation_m: Option<f64>,
}

impl SnowSummary {
    /// Creates an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one month's statistics into the aggregate. Only positive
    /// elevations participate in the minimum.
    pub fn record(
        &mut self,
        snow_area_m2: f64,
        permanent_area_m2: f64,
        min_elevation_m: Option<f64>,
    ) {
        self.max_snow_area_m2 = self.max_snow_area_m2.max(snow_area_m2);
        self.max_permanent_area_m2 = self.max_permanent_area_m2.max(permanent_area_m2);
        if let Some(elevation) = min_elevation_m {
            if elevation > 0.0 {
                self.min_positive_elevation_m = Some(match self.min_positive_elevation_m {
                    Some(current) => current.min(elevation),
                    None => elevation,
                });
            }
        }
    }

    /// Largest single-month permanent-snow area.
    pub fn permanent_area_m2(&self) -> f64 {
        self.max_permanent_area_m2
    }

    /// Largest single-month snow area. The response exposes this value
    /// as `total_area_m2`; existing consumers rely on the maximum, not a
    /// sum, so the name stays misleading on purpose.
    pub fn max_snow_area_m2(&self) -> f64 {
        self.max_snow_area_m2
    }

    /// Smallest positive monthly minimum elevation, or 0 when no month
    /// produced one.
    pub fn min_height_m(&self) -> f64 {
        self.min_positive_elevation_m.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn scene(id: &str, y: i32, m: u32, d: u32, cloud: f64) -> Scene {
        Scene {
            id: id.to_string(),
            acquired: Utc.with_ymd_and_hms(y, m, d, 10, 30, 0).unwrap(),
            cloud_cover_pct: cloud,
        }
    }

    #[test]
    fn test_month_label_is_zero_padded() {
        let acquired = Utc.with_ymd_and_hms(2023, 3, 5, 9, 0, 0).unwrap();
        assert_eq!(month_label(&acquired), "2023-03");
    }

    #[test]
    fn test_grouping_keeps_first_scene_per_month() {
        // Cloud-sorted input: the February 2% scene precedes the
        // February 10% one, so it must win the month.
        let scenes = vec![
            scene("feb-clear", 2023, 2, 20, 2.0),
            scene("jan-clear", 2023, 1, 14, 5.0),
            scene("feb-hazy", 2023, 2, 3, 10.0),
        ];
        let months = least_cloudy_per_month(scenes);

        assert_eq!(months.len(), 2);
        assert_eq!(months["2023-01"].id, "jan-clear");
        assert_eq!(months["2023-02"].id, "feb-clear");
    }

    #[test]
    fn test_grouping_orders_months_across_years() {
        let scenes = vec![
            scene("jan", 2023, 1, 10, 1.0),
            scene("dec", 2022, 12, 28, 3.0),
        ];
        let keys: Vec<String> = least_cloudy_per_month(scenes).into_keys().collect();
        assert_eq!(keys, vec!["2022-12", "2023-01"]);
    }

    #[test]
    fn test_pixel_area_scale() {
        assert_eq!(PIXEL_AREA_M2, 100.0);
        assert_eq!(pixels_to_area_m2(12.5), 1250.0);
    }

    #[test]
    fn test_summary_takes_maxima_not_sums() {
        let mut summary = SnowSummary::new();
        summary.record(1_000.0, 300.0, None);
        summary.record(4_000.0, 100.0, None);
        summary.record(2_500.0, 900.0, None);

        assert_eq!(summary.max_snow_area_m2(), 4_000.0);
        assert_eq!(summary.permanent_area_m2(), 900.0);
    }

    #[test]
    fn test_summary_keeps_smallest_positive_elevation() {
        let mut summary = SnowSummary::new();
        summary.record(0.0, 0.0, Some(2_400.0));
        summary.record(0.0, 0.0, Some(0.0));
        summary.record(0.0, 0.0, Some(-5.0));
        summary.record(0.0, 0.0, Some(1_800.0));
        summary.record(0.0, 0.0, None);

        assert_eq!(summary.min_height_m(), 1_800.0);
    }

    #[test]
    fn test_summary_elevation_defaults_to_zero() {
        let mut summary = SnowSummary::new();
        summary.record(500.0, 200.0, None);
        summary.record(500.0, 200.0, Some(-10.0));

        assert_eq!(summary.min_height_m(), 0.0);
    }
}
