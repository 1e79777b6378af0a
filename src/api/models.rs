use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::geometry::Polygon;

#[derive(Debug, Deserialize)]
pub struct SnowDataRequest {
    pub geometry: Option<Polygon>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct SnowDataResponse {
    pub results: Vec<MonthlyResult>,
    pub permanent_snow: PermanentSnow,
}

#[derive(Debug, Serialize)]
pub struct MonthlyResult {
    pub month: String,
    pub image_date: NaiveDate,
    pub image_id: String,
    pub snow_area_m2: f64,
    pub total_area_m2: f64,
    pub rgb_url: Option<String>,
    pub snow_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PermanentSnow {
    pub area_m2: f64,
    pub min_height_m: f64,
    // Historically the maximum monthly snow area, not a total; the
    // name is part of the public contract and must not change.
    pub total_area_m2: f64,
    pub region_name: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
