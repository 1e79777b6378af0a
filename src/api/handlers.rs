use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::error::{Error, Result};
use crate::geocode::REGION_NAME_PLACEHOLDER;
use crate::geometry::Polygon;
use crate::snow::{self, SnowSummary};

use super::models::*;
use super::AppState;

pub async fn snow_data(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SnowDataRequest>,
) -> Result<Json<SnowDataResponse>> {
    let geometry = request
        .geometry
        .ok_or(Error::MissingParameter("geometry"))?;
    let start_date = request
        .start_date
        .ok_or(Error::MissingParameter("start_date"))?;
    let end_date = request
        .end_date
        .ok_or(Error::MissingParameter("end_date"))?;

    tracing::info!(%start_date, %end_date, "snow-data request");

    // Request vertices are (lat, lon); the imagery service wants GeoJSON order.
    let region = geometry.to_lonlat();

    let scenes = state
        .imagery
        .search_scenes(&region, start_date, end_date)
        .await?;
    if scenes.is_empty() {
        return Err(Error::NoImagery);
    }

    let months = snow::least_cloudy_per_month(scenes);
    tracing::debug!(months = months.len(), "scenes grouped by month");

    let mut results = Vec::with_capacity(months.len());
    let mut summary = SnowSummary::new();

    for (month, scene) in months {
        let cover = state.imagery.snow_cover(&scene.id, &region).await?;
        let min_elevation = state.imagery.min_snow_elevation(&scene.id, &region).await?;

        let snow_area_m2 = snow::pixels_to_area_m2(cover.snow_pixels);
        let permanent_area_m2 = snow::pixels_to_area_m2(cover.permanent_snow_pixels);
        summary.record(snow_area_m2, permanent_area_m2, min_elevation);

        // Previews are cosmetic; a render failure only blanks this month's URLs.
        let (rgb_url, snow_url) = match state.imagery.render_previews(&scene.id, &region).await {
            Ok(previews) => (Some(previews.rgb_url), Some(previews.snow_url)),
            Err(cause) => {
                tracing::warn!(%month, scene = %scene.id, %cause, "preview rendering failed");
                (None, None)
            }
        };

        results.push(MonthlyResult {
            month,
            image_date: scene.acquired.date_naive(),
            image_id: scene.id,
            snow_area_m2,
            total_area_m2: snow::pixels_to_area_m2(cover.valid_pixels),
            rgb_url,
            snow_url,
        });
    }

    let region_name = resolve_region_name(&state, &geometry).await;

    Ok(Json(SnowDataResponse {
        results,
        permanent_snow: PermanentSnow {
            area_m2: summary.permanent_area_m2(),
            min_height_m: summary.min_height_m(),
            total_area_m2: summary.max_snow_area_m2(),
            region_name,
        },
    }))
}

// Geocoding is best-effort; any failure falls back to the placeholder.
async fn resolve_region_name(state: &AppState, geometry: &Polygon) -> String {
    let Some((lat, lon)) = geometry.centroid_latlon() else {
        return REGION_NAME_PLACEHOLDER.to_string();
    };

    match state.geocoder.region_name(lat, lon).await {
        Ok(name) => name,
        Err(cause) => {
            tracing::warn!(%cause, "reverse geocoding failed");
            REGION_NAME_PLACEHOLDER.to_string()
        }
    }
}

pub async fn dummy() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello, World!".to_string(),
    })
}
