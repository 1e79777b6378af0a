//! HTTP client for the imagery query service

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geometry::Polygon;

use super::{
    ImageryService, Previews, Scene, SnowCover, COLLECTION, ELEVATION_DATASET,
    MAX_CLOUD_COVER_PCT, NDSI_BANDS, PERMANENT_SNOW_NDSI_THRESHOLD, REFLECTANCE_MAX,
    REFLECTANCE_MIN, SCALE_M, SNOW_NDSI_THRESHOLD, THUMBNAIL_DIMENSIONS, TRUE_COLOR_BANDS,
};

/// Client for the imagery query service's REST API.
///
/// Statistics calls can legitimately run long, so the client carries no
/// request timeout; only the geocoding client does.
pub struct ImageryClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ImageryClient {
    /// Creates a client from the service configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.imagery_accept_invalid_certs {
            tracing::warn!(
                url = %config.imagery_url,
                "TLS certificate verification disabled for the imagery service"
            );
        }
        let http = Client::builder()
            .danger_accept_invalid_certs(config.imagery_accept_invalid_certs)
            .build()?;

        Ok(ImageryClient {
            http,
            base_url: config.imagery_url.trim_end_matches('/').to_string(),
            token: config.imagery_token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: for<'de> Deserialize<'de>,
    {
        let mut request = self.http.post(self.endpoint(path)).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Error::Imagery(format!(
                "{} answered {}",
                path,
                response.status()
            )));
        }
        Ok(response.json().await?)
    }

    async fn render(&self, scene_id: &str, region: &Polygon, vis: Visualization<'_>) -> Result<String> {
        let body = ThumbnailRequest {
            region,
            dimensions: THUMBNAIL_DIMENSIONS,
            format: "png",
            visualization: vis,
        };
        let response: ThumbnailResponse = self
            .post(&format!("/v1/scenes/{scene_id}/thumbnail"), &body)
            .await?;
        Ok(response.url)
    }
}

#[async_trait]
impl ImageryService for ImageryClient {
    async fn search_scenes(
        &self,
        region: &Polygon,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Scene>> {
        let body = SearchRequest {
            collection: COLLECTION,
            region,
            start_date,
            end_date,
            max_cloud_cover_pct: MAX_CLOUD_COVER_PCT,
            footprint_contains_region: true,
            order_by: "cloud_cover_pct",
        };
        let response: SearchResponse = self.post("/v1/scenes/search", &body).await?;
        Ok(response.scenes)
    }

    async fn snow_cover(&self, scene_id: &str, region: &Polygon) -> Result<SnowCover> {
        let body = SnowCoverRequest {
            region,
            ndsi_bands: NDSI_BANDS,
            snow_threshold: SNOW_NDSI_THRESHOLD,
            permanent_snow_threshold: PERMANENT_SNOW_NDSI_THRESHOLD,
            scale_m: SCALE_M,
        };
        self.post(&format!("/v1/scenes/{scene_id}/snow-cover"), &body)
            .await
    }

    async fn min_snow_elevation(
        &self,
        scene_id: &str,
        region: &Polygon,
    ) -> Result<Option<f64>> {
        let body = ElevationRequest {
            region,
            ndsi_bands: NDSI_BANDS,
            snow_threshold: SNOW_NDSI_THRESHOLD,
            elevation_dataset: ELEVATION_DATASET,
            scale_m: SCALE_M,
        };
        let response: ElevationResponse = self
            .post(&format!("/v1/scenes/{scene_id}/snow-elevation"), &body)
            .await?;
        Ok(response.min_elevation_m)
    }

    async fn render_previews(&self, scene_id: &str, region: &Polygon) -> Result<Previews> {
        let rgb_url = self
            .render(
                scene_id,
                region,
                Visualization::TrueColor {
                    bands: TRUE_COLOR_BANDS,
                    min: REFLECTANCE_MIN,
                    max: REFLECTANCE_MAX,
                },
            )
            .await?;
        let snow_url = self
            .render(
                scene_id,
                region,
                Visualization::SnowMask {
                    ndsi_bands: NDSI_BANDS,
                    threshold: SNOW_NDSI_THRESHOLD,
                    palette: ["cyan"],
                },
            )
            .await?;
        Ok(Previews { rgb_url, snow_url })
    }
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    collection: &'a str,
    region: &'a Polygon,
    start_date: NaiveDate,
    end_date: NaiveDate,
    max_cloud_cover_pct: f64,
    footprint_contains_region: bool,
    order_by: &'a str,
}

#[derive(Deserialize)]
struct SearchResponse {
    scenes: Vec<Scene>,
}

#[derive(Serialize)]
struct SnowCoverRequest<'a> {
    region: &'a Polygon,
    ndsi_bands: [&'a str; 2],
    snow_threshold: f64,
    permanent_snow_threshold: f64,
    scale_m: u32,
}

#[derive(Serialize)]
struct ElevationRequest<'a> {
    region: &'a Polygon,
    ndsi_bands: [&'a str; 2],
    snow_threshold: f64,
    elevation_dataset: &'a str,
    scale_m: u32,
}

#[derive(Deserialize)]
struct ElevationResponse {
    min_elevation_m: Option<f64>,
}

#[derive(Serialize)]
struct ThumbnailRequest<'a> {
    region: &'a Polygon,
    dimensions: u32,
    format: &'a str,
    visualization: Visualization<'a>,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Visualization<'a> {
    TrueColor {
        bands: [&'a str; 3],
        min: f64,
        max: f64,
    },
    SnowMask {
        ndsi_bands: [&'a str; 2],
        threshold: f64,
        palette: [&'a str; 1],
    },
}

#[derive(Deserialize)]
struct ThumbnailResponse {
    url: String,
}
