//! snowline - snow statistics over satellite imagery
//!
//! snowline answers "how much snow was in this region, month by month?"
//! by delegating scene search, NDSI snow classification, and preview
//! rendering to an external imagery query service, then reshaping the
//! returned pixel statistics into per-month areas and a permanent-snow
//! summary.
//!
//! # Examples
//!
//! ## Serving the API
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use snowline::api::{create_router, AppState};
//! use snowline::{Config, ImageryClient, NominatimClient};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let state = AppState {
//!     imagery: Arc::new(ImageryClient::from_config(&config)?),
//!     geocoder: Arc::new(NominatimClient::new(&config.geocoder_url)?),
//! };
//!
//! let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//! axum::serve(listener, create_router(Arc::new(state))).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod config;
pub mod geometry;
pub mod imagery;
pub mod geocode;
pub mod snow;
pub mod api;

pub use config::Config;
pub use error::{Error, Result};
pub use geocode::{NominatimClient, ReverseGeocoder};
pub use geometry::Polygon;
pub use imagery::{ImageryClient, ImageryService, Previews, Scene, SnowCover};
