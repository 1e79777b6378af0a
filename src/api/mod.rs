pub mod handlers;
pub mod models;
pub mod routes;

pub use routes::create_router;

use std::sync::Arc;

use crate::geocode::ReverseGeocoder;
use crate::imagery::ImageryService;

/// Shared service clients, built once at startup and handed to the router.
pub struct AppState {
    pub imagery: Arc<dyn ImageryService>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
}
