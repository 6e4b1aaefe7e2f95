use std::sync::Arc;

use skerry_core::BookingStore;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookingStore>,
    pub auth: AuthConfig,
}
