pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;

use {
    domain::store::{AuditLog, EventStore, ProfileDirectory},
    services::{event_service::EventService, profile_service::ProfileService},
    std::sync::Arc,
};

#[derive(Clone)]
pub struct AppState {
    pub events: EventService,
    pub profiles: ProfileService,
}

impl AppState {
    /// Wire both services to one backing store.
    pub fn with_store<S>(store: Arc<S>) -> Self
    where
        S: EventStore + AuditLog + ProfileDirectory + 'static,
    {
        Self {
            events: EventService::with_store(store.clone()),
            profiles: ProfileService::new(store),
        }
    }
}
