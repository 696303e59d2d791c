pub mod api_errors;
pub mod events;
pub mod profiles;

use {
    crate::AppState,
    axum::{
        Router,
        extract::DefaultBodyLimit,
        routing::get,
    },
    std::time::Duration,
    tower::ServiceBuilder,
    tower_http::{
        cors::{Any, CorsLayer},
        timeout::TimeoutLayer,
    },
};

pub fn router(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/profiles",
            get(profiles::list_profiles).post(profiles::create_profile),
        )
        .route(
            "/events",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/events/{id}",
            get(events::get_event).put(events::update_event),
        )
        .route("/events/{id}/logs", get(events::get_event_logs));

    Router::new()
        .route("/", get(|| async { "ok" }))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(64 * 1024))
                .layer(TimeoutLayer::new(request_timeout))
                .layer(cors),
        )
        .with_state(state)
}
