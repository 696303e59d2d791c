use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{
            audit::AuditRecord,
            event::{Event, EventInput},
            id::{EventId, ProfileId},
            time::Zone,
        },
        services::event_service::EventView,
    },
    axum::{
        Json,
        extract::{Path, Query, State, rejection::{JsonRejection, QueryRejection}},
        http::StatusCode,
    },
    serde::Deserialize,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventQuery {
    pub profile_id: Option<ProfileId>,
    /// Zone to render local times in; defaults to each event's own zone.
    pub tz: Option<String>,
}

impl EventQuery {
    fn view_zone(&self) -> Result<Option<Zone>, ApiError> {
        self.tz
            .as_deref()
            .map(str::parse::<Zone>)
            .transpose()
            .map_err(ApiError::from)
    }
}

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    query: Result<Query<EventQuery>, QueryRejection>,
) -> Result<Json<Vec<EventView>>, ApiError> {
    let Query(query) = query?;
    let events = state
        .events
        .list_events(query.profile_id, query.view_zone()?)
        .await?;
    Ok(Json(events))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<EventQuery>, QueryRejection>,
) -> Result<Json<EventView>, ApiError> {
    let Query(query) = query?;
    let id: EventId = id.parse()?;
    Ok(Json(state.events.get_event(id, query.view_zone()?).await?))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<EventInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let Json(input) = payload?;
    let event = state.events.create_event(input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EventInput>, JsonRejection>,
) -> Result<Json<Event>, ApiError> {
    let id: EventId = id.parse()?;
    let Json(input) = payload?;
    Ok(Json(state.events.update_event(id, input).await?))
}

/// GET /api/events/{id}/logs
pub async fn get_event_logs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AuditRecord>>, ApiError> {
    let id: EventId = id.parse()?;
    Ok(Json(state.events.get_event_logs(id).await?))
}
