use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::profile::{NewProfileInput, Profile},
    },
    axum::{
        Json,
        extract::{State, rejection::JsonRejection},
        http::StatusCode,
    },
};

/// GET /api/profiles
pub async fn list_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    Ok(Json(state.profiles.list_profiles().await?))
}

/// POST /api/profiles
pub async fn create_profile(
    State(state): State<AppState>,
    payload: Result<Json<NewProfileInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let Json(input) = payload?;
    let profile = state.profiles.create_profile(input).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}
