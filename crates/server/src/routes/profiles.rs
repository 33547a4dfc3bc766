use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use tracing::info;

use models::service_profile;
use service::desk::domain::NewServiceProfile;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/service-profiles", tag = "profiles",
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::ServiceProfileDoc]),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<service_profile::Model>>, JsonApiError> {
    let list = state.desk.list_profiles().await?;
    info!(count = list.len(), "list service profiles");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/api/service-profiles", tag = "profiles",
    request_body = crate::openapi::ServiceProfileRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ServiceProfileDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(input), _): WithRejection<Json<NewServiceProfile>, JsonApiError>,
) -> Result<(StatusCode, Json<service_profile::Model>), JsonApiError> {
    let created = state.desk.create_profile(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
