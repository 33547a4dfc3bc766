use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use tracing::info;

use common::types::MessageResponse;
use models::client;
use service::desk::domain::{ChangeProfileInput, ClientInput, TransferInput};

use crate::errors::JsonApiError;
use crate::state::ServerState;

type IdPath = WithRejection<Path<i32>, JsonApiError>;
type JsonBody<T> = WithRejection<Json<T>, JsonApiError>;

#[utoipa::path(
    get, path = "/api/clients", tag = "clients",
    responses((status = 200, description = "List OK", body = [crate::openapi::ClientDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<client::Model>>, JsonApiError> {
    let list = state.desk.list_clients().await?;
    info!(count = list.len(), "list clients");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/api/clients", tag = "clients",
    request_body = crate::openapi::ClientRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ClientDoc),
        (status = 400, description = "Validation Error, profile mismatch or manager at capacity", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Manager or service profile not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(input), _): JsonBody<ClientInput>,
) -> Result<(StatusCode, Json<client::Model>), JsonApiError> {
    let created = state.desk.create_client(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/clients/{id}", tag = "clients",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ClientDoc),
        (status = 404, description = "Client not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<client::Model>, JsonApiError> {
    Ok(Json(state.desk.get_client(id).await?))
}

#[utoipa::path(
    put, path = "/api/clients/{id}", tag = "clients",
    params(("id" = i32, Path, description = "Client id")),
    request_body = crate::openapi::ClientRequest,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ClientDoc),
        (status = 400, description = "Validation Error, profile mismatch or manager at capacity", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Client, manager or service profile not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(input), _): JsonBody<ClientInput>,
) -> Result<Json<client::Model>, JsonApiError> {
    Ok(Json(state.desk.update_client(id, input).await?))
}

#[utoipa::path(
    delete, path = "/api/clients/{id}", tag = "clients",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Client not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<MessageResponse>, JsonApiError> {
    state.desk.delete_client(id).await?;
    Ok(Json(MessageResponse::new("Client deleted")))
}

#[utoipa::path(
    put, path = "/api/clients/{id}/transfer", tag = "clients",
    params(("id" = i32, Path, description = "Client id")),
    request_body = crate::openapi::TransferRequest,
    responses(
        (status = 200, description = "Transferred", body = crate::openapi::ClientDoc),
        (status = 400, description = "Validation Error, profile mismatch or manager at capacity", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Client or manager not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn transfer(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(input), _): JsonBody<TransferInput>,
) -> Result<Json<client::Model>, JsonApiError> {
    Ok(Json(state.desk.transfer_client(id, input).await?))
}

#[utoipa::path(
    put, path = "/api/clients/{id}/change-profile-and-transfer", tag = "clients",
    params(("id" = i32, Path, description = "Client id")),
    request_body = crate::openapi::ChangeProfileRequest,
    responses(
        (status = 200, description = "Profile changed and client transferred", body = crate::openapi::ClientDoc),
        (status = 400, description = "Validation Error, profile mismatch or manager at capacity", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Client, manager or service profile not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn change_profile_and_transfer(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(input), _): JsonBody<ChangeProfileInput>,
) -> Result<Json<client::Model>, JsonApiError> {
    Ok(Json(state.desk.change_profile_and_transfer(id, input).await?))
}
