use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use tracing::info;

use common::types::MessageResponse;
use models::{client, manager};
use service::desk::domain::{ManagerInput, ManagerView, ManagerWithClients};

use crate::errors::JsonApiError;
use crate::state::ServerState;

type IdPath = WithRejection<Path<i32>, JsonApiError>;
type Body = WithRejection<Json<ManagerInput>, JsonApiError>;

#[utoipa::path(
    get, path = "/api/managers", tag = "managers",
    responses((status = 200, description = "Managers with profile name and clients", body = [crate::openapi::ManagerWithClientsDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ManagerWithClients>>, JsonApiError> {
    let list = state.desk.list_managers().await?;
    info!(count = list.len(), "list managers");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/api/managers", tag = "managers",
    request_body = crate::openapi::ManagerRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ManagerViewDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Service profile not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(input), _): Body,
) -> Result<(StatusCode, Json<ManagerView>), JsonApiError> {
    let created = state.desk.create_manager(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/managers/{id}", tag = "managers",
    params(("id" = i32, Path, description = "Manager id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ManagerDoc),
        (status = 404, description = "Manager not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<manager::Model>, JsonApiError> {
    Ok(Json(state.desk.get_manager(id).await?))
}

#[utoipa::path(
    put, path = "/api/managers/{id}", tag = "managers",
    params(("id" = i32, Path, description = "Manager id")),
    request_body = crate::openapi::ManagerRequest,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ManagerViewDoc),
        (status = 400, description = "Validation Error or clients of another profile", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Manager or service profile not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(input), _): Body,
) -> Result<Json<ManagerView>, JsonApiError> {
    Ok(Json(state.desk.update_manager(id, input).await?))
}

#[utoipa::path(
    delete, path = "/api/managers/{id}", tag = "managers",
    params(("id" = i32, Path, description = "Manager id")),
    responses(
        (status = 200, description = "Deleted; clients become unassigned", body = crate::openapi::MessageDoc),
        (status = 404, description = "Manager not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<MessageResponse>, JsonApiError> {
    state.desk.delete_manager(id).await?;
    Ok(Json(MessageResponse::new("Manager deleted")))
}

#[utoipa::path(
    get, path = "/api/managers/{id}/clients", tag = "managers",
    params(("id" = i32, Path, description = "Manager id")),
    responses(
        (status = 200, description = "Clients assigned to the manager", body = [crate::openapi::ClientDoc]),
        (status = 404, description = "Manager not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn clients(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<Vec<client::Model>>, JsonApiError> {
    Ok(Json(state.desk.manager_clients(id).await?))
}
