use serde::{Deserialize, Serialize};
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    pub errors: Option<Vec<FieldErrorDoc>>,
}

#[derive(ToSchema)]
pub struct FieldErrorDoc { pub field: String, pub message: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ServiceProfileDoc { pub id: i32, pub name: String }

#[derive(ToSchema)]
pub struct ManagerDoc { pub id: i32, pub full_name: String, pub service_profile_id: i32 }

#[derive(ToSchema)]
pub struct ManagerViewDoc {
    pub id: i32,
    pub full_name: String,
    pub service_profile_id: i32,
    pub profile_name: Option<String>,
}

#[derive(ToSchema)]
pub struct ClientBriefDoc { pub id: i32, pub company_name: String, pub legal_form: String }

#[derive(ToSchema)]
pub struct ManagerWithClientsDoc {
    pub id: i32,
    pub full_name: String,
    pub service_profile_id: i32,
    pub profile_name: Option<String>,
    pub clients: Vec<ClientBriefDoc>,
}

#[derive(ToSchema)]
pub struct ClientDoc {
    pub id: i32,
    pub company_name: String,
    pub legal_form: String,
    pub service_profile_id: i32,
    pub assigned_manager_id: Option<i32>,
}

// Request bodies are camelCase on the wire
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ServiceProfileRequest { pub name: String }

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManagerRequest { pub full_name: String, pub service_profile_id: i32 }

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientRequest {
    pub company_name: String,
    pub legal_form: String,
    pub service_profile_id: i32,
    pub assigned_manager_id: Option<i32>,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest { pub new_manager_id: i32 }

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeProfileRequest { pub new_profile_id: i32, pub new_manager_id: i32 }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::profiles::list,
        crate::routes::profiles::create,
        crate::routes::managers::list,
        crate::routes::managers::create,
        crate::routes::managers::get,
        crate::routes::managers::update,
        crate::routes::managers::delete,
        crate::routes::managers::clients,
        crate::routes::clients::list,
        crate::routes::clients::create,
        crate::routes::clients::get,
        crate::routes::clients::update,
        crate::routes::clients::delete,
        crate::routes::clients::transfer,
        crate::routes::clients::change_profile_and_transfer,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            FieldErrorDoc,
            MessageDoc,
            ServiceProfileDoc,
            ManagerDoc,
            ManagerViewDoc,
            ClientBriefDoc,
            ManagerWithClientsDoc,
            ClientDoc,
            ServiceProfileRequest,
            ManagerRequest,
            ClientRequest,
            TransferRequest,
            ChangeProfileRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "profiles"),
        (name = "managers"),
        (name = "clients")
    )
)]
pub struct ApiDoc;
