use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Ids may be sent as numbers or numeric strings.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicCommentDoc {
    pub object_name: String,
    pub model_id: String,
    pub text: String,
    pub parent_id: Option<i32>,
    pub ip: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrivilegedCommentDoc {
    pub object_name: String,
    pub model_id: String,
    pub text: String,
    pub user_id: i32,
    /// NEW, APPROVE or BANNED
    pub status: String,
    pub parent_id: Option<i32>,
    pub ip: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentDoc {
    pub object_name: Option<String>,
    pub model_id: Option<String>,
    pub text: Option<String>,
    pub parent_id: Option<i32>,
    pub status: Option<String>,
    pub ip: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::comments::thread,
        crate::routes::comments::add,
        crate::routes::comments::list,
        crate::routes::comments::get,
        crate::routes::comments::update,
        crate::routes::comments::create,
        crate::routes::comments::delete,
        crate::routes::uploads::upload,
        crate::routes::uploads::remove,
        crate::routes::geo::city_location,
        crate::routes::geo::currencies,
    ),
    components(
        schemas(
            HealthResponse,
            PublicCommentDoc,
            PrivilegedCommentDoc,
            UpdateCommentDoc,
            crate::routes::uploads::RemoveInput,
        )
    ),
    tags(
        (name = "health"),
        (name = "comments"),
        (name = "uploads"),
        (name = "geo")
    )
)]
pub struct ApiDoc;
