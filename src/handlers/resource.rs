use crate::config::UploadConfig;
use crate::error::{AppError, AppResult};
use crate::models::{RawBody, Submission};
use crate::resources::{self, ResourceSchema};
use crate::response::{with_message, ApiResponse, MessageResponse};
use crate::services::record::RecordService;
use axum::{
    extract::{Path, Query},
    http::Method,
    response::{IntoResponse, Response},
    Extension,
};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;

/// What a request asks for, decided from the method and whether an id is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Preflight,
    List,
    Get(i32),
    Create,
    Update(i32),
    Delete(i32),
}

impl Operation {
    pub fn resolve(method: &Method, id: Option<&str>) -> AppResult<Self> {
        match *method {
            Method::OPTIONS => return Ok(Operation::Preflight),
            Method::GET | Method::POST | Method::PUT | Method::DELETE => {}
            _ => return Err(AppError::MethodNotAllowed),
        }

        let id = match id.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                raw.parse::<i32>()
                    .map_err(|_| AppError::Validation("Invalid ID".to_string()))?,
            ),
            None => None,
        };

        match (method, id) {
            (&Method::GET, None) => Ok(Operation::List),
            (&Method::GET, Some(id)) => Ok(Operation::Get(id)),
            (&Method::POST, None) => Ok(Operation::Create),
            (&Method::POST, Some(id)) | (&Method::PUT, Some(id)) => Ok(Operation::Update(id)),
            (&Method::DELETE, Some(id)) => Ok(Operation::Delete(id)),
            (&Method::PUT, None) | (&Method::DELETE, None) => Err(AppError::missing_id()),
            _ => Err(AppError::MethodNotAllowed),
        }
    }
}

/// Binds a legacy `index*.php` script to its resource.
#[derive(Debug, Clone, Copy)]
pub struct EntryPoint {
    pub schema: &'static ResourceSchema,
    /// Script is shared by design and selects via `?resource=`.
    pub requires_resource_param: bool,
}

async fn run(
    service: RecordService,
    operation: Operation,
    body: RawBody,
) -> AppResult<Response> {
    let schema = service.schema();
    let response = match operation {
        Operation::Preflight => ApiResponse::empty().into_response(),
        Operation::List => ApiResponse::ok(service.list().await?).into_response(),
        Operation::Get(id) => ApiResponse::ok(service.get(id).await?).into_response(),
        Operation::Create => {
            let submission = Submission::parse(schema, body)?;
            let record = service.create(submission).await?;
            ApiResponse::created(with_message(record, schema.messages.created)).into_response()
        }
        Operation::Update(id) => {
            let submission = Submission::parse(schema, body)?;
            let record = service.update(id, submission).await?;
            ApiResponse::ok(with_message(record, schema.messages.updated)).into_response()
        }
        Operation::Delete(id) => {
            service.delete(id).await?;
            ApiResponse::ok(MessageResponse::success(schema.messages.deleted)).into_response()
        }
    };
    Ok(response)
}

/// Path id wins over `?id=`, which wins over a body `id`.
fn request_id(
    path_id: Option<String>,
    query: &HashMap<String, String>,
    body: &RawBody,
) -> Option<String> {
    path_id
        .or_else(|| query.get("id").cloned())
        .filter(|id| !id.trim().is_empty())
        .or_else(|| body.id())
}

/// Handler behind every legacy entry script. OPTIONS is routed to
/// [`preflight`] before the body is read.
pub async fn entry_script(
    Extension(db): Extension<DatabaseConnection>,
    Extension(uploads): Extension<UploadConfig>,
    Extension(entry): Extension<EntryPoint>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    body: RawBody,
) -> AppResult<Response> {
    if entry.requires_resource_param
        && query.get("resource").map(String::as_str) != Some(entry.schema.key)
    {
        return Err(AppError::resource_not_found());
    }

    let id = request_id(None, &query, &body);
    let operation = Operation::resolve(&method, id.as_deref())?;
    run(RecordService::new(db, uploads, entry.schema), operation, body).await
}

async fn resource_api(
    db: DatabaseConnection,
    uploads: UploadConfig,
    method: Method,
    (resource, path_id): (String, Option<String>),
    query: HashMap<String, String>,
    body: RawBody,
) -> AppResult<Response> {
    let schema = resources::find(&resource).ok_or_else(AppError::resource_not_found)?;

    let id = request_id(path_id, &query, &body);
    let operation = Operation::resolve(&method, id.as_deref())?;
    run(RecordService::new(db, uploads, schema), operation, body).await
}

/// List records, or fetch one with `?id=`.
#[utoipa::path(
    get,
    path = "/api/v1/{resource}",
    params(
        ("resource" = String, Path, description = "Resource key, e.g. clubs"),
        ("id" = Option<i32>, Query, description = "Fetch a single record")
    ),
    responses(
        (status = 200, description = "Records (or one record with ?id=)", body = serde_json::Value),
        (status = 404, description = "Unknown resource or record", body = crate::error::ErrorResponse)
    ),
    tag = "resources"
)]
pub async fn list_records(
    Extension(db): Extension<DatabaseConnection>,
    Extension(uploads): Extension<UploadConfig>,
    Path(resource): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    body: RawBody,
) -> AppResult<Response> {
    resource_api(db, uploads, Method::GET, (resource, None), query, body).await
}

/// Create a record; with an `id` (query or body) the call updates instead.
#[utoipa::path(
    post,
    path = "/api/v1/{resource}",
    params(("resource" = String, Path, description = "Resource key")),
    request_body(content = serde_json::Value, description = "JSON, urlencoded or multipart fields"),
    responses(
        (status = 201, description = "Created record with message", body = serde_json::Value),
        (status = 200, description = "Updated record with message", body = serde_json::Value),
        (status = 400, description = "Missing required fields", body = crate::error::ErrorResponse),
        (status = 413, description = "File too large", body = crate::error::ErrorResponse)
    ),
    tag = "resources"
)]
pub async fn submit_record(
    Extension(db): Extension<DatabaseConnection>,
    Extension(uploads): Extension<UploadConfig>,
    Path(resource): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    body: RawBody,
) -> AppResult<Response> {
    resource_api(db, uploads, Method::POST, (resource, None), query, body).await
}

/// PUT or DELETE on the collection path; succeeds only with `?id=` or a body id.
pub async fn collection_by_query_id(
    Extension(db): Extension<DatabaseConnection>,
    Extension(uploads): Extension<UploadConfig>,
    method: Method,
    Path(resource): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    body: RawBody,
) -> AppResult<Response> {
    resource_api(db, uploads, method, (resource, None), query, body).await
}

/// Fetch one record.
#[utoipa::path(
    get,
    path = "/api/v1/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "Resource key"),
        ("id" = i32, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Record", body = serde_json::Value),
        (status = 400, description = "Invalid ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown resource or record", body = crate::error::ErrorResponse)
    ),
    tag = "resources"
)]
pub async fn get_record(
    Extension(db): Extension<DatabaseConnection>,
    Extension(uploads): Extension<UploadConfig>,
    Path((resource, id)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    body: RawBody,
) -> AppResult<Response> {
    resource_api(db, uploads, Method::GET, (resource, Some(id)), query, body).await
}

/// Partially update a record. POST on the item path behaves the same.
#[utoipa::path(
    put,
    path = "/api/v1/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "Resource key"),
        ("id" = i32, Path, description = "Record id")
    ),
    request_body(content = serde_json::Value, description = "Fields to change"),
    responses(
        (status = 200, description = "Updated record with message", body = serde_json::Value),
        (status = 400, description = "Invalid ID or blank required field", body = crate::error::ErrorResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse)
    ),
    tag = "resources"
)]
pub async fn update_record(
    Extension(db): Extension<DatabaseConnection>,
    Extension(uploads): Extension<UploadConfig>,
    Path((resource, id)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    body: RawBody,
) -> AppResult<Response> {
    resource_api(db, uploads, Method::PUT, (resource, Some(id)), query, body).await
}

/// Delete a record with its children and files.
#[utoipa::path(
    delete,
    path = "/api/v1/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "Resource key"),
        ("id" = i32, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse)
    ),
    tag = "resources"
)]
pub async fn delete_record(
    Extension(db): Extension<DatabaseConnection>,
    Extension(uploads): Extension<UploadConfig>,
    Path((resource, id)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    body: RawBody,
) -> AppResult<Response> {
    resource_api(db, uploads, Method::DELETE, (resource, Some(id)), query, body).await
}

pub async fn preflight() -> Response {
    ApiResponse::empty().into_response()
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
