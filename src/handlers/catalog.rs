use crate::resources::{self, ChildKind, ResourceSchema};
use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct FieldSummary {
    pub name: String,
    pub required: bool,
    pub default: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FileSlotSummary {
    pub input: String,
    pub column: String,
    pub url_key: String,
    pub required: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionSummary {
    pub key: String,
    /// `text` or `image`
    pub kind: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResourceSummary {
    pub key: String,
    pub label: String,
    pub path: String,
    pub fields: Vec<FieldSummary>,
    pub files: Vec<FileSlotSummary>,
    pub children: Vec<CollectionSummary>,
    pub categories: Vec<String>,
}

impl From<&ResourceSchema> for ResourceSummary {
    fn from(schema: &ResourceSchema) -> Self {
        Self {
            key: schema.key.to_string(),
            label: schema.label.to_string(),
            path: format!("/api/v1/{}", schema.key),
            fields: schema
                .fields
                .iter()
                .map(|f| FieldSummary {
                    name: f.name.to_string(),
                    required: f.required,
                    default: f.default.map(str::to_string),
                })
                .collect(),
            files: schema
                .files
                .iter()
                .map(|slot| FileSlotSummary {
                    input: slot.input.to_string(),
                    column: slot.column.to_string(),
                    url_key: slot.url_key.to_string(),
                    required: slot.required,
                })
                .collect(),
            children: schema
                .children
                .iter()
                .map(|c| CollectionSummary {
                    key: c.key.to_string(),
                    kind: match c.kind {
                        ChildKind::Text => "text",
                        ChildKind::Image { .. } => "image",
                    }
                    .to_string(),
                })
                .collect(),
            categories: schema.categories.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Describe every managed resource.
#[utoipa::path(
    get,
    path = "/api/v1/resources",
    responses(
        (status = 200, description = "Resource catalog", body = Vec<ResourceSummary>)
    ),
    tag = "resources"
)]
pub async fn list_resources() -> impl IntoResponse {
    let summaries: Vec<ResourceSummary> = resources::all()
        .iter()
        .map(|schema| ResourceSummary::from(*schema))
        .collect();
    Json(summaries)
}
