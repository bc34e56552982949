use serde_json::{Map, Value};
use std::collections::HashMap;
use std::str::FromStr;

use super::image::{FilePart, ImageSource};
use crate::error::{AppError, AppResult};
use crate::resources::{ChildCollection, ChildKind, ResourceSchema};

/// A request body as received, before it is matched against a schema.
#[derive(Debug, Default)]
pub enum RawBody {
    #[default]
    Empty,
    Json(Map<String, Value>),
    /// Urlencoded or multipart; urlencoded bodies have no files.
    Form {
        fields: Vec<(String, String)>,
        files: Vec<FilePart>,
    },
}

impl RawBody {
    /// The `id` carried in the body, used for POST method override.
    pub fn id(&self) -> Option<String> {
        match self {
            RawBody::Empty => None,
            RawBody::Json(map) => map.get("id").and_then(json_text),
            RawBody::Form { fields, .. } => last_value(fields, "id").map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryMode {
    Replace,
    Preserve,
}

impl FromStr for GalleryMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(GalleryMode::Replace),
            "preserve" => Ok(GalleryMode::Preserve),
            other => Err(AppError::Validation(format!(
                "Invalid gallery_mode '{}': expected 'replace' or 'preserve'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ChildItems {
    Text(Vec<String>),
    Images(Vec<ImageSource>),
}

/// A body interpreted against one resource schema. Only keys the schema knows
/// are kept; absent keys stay absent so updates can be partial.
#[derive(Debug, Default)]
pub struct Submission {
    pub fields: HashMap<&'static str, String>,
    pub files: HashMap<&'static str, ImageSource>,
    pub children: HashMap<&'static str, ChildItems>,
    pub gallery_mode: Option<GalleryMode>,
}

impl Submission {
    pub fn parse(schema: &ResourceSchema, body: RawBody) -> AppResult<Self> {
        let mut submission = Submission::default();
        match body {
            RawBody::Empty => {}
            RawBody::Json(map) => submission.read_json(schema, &map)?,
            RawBody::Form { fields, files } => submission.read_form(schema, &fields, files)?,
        }
        Ok(submission)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn read_json(&mut self, schema: &ResourceSchema, map: &Map<String, Value>) -> AppResult<()> {
        for field in schema.fields {
            if let Some(text) = map.get(field.name).and_then(json_text) {
                self.fields.insert(field.name, text);
            }
        }

        for slot in schema.files {
            if let Some(value) = map.get(slot.input) {
                if let Some(source) = ImageSource::from_json(value)? {
                    self.files.insert(slot.input, source);
                }
            }
        }

        for collection in schema.children {
            let items = match map.get(collection.key) {
                None => continue,
                Some(Value::Null) => &[][..],
                Some(Value::Array(items)) => items.as_slice(),
                Some(_) => {
                    return Err(AppError::Validation(format!(
                        "'{}' must be an array",
                        collection.key
                    )))
                }
            };
            let parsed = match collection.kind {
                ChildKind::Text => {
                    ChildItems::Text(items.iter().filter_map(json_text).filter(not_blank).collect())
                }
                ChildKind::Image { .. } => ChildItems::Images(
                    items
                        .iter()
                        .filter_map(|item| ImageSource::from_json(item).transpose())
                        .collect::<AppResult<_>>()?,
                ),
            };
            self.children.insert(collection.key, parsed);
        }

        self.gallery_mode = map
            .get("gallery_mode")
            .and_then(json_text)
            .map(|mode| mode.parse())
            .transpose()?;
        Ok(())
    }

    fn read_form(
        &mut self,
        schema: &ResourceSchema,
        fields: &[(String, String)],
        mut files: Vec<FilePart>,
    ) -> AppResult<()> {
        for field in schema.fields {
            if let Some(value) = last_value(fields, field.name) {
                self.fields.insert(field.name, value.to_string());
            }
        }

        for slot in schema.files {
            if let Some(index) = files.iter().position(|part| part.field == slot.input) {
                self.files
                    .insert(slot.input, ImageSource::Upload(files.remove(index)));
            } else if let Some(value) = last_value(fields, slot.input).filter(|v| not_blank(v)) {
                self.files.insert(slot.input, ImageSource::from_reference(value)?);
            }
        }

        for collection in schema.children {
            let texts = repeated_values(fields, collection);
            let parsed = match collection.kind {
                ChildKind::Text => {
                    if texts.is_empty() {
                        continue;
                    }
                    ChildItems::Text(expand_text_items(&texts))
                }
                ChildKind::Image { .. } => {
                    let (parts, rest): (Vec<_>, Vec<_>) = files
                        .into_iter()
                        .partition(|part| matches_collection(&part.field, collection));
                    files = rest;
                    if texts.is_empty() && parts.is_empty() {
                        continue;
                    }
                    let mut items = texts
                        .iter()
                        .filter(|v| not_blank(v))
                        .map(|v| ImageSource::from_reference(v))
                        .collect::<AppResult<Vec<_>>>()?;
                    items.extend(parts.into_iter().map(ImageSource::Upload));
                    ChildItems::Images(items)
                }
            };
            self.children.insert(collection.key, parsed);
        }

        self.gallery_mode = last_value(fields, "gallery_mode")
            .filter(|v| not_blank(v))
            .map(str::parse)
            .transpose()?;
        Ok(())
    }
}

fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn not_blank<S: AsRef<str>>(value: &S) -> bool {
    !value.as_ref().trim().is_empty()
}

fn last_value<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .rev()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn matches_collection(key: &str, collection: &ChildCollection) -> bool {
    key == collection.key || key.strip_suffix("[]") == Some(collection.key)
}

fn repeated_values<'a>(fields: &'a [(String, String)], collection: &ChildCollection) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(key, _)| matches_collection(key, collection))
        .map(|(_, value)| value.as_str())
        .collect()
}

/// Form clients either repeat `tags` or send one JSON-encoded array.
fn expand_text_items(values: &[&str]) -> Vec<String> {
    if let [single] = values {
        if single.trim_start().starts_with('[') {
            if let Ok(items) = serde_json::from_str::<Vec<String>>(single) {
                return items.into_iter().filter(not_blank).collect();
            }
        }
    }
    values
        .iter()
        .filter(|v| not_blank(v))
        .map(|v| v.trim().to_string())
        .collect()
}
