use axum::body::Bytes;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::utils::data_uri;

/// A decoded `data:image/<subtype>;base64,...` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub extension: String,
    pub bytes: Vec<u8>,
}

/// One file part of a multipart body.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: String,
    pub data: Bytes,
}

/// Where a submitted image comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Base64 data URI sent in a text field.
    Inline(InlineImage),
    /// Multipart file part.
    Upload(FilePart),
    /// A path previously returned by the API; only valid for files the record already holds.
    Existing(String),
}

impl ImageSource {
    /// True when the source carries bytes that still have to be written.
    pub fn is_new(&self) -> bool {
        !matches!(self, ImageSource::Existing(_))
    }

    /// A `data:` string is an inline upload; anything else references a stored file.
    pub fn from_reference(raw: &str) -> AppResult<Self> {
        let raw = raw.trim();
        if raw.starts_with("data:") {
            Ok(ImageSource::Inline(data_uri::parse(raw)?))
        } else {
            Ok(ImageSource::Existing(raw.to_string()))
        }
    }

    /// Accepts a plain string or a tagged `{"upload": ...}` / `{"existing": ...}` object.
    /// Blank strings and `null` mean "nothing submitted".
    pub fn from_json(value: &Value) -> AppResult<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => Self::from_reference(s).map(Some),
            Value::Object(map) => {
                if let Some(Value::String(payload)) = map.get("upload") {
                    return Ok(Some(ImageSource::Inline(data_uri::parse(payload)?)));
                }
                if let Some(Value::String(path)) = map.get("existing") {
                    return Ok(Some(ImageSource::Existing(path.trim().to_string())));
                }
                Err(AppError::Validation(
                    "Image object must contain 'upload' or 'existing'".to_string(),
                ))
            }
            _ => Err(AppError::Validation("Invalid image value".to_string())),
        }
    }
}
