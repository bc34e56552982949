use crate::error::AppError;
use crate::models::{FilePart, RawBody};
use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form,
};
use serde_json::Value;

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Upload(format!("File upload error: {}", e))
    }
}

/// Reads multipart, urlencoded or JSON bodies into a `RawBody`.
/// Anything that is not a form is treated as JSON; an empty body is `Empty`.
impl<S> FromRequest<S> for RawBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::Upload(format!("File upload error: {}", e)))?;

            let mut fields = Vec::new();
            let mut files = Vec::new();
            while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
                let name = field.name().unwrap_or_default().to_string();

                match field.file_name().map(str::to_string) {
                    Some(file_name) => {
                        let content_type = field
                            .content_type()
                            .unwrap_or("application/octet-stream")
                            .to_string();
                        let data = field.bytes().await.map_err(multipart_error)?;
                        // Browsers send an empty part for an untouched file input.
                        if file_name.is_empty() && data.is_empty() {
                            continue;
                        }
                        files.push(FilePart {
                            field: name,
                            file_name: Some(file_name).filter(|n| !n.is_empty()),
                            content_type,
                            data,
                        });
                    }
                    None => {
                        let text = field.text().await.map_err(multipart_error)?;
                        fields.push((name, text));
                    }
                }
            }

            return Ok(RawBody::Form { fields, files });
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            return Ok(RawBody::Form {
                fields,
                files: Vec::new(),
            });
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge
            } else {
                AppError::Validation(e.body_text())
            }
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(RawBody::Empty);
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(RawBody::Json(map)),
            Ok(_) => Err(AppError::Validation(
                "Request body must be a JSON object".to_string(),
            )),
            Err(e) => Err(AppError::Validation(format!("Invalid JSON body: {}", e))),
        }
    }
}
