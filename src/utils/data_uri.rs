use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{AppError, AppResult};
use crate::models::image::InlineImage;

fn invalid(reason: &str) -> AppError {
    AppError::Validation(format!("Invalid image data: {}", reason))
}

/// Subtypes accepted inline; each is also the stored file extension.
const ALLOWED_SUBTYPES: &[&str] = &["jpeg", "jpg", "png", "gif", "webp"];

/// Parse `data:image/<subtype>[;params];base64,<payload>`.
///
/// The extension is the lowercased MIME subtype, which must be one of
/// jpeg, jpg, png, gif or webp.
pub fn parse(raw: &str) -> AppResult<InlineImage> {
    let (header, payload) = raw
        .trim()
        .split_once(',')
        .ok_or_else(|| invalid("missing ',' separator"))?;

    let media = header
        .strip_prefix("data:image/")
        .ok_or_else(|| invalid("expected an image data URI"))?;

    let mut parts = media.split(';');
    let subtype = parts.next().unwrap_or_default().to_ascii_lowercase();
    if !ALLOWED_SUBTYPES.contains(&subtype.as_str()) {
        return Err(invalid("unsupported image subtype"));
    }
    if !parts.any(|p| p.eq_ignore_ascii_case("base64")) {
        return Err(invalid("payload must be base64 encoded"));
    }

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|_| invalid("payload is not valid base64"))?;
    if bytes.is_empty() {
        return Err(invalid("empty payload"));
    }

    Ok(InlineImage {
        extension: subtype,
        bytes,
    })
}
