use crate::config::UploadConfig;
use crate::error::{AppError, AppResult};
use crate::models::{FilePart, ImageSource};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use uuid::Uuid;

/// Prefix of every stored path; the directory itself is `UploadConfig::upload_dir`.
pub const UPLOAD_PREFIX: &str = "uploads/";

const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Validate file magic bytes match the declared content type.
fn validate_magic_bytes(data: &[u8], content_type: &str) -> bool {
    match content_type {
        "image/jpeg" => data.len() >= 3 && data[..3] == [0xFF, 0xD8, 0xFF],
        "image/png" => data.len() >= 4 && data[..4] == [0x89, 0x50, 0x4E, 0x47],
        "image/gif" => data.len() >= 4 && data[..4] == [0x47, 0x49, 0x46, 0x38],
        "image/webp" => {
            data.len() >= 12
                && data[..4] == [0x52, 0x49, 0x46, 0x46]
                && data[8..12] == [0x57, 0x45, 0x42, 0x50]
        }
        _ => false,
    }
}

fn content_type_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Extension from the client file name when it names the validated type,
/// else the canonical one for `content_type`.
fn upload_extension(part: &FilePart, content_type: &str) -> String {
    let from_name = part
        .file_name
        .as_deref()
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| content_type_for_extension(ext) == Some(content_type));

    from_name.unwrap_or_else(|| {
        match content_type {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            _ => "webp",
        }
        .to_string()
    })
}

fn content_mismatch() -> AppError {
    AppError::Upload("File content does not match declared content type".to_string())
}

/// A file referenced by a record after ingest.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// `uploads/<file_name>` or the untouched existing reference.
    pub path: String,
    pub file_name: String,
    pub size: Option<u64>,
    /// Written by this request; removed again if the DB write fails.
    pub fresh: bool,
}

impl StoredFile {
    fn existing(path: &str) -> Self {
        let file_name = path.rsplit('/').next().unwrap_or(path).to_string();
        Self {
            path: path.to_string(),
            file_name,
            size: None,
            fresh: false,
        }
    }
}

pub struct UploadService;

impl UploadService {
    /// Turn a submitted image into a stored path. Existing references pass
    /// through untouched; inline and multipart payloads are written to disk as
    /// `<type_tag>_<uuid>.<ext>`.
    pub async fn ingest(
        config: &UploadConfig,
        source: &ImageSource,
        type_tag: &str,
    ) -> AppResult<StoredFile> {
        match source {
            ImageSource::Existing(path) => Ok(StoredFile::existing(path)),
            ImageSource::Inline(image) => {
                let valid = content_type_for_extension(&image.extension)
                    .is_some_and(|content_type| validate_magic_bytes(&image.bytes, content_type));
                if !valid {
                    return Err(content_mismatch());
                }
                Self::write(config, &image.bytes, &image.extension, type_tag).await
            }
            ImageSource::Upload(part) => {
                let content_type = part.content_type.to_ascii_lowercase();
                if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
                    return Err(AppError::Upload(format!(
                        "Invalid file type: {}. Allowed: jpeg, png, gif, webp",
                        part.content_type
                    )));
                }

                if !validate_magic_bytes(&part.data, &content_type) {
                    return Err(content_mismatch());
                }

                let extension = upload_extension(part, &content_type);
                Self::write(config, &part.data, &extension, type_tag).await
            }
        }
    }

    async fn write(
        config: &UploadConfig,
        data: &[u8],
        extension: &str,
        type_tag: &str,
    ) -> AppResult<StoredFile> {
        if data.len() > config.max_file_bytes {
            return Err(AppError::PayloadTooLarge);
        }

        let file_name = format!("{}_{}.{}", type_tag, Uuid::new_v4().simple(), extension);
        let dir = Path::new(&config.upload_dir);

        fs::create_dir_all(dir).await.map_err(|e| {
            AppError::Upload(format!("Failed to create upload directory: {}", e))
        })?;

        fs::write(dir.join(&file_name), data)
            .await
            .map_err(|e| AppError::Upload(format!("Failed to write file: {}", e)))?;

        tracing::debug!("Stored upload {} ({} bytes)", file_name, data.len());

        Ok(StoredFile {
            path: format!("{}{}", UPLOAD_PREFIX, file_name),
            file_name,
            size: Some(data.len() as u64),
            fresh: true,
        })
    }

    /// Best-effort removal of a stored path. References outside `uploads/`
    /// (external URLs, nested paths) are left alone.
    pub async fn remove(config: &UploadConfig, path: &str) {
        let Some(file_name) = path.strip_prefix(UPLOAD_PREFIX) else {
            return;
        };
        if file_name.is_empty()
            || file_name.contains(['/', '\\'])
            || file_name.starts_with('.')
        {
            return;
        }

        match fs::remove_file(Path::new(&config.upload_dir).join(file_name)).await {
            Ok(()) => tracing::debug!("Removed upload {}", file_name),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove upload {}: {}", file_name, e),
        }
    }

    pub async fn remove_all<'a, I>(config: &UploadConfig, paths: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for path in paths {
            Self::remove(config, path).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::upload::DEFAULT_MAX_UPLOAD_BYTES;
    use crate::models::InlineImage;
    use axum::body::Bytes;

    const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn config(dir: &Path) -> UploadConfig {
        UploadConfig {
            upload_dir: dir.to_string_lossy().into_owned(),
            public_base_url: "http://localhost:3000".to_string(),
            max_file_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    fn part(content_type: &str, file_name: Option<&str>, data: &'static [u8]) -> FilePart {
        FilePart {
            field: "file".to_string(),
            file_name: file_name.map(str::to_string),
            content_type: content_type.to_string(),
            data: Bytes::from_static(data),
        }
    }

    #[test]
    fn jpeg_magic_bytes_valid() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert!(validate_magic_bytes(&data, "image/jpeg"));
    }

    #[test]
    fn png_magic_bytes_valid() {
        assert!(validate_magic_bytes(PNG, "image/png"));
    }

    #[test]
    fn webp_magic_bytes_valid() {
        let data = [
            0x52, 0x49, 0x46, 0x46, // RIFF
            0x00, 0x00, 0x00, 0x00, // size
            0x57, 0x45, 0x42, 0x50, // WEBP
        ];
        assert!(validate_magic_bytes(&data, "image/webp"));
    }

    #[test]
    fn wrong_magic_bytes_rejected() {
        assert!(!validate_magic_bytes(PNG, "image/jpeg"));
        assert!(!validate_magic_bytes(&[], "image/png"));
        assert!(!validate_magic_bytes(&[0xFF, 0xD8, 0xFF], "application/pdf"));
    }

    #[test]
    fn extension_prefers_file_name_then_mime() {
        let ext = |content_type: &str, name: Option<&str>| {
            upload_extension(&part(content_type, name, PNG), content_type)
        };
        assert_eq!(ext("image/png", Some("Logo.PNG")), "png");
        assert_eq!(ext("image/jpeg", Some("photo.jpeg")), "jpeg");
        assert_eq!(ext("image/jpeg", Some("photo")), "jpg");
        assert_eq!(ext("image/gif", None), "gif");
    }

    #[test]
    fn file_name_extension_must_match_content_type() {
        let ext = |content_type: &str, name: &str| {
            upload_extension(&part(content_type, Some(name), PNG), content_type)
        };
        assert_eq!(ext("image/png", "x.html"), "png");
        assert_eq!(ext("image/png", "x.svg"), "png");
        assert_eq!(ext("image/png", "x.jpg"), "png");
        assert_eq!(ext("image/webp", "x.php"), "webp");
    }

    #[tokio::test]
    async fn inline_payload_must_match_its_subtype() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let source = ImageSource::Inline(InlineImage {
            extension: "png".to_string(),
            bytes: b"<script>alert(1)</script>".to_vec(),
        });

        let err = UploadService::ingest(&config, &source, "banner").await.unwrap_err();

        assert!(matches!(err, AppError::Upload(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn html_named_upload_is_stored_as_png() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let source = ImageSource::Upload(part("image/png", Some("x.html"), PNG));

        let stored = UploadService::ingest(&config, &source, "banner").await.unwrap();

        assert!(stored.path.ends_with(".png"));
    }

    #[tokio::test]
    async fn inline_image_is_written_with_type_tag() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let source = ImageSource::Inline(InlineImage {
            extension: "png".to_string(),
            bytes: PNG.to_vec(),
        });

        let stored = UploadService::ingest(&config, &source, "thumbnail").await.unwrap();

        assert!(stored.fresh);
        assert!(stored.path.starts_with("uploads/thumbnail_"));
        assert!(stored.path.ends_with(".png"));
        assert_eq!(stored.size, Some(PNG.len() as u64));
        assert!(dir.path().join(&stored.file_name).exists());
    }

    #[tokio::test]
    async fn disallowed_mime_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let source = ImageSource::Upload(part("application/pdf", Some("cv.pdf"), b"%PDF-1.4"));

        let err = UploadService::ingest(&config, &source, "recruiter").await.unwrap_err();

        assert!(matches!(err, AppError::Upload(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn oversized_payload_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path());
        config.max_file_bytes = 4;
        let source = ImageSource::Upload(part("image/png", Some("a.png"), PNG));

        let err = UploadService::ingest(&config, &source, "banner").await.unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge));
    }

    #[tokio::test]
    async fn existing_reference_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let source = ImageSource::Existing("uploads/gallery_old.jpg".to_string());

        let stored = UploadService::ingest(&config, &source, "gallery").await.unwrap();

        assert!(!stored.fresh);
        assert_eq!(stored.path, "uploads/gallery_old.jpg");
        assert_eq!(stored.file_name, "gallery_old.jpg");
    }

    #[tokio::test]
    async fn remove_ignores_paths_outside_upload_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let outside = dir.path().join("keep.txt");
        std::fs::write(&outside, b"x").unwrap();

        UploadService::remove(&config, "uploads/../keep.txt").await;
        UploadService::remove(&config, "/etc/passwd").await;
        UploadService::remove(&config, "uploads/missing.png").await;

        assert!(outside.exists());
    }

    #[tokio::test]
    async fn remove_deletes_stored_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        std::fs::write(dir.path().join("banner_1.png"), PNG).unwrap();

        UploadService::remove(&config, "uploads/banner_1.png").await;

        assert!(!dir.path().join("banner_1.png").exists());
    }
}
