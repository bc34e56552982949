use anyhow::Result;

use super::{env_or, env_string};

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024; // 5 MB

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Flat directory shared by every resource.
    pub upload_dir: String,
    /// Prefix joined with stored `uploads/...` paths to form public URLs.
    pub public_base_url: String,
    pub max_file_bytes: usize,
}

impl UploadConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            upload_dir: env_string("UPLOAD_DIR", "./uploads"),
            public_base_url: env_string("PUBLIC_BASE_URL", "http://localhost:3000"),
            max_file_bytes: env_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }

    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_joins_with_single_slash() {
        let config = UploadConfig {
            upload_dir: "./uploads".into(),
            public_base_url: "https://cms.example.edu/api/".into(),
            max_file_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        };
        assert_eq!(
            config.public_url("uploads/banner_1.png"),
            "https://cms.example.edu/api/uploads/banner_1.png"
        );
    }
}
