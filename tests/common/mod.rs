#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD, Engine as _};
use campus_cms::config::{upload::DEFAULT_MAX_UPLOAD_BYTES, AppConfig, DatabaseConfig, ServerConfig, UploadConfig};
use reqwest::{multipart, Client};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use std::path::PathBuf;
use tempfile::TempDir;

pub const PUBLIC_BASE_URL: &str = "http://cms.test";

/// PNG signature followed by an IHDR chunk header; enough for the magic-byte check.
pub const PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52,
];

pub struct TestApp {
    pub addr: String,
    pub db: DatabaseConnection,
    pub client: Client,
    pub upload_dir: PathBuf,
    // Keeps the database file and upload directory alive for the test.
    _tmp: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// Names of the files currently in the upload directory, sorted.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.upload_dir)
            .expect("Failed to read upload dir")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn file_exists(&self, stored_path: &str) -> bool {
        let name = stored_path
            .strip_prefix("uploads/")
            .expect("stored path should start with uploads/");
        self.upload_dir.join(name).exists()
    }

    pub async fn count_rows(&self, table: &str) -> i64 {
        let backend = self.db.get_database_backend();
        let row = self
            .db
            .query_one(Statement::from_string(
                backend,
                format!("SELECT COUNT(*) AS n FROM {}", table),
            ))
            .await
            .expect("Failed to count rows")
            .expect("COUNT returned no row");
        row.try_get::<i64>("", "n").expect("Failed to read count")
    }
}

pub async fn spawn_app() -> TestApp {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let upload_dir = tmp.path().join("uploads");
    std::fs::create_dir_all(&upload_dir).expect("Failed to create upload dir");

    let database_url = format!("sqlite://{}?mode=rwc", tmp.path().join("cms.db").display());
    let db = sea_orm::Database::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    campus_cms::migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let config = AppConfig {
        database: DatabaseConfig::with_url(database_url),
        server: ServerConfig::default(),
        upload: UploadConfig {
            upload_dir: upload_dir.to_string_lossy().into_owned(),
            public_base_url: PUBLIC_BASE_URL.to_string(),
            max_file_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        },
    };

    let app = campus_cms::routes::create_app(db.clone(), &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        addr: format!("http://{}", addr),
        db,
        client: Client::new(),
        upload_dir,
        _tmp: tmp,
    }
}

pub fn png_data_uri() -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(PNG))
}

pub fn png_part(file_name: &str) -> multipart::Part {
    multipart::Part::bytes(PNG.to_vec())
        .file_name(file_name.to_string())
        .mime_str("image/png")
        .unwrap()
}

/// Parse a JSON body, panicking with the status on failure.
pub async fn json_body(resp: reqwest::Response) -> serde_json::Value {
    let status = resp.status();
    resp.json()
        .await
        .unwrap_or_else(|e| panic!("Failed to parse response (status {}): {}", status, e))
}

pub fn string_list(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .expect("expected an array")
        .iter()
        .map(|v| v.as_str().expect("expected a string").to_string())
        .collect()
}
