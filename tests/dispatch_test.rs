mod common;

use common::*;
use serde_json::json;

#[tokio::test]
async fn test_options_is_empty_ok() {
    let app = spawn_app().await;

    for path in ["/indexBanner.php", "/index2.php", "/api/v1/clubs", "/api/v1/clubs/3"] {
        let resp = app
            .client
            .request(reqwest::Method::OPTIONS, app.url(path))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200, "{}", path);
        assert!(resp.bytes().await.unwrap().is_empty(), "{}", path);
    }
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = spawn_app().await;

    let resp = app
        .client
        .get(app.url("/indexBanner.php"))
        .header("Origin", "https://www.example.edu")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_unsupported_method_is_405() {
    let app = spawn_app().await;

    for path in ["/indexBanner.php?id=1", "/api/v1/banners/1"] {
        let resp = app
            .client
            .patch(app.url(path))
            .json(&json!({ "title": "x" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 405, "{}", path);
        assert_eq!(json_body(resp).await["error"], "Method not allowed");
    }
}

#[tokio::test]
async fn test_put_and_delete_require_id() {
    let app = spawn_app().await;

    let resp = app
        .client
        .put(app.url("/indexFaculty.php"))
        .json(&json!({ "title": "Dr. Rao" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(json_body(resp).await["error"], "Missing ID");

    let resp = app
        .client
        .delete(app.url("/indexFaculty.php"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(json_body(resp).await["error"], "Missing ID");
}

#[tokio::test]
async fn test_malformed_id_is_rejected() {
    let app = spawn_app().await;

    let resp = app
        .client
        .get(app.url("/indexFaculty.php?id=abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(json_body(resp).await["error"], "Invalid ID");
}

#[tokio::test]
async fn test_unknown_resource_is_not_found() {
    let app = spawn_app().await;

    let resp = app
        .client
        .get(app.url("/api/v1/alumni"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(json_body(resp).await["error"], "Resource Not Found");
}

#[tokio::test]
async fn test_events_entry_requires_matching_resource() {
    let app = spawn_app().await;

    let resp = app
        .client
        .get(app.url("/index2.php?resource=events"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(json_body(resp).await, json!([]));

    let resp = app
        .client
        .get(app.url("/index2.php?resource=clubs"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_path_api_round_trip() {
    let app = spawn_app().await;

    let resp = app
        .client
        .post(app.url("/api/v1/placement"))
        .json(&json!({
            "title": "Jane Doe",
            "year": "2024",
            "file": png_data_uri(),
            "logo_file": png_data_uri(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created = json_body(resp).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["message"], "Placement data uploaded successfully");
    assert_eq!(created["category"], "Uncategorized");
    assert!(created["logo_file"].as_str().unwrap().starts_with("uploads/logo_"));
    assert!(created["logo_url"].as_str().unwrap().starts_with(PUBLIC_BASE_URL));

    let resp = app
        .client
        .put(app.url(&format!("/api/v1/placement/{}", id)))
        .json(&json!({ "link": "https://linkedin.example/jane" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated = json_body(resp).await;
    assert_eq!(updated["link"], "https://linkedin.example/jane");
    assert_eq!(updated["logo_file"], created["logo_file"]);

    let resp = app
        .client
        .get(app.url(&format!("/api/v1/placement/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(json_body(resp).await["title"], "Jane Doe");

    let resp = app
        .client
        .delete(app.url(&format!("/api/v1/placement/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        json_body(resp).await["message"],
        "Placement data deleted successfully"
    );
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_catalog_lists_every_resource() {
    let app = spawn_app().await;

    let resp = app
        .client
        .get(app.url("/api/v1/resources"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body = json_body(resp).await;
    let resources = body.as_array().unwrap();
    assert_eq!(resources.len(), 10);

    let clubs = resources
        .iter()
        .find(|r| r["key"] == "clubs")
        .expect("clubs missing");
    assert_eq!(clubs["children"][0]["key"], "tags");
    assert_eq!(clubs["children"][1]["kind"], "image");
    assert!(clubs["categories"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c == "IT Club"));
}

#[tokio::test]
async fn test_health_check_reports_database() {
    let app = spawn_app().await;

    let resp = app.client.get(app.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body = json_body(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_options_ignores_malformed_body() {
    let app = spawn_app().await;

    for path in ["/indexBanner.php", "/index3.php", "/api/v1/clubs", "/api/v1/clubs/3"] {
        let resp = app
            .client
            .request(reqwest::Method::OPTIONS, app.url(path))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200, "{}", path);
        assert!(resp.bytes().await.unwrap().is_empty(), "{}", path);
    }
}

#[tokio::test]
async fn test_collection_path_update_needs_id() {
    let app = spawn_app().await;

    let resp = app
        .client
        .put(app.url("/api/v1/banners"))
        .json(&json!({ "title": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(json_body(resp).await["error"], "Missing ID");

    let resp = app
        .client
        .delete(app.url("/api/v1/banners/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(json_body(resp).await["error"], "Invalid ID");
}
