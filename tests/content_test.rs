mod common;

use common::*;
use reqwest::multipart;
use serde_json::json;

#[tokio::test]
async fn test_event_lifecycle_via_shared_script() {
    let app = spawn_app().await;
    let events = "/index2.php?resource=events";

    let resp = app
        .client
        .post(app.url(events))
        .json(&json!({
            "title": "Convocation",
            "date": "2024-05-20",
            "category": "Events",
            "description": "Annual convocation",
            "image": png_data_uri(),
            "tags": ["ceremony"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created = json_body(resp).await;
    assert_eq!(created["message"], "Event created successfully");
    assert_eq!(string_list(&created["tags"]), vec!["ceremony"]);
    assert_eq!(string_list(&created["gallery"]), Vec::<String>::new());
    let id = created["id"].as_i64().unwrap();

    let resp = app
        .client
        .delete(app.url(&format!("{}&id={}", events, id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(app.count_rows("event_tags").await, 0);
}

#[tokio::test]
async fn test_event_tags_from_repeated_form_fields() {
    let app = spawn_app().await;

    let form = multipart::Form::new()
        .text("title", "Fest")
        .text("date", "2024-02-10")
        .text("category", "Events")
        .text("description", "Cultural fest")
        .text("tags[]", "music")
        .text("tags[]", "dance")
        .part("image", png_part("fest.png"))
        .part("gallery[]", png_part("one.png"))
        .part("gallery[]", png_part("two.png"));

    let resp = app
        .client
        .post(app.url("/index2.php?resource=events"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body = json_body(resp).await;
    assert_eq!(string_list(&body["tags"]), vec!["music", "dance"]);
    assert_eq!(string_list(&body["gallery"]).len(), 2);
    assert_eq!(app.stored_files().len(), 3);
}

#[tokio::test]
async fn test_faculty_default_category() {
    let app = spawn_app().await;

    let form = multipart::Form::new()
        .text("title", "Dr. Meera Iyer")
        .text("description", "Professor of Finance")
        .part("file", png_part("meera.png"));
    let resp = app
        .client
        .post(app.url("/indexFaculty.php"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body = json_body(resp).await;
    assert_eq!(body["message"], "Faculty added successfully");
    assert_eq!(body["category"], "Uncategorized");
    assert!(body["file_name"].as_str().unwrap().starts_with("uploads/faculty_"));
}

#[tokio::test]
async fn test_testimonial_requires_quote() {
    let app = spawn_app().await;

    let form = multipart::Form::new()
        .text("name", "Anita")
        .part("file", png_part("anita.png"));
    let resp = app
        .client
        .post(app.url("/indexTestimonial.php"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let form = multipart::Form::new()
        .text("name", "Anita")
        .text("testimonial", "Great campus life")
        .part("file", png_part("anita.png"));
    let resp = app
        .client
        .post(app.url("/indexTestimonial.php"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    assert_eq!(
        json_body(resp).await["message"],
        "Testimonial uploaded successfully"
    );
}

#[tokio::test]
async fn test_banner_needs_only_a_file() {
    let app = spawn_app().await;

    let form = multipart::Form::new().part("file", png_part("hero.png"));
    let resp = app
        .client
        .post(app.url("/indexBanner.php"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body = json_body(resp).await;
    assert_eq!(body["message"], "Banner uploaded successfully");
    assert!(body["url"].as_str().unwrap().starts_with(PUBLIC_BASE_URL));
}

#[tokio::test]
async fn test_edutour_update_and_delete() {
    let app = spawn_app().await;

    let resp = app
        .client
        .post(app.url("/indexEdutour.php"))
        .json(&json!({
            "title": "Industrial Visit",
            "subcategory": "Pune",
            "file": png_data_uri(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created = json_body(resp).await;
    assert_eq!(created["message"], "Tour uploaded successfully");
    let id = created["id"].as_i64().unwrap();

    let resp = app
        .client
        .put(app.url(&format!("/indexEdutour.php?id={}", id)))
        .json(&json!({ "subcategory": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated = json_body(resp).await;
    assert_eq!(updated["subcategory"], "");
    assert_eq!(updated["title"], "Industrial Visit");

    let resp = app
        .client
        .delete(app.url(&format!("/indexEdutour.php?id={}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(app.stored_files().is_empty());
}
