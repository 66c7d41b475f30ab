//! Upload, listing and deletion through the HTTP router

mod common;

use axum::http::{Request, StatusCode};
use std::sync::Arc;

use common::*;

fn app() -> axum::Router {
    router_with(Arc::new(ScriptedProvider::answering(&["ok"])))
}

#[tokio::test]
async fn single_upload_is_listed() {
    let app = app();
    let text = "Quarterly revenue grew twelve percent while costs stayed flat.";
    let req = upload_request("/api/upload", "document", &[("alpha.txt", "text/plain", text.as_bytes())]);

    let resp = send(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["fileName"], "alpha.txt");
    assert!(json["totalChunks"].as_u64().unwrap() >= 2);
    let id = json["documentId"].as_str().unwrap().to_string();

    let list = body_json(send(&app, get("/api/documents")).await).await;
    assert_eq!(list["documents"][0]["id"], id.as_str());
    assert_eq!(list["documents"][0]["fileName"], "alpha.txt");
    assert_eq!(list["documents"][0]["chunksCount"], json["totalChunks"]);

    let single = send(&app, get(&format!("/api/documents/{}", id))).await;
    assert_eq!(single.status(), StatusCode::OK);

    let health = body_json(send(&app, get("/api/health")).await).await;
    assert_eq!(health["documentsCount"], 1);
}

#[tokio::test]
async fn generic_mime_falls_back_to_extension() {
    let app = app();
    let req = upload_request(
        "/api/upload",
        "document",
        &[("notes.txt", "application/octet-stream", b"plain notes".as_slice())],
    );
    let resp = send(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["totalChunks"], 1);
}

#[tokio::test]
async fn unsupported_type_is_rejected() {
    let app = app();
    let req = upload_request("/api/upload", "document", &[("photo.png", "image/png", b"\x89PNG".as_slice())]);
    let resp = send(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = body_json(resp).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["type"], "unsupported_type");

    let health = body_json(send(&app, get("/api/health")).await).await;
    assert_eq!(health["documentsCount"], 0);
}

#[tokio::test]
async fn upload_without_file_field() {
    let app = app();
    let req = upload_request("/api/upload", "attachment", &[("a.txt", "text/plain", b"text".as_slice())]);
    let resp = send(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "No file uploaded");
}

#[tokio::test]
async fn sixth_upload_hits_capacity_until_a_delete() {
    let app = app();
    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(upload_text(&app, &format!("doc{}.txt", i), "some text").await);
    }

    let req = upload_request("/api/upload", "document", &[("sixth.txt", "text/plain", b"more".as_slice())]);
    let resp = send(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(
        json["error"],
        "Maximum 5 documents allowed. Please delete a document first."
    );

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/documents/{}", ids[0]))
        .body(axum::body::Body::empty())
        .unwrap();
    let resp = send(&app, delete).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["fileName"], "doc0.txt");

    upload_text(&app, "sixth.txt", "more").await;
    let list = body_json(send(&app, get("/api/documents")).await).await;
    let names: Vec<&str> = list["documents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["fileName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["doc1.txt", "doc2.txt", "doc3.txt", "doc4.txt", "sixth.txt"]);
}

#[tokio::test]
async fn batch_upload_reports_each_file() {
    let app = app();
    for i in 0..3 {
        upload_text(&app, &format!("doc{}.txt", i), "existing").await;
    }

    let req = upload_request(
        "/api/upload/multiple",
        "documents",
        &[
            ("a.txt", "text/plain", b"first".as_slice()),
            ("b.png", "image/png", b"\x89PNG".as_slice()),
            ("c.txt", "text/plain", b"third".as_slice()),
            ("d.txt", "text/plain", b"fourth".as_slice()),
        ],
    );
    let resp = send(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 4);

    assert_eq!(results[0]["success"], true);
    assert_eq!(results[0]["fileName"], "a.txt");
    assert!(results[0]["documentId"].is_string());

    assert_eq!(results[1]["success"], false);
    assert!(results[1]["error"].as_str().unwrap().contains("Invalid file type"));

    assert_eq!(results[2]["success"], true);

    // store is full after c.txt
    assert_eq!(results[3]["success"], false);
    assert!(results[3]["error"].as_str().unwrap().starts_with("Maximum 5 documents"));

    let health = body_json(send(&app, get("/api/health")).await).await;
    assert_eq!(health["documentsCount"], 5);
}

#[tokio::test]
async fn batch_upload_without_files() {
    let app = app();
    let req = upload_request("/api/upload/multiple", "document", &[("a.txt", "text/plain", b"x".as_slice())]);
    let resp = send(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["type"], "no_file");
}

#[tokio::test]
async fn batch_upload_limits_file_count() {
    let app = app();
    let files: Vec<(String, &str, &[u8])> = (0..11)
        .map(|i| (format!("f{}.txt", i), "text/plain", b"x".as_slice()))
        .collect();
    let parts: Vec<(&str, &str, &[u8])> = files
        .iter()
        .map(|(name, mime, data)| (name.as_str(), *mime, *data))
        .collect();

    let resp = send(&app, upload_request("/api/upload/multiple", "documents", &parts)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let health = body_json(send(&app, get("/api/health")).await).await;
    assert_eq!(health["documentsCount"], 0);
}
