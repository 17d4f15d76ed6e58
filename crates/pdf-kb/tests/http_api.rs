//! End-to-end tests over the HTTP routes

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{files_in, json_body, multipart_request, pdf_with_pages, TestApp};
use pdf_kb::storage::VectorStore;
use serde_json::json;

const ATLAS: [&str; 3] = [
    "Introduction to the atlas and its regional maps",
    "Zebra migration patterns across the Serengeti plains",
    "Glossary of cartographic terms and symbols",
];

#[tokio::test]
async fn test_health_and_index() {
    let app = TestApp::new();

    let response = app
        .send(Request::get("/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.send(Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("<form id=\"upload\""));
}

#[tokio::test]
async fn test_upload_then_search_reports_one_based_page() {
    let app = TestApp::new();

    let (status, body) = app.upload("atlas.pdf", &pdf_with_pages(&ATLAS)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Imported: atlas.pdf (3 chunks)");
    assert_eq!(files_in(&app.upload_dir), vec!["atlas.pdf".to_string()]);

    let (status, body) = app
        .search(json!({"query": "zebra migration patterns", "mode": "vector"}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["rank"], 1);
    assert_eq!(results[0]["source"], "atlas.pdf");
    assert_eq!(results[0]["page"], 2);
    assert!(results[0]["content"]
        .as_str()
        .unwrap()
        .contains("Zebra migration patterns"));
    assert!(results[0]["score"].as_f64().unwrap() > results[1]["score"].as_f64().unwrap());
}

#[tokio::test]
async fn test_search_top_k_and_default_mode() {
    let app = TestApp::new();
    app.upload("atlas.pdf", &pdf_with_pages(&ATLAS)).await;

    let (status, body) = app.search(json!({"query": "cartographic glossary", "top_k": 1})).await;
    assert_eq!(status, StatusCode::OK);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["page"], 3);
}

#[tokio::test]
async fn test_upload_sanitizes_filename() {
    let app = TestApp::new();

    let (status, body) = app
        .upload("../../my atlas.pdf", &pdf_with_pages(&ATLAS[..1]))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Imported: my_atlas.pdf (1 chunks)");
    assert_eq!(files_in(&app.upload_dir), vec!["my_atlas.pdf".to_string()]);
}

#[tokio::test]
async fn test_upload_rejects_non_pdf_without_writing() {
    let app = TestApp::new();

    for name in ["notes.txt", "archive.pdf.zip", "pdf", "报告.pdf"] {
        let (status, body) = app.upload(name, b"%PDF-1.4 not important").await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{name}");
        assert_eq!(body["kind"], "validation_error");
    }
    assert!(files_in(&app.upload_dir).is_empty());
}

#[tokio::test]
async fn test_upload_missing_file() {
    let app = TestApp::new();

    let response = app.send(multipart_request("attachment", "atlas.pdf", b"data")).await;
    let (status, body) = json_body(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation_error");

    let (status, body) = app.upload("", b"data").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file selected");
}

#[tokio::test]
async fn test_upload_over_size_limit() {
    let app = TestApp::with_config(|config| config.server.max_upload_size = 1024);

    let (status, body) = app.upload("big.pdf", &vec![b'x'; 10 * 1024]).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["kind"], "payload_too_large");
    assert_eq!(body["error"], "File too large (limit is 1024 bytes)");
    assert!(files_in(&app.upload_dir).is_empty());
}

#[tokio::test]
async fn test_upload_corrupt_pdf_is_server_error() {
    let app = TestApp::new();

    let (status, body) = app.upload("broken.pdf", b"%PDF-1.7 truncated").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "parse_error");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Import failed: broken.pdf"));
}

#[tokio::test]
async fn test_empty_query_rejected_in_every_mode() {
    let app = TestApp::new();

    for body in [
        json!({"query": "", "mode": "vector"}),
        json!({"query": "   ", "mode": "llm"}),
        json!({"mode": "vector"}),
    ] {
        let (status, response) = app.search(body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "Query is empty");
    }
    assert!(app.llm.prompts.lock().is_empty());
}

#[tokio::test]
async fn test_malformed_search_body() {
    let app = TestApp::new();

    let (status, body) = app.search(json!({"query": "maps", "mode": "telepathy"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation_error");

    let request = Request::post("/search")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = json_body(app.send(request).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_null_mode_searches_vectors() {
    let app = TestApp::new();

    let (status, body) = app.search(json!({"query": "x", "mode": null})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"results": []}));
    assert!(app.llm.prompts.lock().is_empty());
}

#[tokio::test]
async fn test_search_on_empty_store() {
    let app = TestApp::new();

    let (status, body) = app.search(json!({"query": "anything", "mode": "vector"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"results": []}));
}

#[tokio::test]
async fn test_llm_mode_answers_with_sources() {
    let app = TestApp::new();
    app.upload("atlas.pdf", &pdf_with_pages(&ATLAS)).await;

    let (status, body) = app
        .search(json!({"query": "Where do zebra migration patterns occur?", "mode": "llm"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "The answer is in the documents.");

    let sources = body["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 3);
    assert_eq!(sources[0], json!({"source": "atlas.pdf", "page": 2}));

    let prompts = app.llm.prompts.lock();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Zebra migration patterns"));
    assert!(prompts[0].contains("Where do zebra migration patterns occur?"));
}

#[tokio::test]
async fn test_llm_mode_on_empty_store() {
    let app = TestApp::new();

    let (status, body) = app.search(json!({"query": "anything", "mode": "llm"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sources"], json!([]));
    assert_eq!(app.llm.prompts.lock().len(), 1);
}

#[tokio::test]
async fn test_batch_import_creates_missing_directory() {
    let app = TestApp::new();
    assert!(!app.upload_dir.exists());

    let (status, body) = app.batch_import().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"results": []}));
    assert!(app.upload_dir.is_dir());
}

#[tokio::test]
async fn test_batch_import_reports_every_file() {
    let app = TestApp::new();
    std::fs::create_dir_all(&app.upload_dir).unwrap();
    std::fs::write(app.upload_dir.join("one.pdf"), pdf_with_pages(&ATLAS[..1])).unwrap();
    std::fs::write(app.upload_dir.join("two.PDF"), pdf_with_pages(&ATLAS[1..])).unwrap();
    std::fs::write(app.upload_dir.join("bad.pdf"), b"garbage").unwrap();
    std::fs::write(app.upload_dir.join("empty.pdf"), b"").unwrap();
    std::fs::write(app.upload_dir.join("notes.txt"), b"skipped").unwrap();

    let (status, body) = app.batch_import().await;
    assert_eq!(status, StatusCode::OK);

    let results: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap())
        .collect();
    assert_eq!(results.len(), 4);

    let failed: Vec<_> = results.iter().filter(|r| r.starts_with("Import failed")).collect();
    assert_eq!(failed.len(), 2);
    assert!(results.contains(&"Imported: one.pdf (1 chunks)"));
    assert!(results.contains(&"Imported: two.PDF (2 chunks)"));

    let (_, body) = app.search(json!({"query": "glossary"})).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_reimport_creates_duplicates_with_distinct_times() {
    let app = TestApp::new();
    let data = pdf_with_pages(&ATLAS[..1]);

    let (first, _) = app.upload("atlas.pdf", &data).await;
    let (second, _) = app.upload("atlas.pdf", &data).await;
    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);

    let store = VectorStore::open(&app.persist_dir).unwrap();
    let metadata = store.metadata_for_source("atlas.pdf").unwrap();
    assert_eq!(metadata.len(), 2);
    assert_ne!(metadata[0].import_time, metadata[1].import_time);
}

#[tokio::test]
async fn test_store_survives_restart() {
    let app = TestApp::new();
    app.upload("atlas.pdf", &pdf_with_pages(&ATLAS)).await;

    let store = VectorStore::open(&app.persist_dir).unwrap();
    assert_eq!(store.len().unwrap(), 3);
}
