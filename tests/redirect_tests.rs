//! Redirect service tests
//!
//! Tests for the visit path: short code → 302 redirect plus click counting.

use std::fs;
use std::sync::Arc;

use actix_web::http::{Method, StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use tempfile::TempDir;

use shorty::storage::FileStore;

// =============================================================================
// Test Setup
// =============================================================================

fn create_temp_store() -> (Arc<FileStore>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileStore::new(temp_dir.path().join("urls.json")).expect("Failed to create store");
    (Arc::new(store), temp_dir)
}

macro_rules! init_app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($store.clone()))
                .configure(shorty::api::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_redirect_to_target() {
    let (store, _dir) = create_temp_store();
    store
        .create("https://www.rust-lang.org/", Some("rust"))
        .unwrap();
    let app = init_app!(store);

    let resp = test::call_service(&app, TestRequest::get().uri("/rust").to_request()).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "https://www.rust-lang.org/"
    );
}

#[actix_web::test]
async fn test_redirect_counts_clicks() {
    let (store, _dir) = create_temp_store();
    store.create("https://example.com", Some("count")).unwrap();
    let app = init_app!(store);

    for _ in 0..3 {
        let resp = test::call_service(&app, TestRequest::get().uri("/count").to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
    }

    assert_eq!(store.get("count").unwrap().clicks, 3);
}

#[actix_web::test]
async fn test_redirect_unknown_code() {
    let (store, _dir) = create_temp_store();
    let app = init_app!(store);

    let resp = test::call_service(&app, TestRequest::get().uri("/nothere").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_redirect_invalid_code_is_not_found() {
    let (store, _dir) = create_temp_store();
    let app = init_app!(store);

    let resp = test::call_service(&app, TestRequest::get().uri("/ab").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_generated_codes_redirect_at_length_bounds() {
    for length in [3, 32] {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("urls.json"))
            .unwrap()
            .with_code_length(length)
            .unwrap();
        let store = Arc::new(store);
        let code = store.create("https://example.com/bounds", None).unwrap();
        let app = init_app!(store);

        let uri = format!("/{}", code);
        let resp = test::call_service(&app, TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND, "length {}", length);
    }
}

#[actix_web::test]
async fn test_head_redirect() {
    let (store, _dir) = create_temp_store();
    store.create("https://example.com/head", Some("head")).unwrap();
    let app = init_app!(store);

    let req = TestRequest::default()
        .method(Method::HEAD)
        .uri("/head")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "https://example.com/head"
    );
}

#[actix_web::test]
async fn test_redirect_survives_click_persist_failure() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, b"file").unwrap();
    let store = Arc::new(FileStore::new(blocker.join("urls.json")).unwrap());
    // 插入成功但保存失败
    let _ = store.create("https://example.com", Some("fragile"));
    let app = init_app!(store);

    let resp = test::call_service(&app, TestRequest::get().uri("/fragile").to_request()).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(store.get("fragile").unwrap().clicks, 1);
}

#[actix_web::test]
async fn test_index_page() {
    let (store, _dir) = create_temp_store();
    let app = init_app!(store);

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("/api/shorten"));
    assert!(html.contains(env!("CARGO_PKG_VERSION")));
}
