use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use bookshelf::infrastructure::AppState;
use bookshelf::server::build_router;
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

// Helper to create the full application over an empty catalog
fn setup_test_app() -> Router {
    build_router(AppState::new(), &[])
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn book_payload(name: &str, page_count: u32, read_page: u32, reading: bool) -> Value {
    json!({
        "name": name,
        "year": 2010,
        "author": "John Doe",
        "summary": "Lorem ipsum dolor sit amet",
        "publisher": "Dicoding Indonesia",
        "pageCount": page_count,
        "readPage": read_page,
        "reading": reading
    })
}

// Helper to create a book and return its id
async fn create_test_book(
    app: &Router,
    name: &str,
    page_count: u32,
    read_page: u32,
    reading: bool,
) -> String {
    let (status, json) = send(
        app,
        "POST",
        "/books",
        Some(book_payload(name, page_count, read_page, reading)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["data"]["bookId"].as_str().unwrap().to_string()
}

fn names(json: &Value) -> Vec<String> {
    json["data"]["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app();
    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_create_and_get_finished_book() {
    let app = setup_test_app();

    let payload = book_payload("Dune", 500, 500, false);
    let (status, json) = send(&app, "POST", "/books", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "Book added successfully");
    let id = json["data"]["bookId"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 16);

    let (status, json) = send(&app, "GET", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");

    let book = &json["data"]["book"];
    assert_eq!(book["id"], id.as_str());
    assert_eq!(book["name"], "Dune");
    assert_eq!(book["year"], 2010);
    assert_eq!(book["author"], "John Doe");
    assert_eq!(book["publisher"], "Dicoding Indonesia");
    assert_eq!(book["pageCount"], 500);
    assert_eq!(book["readPage"], 500);
    assert_eq!(book["finished"], true);
    assert_eq!(book["reading"], false);
    assert_eq!(book["insertedAt"], book["updatedAt"]);

    let (status, json) = send(&app, "GET", "/books?finished=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), vec!["Dune"]);
}

#[tokio::test]
async fn test_list_books_returns_summaries_in_insertion_order() {
    let app = setup_test_app();

    let (status, json) = send(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert!(json["data"]["books"].as_array().unwrap().is_empty());

    create_test_book(&app, "Hyperion", 400, 10, true).await;
    create_test_book(&app, "Anathem", 900, 900, false).await;

    let (_, json) = send(&app, "GET", "/books", None).await;
    assert_eq!(names(&json), vec!["Hyperion", "Anathem"]);

    let first = json["data"]["books"][0].as_object().unwrap();
    let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["id", "name", "publisher"]);
}

#[tokio::test]
async fn test_list_books_filters() {
    let app = setup_test_app();

    create_test_book(&app, "Dune", 500, 500, false).await;
    create_test_book(&app, "Hyperion", 400, 10, true).await;
    create_test_book(&app, "Dune Messiah", 300, 0, true).await;
    create_test_book(&app, "Anathem", 900, 900, true).await;

    let (_, json) = send(&app, "GET", "/books?finished=1", None).await;
    assert_eq!(names(&json), vec!["Dune", "Anathem"]);

    let (_, json) = send(&app, "GET", "/books?finished=0", None).await;
    assert_eq!(names(&json), vec!["Hyperion", "Dune Messiah"]);

    let (_, json) = send(&app, "GET", "/books?reading=0", None).await;
    assert_eq!(names(&json), vec!["Dune"]);

    let (_, json) = send(&app, "GET", "/books?reading=1", None).await;
    assert_eq!(names(&json), vec!["Hyperion", "Dune Messiah", "Anathem"]);

    let (_, json) = send(&app, "GET", "/books?name=dune", None).await;
    assert_eq!(names(&json), vec!["Dune", "Dune Messiah"]);

    // name wins over the flags
    let (_, json) = send(&app, "GET", "/books?name=DUNE&reading=0&finished=1", None).await;
    assert_eq!(names(&json), vec!["Dune", "Dune Messiah"]);

    // reading wins over finished
    let (_, json) = send(&app, "GET", "/books?reading=0&finished=0", None).await;
    assert_eq!(names(&json), vec!["Dune"]);

    // an empty value is treated as absent
    let (_, json) = send(&app, "GET", "/books?name=&finished=1", None).await;
    assert_eq!(names(&json), vec!["Dune", "Anathem"]);

    // non-numeric flags match nothing
    let (status, json) = send(&app, "GET", "/books?reading=yes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(names(&json).is_empty());

    let (_, json) = send(&app, "GET", "/books?name=nothing-like-this", None).await;
    assert!(names(&json).is_empty());
}

#[tokio::test]
async fn test_update_book_success() {
    let app = setup_test_app();
    let id = create_test_book(&app, "Original Title", 300, 20, true).await;

    let (_, json) = send(&app, "GET", &format!("/books/{}", id), None).await;
    let before = json["data"]["book"].clone();
    assert_eq!(before["finished"], false);

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/books/{}", id),
        Some(book_payload("Updated Title", 250, 250, false)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "Book updated successfully");

    let (_, json) = send(&app, "GET", &format!("/books/{}", id), None).await;
    let after = &json["data"]["book"];
    assert_eq!(after["id"], before["id"]);
    assert_eq!(after["insertedAt"], before["insertedAt"]);
    assert_ne!(after["updatedAt"], before["updatedAt"]);
    assert_eq!(after["name"], "Updated Title");
    assert_eq!(after["pageCount"], 250);
    assert_eq!(after["finished"], true);
    assert_eq!(after["reading"], false);
}

#[tokio::test]
async fn test_update_right_after_create_changes_updated_at() {
    let app = setup_test_app();

    for _ in 0..20 {
        let id = create_test_book(&app, "Quick Edit", 100, 0, true).await;
        let uri = format!("/books/{}", id);

        let (_, json) = send(&app, "GET", &uri, None).await;
        let before = json["data"]["book"].clone();

        let payload = book_payload("Quick Edit", 100, 1, true);
        let (status, _) = send(&app, "PUT", &uri, Some(payload)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, json) = send(&app, "GET", &uri, None).await;
        let after = &json["data"]["book"];
        assert_eq!(after["insertedAt"], before["insertedAt"]);
        assert_ne!(after["updatedAt"], before["updatedAt"]);
    }
}

#[tokio::test]
async fn test_delete_book_success() {
    let app = setup_test_app();
    let keep = create_test_book(&app, "Keep", 10, 0, false).await;
    let drop = create_test_book(&app, "Drop", 10, 0, false).await;

    let (status, json) = send(&app, "DELETE", &format!("/books/{}", drop), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "Book deleted successfully");

    let (status, _) = send(&app, "GET", &format!("/books/{}", drop), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = send(&app, "GET", "/books", None).await;
    assert_eq!(names(&json), vec!["Keep"]);
    assert_eq!(json["data"]["books"][0]["id"], keep.as_str());

    let (status, _) = send(&app, "DELETE", &format!("/books/{}", drop), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app();
    let (status, json) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]["/books"].is_object());
    assert!(json["paths"]["/books/{id}"].is_object());
}
