//! API integration tests

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use bookshelf_server::{api, AppState};

/// Serve a fresh app on an ephemeral port and return its base URL
async fn spawn_app() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, api::create_router(AppState::new()))
            .await
            .expect("Server error");
    });

    format!("http://{}", addr)
}

fn book(name: &str, page_count: u32, read_page: u32, reading: bool) -> Value {
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

async fn add_book(client: &Client, base: &str, body: &Value) -> String {
    let response = client
        .post(format!("{}/books", base))
        .json(body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"]["bookId"].as_str().expect("No book ID").to_string()
}

async fn list_books(client: &Client, base: &str, query: &str) -> Vec<Value> {
    let response = client
        .get(format!("{}/books{}", base, query))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    body["data"]["books"].as_array().expect("No books array").clone()
}

async fn get_book(client: &Client, base: &str, id: &str) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request");

    let status = response.status();
    let body: Value = response.json().await.expect("Failed to parse response");
    (status, body)
}

#[tokio::test]
async fn test_health_check() {
    let base = spawn_app().await;

    let response = Client::new()
        .get(format!("{}/health", base))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["books"], 0);
}

#[tokio::test]
async fn test_add_book_without_name() {
    let base = spawn_app().await;
    let client = Client::new();

    let mut payload = book("unused", 100, 10, false);
    payload.as_object_mut().unwrap().remove("name");

    let response = client
        .post(format!("{}/books", base))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Gagal menambahkan buku. Mohon isi nama buku");

    assert!(list_books(&client, &base, "").await.is_empty());
}

#[tokio::test]
async fn test_add_book_read_page_over_page_count() {
    let base = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base))
        .json(&book("Sejarah", 100, 101, false))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
    );

    assert!(list_books(&client, &base, "").await.is_empty());
}

#[tokio::test]
async fn test_add_and_get_book() {
    let base = spawn_app().await;
    let client = Client::new();

    let finished_id = add_book(&client, &base, &book("Sejarah", 100, 100, false)).await;
    let reading_id = add_book(&client, &base, &book("Sejarah 2", 100, 50, true)).await;
    assert_eq!(finished_id.len(), 16);

    let (status, body) = get_book(&client, &base, &finished_id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let stored = &body["data"]["book"];
    assert_eq!(stored["id"], finished_id.as_str());
    assert_eq!(stored["name"], "Sejarah");
    assert_eq!(stored["year"], 2010);
    assert_eq!(stored["pageCount"], 100);
    assert_eq!(stored["finished"], true);
    assert_eq!(stored["insertedAt"], stored["updatedAt"]);

    let (_, body) = get_book(&client, &base, &reading_id).await;
    assert_eq!(body["data"]["book"]["finished"], false);
    assert_eq!(body["data"]["book"]["reading"], true);
}

#[tokio::test]
async fn test_get_unknown_book() {
    let base = spawn_app().await;

    let (status, body) = get_book(&Client::new(), &base, "xxxxxxxxxxxxxxxx").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Buku tidak ditemukan");
}

#[tokio::test]
async fn test_list_books_with_filters() {
    let base = spawn_app().await;
    let client = Client::new();

    add_book(&client, &base, &book("Kisah Dunia", 100, 10, true)).await;
    add_book(&client, &base, &book("Sejarah DUNIA", 100, 100, false)).await;
    add_book(&client, &base, &book("Laskar Pelangi", 100, 30, true)).await;

    let all = list_books(&client, &base, "").await;
    assert_eq!(all.len(), 3);
    let keys: Vec<&String> = all[0].as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 3);
    assert_eq!(all[0]["name"], "Kisah Dunia");
    assert_eq!(all[0]["publisher"], "Dicoding Indonesia");

    let by_name = list_books(&client, &base, "?name=dunia").await;
    let names: Vec<&str> = by_name.iter().map(|b| b["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Kisah Dunia", "Sejarah DUNIA"]);

    let reading = list_books(&client, &base, "?reading=1").await;
    let names: Vec<&str> = reading.iter().map(|b| b["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Kisah Dunia", "Laskar Pelangi"]);

    let finished = list_books(&client, &base, "?finished=1").await;
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0]["name"], "Sejarah DUNIA");

    let combined = list_books(&client, &base, "?name=dunia&reading=0").await;
    assert_eq!(combined.len(), 1);
    assert_eq!(combined[0]["name"], "Sejarah DUNIA");

    assert!(list_books(&client, &base, "?name=tidak-ada").await.is_empty());

    let repeated = list_books(&client, &base, "?finished=1&finished=0").await;
    assert_eq!(repeated.len(), 2);
}

#[tokio::test]
async fn test_edit_book() {
    let base = spawn_app().await;
    let client = Client::new();

    let id = add_book(&client, &base, &book("Sejarah", 100, 100, false)).await;
    let (_, before) = get_book(&client, &base, &id).await;

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let response = client
        .put(format!("{}/books/{}", base, id))
        .json(&book("Sejarah Revisi", 200, 150, true))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil diperbarui");

    let (_, after) = get_book(&client, &base, &id).await;
    let before = &before["data"]["book"];
    let after = &after["data"]["book"];
    assert_eq!(after["id"], before["id"]);
    assert_eq!(after["insertedAt"], before["insertedAt"]);
    assert!(after["updatedAt"].as_str().unwrap() > before["updatedAt"].as_str().unwrap());
    assert_eq!(after["name"], "Sejarah Revisi");
    assert_eq!(after["finished"], false);
}

#[tokio::test]
async fn test_edit_book_rejections() {
    let base = spawn_app().await;
    let client = Client::new();

    let id = add_book(&client, &base, &book("Sejarah", 100, 100, false)).await;

    let response = client
        .put(format!("{}/books/xxxxxxxxxxxxxxxx", base))
        .json(&book("Sejarah", 100, 100, false))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Gagal memperbarui buku. Id tidak ditemukan");
    assert_eq!(list_books(&client, &base, "").await.len(), 1);

    let mut nameless = book("unused", 100, 10, false);
    nameless.as_object_mut().unwrap().remove("name");
    let response = client
        .put(format!("{}/books/{}", base, id))
        .json(&nameless)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Gagal memperbarui buku. Mohon isi nama buku");

    let response = client
        .put(format!("{}/books/{}", base, id))
        .json(&book("Sejarah", 10, 11, false))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["message"],
        "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
    );

    let (_, stored) = get_book(&client, &base, &id).await;
    assert_eq!(stored["data"]["book"]["name"], "Sejarah");
    assert_eq!(stored["data"]["book"]["pageCount"], 100);
}

#[tokio::test]
async fn test_delete_book() {
    let base = spawn_app().await;
    let client = Client::new();

    let id = add_book(&client, &base, &book("Sejarah", 100, 100, false)).await;

    let response = client
        .delete(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Buku berhasil dihapus");

    let (status, _) = get_book(&client, &base, &id).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = client
        .delete(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Buku gagal dihapus. Id tidak ditemukan");
}

#[tokio::test]
async fn test_finished_tracks_pages_after_writes() {
    let base = spawn_app().await;
    let client = Client::new();

    let a = add_book(&client, &base, &book("A", 10, 10, false)).await;
    let b = add_book(&client, &base, &book("B", 10, 3, false)).await;

    client
        .put(format!("{}/books/{}", base, a))
        .json(&book("A", 10, 4, false))
        .send()
        .await
        .expect("Failed to send request");
    client
        .put(format!("{}/books/{}", base, b))
        .json(&book("B", 10, 10, false))
        .send()
        .await
        .expect("Failed to send request");

    for id in [&a, &b] {
        let (_, body) = get_book(&client, &base, id).await;
        let stored = &body["data"]["book"];
        assert_eq!(
            stored["finished"].as_bool().unwrap(),
            stored["readPage"] == stored["pageCount"]
        );
    }
}
