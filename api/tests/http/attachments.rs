use crate::context::{form, form_with_file, TestServer};
use entities::{Todo, TODOS_PATH};
use http::{Method, StatusCode};
use reqwest::multipart::Part;

#[tokio::test]
async fn test_uploaded_file_is_served_under_its_path() {
    let server = TestServer::new().await;

    let todo = server
        .create(form_with_file("Pay invoice", "", "invoice.pdf", b"%PDF-1.4"))
        .await;
    let path = todo.attachment_path.expect("Attachment path missing");

    assert!(path.starts_with("/uploads/"));
    assert!(path.ends_with(".pdf"));

    let res = server.fetch_raw(&path).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.bytes().await.unwrap().as_ref(), b"%PDF-1.4");
}

#[tokio::test]
async fn test_update_with_new_file_reclaims_the_old_one() {
    let server = TestServer::new().await;
    let created = server
        .create(form_with_file("Report", "", "draft.txt", b"draft"))
        .await;
    let old_path = created.attachment_path.clone().unwrap();

    let res = server
        .send_request::<Todo>(
            &format!("{TODOS_PATH}/{}", created.id),
            Method::PUT,
            Some(form_with_file("Report", "", "final.txt", b"final")),
        )
        .await
        .unwrap();
    assert_eq!(res.code, StatusCode::OK);
    let new_path = res.data.attachment_path.clone().unwrap();

    assert_ne!(new_path, old_path);
    assert!(!server.file_path(&old_path).exists());
    assert_eq!(
        server.fetch_raw(&old_path).await.status(),
        StatusCode::NOT_FOUND
    );

    let fetched = server.list().await;
    assert_eq!(fetched[0].attachment_path.as_deref(), Some(new_path.as_str()));
    assert_eq!(
        server.fetch_raw(&new_path).await.bytes().await.unwrap().as_ref(),
        b"final"
    );
}

#[tokio::test]
async fn test_update_survives_an_already_missing_file() {
    let server = TestServer::new().await;
    let created = server
        .create(form_with_file("Report", "", "draft.txt", b"draft"))
        .await;
    std::fs::remove_file(server.file_path(created.attachment_path.as_deref().unwrap())).unwrap();

    let res = server
        .send_request::<Todo>(
            &format!("{TODOS_PATH}/{}", created.id),
            Method::PUT,
            Some(form_with_file("Report", "", "final.txt", b"final")),
        )
        .await
        .unwrap();

    assert_eq!(res.code, StatusCode::OK);
}

#[tokio::test]
async fn test_update_without_file_keeps_the_attachment() {
    let server = TestServer::new().await;
    let created = server
        .create(form_with_file("Photo", "2024-05-01", "cat.jpg", b"meow"))
        .await;

    let res = server
        .send_request::<Todo>(
            &format!("{TODOS_PATH}/{}", created.id),
            Method::PUT,
            Some(form("Photo of cat", "")),
        )
        .await
        .unwrap();

    assert_eq!(res.code, StatusCode::OK);
    assert_eq!(res.data.attachment_path, created.attachment_path);
    assert_eq!(res.data.due_date, None);
    assert!(server
        .file_path(created.attachment_path.as_deref().unwrap())
        .exists());
}

#[tokio::test]
async fn test_delete_reclaims_the_attachment() {
    let server = TestServer::new().await;
    let created = server
        .create(form_with_file("Scan", "", "scan.png", b"png"))
        .await;
    let path = created.attachment_path.clone().unwrap();

    let res = server
        .send_request::<serde_json::Value>(
            &format!("{TODOS_PATH}/{}", created.id),
            Method::DELETE,
            None,
        )
        .await
        .unwrap();

    assert_eq!(res.code, StatusCode::OK);
    assert!(server.list().await.is_empty());
    assert!(!server.file_path(&path).exists());
    assert_eq!(server.fetch_raw(&path).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_file_part_counts_as_no_file() {
    let server = TestServer::new().await;

    let todo = server
        .create(form("No file", "").part("file", Part::bytes(Vec::new()).file_name("")))
        .await;

    assert_eq!(todo.attachment_path, None);
    assert_eq!(std::fs::read_dir(server.content_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_unwritable_content_dir_fails_create_without_a_record() {
    let server = TestServer::new().await;
    std::fs::remove_dir_all(server.content_dir.path()).expect("Failed to remove content dir");

    let res = server
        .send_request::<serde_json::Value>(
            TODOS_PATH,
            Method::POST,
            Some(form_with_file("Pay invoice", "", "invoice.pdf", b"%PDF-1.4")),
        )
        .await
        .unwrap();

    assert_eq!(res.code, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.data, serde_json::json!({ "error": "Failed to add todo" }));
    assert!(server.store.is_empty().await);
}

