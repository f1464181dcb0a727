//! Integration tests for share create and access.

use chrono::Duration;

use shortshare_core::error::ErrorKind;
use shortshare_entity::share::{FileKind, ShareContent, ShareType};
use shortshare_service::{FileUpload, LinkService};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_text_share_through_its_link() {
    let app = TestApp::new().await;
    let share_id = app
        .shares
        .create_text_share("meeting at 5, room 204", false, None)
        .await
        .unwrap();

    let link = app.links.share_url(&share_id);
    assert_eq!(link, format!("http://localhost:5173/share/{share_id}"));

    let opened = app.shares.get_share(&LinkService::parse(&link).unwrap()).await.unwrap();
    assert_eq!(
        opened.content,
        ShareContent::Text {
            content: "meeting at 5, room 204".to_string()
        }
    );
    assert!(app.shares.record_view(&opened).await.unwrap());

    let reopened = app.shares.get_share(&share_id).await.unwrap();
    assert!(reopened.view_count >= 1);
    assert_eq!(app.shares.remaining(&reopened).to_string(), "02:00:00");
}

#[tokio::test]
async fn test_files_share_on_local_disk() {
    let app = TestApp::new().await;
    let share_id = app
        .shares
        .create_file_share(vec![
            FileUpload::new("a.txt", "0123456789", Some("text/plain")),
            FileUpload::new("Holiday.JPG", vec![7u8; 64], Some("image/jpeg")),
        ])
        .await
        .unwrap();

    let share = app.shares.get_share(&share_id).await.unwrap();
    assert_eq!(share.kind(), ShareType::Files);
    assert_eq!(share.total_size(), 74);

    let kinds: Vec<FileKind> = share.attachments().iter().map(|a| a.kind()).collect();
    assert_eq!(kinds, vec![FileKind::Document, FileKind::Image]);

    let on_disk = app.blob_dir.path().join(share_id.to_string()).join("a.txt");
    assert_eq!(tokio::fs::read(&on_disk).await.unwrap(), b"0123456789");

    let first = &share.attachments()[0];
    assert!(app.shares.download_url(first).ends_with(&format!("/{share_id}/a.txt")));
    let data = app.shares.download(&share, first).await.unwrap();
    assert_eq!(&data[..], b"0123456789");
    assert_eq!(app.shares.get_share(&share_id).await.unwrap().download_count, 1);
}

#[tokio::test]
async fn test_oversized_files_share_writes_nothing() {
    let app = TestApp::new().await;
    let err = app
        .shares
        .create_file_share(vec![FileUpload::new(
            "big.bin",
            vec![0u8; 50 * 1024 * 1024 + 1],
            None,
        )])
        .await
        .unwrap_err();

    assert!(err.is(ErrorKind::Validation));
    assert_eq!(app.store.share_count(), 0);
    let mut entries = tokio::fs::read_dir(app.blob_dir.path()).await.unwrap();
    assert!(entries.next_entry().await.unwrap().is_none());
}

#[tokio::test]
async fn test_share_disappears_after_two_hours() {
    let app = TestApp::new().await;
    let share_id = app
        .shares
        .create_text_share("print(1)", true, Some("Python"))
        .await
        .unwrap();

    app.clock.advance(Duration::minutes(119));
    let share = app.shares.get_share(&share_id).await.unwrap();
    assert_eq!(
        share.content,
        ShareContent::Code {
            content: "print(1)".to_string(),
            language: Some("python".to_string()),
        }
    );

    app.clock.advance(Duration::minutes(2));
    let err = app.shares.get_share(&share_id).await.unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
    assert_eq!(err.message, "Share not found or expired.");
}

#[tokio::test]
async fn test_concurrent_downloads_only_grow_the_counter() {
    let app = TestApp::new().await;
    let share_id = app
        .shares
        .create_file_share(vec![FileUpload::new("a.txt", "x", None)])
        .await
        .unwrap();
    let share = app.shares.get_share(&share_id).await.unwrap();
    let attachment = &share.attachments()[0];

    let downloads = (0..8).map(|_| app.shares.download(&share, attachment));
    for result in futures::future::join_all(downloads).await {
        result.unwrap();
    }

    let after = app.shares.get_share(&share_id).await.unwrap();
    assert!(after.download_count >= 1);
    assert!(after.download_count >= share.download_count);
}
