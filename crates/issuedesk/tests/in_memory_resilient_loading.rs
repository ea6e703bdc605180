//! Resilient JSONL loading and persistence of the in-memory store.

mod common;

use common::issue;
use issuedesk::domain::{IssueId, IssueStatus, IssueUpdate, NewIssue, Priority};
use issuedesk::storage::in_memory::{LoadWarning, load_from_jsonl, save_to_jsonl};
use issuedesk::storage::{StorageBackend, create_storage};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn jsonl_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

fn line(id: &str, title: &str, created_at: &str, updated_at: &str) -> String {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": "d",
        "status": "open",
        "priority": "low",
        "assignee": "",
        "createdAt": created_at,
        "updatedAt": updated_at,
    })
    .to_string()
}

const T1: &str = "2024-01-15T10:00:00.000000Z";
const T2: &str = "2024-01-16T10:00:00.000000Z";

#[tokio::test]
async fn skips_bad_lines_and_reports_them() {
    let content = [
        line("test-aaaa", "Good one", T1, T2),
        "{not json".to_string(),
        String::new(),
        line("test-bbbb", "", T1, T2),
        line("test-cccc", "Backwards", T2, T1),
        line("test-dddd", "Bad time", "yesterday", T2),
        line("test-aaaa", "Duplicate", T1, T2),
        line("test-eeee", "Good two", T1, T1),
    ]
    .join("\n");
    let file = jsonl_file(&content);

    let (storage, warnings) = load_from_jsonl(file.path(), "test".to_string())
        .await
        .unwrap();

    let titles: Vec<String> = storage
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|issue| issue.title)
        .collect();
    assert_eq!(titles, vec!["Good one", "Good two"]);

    assert_eq!(warnings.len(), 5);
    assert!(matches!(
        warnings[0],
        LoadWarning::MalformedJson { line_number: 2, .. }
    ));
    let invalid: Vec<&IssueId> = warnings
        .iter()
        .filter_map(|warning| match warning {
            LoadWarning::InvalidIssueData { issue_id, .. } => Some(issue_id),
            _ => None,
        })
        .collect();
    assert_eq!(
        invalid,
        vec![
            &IssueId::new("test-bbbb"),
            &IssueId::new("test-cccc"),
            &IssueId::new("test-dddd"),
        ]
    );
    assert!(warnings.iter().any(|warning| matches!(
        warning,
        LoadWarning::DuplicateId { issue_id, .. } if issue_id.as_str() == "test-aaaa"
    )));
}

#[tokio::test]
async fn non_utf8_line_is_skipped_not_fatal() {
    let mut content = line("test-aaaa", "First", T1, T2).into_bytes();
    content.extend_from_slice(b"\n{\"id\":\"test-bbbb\",\"title\":\"\xff\xfe\"}\n");
    content.extend_from_slice(line("test-cccc", "Third", T1, T2).as_bytes());
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&content).unwrap();
    file.flush().unwrap();

    let (storage, warnings) = load_from_jsonl(file.path(), "test".to_string())
        .await
        .unwrap();

    assert_eq!(storage.list_all().await.unwrap().len(), 2);
    assert_eq!(warnings.len(), 1);
    assert!(matches!(
        warnings[0],
        LoadWarning::MalformedJson { line_number: 2, .. }
    ));
}

#[tokio::test]
async fn missing_optional_assignee_defaults_to_empty() {
    let file = jsonl_file(
        r#"{"id":"test-aaaa","title":"T","description":"d","status":"in-progress","priority":"high","createdAt":"2024-01-15T10:00:00","updatedAt":"2024-01-15T10:00:00"}"#,
    );

    let (storage, warnings) = load_from_jsonl(file.path(), "test".to_string())
        .await
        .unwrap();

    assert!(warnings.is_empty());
    let loaded = storage.get(&IssueId::new("test-aaaa")).await.unwrap();
    assert_eq!(loaded.assignee, "");
    assert_eq!(loaded.status, IssueStatus::InProgress);
    assert_eq!(loaded.priority, Priority::High);
}

#[tokio::test]
async fn save_then_load_preserves_records_and_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("issues.jsonl");
    let file = jsonl_file(
        &[
            serde_json::to_string(&issue("test-zzzz", "Last id", IssueStatus::Open, Priority::Low))
                .unwrap(),
            serde_json::to_string(&issue("test-aaaa", "First id", IssueStatus::Closed, Priority::High))
                .unwrap(),
        ]
        .join("\n"),
    );
    let (storage, _) = load_from_jsonl(file.path(), "test".to_string())
        .await
        .unwrap();

    save_to_jsonl(storage.as_ref(), &path).await.unwrap();
    let (reloaded, warnings) = load_from_jsonl(&path, "test".to_string()).await.unwrap();

    assert!(warnings.is_empty());
    assert_eq!(
        reloaded.list_all().await.unwrap(),
        storage.list_all().await.unwrap()
    );
    assert!(!dir.path().join("issues.jsonl.tmp").exists());
}

#[tokio::test]
async fn new_ids_never_collide_with_loaded_ones() {
    let file = jsonl_file(&line("test-aaaa", "Loaded", T1, T2));
    let (mut storage, _) = load_from_jsonl(file.path(), "test".to_string())
        .await
        .unwrap();

    for n in 0..20 {
        let created = storage
            .create(NewIssue::new("New", format!("body {n}")))
            .await
            .unwrap();
        assert_ne!(created.id.as_str(), "test-aaaa");
    }
    assert_eq!(storage.list_all().await.unwrap().len(), 21);
}

#[tokio::test]
async fn file_backed_store_persists_and_reloads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("issues.jsonl");

    let mut storage = create_storage(StorageBackend::Jsonl(path.clone()), "test".to_string())
        .await
        .unwrap();
    assert!(storage.list_all().await.unwrap().is_empty());

    let created = storage.create(NewIssue::new("Persist me", "d")).await.unwrap();
    storage.save().await.unwrap();

    let update = IssueUpdate {
        title: Some("Unsaved change".to_string()),
        ..IssueUpdate::default()
    };
    storage.update(&created.id, update).await.unwrap();
    storage.reload().await.unwrap();

    assert_eq!(storage.get(&created.id).await.unwrap().title, "Persist me");

    let reopened = create_storage(StorageBackend::Jsonl(path), "test".to_string())
        .await
        .unwrap();
    assert_eq!(reopened.get(&created.id).await.unwrap(), created);
}
