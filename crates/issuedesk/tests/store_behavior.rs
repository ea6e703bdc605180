//! Record store behavior through the `IssueStorage` trait.

use issuedesk::domain::{
    Issue, IssueId, IssueQuery, IssueStatus, IssueUpdate, NewIssue, Priority, SortField, SortOrder,
    parse_timestamp,
};
use issuedesk::error::{Error, ValidationError};
use issuedesk::storage::IssueStorage;
use issuedesk::storage::in_memory::new_in_memory_storage;
use rstest::{fixture, rstest};

#[fixture]
fn storage() -> Box<dyn IssueStorage> {
    new_in_memory_storage("test".to_string())
}

#[rstest]
#[tokio::test]
async fn create_applies_defaults(mut storage: Box<dyn IssueStorage>) {
    let issue = storage
        .create(NewIssue::new("Fix login", "Credentials rejected"))
        .await
        .unwrap();

    assert!(issue.id.as_str().starts_with("test-"));
    assert_eq!(issue.status, IssueStatus::Open);
    assert_eq!(issue.priority, Priority::Medium);
    assert_eq!(issue.assignee, "");
    assert_eq!(issue.created_at, issue.updated_at);
    assert!(parse_timestamp(&issue.created_at).is_some());
}

#[rstest]
#[tokio::test]
async fn get_returns_created_issue(mut storage: Box<dyn IssueStorage>) {
    let created = storage.create(NewIssue::new("A", "B")).await.unwrap();
    assert_eq!(storage.get(&created.id).await.unwrap(), created);
}

#[rstest]
#[case::empty_title("", "body", "title")]
#[case::blank_title("   ", "body", "title")]
#[case::empty_description("title", "", "description")]
#[tokio::test]
async fn create_with_missing_field_leaves_store_unchanged(
    mut storage: Box<dyn IssueStorage>,
    #[case] title: &str,
    #[case] description: &str,
    #[case] field: &'static str,
) {
    storage.create(NewIssue::new("Existing", "x")).await.unwrap();

    let err = storage
        .create(NewIssue::new(title, description))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingField(f)) if f == field
    ));
    assert_eq!(storage.list_all().await.unwrap().len(), 1);
}

#[rstest]
#[tokio::test]
async fn unknown_id_is_not_found_and_mutates_nothing(mut storage: Box<dyn IssueStorage>) {
    storage.create(NewIssue::new("A", "B")).await.unwrap();
    let before = storage.list_all().await.unwrap();
    let missing = IssueId::new("nonexistent");

    assert!(matches!(
        storage.get(&missing).await,
        Err(Error::IssueNotFound(id)) if id == missing
    ));

    let update = IssueUpdate {
        title: Some("changed".to_string()),
        ..IssueUpdate::default()
    };
    assert!(matches!(
        storage.update(&missing, update).await,
        Err(Error::IssueNotFound(_))
    ));
    assert_eq!(storage.list_all().await.unwrap(), before);
}

#[rstest]
#[tokio::test]
async fn status_only_update_touches_status_and_timestamp(
    mut storage: Box<dyn IssueStorage>,
) {
    let original = storage
        .create(NewIssue {
            assignee: Some("ana".to_string()),
            ..NewIssue::new("Fix login", "Credentials rejected")
        })
        .await
        .unwrap();

    let update = IssueUpdate {
        status: Some(IssueStatus::Closed),
        ..IssueUpdate::default()
    };
    let updated = storage.update(&original.id, update).await.unwrap();

    assert_eq!(updated.status, IssueStatus::Closed);
    assert_eq!(updated.title, original.title);
    assert_eq!(updated.description, original.description);
    assert_eq!(updated.priority, original.priority);
    assert_eq!(updated.assignee, original.assignee);
    assert_eq!(updated.created_at, original.created_at);
    assert!(
        parse_timestamp(&updated.updated_at).unwrap()
            >= parse_timestamp(&original.updated_at).unwrap()
    );
    assert_eq!(storage.get(&original.id).await.unwrap(), updated);
}

#[rstest]
#[tokio::test]
async fn empty_strings_in_update_are_ignored(mut storage: Box<dyn IssueStorage>) {
    let original = storage.create(NewIssue::new("Keep me", "And me")).await.unwrap();

    let update = IssueUpdate {
        title: Some(String::new()),
        description: Some(String::new()),
        assignee: Some(String::new()),
        ..IssueUpdate::default()
    };
    let updated = storage.update(&original.id, update).await.unwrap();

    assert_eq!(updated.title, "Keep me");
    assert_eq!(updated.description, "And me");
    assert_eq!(updated.assignee, "");
}

#[rstest]
#[tokio::test]
async fn ids_are_unique_and_order_is_insertion(mut storage: Box<dyn IssueStorage>) {
    let mut ids = Vec::new();
    for n in 0..50 {
        let issue = storage
            .create(NewIssue::new("Same title", format!("body {n}")))
            .await
            .unwrap();
        ids.push(issue.id);
    }

    let listed: Vec<IssueId> = storage
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|issue| issue.id)
        .collect();
    assert_eq!(listed, ids);

    let mut deduped = ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
}

#[rstest]
#[tokio::test]
async fn query_through_store(mut storage: Box<dyn IssueStorage>) {
    for (title, priority) in [
        ("low one", Priority::Low),
        ("high one", Priority::High),
        ("medium one", Priority::Medium),
    ] {
        storage
            .create(NewIssue {
                priority: Some(priority),
                ..NewIssue::new(title, "body")
            })
            .await
            .unwrap();
    }

    let query = IssueQuery {
        sort_by: SortField::Priority,
        sort_order: SortOrder::Desc,
        page_size: 2,
        ..IssueQuery::default()
    };
    let page = storage.query(&query).await.unwrap();

    let titles: Vec<&str> = page.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["high one", "medium one"]);
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);
}

fn record(id: &str, title: &str, created_at: &str, updated_at: &str) -> Issue {
    Issue {
        id: IssueId::new(id),
        title: title.to_string(),
        description: "d".to_string(),
        status: IssueStatus::Open,
        priority: Priority::Low,
        assignee: String::new(),
        created_at: created_at.to_string(),
        updated_at: updated_at.to_string(),
    }
}

#[rstest]
#[tokio::test]
async fn import_skips_records_that_break_invariants(mut storage: Box<dyn IssueStorage>) {
    const EARLY: &str = "2024-01-15T10:00:00Z";
    const LATE: &str = "2024-01-16T10:00:00Z";
    let imported = storage
        .import_issues(vec![
            record("old-0001", "Kept", EARLY, LATE),
            record("old-0002", "  ", EARLY, LATE),
            record("old-0003", "Backwards", LATE, EARLY),
            record("old-0004", "Bad time", "yesterday", LATE),
            record("old-0001", "Duplicate", EARLY, LATE),
            record("a1b2c3d4", "Foreign id", EARLY, EARLY),
        ])
        .await
        .unwrap();

    assert_eq!(imported, 2);
    let ids: Vec<String> = storage
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|issue| issue.id.0)
        .collect();
    assert_eq!(ids, vec!["old-0001", "a1b2c3d4"]);

    let query = IssueQuery {
        sort_by: SortField::UpdatedAt,
        ..IssueQuery::default()
    };
    assert_eq!(storage.query(&query).await.unwrap().total, 2);
}

#[rstest]
#[tokio::test]
async fn zero_page_size_is_rejected(storage: Box<dyn IssueStorage>) {
    let query = IssueQuery {
        page_size: 0,
        ..IssueQuery::default()
    };
    assert!(matches!(
        storage.query(&query).await,
        Err(Error::Validation(ValidationError::InvalidPageSize(_)))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_ids() {
    use std::sync::Arc;
    use tokio::sync::Mutex;

    let storage = Arc::new(Mutex::new(new_in_memory_storage("test".to_string())));
    let mut handles = Vec::new();
    for n in 0..20 {
        let storage = Arc::clone(&storage);
        handles.push(tokio::spawn(async move {
            storage
                .lock()
                .await
                .create(NewIssue::new("Concurrent", format!("body {n}")))
                .await
                .unwrap()
                .id
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}
