//! `IssueStorage` implementation for in-memory storage.

use super::InMemoryStorage;
use crate::domain::{Issue, IssueId, IssuePage, IssueQuery, IssueUpdate, NewIssue, now_timestamp};
use crate::error::{Error, Result};
use crate::query::run_query;
use crate::storage::IssueStorage;
use async_trait::async_trait;
use tracing::{debug, warn};

#[async_trait]
impl IssueStorage for InMemoryStorage {
    async fn create(&mut self, new_issue: NewIssue) -> Result<Issue> {
        new_issue.validate()?;

        let mut inner = self.lock().await;
        let id = inner.generate_id(&new_issue)?;
        let now = now_timestamp();

        let issue = Issue {
            id,
            title: new_issue.title,
            description: new_issue.description,
            status: new_issue.status.unwrap_or_default(),
            priority: new_issue.priority.unwrap_or_default(),
            assignee: new_issue.assignee.unwrap_or_default(),
            created_at: now.clone(),
            updated_at: now,
        };

        inner.insert(issue.clone());
        debug!(id = %issue.id, "issue created");
        Ok(issue)
    }

    async fn get(&self, id: &IssueId) -> Result<Issue> {
        let inner = self.lock().await;
        inner
            .get(id)
            .cloned()
            .ok_or_else(|| Error::IssueNotFound(id.clone()))
    }

    async fn update(&mut self, id: &IssueId, updates: IssueUpdate) -> Result<Issue> {
        let mut inner = self.lock().await;
        let issue = inner
            .get_mut(id)
            .ok_or_else(|| Error::IssueNotFound(id.clone()))?;

        updates.apply_to(issue, &now_timestamp());
        debug!(id = %issue.id, "issue updated");
        Ok(issue.clone())
    }

    async fn list_all(&self) -> Result<Vec<Issue>> {
        let inner = self.lock().await;
        Ok(inner.issues.clone())
    }

    async fn query(&self, query: &IssueQuery) -> Result<IssuePage> {
        let inner = self.lock().await;
        Ok(run_query(&inner.issues, query)?)
    }

    async fn import_issues(&mut self, issues: Vec<Issue>) -> Result<usize> {
        let mut inner = self.lock().await;
        let mut imported = 0;
        for issue in issues {
            let id = issue.id.clone();
            if let Err(error) = issue.check_invariants() {
                warn!(%id, %error, "skipping invalid issue on import");
                continue;
            }
            if inner.insert(issue) {
                imported += 1;
            } else {
                warn!(%id, "skipping duplicate issue id on import");
            }
        }
        Ok(imported)
    }

    async fn save(&self) -> Result<()> {
        Ok(())
    }

    async fn reload(&mut self) -> Result<()> {
        Ok(())
    }
}
