//! Unsynchronized store state, wrapped in `Arc<Mutex<>>` by the caller.

use crate::domain::{Issue, IssueId, NewIssue};
use crate::error::Result;
use crate::id_generation::IdGenerator;
use std::collections::HashMap;

pub(crate) struct InMemoryStorageInner {
    /// Canonical list in insertion order.
    pub(super) issues: Vec<Issue>,

    /// Position of each issue in `issues`.
    index: HashMap<IssueId, usize>,

    id_generator: IdGenerator,
}

impl InMemoryStorageInner {
    pub(crate) fn new(prefix: String) -> Self {
        Self {
            issues: Vec::new(),
            index: HashMap::new(),
            id_generator: IdGenerator::new(prefix),
        }
    }

    pub(super) fn get(&self, id: &IssueId) -> Option<&Issue> {
        self.index.get(id).map(|&pos| &self.issues[pos])
    }

    pub(super) fn get_mut(&mut self, id: &IssueId) -> Option<&mut Issue> {
        self.index.get(id).map(|&pos| &mut self.issues[pos])
    }

    /// Appends `issue` unless its id is already stored. Returns whether it
    /// was inserted.
    pub(super) fn insert(&mut self, issue: Issue) -> bool {
        if self.index.contains_key(&issue.id) {
            return false;
        }
        self.id_generator.register_id(issue.id.as_str());
        self.index.insert(issue.id.clone(), self.issues.len());
        self.issues.push(issue);
        true
    }

    /// Drops every record but keeps the id generator, so ids handed out
    /// earlier are never reused.
    pub(super) fn clear(&mut self) {
        self.issues.clear();
        self.index.clear();
    }

    #[cfg(test)]
    pub(crate) fn is_id_taken(&self, id: &IssueId) -> bool {
        self.id_generator.is_taken(id.as_str())
    }

    pub(super) fn generate_id(&mut self, new_issue: &NewIssue) -> Result<IssueId> {
        let id = self.id_generator.generate(
            &new_issue.title,
            &new_issue.description,
            self.issues.len(),
        )?;
        Ok(IssueId::new(id))
    }
}
