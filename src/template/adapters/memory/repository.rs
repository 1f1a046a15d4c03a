//! In-memory template repository for tests and single-process use.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::paging::Page;
use crate::template::{
    domain::{ContentTemplate, TemplateId},
    ports::{TemplateFilter, TemplateRepository, TemplateRepositoryError, TemplateRepositoryResult},
};

/// Thread-safe in-memory template repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateRepository {
    state: Arc<RwLock<TemplateState>>,
}

#[derive(Debug, Default)]
struct TemplateState {
    next_seq: u64,
    templates: HashMap<TemplateId, (u64, ContentTemplate)>,
}

impl InMemoryTemplateRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> TemplateRepositoryError {
    TemplateRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn store(&self, template: &ContentTemplate) -> TemplateRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.templates.contains_key(&template.id()) {
            return Err(TemplateRepositoryError::DuplicateTemplate(template.id()));
        }
        state.next_seq += 1;
        let seq = state.next_seq;
        state.templates.insert(template.id(), (seq, template.clone()));
        Ok(())
    }

    async fn update(&self, template: &ContentTemplate) -> TemplateRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let entry = state
            .templates
            .get_mut(&template.id())
            .ok_or(TemplateRepositoryError::NotFound(template.id()))?;
        let usage_count = entry.1.usage_count();
        entry.1 = template.clone();
        entry.1.keep_usage_count(usage_count);
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: TemplateId,
    ) -> TemplateRepositoryResult<Option<ContentTemplate>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.templates.get(&id).map(|(_, template)| template.clone()))
    }

    async fn list(
        &self,
        filter: &TemplateFilter,
        page: Page,
    ) -> TemplateRepositoryResult<Vec<ContentTemplate>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut matching: Vec<&(u64, ContentTemplate)> = state
            .templates
            .values()
            .filter(|(_, template)| filter.matches(template))
            .collect();
        matching.sort_by_key(|(seq, template)| {
            (
                Reverse(template.usage_count()),
                Reverse(template.created_at()),
                Reverse(*seq),
            )
        });
        Ok(page.apply(matching.into_iter().map(|(_, template)| template.clone())))
    }

    async fn delete(&self, id: TemplateId) -> TemplateRepositoryResult<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        Ok(state.templates.remove(&id).is_some())
    }

    async fn increment_usage(&self, id: TemplateId) -> TemplateRepositoryResult<u64> {
        let mut state = self.state.write().map_err(poisoned)?;
        let entry = state
            .templates
            .get_mut(&id)
            .ok_or(TemplateRepositoryError::NotFound(id))?;
        entry.1.record_use();
        Ok(entry.1.usage_count())
    }
}
