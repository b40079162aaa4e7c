use chrono::{DateTime, Utc};

use crate::core::errors::{AdminError, Result};
use crate::core::models::audit_entry::{AuditAction, AuditEntry};
use crate::core::models::effect::{Effect, Transition};
use crate::core::models::selection::Selection;
use crate::core::services::audit_filter::{AuditFilter, distinct_users};
use crate::core::traits::audit_source::AuditSource;

/// Filter inputs held by the audit log screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuditViewState {
    pub filter: AuditFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditViewAction {
    SetSearch(String),
    SetAction(Selection<AuditAction>),
    SetUser(Selection<String>),
    SetStart(Option<DateTime<Utc>>),
    SetEnd(Option<DateTime<Utc>>),
    ResetFilters,
    ShowDetail(String),
    Export,
}

/// Filtered listing produced for display.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditListing {
    pub entries: Vec<AuditEntry>,
    pub total: usize,
}

impl AuditListing {
    /// An empty listing renders as "no matching records".
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Audit log screen logic over an injected [`AuditSource`].
pub struct AuditViewer<S: AuditSource> {
    pub source: S,
}

impl<S: AuditSource> AuditViewer<S> {
    /// Apply a user action to the screen state.
    pub fn reduce(
        &self,
        state: &AuditViewState,
        action: AuditViewAction,
    ) -> Result<Transition<AuditViewState>> {
        let mut next = state.clone();
        match action {
            AuditViewAction::SetSearch(term) => next.filter.search = term,
            AuditViewAction::SetAction(action) => next.filter.action = action,
            AuditViewAction::SetUser(user) => next.filter.user = user,
            AuditViewAction::SetStart(start) => next.filter.range.start = start,
            AuditViewAction::SetEnd(end) => next.filter.range.end = end,
            AuditViewAction::ResetFilters => next = AuditViewState::default(),
            AuditViewAction::ShowDetail(id) => {
                let entry = self.find(&id)?;
                return Ok(Transition::with(next, Effect::Notify(entry.detail_text())));
            }
            AuditViewAction::Export => {
                return Ok(Transition::with(
                    next,
                    Effect::Notify("監査ログをCSVファイルでエクスポートします".to_string()),
                ));
            }
        }
        Ok(Transition::quiet(next))
    }

    /// Entries matching the current filter plus the unfiltered total.
    pub fn listing(&self, state: &AuditViewState) -> Result<AuditListing> {
        let entries = self.source.fetch(&state.filter)?;
        let total = self.source.fetch_all()?.len();
        tracing::debug!(shown = entries.len(), total, "audit listing refreshed");
        Ok(AuditListing { entries, total })
    }

    /// Choices for the user filter.
    pub fn users(&self) -> Result<Vec<String>> {
        Ok(distinct_users(&self.source.fetch_all()?))
    }

    fn find(&self, id: &str) -> Result<AuditEntry> {
        self.source
            .fetch_all()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| AdminError::EntryNotFound { id: id.to_string() })
    }
}
