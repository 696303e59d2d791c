use {
    super::diff::{ChangeEntry, EventDiff},
    super::id::{AuditRecordId, EventId},
    super::time::Instant,
    serde::{Deserialize, Serialize},
};

/// One committed update's worth of changes. Never modified after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    id: AuditRecordId,
    event_id: EventId,
    changes: Vec<ChangeEntry>,
    #[serde(rename = "message")]
    summary: String,
    created_at: Instant,
}

impl AuditRecord {
    /// `None` for an empty diff: no-op updates leave no trace in the log.
    pub fn from_diff(event_id: EventId, diff: EventDiff, now: Instant) -> Option<Self> {
        if diff.is_empty() {
            return None;
        }
        let summary = diff.summary();
        Some(Self {
            id: AuditRecordId::generate(),
            event_id,
            changes: diff.into_entries(),
            summary,
            created_at: now,
        })
    }

    pub fn restore(
        id: AuditRecordId,
        event_id: EventId,
        changes: Vec<ChangeEntry>,
        summary: String,
        created_at: Instant,
    ) -> Self {
        Self {
            id,
            event_id,
            changes,
            summary,
            created_at,
        }
    }

    pub fn id(&self) -> AuditRecordId {
        self.id
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn changes(&self) -> &[ChangeEntry] {
        &self.changes
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }
}
