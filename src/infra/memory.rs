//! Process-local store used when no database is configured, and by tests.
//!
//! A single `RwLock` guards all tables, so an update and its audit record are
//! published under one write guard and readers never see one without the other.

use {
    crate::domain::{
        audit::AuditRecord,
        error::CalendarError,
        event::Event,
        id::{EventId, ProfileId},
        profile::{Profile, ProfileRef},
        store::{AuditLog, CommitOutcome, EventStore, ProfileDirectory, StoreFuture, UpdateCommit},
    },
    std::collections::HashMap,
    tokio::sync::RwLock,
};

#[derive(Default)]
struct Tables {
    events: HashMap<EventId, Event>,
    /// Append-only; position is the insertion sequence.
    audit: Vec<AuditRecord>,
    profiles: Vec<Profile>,
}

impl Tables {
    fn append_audit(&mut self, record: &AuditRecord) {
        self.audit.push(record.clone());
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStore for MemoryStore {
    fn insert_event<'a>(&'a self, event: &'a Event) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            if tables.events.contains_key(&event.id()) {
                return Err(CalendarError::InvalidInput(format!(
                    "event {} already exists",
                    event.id()
                )));
            }
            tables.events.insert(event.id(), event.clone());
            Ok(())
        })
    }

    fn find_event(&self, id: EventId) -> StoreFuture<'_, Option<Event>> {
        Box::pin(async move { Ok(self.tables.read().await.events.get(&id).cloned()) })
    }

    fn list_events(&self, profile: Option<ProfileId>) -> StoreFuture<'_, Vec<Event>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            let mut events: Vec<Event> = tables
                .events
                .values()
                .filter(|e| profile.is_none_or(|p| e.state().is_assigned(&p)))
                .cloned()
                .collect();
            events.sort_by(|a, b| {
                a.state()
                    .start()
                    .cmp(&b.state().start())
                    .then_with(|| a.id().cmp(&b.id()))
            });
            Ok(events)
        })
    }

    fn commit_update<'a>(&'a self, commit: &'a UpdateCommit) -> StoreFuture<'a, CommitOutcome> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            let Some(current) = tables.events.get_mut(&commit.event.id()) else {
                return Ok(CommitOutcome::Missing);
            };
            if current.version() != commit.expected_version {
                return Ok(CommitOutcome::Conflict);
            }
            *current = commit.event.clone();
            if let Some(record) = &commit.audit {
                tables.append_audit(record);
            }
            Ok(CommitOutcome::Committed)
        })
    }
}

impl AuditLog for MemoryStore {
    fn append<'a>(&'a self, record: &'a AuditRecord) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.tables.write().await.append_audit(record);
            Ok(())
        })
    }

    fn list_by_event(&self, event_id: EventId) -> StoreFuture<'_, Vec<AuditRecord>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            let mut records: Vec<(usize, &AuditRecord)> = tables
                .audit
                .iter()
                .enumerate()
                .filter(|(_, r)| r.event_id() == event_id)
                .collect();
            records.sort_by(|(seq_a, a), (seq_b, b)| {
                b.created_at()
                    .cmp(&a.created_at())
                    .then_with(|| seq_b.cmp(seq_a))
            });
            Ok(records.into_iter().map(|(_, r)| r.clone()).collect())
        })
    }
}

impl ProfileDirectory for MemoryStore {
    fn create_profile<'a>(&'a self, profile: &'a Profile) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            if tables.profiles.iter().any(|p| p.name() == profile.name()) {
                return Err(CalendarError::DuplicateName(profile.name().to_string()));
            }
            tables.profiles.push(profile.clone());
            Ok(())
        })
    }

    fn list_profiles(&self) -> StoreFuture<'_, Vec<Profile>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            // Newest first; later pushes win ties.
            let mut profiles: Vec<Profile> = tables.profiles.iter().rev().cloned().collect();
            profiles.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
            Ok(profiles)
        })
    }

    fn find_profiles_by_ids<'a>(&'a self, ids: &'a [ProfileId]) -> StoreFuture<'a, Vec<ProfileRef>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            Ok(ids
                .iter()
                .filter_map(|id| tables.profiles.iter().find(|p| p.id() == *id))
                .map(Profile::to_ref)
                .collect())
        })
    }
}
