use {
    super::audit::AuditRecord,
    super::error::CalendarError,
    super::event::Event,
    super::id::{EventId, ProfileId},
    super::profile::{Profile, ProfileRef},
    std::{future::Future, pin::Pin},
};

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CalendarError>> + Send + 'a>>;

/// A proposed update, checked against the version it was computed from.
#[derive(Debug, Clone)]
pub struct UpdateCommit {
    pub event: Event,
    pub expected_version: i64,
    pub audit: Option<AuditRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// Another writer committed first; nothing was written.
    Conflict,
    /// The event vanished between read and commit.
    Missing,
}

pub trait EventStore: Send + Sync {
    fn insert_event<'a>(&'a self, event: &'a Event) -> StoreFuture<'a, ()>;

    fn find_event(&self, id: EventId) -> StoreFuture<'_, Option<Event>>;

    /// All events ordered by start, optionally only those assigned to `profile`.
    fn list_events(&self, profile: Option<ProfileId>) -> StoreFuture<'_, Vec<Event>>;

    /// Write the new event state and, if present, its audit record as one
    /// unit. Either both become visible or neither does.
    fn commit_update<'a>(&'a self, commit: &'a UpdateCommit) -> StoreFuture<'a, CommitOutcome>;
}

pub trait AuditLog: Send + Sync {
    fn append<'a>(&'a self, record: &'a AuditRecord) -> StoreFuture<'a, ()>;

    /// Newest first; records sharing a timestamp come back in reverse
    /// insertion order.
    fn list_by_event(&self, event_id: EventId) -> StoreFuture<'_, Vec<AuditRecord>>;
}

pub trait ProfileDirectory: Send + Sync {
    /// Fails with `DuplicateName` if the name is taken.
    fn create_profile<'a>(&'a self, profile: &'a Profile) -> StoreFuture<'a, ()>;

    fn list_profiles(&self) -> StoreFuture<'_, Vec<Profile>>;

    /// Unknown ids are skipped.
    fn find_profiles_by_ids<'a>(&'a self, ids: &'a [ProfileId]) -> StoreFuture<'a, Vec<ProfileRef>>;
}
