pub mod audit_repo;
pub mod event_repo;
pub mod profile_repo;

use {
    crate::domain::{
        audit::AuditRecord,
        event::Event,
        id::{EventId, ProfileId},
        profile::{Profile, ProfileRef},
        store::{AuditLog, CommitOutcome, EventStore, ProfileDirectory, StoreFuture, UpdateCommit},
    },
    sqlx::PgPool,
};

/// Postgres-backed implementation of every storage trait.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl EventStore for PgStore {
    fn insert_event<'a>(&'a self, event: &'a Event) -> StoreFuture<'a, ()> {
        Box::pin(event_repo::insert_event(&self.pool, event))
    }

    fn find_event(&self, id: EventId) -> StoreFuture<'_, Option<Event>> {
        Box::pin(event_repo::find_event(&self.pool, id))
    }

    fn list_events(&self, profile: Option<ProfileId>) -> StoreFuture<'_, Vec<Event>> {
        Box::pin(event_repo::list_events(
            &self.pool,
            profile.map(|p| p.as_uuid()),
        ))
    }

    fn commit_update<'a>(&'a self, commit: &'a UpdateCommit) -> StoreFuture<'a, CommitOutcome> {
        Box::pin(async move {
            let id = commit.event.id();
            let mut tx = self.pool.begin().await?;

            sqlx::query("SET LOCAL lock_timeout = '5s'")
                .execute(&mut *tx)
                .await?;

            event_repo::lock_event(&mut tx, id).await?;

            if !event_repo::update_event(&mut tx, &commit.event, commit.expected_version).await? {
                let outcome = if event_repo::event_exists(&mut tx, id).await? {
                    CommitOutcome::Conflict
                } else {
                    CommitOutcome::Missing
                };
                tx.rollback().await?;
                return Ok(outcome);
            }

            // Dropping `tx` on an early return rolls the event update back too.
            if let Some(record) = &commit.audit {
                audit_repo::insert_audit_record(&mut tx, record).await?;
            }
            tx.commit().await?;
            Ok(CommitOutcome::Committed)
        })
    }
}

impl AuditLog for PgStore {
    fn append<'a>(&'a self, record: &'a AuditRecord) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut tx = self.pool.begin().await?;
            audit_repo::insert_audit_record(&mut tx, record).await?;
            tx.commit().await?;
            Ok(())
        })
    }

    fn list_by_event(&self, event_id: EventId) -> StoreFuture<'_, Vec<AuditRecord>> {
        Box::pin(audit_repo::list_by_event(&self.pool, event_id))
    }
}

impl ProfileDirectory for PgStore {
    fn create_profile<'a>(&'a self, profile: &'a Profile) -> StoreFuture<'a, ()> {
        Box::pin(profile_repo::insert_profile(&self.pool, profile))
    }

    fn list_profiles(&self) -> StoreFuture<'_, Vec<Profile>> {
        Box::pin(profile_repo::list_profiles(&self.pool))
    }

    fn find_profiles_by_ids<'a>(&'a self, ids: &'a [ProfileId]) -> StoreFuture<'a, Vec<ProfileRef>> {
        Box::pin(profile_repo::find_by_ids(&self.pool, ids))
    }
}
