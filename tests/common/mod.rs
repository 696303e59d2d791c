#![allow(dead_code)]

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tz_calendar::AppState;
use tz_calendar::domain::event::{EventDraft, EventInput, EventState};
use tz_calendar::domain::id::ProfileId;
use tz_calendar::domain::profile::{NewProfileInput, Profile};
use tz_calendar::domain::time::{Instant, TimeInput, Zone};
use tz_calendar::infra::memory::MemoryStore;
use tz_calendar::services::event_service::EventService;

pub fn memory_service() -> (EventService, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (EventService::with_store(store.clone()), store)
}

pub fn memory_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (AppState::with_store(store.clone()), store)
}

pub fn at(rfc3339: &str) -> Instant {
    rfc3339
        .parse::<DateTime<Utc>>()
        .expect("test instant must be RFC 3339")
}

pub fn zone(name: &str) -> Zone {
    name.parse().expect("test zone must be valid")
}

pub fn local(date: &str, time: &str) -> TimeInput {
    TimeInput::Local {
        date: date.to_string(),
        time: time.to_string(),
    }
}

/// Payload with wall-clock times in `tz`.
pub fn local_input(
    title: &str,
    tz: &str,
    day: &str,
    start: &str,
    end: &str,
    profiles: &[ProfileId],
) -> EventInput {
    EventInput {
        title: Some(title.to_string()),
        description: None,
        timezone: Some(tz.to_string()),
        start: local(day, start),
        end: local(day, end),
        profiles: profiles.to_vec(),
    }
}

/// Payload with absolute times.
pub fn absolute_input(
    title: &str,
    tz: &str,
    start: &str,
    end: &str,
    profiles: &[ProfileId],
) -> EventInput {
    EventInput {
        title: Some(title.to_string()),
        description: None,
        timezone: Some(tz.to_string()),
        start: TimeInput::Absolute(at(start)),
        end: TimeInput::Absolute(at(end)),
        profiles: profiles.to_vec(),
    }
}

pub fn state(title: &str, start: &str, end: &str, profiles: &[ProfileId]) -> EventState {
    state_in(title, "UTC", start, end, profiles)
}

pub fn state_in(
    title: &str,
    tz: &str,
    start: &str,
    end: &str,
    profiles: &[ProfileId],
) -> EventState {
    EventState::new(EventDraft {
        title: title.to_string(),
        description: String::new(),
        start: at(start),
        end: at(end),
        timezone: zone(tz),
        assigned_to: profiles.to_vec(),
    })
    .expect("test state must be valid")
}

pub fn profile_ids(n: usize) -> Vec<ProfileId> {
    (0..n).map(|_| ProfileId::generate()).collect()
}

pub fn profile(name: &str) -> Profile {
    Profile::new(name, Zone::UTC, tz_calendar::domain::time::now()).expect("test profile must be valid")
}

pub fn new_profile(name: &str, tz: Option<&str>) -> NewProfileInput {
    NewProfileInput {
        name: name.to_string(),
        timezone: tz.map(str::to_string),
    }
}

// ── Postgres ───────────────────────────────────────────────────────────────

/// Connects to `TEST_DATABASE_URL` and applies migrations. Returns `None`
/// when the variable is unset so the Postgres suite can be skipped locally.
pub async fn pg_pool() -> Option<sqlx::PgPool> {
    let _ = dotenvy::dotenv();
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = sqlx::PgPool::connect(&url)
        .await
        .expect("failed to connect to test db");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");
    Some(pool)
}

pub async fn count_audit_rows(pool: &sqlx::PgPool, event_id: uuid::Uuid) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM audit_log WHERE event_id = $1")
        .bind(event_id)
        .fetch_one(pool)
        .await
        .expect("count failed")
}
