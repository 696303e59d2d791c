use {
    crate::domain::{
        error::CalendarError,
        event::{Event, EventDraft, EventState},
        id::EventId,
    },
    chrono::{DateTime, Utc},
    sqlx::PgPool,
    uuid::Uuid,
};

const EVENT_COLUMNS: &str = "id, title, description, starts_at, ends_at, timezone, assigned_to, \
                             version, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    title: String,
    description: String,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    timezone: String,
    assigned_to: Vec<Uuid>,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = CalendarError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let state = EventState::new(EventDraft {
            title: row.title,
            description: row.description,
            start: row.starts_at,
            end: row.ends_at,
            timezone: row.timezone.parse()?,
            assigned_to: row.assigned_to.into_iter().map(Into::into).collect(),
        })?;
        Ok(Event::restore(
            row.id.into(),
            state,
            row.version,
            row.created_at,
            row.updated_at,
        ))
    }
}

fn assignee_uuids(event: &Event) -> Vec<Uuid> {
    event
        .state()
        .assigned_to()
        .iter()
        .map(|id| id.as_uuid())
        .collect()
}

pub async fn insert_event(pool: &PgPool, event: &Event) -> Result<(), CalendarError> {
    let state = event.state();
    sqlx::query(
        r#"
        INSERT INTO events
            (id, title, description, starts_at, ends_at, timezone, assigned_to,
             version, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(event.id().as_uuid())
    .bind(state.title())
    .bind(state.description())
    .bind(state.start())
    .bind(state.end())
    .bind(state.timezone().name())
    .bind(assignee_uuids(event))
    .bind(event.version())
    .bind(event.created_at())
    .bind(event.updated_at())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_event(pool: &PgPool, id: EventId) -> Result<Option<Event>, CalendarError> {
    let row: Option<EventRow> =
        sqlx::query_as(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(pool)
            .await?;
    row.map(Event::try_from).transpose()
}

pub async fn list_events(
    pool: &PgPool,
    profile: Option<Uuid>,
) -> Result<Vec<Event>, CalendarError> {
    let rows: Vec<EventRow> = sqlx::query_as(&format!(
        "SELECT {EVENT_COLUMNS} FROM events \
         WHERE $1::uuid IS NULL OR $1 = ANY(assigned_to) \
         ORDER BY starts_at, id"
    ))
    .bind(profile)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Event::try_from).collect()
}

/// Serialize writers to one event for the rest of the transaction.
pub async fn lock_event(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    id: EventId,
) -> Result<(), CalendarError> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(id.to_string())
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Overwrite the row only if it is still at `expected_version`.
/// Returns `false` when the version moved or the row is gone.
pub async fn update_event(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    event: &Event,
    expected_version: i64,
) -> Result<bool, CalendarError> {
    let state = event.state();
    let result = sqlx::query(
        r#"
        UPDATE events
        SET title = $2, description = $3, starts_at = $4, ends_at = $5,
            timezone = $6, assigned_to = $7, version = $8, updated_at = $9
        WHERE id = $1 AND version = $10
        "#,
    )
    .bind(event.id().as_uuid())
    .bind(state.title())
    .bind(state.description())
    .bind(state.start())
    .bind(state.end())
    .bind(state.timezone().name())
    .bind(assignee_uuids(event))
    .bind(event.version())
    .bind(event.updated_at())
    .bind(expected_version)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn event_exists(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    id: EventId,
) -> Result<bool, CalendarError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM events WHERE id = $1)")
        .bind(id.as_uuid())
        .fetch_one(&mut **tx)
        .await?;
    Ok(exists)
}
