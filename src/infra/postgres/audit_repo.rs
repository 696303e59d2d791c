use {
    crate::domain::{
        audit::AuditRecord,
        diff::ChangeEntry,
        error::CalendarError,
        id::EventId,
    },
    chrono::{DateTime, Utc},
    sqlx::PgPool,
    uuid::Uuid,
};

pub async fn insert_audit_record(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    record: &AuditRecord,
) -> Result<(), CalendarError> {
    let changes = serde_json::to_value(record.changes())?;
    sqlx::query(
        r#"
        INSERT INTO audit_log (id, event_id, summary, changes, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(record.id().as_uuid())
    .bind(record.event_id().as_uuid())
    .bind(record.summary())
    .bind(changes)
    .bind(record.created_at())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn list_by_event(
    pool: &PgPool,
    event_id: EventId,
) -> Result<Vec<AuditRecord>, CalendarError> {
    let rows: Vec<(Uuid, Uuid, String, serde_json::Value, DateTime<Utc>)> = sqlx::query_as(
        r#"
        SELECT id, event_id, summary, changes, created_at
        FROM audit_log
        WHERE event_id = $1
        ORDER BY created_at DESC, seq DESC
        "#,
    )
    .bind(event_id.as_uuid())
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(id, event_id, summary, changes, created_at)| -> Result<AuditRecord, CalendarError> {
            let changes: Vec<ChangeEntry> = serde_json::from_value(changes)?;
            Ok(AuditRecord::restore(
                id.into(),
                event_id.into(),
                changes,
                summary,
                created_at,
            ))
        })
        .collect()
}
