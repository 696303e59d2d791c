use {
    crate::domain::{
        error::CalendarError,
        id::ProfileId,
        profile::{Profile, ProfileRef},
    },
    chrono::{DateTime, Utc},
    sqlx::PgPool,
    uuid::Uuid,
};

pub async fn insert_profile(pool: &PgPool, profile: &Profile) -> Result<(), CalendarError> {
    let result = sqlx::query(
        "INSERT INTO profiles (id, name, timezone, created_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(profile.id().as_uuid())
    .bind(profile.name())
    .bind(profile.timezone().name())
    .bind(profile.created_at())
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            Err(CalendarError::DuplicateName(profile.name().to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn list_profiles(pool: &PgPool) -> Result<Vec<Profile>, CalendarError> {
    let rows: Vec<(Uuid, String, String, DateTime<Utc>)> = sqlx::query_as(
        "SELECT id, name, timezone, created_at FROM profiles ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(id, name, timezone, created_at)| -> Result<Profile, CalendarError> {
            Ok(Profile::restore(id.into(), name, timezone.parse()?, created_at))
        })
        .collect()
}

/// Resolve ids to names, preserving the order of `ids`.
pub async fn find_by_ids(
    pool: &PgPool,
    ids: &[ProfileId],
) -> Result<Vec<ProfileRef>, CalendarError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let uuids: Vec<Uuid> = ids.iter().map(|id| id.as_uuid()).collect();
    let rows: Vec<(Uuid, String)> =
        sqlx::query_as("SELECT id, name FROM profiles WHERE id = ANY($1)")
            .bind(&uuids)
            .fetch_all(pool)
            .await?;

    Ok(ids
        .iter()
        .filter_map(|id| {
            rows.iter()
                .find(|(uuid, _)| *uuid == id.as_uuid())
                .map(|(_, name)| ProfileRef {
                    id: *id,
                    name: name.clone(),
                })
        })
        .collect())
}
