use {
    crate::domain::{
        audit::AuditRecord,
        diff::diff,
        error::CalendarError,
        event::{Event, EventInput},
        id::{EventId, ProfileId},
        profile::ProfileRef,
        store::{AuditLog, CommitOutcome, EventStore, ProfileDirectory, UpdateCommit},
        time::{self, Zone, format_for_zone},
    },
    serde::Serialize,
    std::{collections::BTreeSet, sync::Arc},
};

/// Upper bound on re-reads when concurrent writers keep winning the race.
pub const MAX_COMMIT_ATTEMPTS: usize = 16;

/// An event as returned to readers: assignees resolved to names and times
/// projected into a display zone.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub assignees: Vec<ProfileRef>,
    pub display_timezone: Zone,
    pub start_local: String,
    pub end_local: String,
}

/// Validates, applies and audits event mutations.
#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventStore>,
    audit: Arc<dyn AuditLog>,
    profiles: Arc<dyn ProfileDirectory>,
}

impl EventService {
    pub fn new(
        events: Arc<dyn EventStore>,
        audit: Arc<dyn AuditLog>,
        profiles: Arc<dyn ProfileDirectory>,
    ) -> Self {
        Self {
            events,
            audit,
            profiles,
        }
    }

    /// Wire every collaborator to the same backing store.
    pub fn with_store<S>(store: Arc<S>) -> Self
    where
        S: EventStore + AuditLog + ProfileDirectory + 'static,
    {
        Self::new(store.clone(), store.clone(), store)
    }

    /// Creation has no baseline to diff against, so no audit record is written.
    pub async fn create_event(&self, input: EventInput) -> Result<Event, CalendarError> {
        let state = input.into_state()?;
        let event = Event::create(state, time::now());
        self.events.insert_event(&event).await?;

        tracing::info!(
            event_id = %event.id(),
            title = %event.state().title(),
            timezone = %event.state().timezone(),
            "event created"
        );
        Ok(event)
    }

    /// Apply `input` to event `id`. The diff is always taken against the
    /// state being overwritten: if another writer commits first, the current
    /// state is re-read and the diff recomputed.
    pub async fn update_event(&self, id: EventId, input: EventInput) -> Result<Event, CalendarError> {
        let mut current = self.load(id).await?;
        let proposed = input.into_state()?;

        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let now = time::now();
            let changes = diff(current.state(), &proposed);
            let change_count = changes.len();
            let commit = UpdateCommit {
                event: current.revise(proposed.clone(), now),
                expected_version: current.version(),
                audit: AuditRecord::from_diff(id, changes, now),
            };

            match self.events.commit_update(&commit).await? {
                CommitOutcome::Committed => {
                    match &commit.audit {
                        Some(record) => tracing::info!(
                            event_id = %id,
                            changes = change_count,
                            summary = %record.summary(),
                            "event updated"
                        ),
                        None => tracing::debug!(event_id = %id, "event updated, nothing to audit"),
                    }
                    return Ok(commit.event);
                }
                CommitOutcome::Conflict => {
                    tracing::warn!(event_id = %id, attempt, "concurrent update, retrying against latest state");
                    current = self.load(id).await?;
                }
                CommitOutcome::Missing => {
                    return Err(CalendarError::NotFound(format!("event {id}")));
                }
            }
        }

        Err(CalendarError::Conflict(id.to_string()))
    }

    /// Audit trail for one event, newest first.
    pub async fn get_event_logs(&self, id: EventId) -> Result<Vec<AuditRecord>, CalendarError> {
        self.load(id).await?;
        self.audit.list_by_event(id).await
    }

    pub async fn get_event(
        &self,
        id: EventId,
        view_zone: Option<Zone>,
    ) -> Result<EventView, CalendarError> {
        let event = self.load(id).await?;
        let mut views = self.build_views(vec![event], view_zone).await?;
        views
            .pop()
            .ok_or_else(|| CalendarError::NotFound(format!("event {id}")))
    }

    /// Events ordered by start, optionally only those assigned to `profile`.
    pub async fn list_events(
        &self,
        profile: Option<ProfileId>,
        view_zone: Option<Zone>,
    ) -> Result<Vec<EventView>, CalendarError> {
        let events = self.events.list_events(profile).await?;
        self.build_views(events, view_zone).await
    }

    async fn load(&self, id: EventId) -> Result<Event, CalendarError> {
        self.events
            .find_event(id)
            .await?
            .ok_or_else(|| CalendarError::NotFound(format!("event {id}")))
    }

    async fn build_views(
        &self,
        events: Vec<Event>,
        view_zone: Option<Zone>,
    ) -> Result<Vec<EventView>, CalendarError> {
        let ids: Vec<ProfileId> = events
            .iter()
            .flat_map(|e| e.state().assigned_to().iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let known = self.profiles.find_profiles_by_ids(&ids).await?;

        Ok(events
            .into_iter()
            .map(|event| {
                let zone = view_zone.unwrap_or(*event.state().timezone());
                let assignees = event
                    .state()
                    .assigned_to()
                    .iter()
                    .filter_map(|id| known.iter().find(|p| p.id == *id).cloned())
                    .collect();
                EventView {
                    start_local: format_for_zone(&event.state().start(), &zone),
                    end_local: format_for_zone(&event.state().end(), &zone),
                    display_timezone: zone,
                    assignees,
                    event,
                }
            })
            .collect())
    }
}
