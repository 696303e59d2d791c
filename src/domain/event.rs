use {
    super::error::CalendarError,
    super::id::{EventId, ProfileId},
    super::time::{Instant, TimeInput, Zone, at_storage_precision, compare_instants},
    serde::{Deserialize, Serialize},
    std::cmp::Ordering,
};

/// The mutable part of an event. Only constructible through [`EventState::new`],
/// so every value in circulation has a non-empty title, `start < end`, and
/// instants at storage precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventState {
    title: String,
    description: String,
    start: Instant,
    end: Instant,
    timezone: Zone,
    assigned_to: Vec<ProfileId>,
}

/// Unvalidated field values for an [`EventState`].
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub start: Instant,
    pub end: Instant,
    pub timezone: Zone,
    pub assigned_to: Vec<ProfileId>,
}

impl EventState {
    pub fn new(draft: EventDraft) -> Result<Self, CalendarError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(CalendarError::InvalidInput("title must not be empty".into()));
        }

        // Checked after truncation so a range storage would collapse is rejected here.
        let start = at_storage_precision(draft.start);
        let end = at_storage_precision(draft.end);
        if compare_instants(&start, &end) != Ordering::Less {
            return Err(CalendarError::InvalidRange { start, end });
        }

        // Duplicates carry no meaning in a set; keep first-seen order for display.
        let mut assigned_to = Vec::with_capacity(draft.assigned_to.len());
        for id in draft.assigned_to {
            if !assigned_to.contains(&id) {
                assigned_to.push(id);
            }
        }

        Ok(Self {
            title: title.to_string(),
            description: draft.description,
            start,
            end,
            timezone: draft.timezone,
            assigned_to,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn end(&self) -> Instant {
        self.end
    }

    pub fn timezone(&self) -> &Zone {
        &self.timezone
    }

    pub fn assigned_to(&self) -> &[ProfileId] {
        &self.assigned_to
    }

    pub fn is_assigned(&self, profile: &ProfileId) -> bool {
        self.assigned_to.contains(profile)
    }
}

/// A persisted event. `version` increases by one on every committed update
/// and is what concurrent writers are checked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    id: EventId,
    #[serde(flatten)]
    state: EventState,
    version: i64,
    created_at: Instant,
    updated_at: Instant,
}

impl Event {
    pub fn create(state: EventState, now: Instant) -> Self {
        Self {
            id: EventId::generate(),
            state,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild from storage.
    pub fn restore(
        id: EventId,
        state: EventState,
        version: i64,
        created_at: Instant,
        updated_at: Instant,
    ) -> Self {
        Self {
            id,
            state,
            version,
            created_at,
            updated_at,
        }
    }

    /// The next version of this event carrying `state`.
    pub fn revise(&self, state: EventState, now: Instant) -> Self {
        Self {
            id: self.id,
            state,
            version: self.version + 1,
            created_at: self.created_at,
            updated_at: now,
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn state(&self) -> &EventState {
        &self.state
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn updated_at(&self) -> Instant {
        self.updated_at
    }
}

/// Create/update payload as submitted by a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    pub start: TimeInput,
    pub end: TimeInput,
    #[serde(default, alias = "assignedTo")]
    pub profiles: Vec<ProfileId>,
}

impl EventInput {
    /// Resolve wall-clock inputs against the submitted zone and validate.
    /// Runs before any storage access.
    pub fn into_state(self) -> Result<EventState, CalendarError> {
        let title = self
            .title
            .ok_or_else(|| CalendarError::InvalidInput("title is required".into()))?;
        let timezone: Zone = self
            .timezone
            .ok_or_else(|| CalendarError::InvalidInput("timezone is required".into()))?
            .parse()?;

        EventState::new(EventDraft {
            title,
            description: self.description.unwrap_or_default(),
            start: self.start.resolve(&timezone)?,
            end: self.end.resolve(&timezone)?,
            timezone,
            assigned_to: self.profiles,
        })
    }
}
