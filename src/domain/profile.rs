use {
    super::error::CalendarError,
    super::id::ProfileId,
    super::time::{Instant, Zone},
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    id: ProfileId,
    name: String,
    timezone: Zone,
    created_at: Instant,
}

impl Profile {
    /// Validates the name; uniqueness is the directory's job.
    pub fn new(name: &str, timezone: Zone, now: Instant) -> Result<Self, CalendarError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CalendarError::InvalidInput("profile name must not be empty".into()));
        }
        Ok(Self {
            id: ProfileId::generate(),
            name: name.to_string(),
            timezone,
            created_at: now,
        })
    }

    pub fn restore(id: ProfileId, name: String, timezone: Zone, created_at: Instant) -> Self {
        Self {
            id,
            name,
            timezone,
            created_at,
        }
    }

    pub fn id(&self) -> ProfileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timezone(&self) -> &Zone {
        &self.timezone
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn to_ref(&self) -> ProfileRef {
        ProfileRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// What an event's assignee list resolves to for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRef {
    pub id: ProfileId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProfileInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub timezone: Option<String>,
}
