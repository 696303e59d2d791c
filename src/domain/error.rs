use {
    chrono::{DateTime, Utc},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("end ({end}) must be after start ({start})")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("unknown timezone: {0}")]
    InvalidTimezone(String),

    #[error("invalid date/time: {0}")]
    InvalidDateTime(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("profile name already taken: {0}")]
    DuplicateName(String),

    #[error("event {0} is being modified concurrently, try again")]
    Conflict(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CalendarError {
    /// Stable machine-readable code, safe to expose to clients.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidRange { .. } => "invalid_range",
            Self::InvalidTimezone(_) => "invalid_timezone",
            Self::InvalidDateTime(_) => "invalid_datetime",
            Self::NotFound(_) => "not_found",
            Self::DuplicateName(_) => "duplicate_name",
            Self::Conflict(_) => "conflict",
            Self::StorageUnavailable(_) => "storage_unavailable",
            Self::Serialization(_) => "serialization_error",
        }
    }

    /// True for errors raised before any storage side effect.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::InvalidRange { .. }
                | Self::InvalidTimezone(_)
                | Self::InvalidDateTime(_)
        )
    }
}
