use {
    crate::domain::{
        error::CalendarError,
        id::ProfileId,
        profile::{NewProfileInput, Profile, ProfileRef},
        store::ProfileDirectory,
        time::{self, Zone},
    },
    std::sync::Arc,
};

#[derive(Clone)]
pub struct ProfileService {
    directory: Arc<dyn ProfileDirectory>,
}

impl ProfileService {
    pub fn new(directory: Arc<dyn ProfileDirectory>) -> Self {
        Self { directory }
    }

    pub async fn create_profile(&self, input: NewProfileInput) -> Result<Profile, CalendarError> {
        let timezone = match input.timezone.as_deref() {
            Some(name) if !name.trim().is_empty() => name.parse()?,
            _ => Zone::UTC,
        };
        let profile = Profile::new(&input.name, timezone, time::now())?;

        if let Err(err) = self.directory.create_profile(&profile).await {
            if let CalendarError::DuplicateName(name) = &err {
                tracing::warn!(name = %name, "profile name already taken");
            }
            return Err(err);
        }

        tracing::info!(profile_id = %profile.id(), name = %profile.name(), "profile created");
        Ok(profile)
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>, CalendarError> {
        self.directory.list_profiles().await
    }

    pub async fn find_profiles_by_ids(
        &self,
        ids: &[ProfileId],
    ) -> Result<Vec<ProfileRef>, CalendarError> {
        self.directory.find_profiles_by_ids(ids).await
    }
}
