use crate::{ConnectivityMonitor, IsRetryable, ProfileStore, Result as SessionResult, SessionError};

use gf_core::{Identity, ProfileRecord};
use log::{debug, warn};

/// Resolves the profile of a freshly signed-in identity, creating a
/// default one the first time the identity is seen.
#[derive(Clone)]
pub struct ProfileResolver {
    profiles: ProfileStore,
    connectivity: ConnectivityMonitor,
}

impl ProfileResolver {
    pub fn new(profiles: ProfileStore, connectivity: ConnectivityMonitor) -> Self {
        Self {
            profiles,
            connectivity,
        }
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    pub async fn resolve(&self, identity: &Identity) -> SessionResult<ProfileRecord> {
        if !self.connectivity.is_online() {
            return Err(SessionError::offline_error("load your profile"));
        }

        match self.profiles.get(&identity.id).await {
            Ok(record) => Ok(record),
            Err(SessionError::ProfileNotFound { .. }) => Ok(self.create_default(identity).await),
            Err(e) => Err(e),
        }
    }

    /// The remote write is best-effort: the synthesized record is used
    /// locally whether or not it was persisted.
    async fn create_default(&self, identity: &Identity) -> ProfileRecord {
        let record = ProfileRecord::default_for(identity);

        if !self.connectivity.is_online() {
            warn!(
                "Offline while creating profile for {}; using it locally without writing",
                identity.id
            );
            return record;
        }

        debug!("No profile for {}, creating default", identity.id);
        if let Err(e) = self.profiles.create(&record).await {
            warn!("Default profile for {} was not persisted: {}", identity.id, e);
        }
        record
    }
}
