use crate::{CoreError, CoreResult, Identity, ProfileDocument, Role};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name given to lazily created profiles when the provider has none.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Application-owned profile of a principal, keyed by identity id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProfileRecord {
    /// Default profile for an identity seen without a stored record.
    pub fn default_for(identity: &Identity) -> Self {
        let name = identity
            .display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_DISPLAY_NAME);

        Self {
            id: identity.id.clone(),
            email: identity.email.clone(),
            name: name.to_string(),
            role: Role::Member,
            profile_image: None,
            created_at: Utc::now(),
        }
    }

    /// Profile written at registration time, name stored as given.
    pub fn registered(identity: &Identity, name: &str, role: Role) -> Self {
        Self {
            id: identity.id.clone(),
            email: identity.email.clone(),
            name: name.to_string(),
            role,
            profile_image: None,
            created_at: Utc::now(),
        }
    }

    /// Attach a stored body to its key.
    pub fn from_document(id: impl Into<String>, document: ProfileDocument) -> Self {
        Self {
            id: id.into(),
            email: document.email,
            name: document.name,
            role: document.role,
            profile_image: document.profile_image,
            created_at: document.created_at,
        }
    }

    /// Decode a raw stored body.
    pub fn from_value(id: &str, value: serde_json::Value) -> CoreResult<Self> {
        let document: ProfileDocument = serde_json::from_value(value)
            .map_err(|e| CoreError::malformed_document(id, e))?;
        Ok(Self::from_document(id, document))
    }

    pub fn to_document(&self) -> ProfileDocument {
        ProfileDocument {
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            profile_image: self.profile_image.clone(),
            created_at: self.created_at,
        }
    }

    pub fn belongs_to(&self, identity: &Identity) -> bool {
        self.id == identity.id
    }
}
