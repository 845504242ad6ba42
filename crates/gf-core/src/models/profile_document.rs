use crate::Role;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored body of a profile. The owning identity id is the document key,
/// so it never appears in the body itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}
