pub mod error;
pub mod models;

pub use error::{CoreError, Result as CoreResult};
pub use models::identity::Identity;
pub use models::profile_document::ProfileDocument;
pub use models::profile_record::{DEFAULT_DISPLAY_NAME, ProfileRecord};
pub use models::role::Role;

#[cfg(test)]
mod tests;
