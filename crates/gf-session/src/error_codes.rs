// Codes carried in `ErrorInfo::code`.

pub const OFFLINE: &str = "OFFLINE";
pub const CONNECTIVITY_LOST: &str = "CONNECTIVITY_LOST";
pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
pub const PROFILE_NOT_FOUND: &str = "PROFILE_NOT_FOUND";
pub const REMOTE_SERVICE: &str = "REMOTE_SERVICE";
pub const UNKNOWN: &str = "UNKNOWN";
