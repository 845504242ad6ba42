pub mod identity;
pub mod profile_document;
pub mod profile_record;
pub mod role;
