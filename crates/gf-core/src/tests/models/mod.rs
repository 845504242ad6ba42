mod profile_record;
mod role;
