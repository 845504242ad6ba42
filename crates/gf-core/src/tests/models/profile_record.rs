use crate::{DEFAULT_DISPLAY_NAME, Identity, ProfileRecord, Role};

use serde_json::json;

#[test]
fn given_identity_without_display_name_when_default_then_named_user() {
    let identity = Identity::new("uid-1", "jo@example.com");

    let record = ProfileRecord::default_for(&identity);

    assert_eq!(record.id, "uid-1");
    assert_eq!(record.email, "jo@example.com");
    assert_eq!(record.name, DEFAULT_DISPLAY_NAME);
    assert_eq!(record.role, Role::Member);
    assert!(record.profile_image.is_none());
}

#[test]
fn given_identity_with_display_name_when_default_then_uses_it() {
    let identity = Identity::new("uid-2", "ann@example.com").with_display_name("Ann");

    let record = ProfileRecord::default_for(&identity);

    assert_eq!(record.name, "Ann");
    assert!(record.belongs_to(&identity));
}

#[test]
fn given_padded_name_when_registered_then_stored_as_given() {
    let identity = Identity::new("uid-3", "x@example.com");

    let record = ProfileRecord::registered(&identity, "  Pat ", Role::Admin);

    assert_eq!(record.name, "  Pat ");
    assert_eq!(record.role, Role::Admin);
    assert!(record.belongs_to(&identity));
}

#[test]
fn given_stored_body_when_decoded_then_id_comes_from_key() {
    let value = json!({
        "email": "sam@example.com",
        "name": "Sam",
        "role": "admin",
        "profileImage": "avatars/sam.png",
        "createdAt": "2024-01-01T00:00:00Z"
    });

    let record = ProfileRecord::from_value("uid-9", value).unwrap();

    assert_eq!(record.id, "uid-9");
    assert_eq!(record.role, Role::Admin);
    assert_eq!(record.profile_image.as_deref(), Some("avatars/sam.png"));
}

#[test]
fn given_body_with_unknown_role_when_decoded_then_error() {
    let value = json!({
        "email": "sam@example.com",
        "name": "Sam",
        "role": "superuser",
        "createdAt": "2024-01-01T00:00:00Z"
    });

    assert!(ProfileRecord::from_value("uid-9", value).is_err());
}

#[test]
fn given_record_when_to_document_then_body_has_no_id_and_camel_case() {
    let identity = Identity::new("uid-4", "lee@example.com");
    let record = ProfileRecord::registered(&identity, "Lee", Role::Member);

    let body = serde_json::to_value(record.to_document()).unwrap();

    assert!(body.get("id").is_none());
    assert!(body.get("createdAt").is_some());
    assert!(body.get("profileImage").is_none());
    assert_eq!(body["role"], "member");
}
