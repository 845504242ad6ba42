use crate::Role;

use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::Admin.as_str(), "admin");
    assert_eq!(Role::Member.as_str(), "member");
}

#[test]
fn test_role_from_str() {
    assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
    assert_eq!(Role::from_str("member").unwrap(), Role::Member);
    assert!(Role::from_str("owner").is_err());
    assert!(Role::from_str("Admin").is_err());
}

#[test]
fn test_role_default() {
    assert_eq!(Role::default(), Role::Member);
    assert!(!Role::default().is_admin());
}

#[test]
fn test_role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    let parsed: Role = serde_json::from_str("\"member\"").unwrap();
    assert_eq!(parsed, Role::Member);
}
