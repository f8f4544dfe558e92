use crate::User;

#[test]
fn test_user_new_derives_name_from_email_local_part() {
    let user = User::new("a@x.com".to_string(), "hash".to_string());

    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.name, "a");
    assert_eq!(user.password_hash, "hash");
}

#[test]
fn test_user_new_assigns_distinct_ids_and_udids() {
    let first = User::new("same@x.com".to_string(), "hash".to_string());
    let second = User::new("same@x.com".to_string(), "hash".to_string());

    assert_ne!(first.id, second.id);
    assert_ne!(first.udid, second.udid);
}

#[test]
fn test_user_serializes_udid_as_plain_string() {
    let user = User::new("jo@example.org".to_string(), "hash".to_string());

    let json = serde_json::to_value(&user).unwrap();

    assert_eq!(json["udid"], user.udid.as_str());
}
