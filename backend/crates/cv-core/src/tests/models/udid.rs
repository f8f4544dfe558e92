use crate::{CoreError, Udid};

use std::str::FromStr;

use chrono::Utc;

#[test]
fn test_generated_udid_has_expected_shape() {
    let udid = Udid::generate();
    let value = udid.as_str();

    assert!(value.starts_with("udid_"));
    let (millis, suffix) = value["udid_".len()..].split_once('_').unwrap();
    assert!(millis.parse::<i64>().is_ok());
    assert_eq!(suffix.len(), 9);
    assert!(
        suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
    );
}

#[test]
fn test_generated_udid_round_trips_through_from_str() {
    let udid = Udid::generate();

    let parsed = Udid::from_str(udid.as_str()).unwrap();

    assert_eq!(parsed, udid);
}

#[test]
fn test_generated_udid_embeds_current_time() {
    let before = Utc::now().timestamp_millis();
    let udid = Udid::generate();
    let after = Utc::now().timestamp_millis();

    let issued: i64 = udid.as_str().split('_').nth(1).unwrap().parse().unwrap();
    assert!(issued >= before && issued <= after);
}

#[test]
fn test_from_str_rejects_malformed_values() {
    for bad in [
        "",
        "udid_",
        "udid_123",
        "udid_abc_k3j9x0a1b",
        "udid_123_SHOUTING1",
        "udid_123_short",
        "uuid_123_k3j9x0a1b",
    ] {
        let result = Udid::from_str(bad);
        assert!(
            matches!(result, Err(CoreError::InvalidUdid { .. })),
            "expected '{}' to be rejected",
            bad
        );
    }
}

#[test]
fn test_from_str_accepts_legacy_value() {
    let udid = Udid::from_str("udid_1704067200000_k3j9x0a1b").unwrap();

    assert_eq!(udid.to_string(), "udid_1704067200000_k3j9x0a1b");
}
