use fairq::error::Error;
use fairq::key::{ObjectKey, QueueItem, split_tenant_key};

#[test]
fn splits_namespaced_keys() {
    assert_eq!(split_tenant_key("ns/name").unwrap(), ("ns", "name"));
}

#[test]
fn unqualified_key_uses_default_tenant() {
    assert_eq!(split_tenant_key("name").unwrap(), ("", "name"));
    assert_eq!(split_tenant_key("").unwrap(), ("", ""));
    assert_eq!(split_tenant_key("/name").unwrap(), ("", "name"));
}

#[test]
fn rejects_extra_separators() {
    let err = split_tenant_key("a/b/c").unwrap_err();
    assert!(matches!(err, Error::InvalidKey { ref key, .. } if key == "a/b/c"));
    assert!(err.to_string().contains("unexpected key format"));
}

#[test]
fn string_items_derive_tenant() {
    assert_eq!("team-a/web".to_string().tenant().unwrap(), "team-a");
    assert_eq!("web".tenant().unwrap(), "");
    assert!("a/b/c".tenant().is_err());
}

#[test]
fn object_key_round_trips_through_display() {
    let key: ObjectKey = "team-a/web".parse().unwrap();
    assert_eq!(key, ObjectKey::new("team-a", "web"));
    assert_eq!(key.to_string(), "team-a/web");
    assert_eq!(key.tenant().unwrap(), "team-a");

    let bare: ObjectKey = "web".parse().unwrap();
    assert_eq!(bare.namespace, "");
    assert_eq!(bare.to_string(), "web");

    assert!("a/b/c".parse::<ObjectKey>().is_err());
}

#[test]
fn object_key_with_separator_has_no_tenant() {
    let nested = ObjectKey::new("a/b", "c");
    let err = nested.tenant().unwrap_err();
    assert!(matches!(err, Error::InvalidKey { ref key, .. } if key == "a/b/c"));
    assert!(ObjectKey::new("a", "b/c").tenant().is_err());
    assert!(ObjectKey::new("", "a/b").tenant().is_err());
}
