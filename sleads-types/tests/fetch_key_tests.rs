use sleads_types::FetchKey;

#[test]
fn fetch_key_with_split() {
    let key = FetchKey::new("/pricing", Some("b"));
    assert_eq!(key.as_str(), "/pricing-b");
}

#[test]
fn fetch_key_without_split_uses_default() {
    let key = FetchKey::new("/home", None);
    assert_eq!(key.as_str(), "/home-default");
}

#[test]
fn fetch_key_empty_split_collapses_to_default() {
    let key = FetchKey::new("/home", Some(""));
    assert_eq!(key.as_str(), "/home-default");
}

#[test]
fn fetch_key_display_matches_as_str() {
    let key = FetchKey::new("/docs/intro", Some("exp-2"));
    assert_eq!(key.to_string(), key.as_str());
}

#[test]
fn fetch_key_equality_and_hash() {
    use std::collections::HashSet;
    let a = FetchKey::new("/home", None);
    let b = FetchKey::new("/home", Some(""));
    assert_eq!(a, b);
    let mut set = HashSet::new();
    set.insert(a);
    set.insert(b);
    assert_eq!(set.len(), 1);
}

#[test]
fn fetch_key_serde_is_transparent() {
    let key = FetchKey::new("/home", Some("a"));
    let s = serde_json::to_string(&key).unwrap();
    assert_eq!(s, "\"/home-a\"");
    let back: FetchKey = serde_json::from_str(&s).unwrap();
    assert_eq!(key, back);
}
