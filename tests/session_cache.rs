// tests/session_cache.rs

use std::sync::Arc;

use safety_cockpit::roles::Role;
use safety_cockpit::{Scenario, SessionCache, SessionContext};

#[test]
fn test_get_or_create_is_idempotent_until_invalidated() {
    let mut cache = SessionCache::new();

    let first = cache.get_or_create("nightlife");
    let second = cache.get_or_create("nightlife");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
    assert_eq!(cache.len(), 1);

    assert!(cache.invalidate("nightlife"));
    assert!(!cache.contains("nightlife"));

    let regenerated = cache.get_or_create("nightlife");
    assert_eq!(regenerated.scenario, Scenario::Nightlife);
    assert_eq!(regenerated.zones.len(), first.zones.len());
    assert_ne!(*regenerated, *first);
}

#[test]
fn test_invalidate_only_touches_one_label() {
    let mut cache = SessionCache::new();
    let commuter = cache.get_or_create("commuter-peak");
    let _school = cache.get_or_create("school-commute-safety");

    assert!(cache.invalidate("school-commute-safety"));
    assert!(!cache.invalidate("school-commute-safety"));
    assert!(Arc::ptr_eq(&commuter, &cache.get_or_create("commuter-peak")));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_unknown_labels_share_the_baseline_entry() {
    let mut cache = SessionCache::new();
    let foo = cache.get_or_create("foo");
    assert_eq!(foo.scenario, Scenario::Baseline);
    assert!(cache.contains("foo"));

    let bar = cache.get("bar").expect("unknown labels resolve to baseline");
    assert!(Arc::ptr_eq(&foo, &bar));

    for i in 0..500 {
        cache.get_or_create(&format!("unknown-{}", i));
    }
    assert_eq!(cache.len(), 1);
    assert!(cache.contains("baseline"));
}

#[test]
fn test_lookup_is_case_and_whitespace_insensitive() {
    let mut cache = SessionCache::new();
    let first = cache.get_or_create("nightlife");
    let second = cache.get_or_create("Nightlife");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);

    assert!(cache.contains(" NIGHTLIFE "));
    assert!(Arc::ptr_eq(&first, &cache.get("Nightlife").unwrap()));
}

#[test]
fn test_invalidate_clears_every_spelling() {
    let mut cache = SessionCache::new();
    let first = cache.get_or_create("nightlife");

    assert!(cache.invalidate("Nightlife"));
    assert!(!cache.contains("nightlife"));
    assert!(cache.get("nightlife").is_none());
    assert!(!cache.invalidate(" nightlife"));

    let regenerated = cache.get_or_create("nightlife");
    assert!(!Arc::ptr_eq(&first, &regenerated));
}

#[test]
fn test_session_switching_scenarios_reuses_cached_bundles() {
    let mut session = SessionContext::new(Scenario::CommuterPeak);
    session.login("kim", "pw", Role::TrafficControl).unwrap();

    let commuter = session.current_bundle();
    session.select_scenario("nightlife");
    let nightlife = session.current_bundle();
    assert_eq!(nightlife.scenario, Scenario::Nightlife);

    session.select_scenario("commuter-peak");
    assert!(Arc::ptr_eq(&commuter, &session.current_bundle()));
    assert_eq!(session.cache().len(), 2);

    session.logout();
    assert!(session.cache().is_empty());
}
