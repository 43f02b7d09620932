//! Tests for id generation.

use super::*;

#[test]
fn new_id_carries_prefix() {
    let id = new_id("tbl");
    assert!(id.starts_with("tbl-"));
    assert!(id.len() > 10);
}

#[test]
fn new_id_is_unique() {
    assert_ne!(new_id("ver"), new_id("ver"));
}

#[test]
fn inferred_relation_id_is_deterministic() {
    let a = inferred_relation_id("t1", &["id".into()], "t2", &["id".into()]);
    let b = inferred_relation_id("t1", &["id".into()], "t2", &["id".into()]);
    assert_eq!(a, b);
    assert!(a.starts_with("rel-inf-"));
}

#[test]
fn inferred_relation_id_distinguishes_direction() {
    let forward = inferred_relation_id("t1", &["id".into()], "t2", &["id".into()]);
    let reverse = inferred_relation_id("t2", &["id".into()], "t1", &["id".into()]);
    assert_ne!(forward, reverse);
}

#[test]
fn inferred_relation_id_distinguishes_fields() {
    let a = inferred_relation_id("t1", &["user_id".into()], "t2", &["id".into()]);
    let b = inferred_relation_id("t1", &["order_id".into()], "t2", &["id".into()]);
    assert_ne!(a, b);
}
