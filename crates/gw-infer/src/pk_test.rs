//! Tests for primary key inference.

use super::*;
use crate::profiler::refresh_profiles;
use gw_catalog::store::{keys, tables, versions};
use gw_catalog::CatalogDb;
use gw_core::SourceType;

fn seed(db: &CatalogDb, table_id: &str, create_sql: &str) {
    db.conn().execute_batch(create_sql).unwrap();
    tables::insert_table(db.conn(), table_id, table_id, SourceType::Imported, None).unwrap();
    versions::insert_version(
        db.conn(),
        &format!("{table_id}-v1"),
        table_id,
        1,
        &format!("t_{table_id}_v1"),
        true,
    )
    .unwrap();
    refresh_profiles(db.conn(), table_id).unwrap();
}

#[test]
fn infers_id_column() {
    let db = CatalogDb::open_memory().unwrap();
    seed(
        &db,
        "people",
        "CREATE TABLE t_people_v1 AS SELECT * FROM (VALUES
            (1, 'ada'), (2, 'grace'), (3, 'alan')) AS v(id, name)",
    );
    let inferred = infer_primary_key(db.conn(), "people").unwrap();
    assert_eq!(inferred, Some(vec!["id".to_string()]));
    assert_eq!(
        keys::inferred_pk(db.conn(), "people").unwrap(),
        Some(vec!["id".to_string()])
    );
}

#[test]
fn exact_id_beats_suffixed_id() {
    let db = CatalogDb::open_memory().unwrap();
    seed(
        &db,
        "orders",
        "CREATE TABLE t_orders_v1 AS SELECT * FROM (VALUES
            (1, 10), (2, 20)) AS v(id, order_id)",
    );
    assert_eq!(
        infer_primary_key(db.conn(), "orders").unwrap(),
        Some(vec!["id".to_string()])
    );
}

#[test]
fn suffixed_id_beats_other_unique_columns() {
    let db = CatalogDb::open_memory().unwrap();
    seed(
        &db,
        "events",
        "CREATE TABLE t_events_v1 AS SELECT * FROM (VALUES
            ('a', 1), ('b', 2)) AS v(code, event_id)",
    );
    assert_eq!(
        infer_primary_key(db.conn(), "events").unwrap(),
        Some(vec!["event_id".to_string()])
    );
}

#[test]
fn nullable_columns_never_qualify() {
    let db = CatalogDb::open_memory().unwrap();
    seed(
        &db,
        "sparse",
        "CREATE TABLE t_sparse_v1 AS SELECT * FROM (VALUES
            (1, 'x'), (NULL, 'y')) AS v(id, label)",
    );
    assert_eq!(
        infer_primary_key(db.conn(), "sparse").unwrap(),
        Some(vec!["label".to_string()])
    );
}

#[test]
fn no_candidates_clears_stale_row() {
    let db = CatalogDb::open_memory().unwrap();
    seed(
        &db,
        "dups",
        "CREATE TABLE t_dups_v1 AS SELECT * FROM (VALUES (1), (1)) AS v(id)",
    );
    keys::upsert_inferred_pk(db.conn(), "dups", &["id".to_string()]).unwrap();

    assert_eq!(infer_primary_key(db.conn(), "dups").unwrap(), None);
    assert_eq!(keys::inferred_pk(db.conn(), "dups").unwrap(), None);
}

#[test]
fn explicit_pk_suppresses_inference_and_clears() {
    let db = CatalogDb::open_memory().unwrap();
    seed(
        &db,
        "people",
        "CREATE TABLE t_people_v1 AS SELECT * FROM (VALUES
            (1, 'ada'), (2, 'grace')) AS v(id, name)",
    );
    infer_primary_key(db.conn(), "people").unwrap();
    assert!(keys::inferred_pk(db.conn(), "people").unwrap().is_some());

    keys::set_explicit_pk(db.conn(), "people", &["name".to_string()]).unwrap();
    assert_eq!(infer_primary_key(db.conn(), "people").unwrap(), None);
    assert_eq!(
        keys::inferred_pk(db.conn(), "people").unwrap(),
        None,
        "no inferred row may exist once an explicit key is set"
    );
}
