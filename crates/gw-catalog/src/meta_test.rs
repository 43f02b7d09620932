//! Tests for the merged table metadata view.

use super::*;
use crate::store::{keys, profiles, relations, tables, versions};
use crate::CatalogDb;
use gw_core::Cardinality;

fn db_with_table() -> CatalogDb {
    let db = CatalogDb::open_memory().unwrap();
    db.conn()
        .execute_batch(
            "CREATE TABLE t_t1_v1 AS
             SELECT * FROM (VALUES (1, 'ada', 'a@x.io'),
                                   (2, 'grace', NULL)) AS v(id, name, email)",
        )
        .unwrap();
    tables::insert_table(db.conn(), "t1", "people", gw_core::SourceType::Imported, None).unwrap();
    versions::insert_version(db.conn(), "t1-v1", "t1", 1, "t_t1_v1", true).unwrap();
    db
}

#[test]
fn meta_without_profiles_falls_back_to_live_counts() {
    let db = db_with_table();
    let meta = get_table_meta(db.conn(), "t1").unwrap();
    assert_eq!(meta.name, "people");
    assert_eq!(meta.row_count, 2);
    let email = meta.fields.iter().find(|f| f.name == "email").unwrap();
    assert_eq!(email.missing_count, 1);
    assert_eq!(email.missing_rate, 0.5);
    assert_eq!(email.is_unique, None);
}

#[test]
fn meta_merges_profiles_and_keys() {
    let db = db_with_table();
    profiles::replace_profiles(
        db.conn(),
        "t1",
        &[
            profiles::ColumnProfile {
                column_name: "id".to_string(),
                row_count: 2,
                missing_count: 0,
                distinct_count: 2,
                is_unique: true,
                is_identity: true,
                inferred_nullable: false,
            },
            profiles::ColumnProfile {
                column_name: "email".to_string(),
                row_count: 2,
                missing_count: 1,
                distinct_count: 1,
                is_unique: false,
                is_identity: false,
                inferred_nullable: true,
            },
        ],
    )
    .unwrap();
    keys::set_explicit_pk(db.conn(), "t1", &["id".to_string()]).unwrap();

    let meta = get_table_meta(db.conn(), "t1").unwrap();
    let id = meta.fields.iter().find(|f| f.name == "id").unwrap();
    assert!(id.is_primary_key);
    assert_eq!(id.is_unique, Some(true));
    assert_eq!(id.is_identity, Some(true));
    assert!(!id.nullable);
    assert_eq!(id.field_type, "int4");

    let email = meta.fields.iter().find(|f| f.name == "email").unwrap();
    assert!(!email.is_primary_key);
    assert!(email.nullable);
    assert_eq!(email.missing_count, 1);
}

#[test]
fn meta_flags_foreign_keys() {
    let db = db_with_table();
    relations::insert_explicit(
        db.conn(),
        "rel-1",
        "t1",
        &["id".to_string()],
        "t2",
        &["person_id".to_string()],
        Cardinality::OneToOne,
    )
    .unwrap();

    let meta = get_table_meta(db.conn(), "t1").unwrap();
    let id = meta.fields.iter().find(|f| f.name == "id").unwrap();
    assert_eq!(id.is_foreign_key, Some(true));
    assert_eq!(id.ref_table.as_deref(), Some("t2"));
    assert_eq!(id.ref_field.as_deref(), Some("person_id"));
}

#[test]
fn list_tables_returns_all() {
    let db = db_with_table();
    db.conn()
        .execute_batch("CREATE TABLE t_t2_v1 AS SELECT 1 AS n")
        .unwrap();
    tables::insert_table(db.conn(), "t2", "other", gw_core::SourceType::Derived, None).unwrap();
    versions::insert_version(db.conn(), "t2-v1", "t2", 1, "t_t2_v1", true).unwrap();

    let all = list_tables(db.conn()).unwrap();
    assert_eq!(all.len(), 2);
}
