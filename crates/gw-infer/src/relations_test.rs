//! Tests for relation inference.

use super::*;
use gw_catalog::store::{relations, tables, versions};
use gw_catalog::CatalogDb;
use gw_core::SourceType;

fn seed(db: &CatalogDb, table_id: &str, source_type: SourceType, create_sql: &str) {
    db.conn().execute_batch(create_sql).unwrap();
    tables::insert_table(db.conn(), table_id, table_id, source_type, None).unwrap();
    versions::insert_version(
        db.conn(),
        &format!("{table_id}-v1"),
        table_id,
        1,
        &format!("t_{table_id}_v1"),
        true,
    )
    .unwrap();
}

/// fk column [1,2,3,NULL] against pk column [1,2]: coverage 2/3.
fn coverage_fixture() -> CatalogDb {
    let db = CatalogDb::open_memory().unwrap();
    seed(
        &db,
        "orders",
        SourceType::Imported,
        "CREATE TABLE t_orders_v1 AS SELECT * FROM (VALUES
            (10, 1), (20, 2), (30, 3), (40, NULL)) AS v(id, customer_id)",
    );
    seed(
        &db,
        "customers",
        SourceType::Imported,
        "CREATE TABLE t_customers_v1 AS SELECT * FROM (VALUES
            (1, 'ada'), (2, 'grace')) AS v(customer_id, name)",
    );
    db
}

#[test]
fn coverage_below_threshold_creates_no_edge() {
    let db = coverage_fixture();
    let edges = refresh_inferred_relations(db.conn(), 0.9).unwrap();
    assert!(
        edges.is_empty(),
        "2/3 coverage must not pass a 0.9 threshold"
    );
}

#[test]
fn coverage_above_threshold_creates_m1_edge() {
    let db = coverage_fixture();
    let edges = refresh_inferred_relations(db.conn(), 0.6).unwrap();
    assert_eq!(edges.len(), 1);
    let edge = &edges[0];
    assert_eq!(edge.fk_table_id, "orders");
    assert_eq!(edge.pk_table_id, "customers");
    assert_eq!(edge.fk_fields, vec!["customer_id"]);
    // Nullable fk column: m:1, not 1:1.
    assert_eq!(edge.cardinality, gw_core::Cardinality::ManyToOne);
    let cov = edge.coverage.unwrap();
    assert!((cov - 2.0 / 3.0).abs() < 1e-9, "coverage was {cov}");
}

#[test]
fn full_coverage_unique_fk_is_one_to_one() {
    let db = CatalogDb::open_memory().unwrap();
    seed(
        &db,
        "profiles",
        SourceType::Imported,
        "CREATE TABLE t_profiles_v1 AS SELECT * FROM (VALUES
            (1, 'bio a'), (2, 'bio b')) AS v(user_id, bio)",
    );
    seed(
        &db,
        "users",
        SourceType::Imported,
        "CREATE TABLE t_users_v1 AS SELECT * FROM (VALUES
            (1, 'ada'), (2, 'grace'), (3, 'alan')) AS v(user_id, name)",
    );
    let edges = refresh_inferred_relations(db.conn(), 0.9).unwrap();
    let edge = edges
        .iter()
        .find(|e| e.fk_table_id == "profiles" && e.pk_table_id == "users")
        .unwrap();
    assert_eq!(edge.cardinality, gw_core::Cardinality::OneToOne);
    assert_eq!(edge.coverage, Some(1.0));
}

#[test]
fn inference_is_idempotent() {
    let db = coverage_fixture();
    let first = refresh_inferred_relations(db.conn(), 0.6).unwrap();
    let second = refresh_inferred_relations(db.conn(), 0.6).unwrap();

    let key = |edges: &[relations::RelationEdge]| {
        edges
            .iter()
            .map(|e| (e.id.clone(), e.coverage))
            .collect::<Vec<_>>()
    };
    assert_eq!(key(&first), key(&second));

    let stored: i64 = db
        .conn()
        .query_row(
            "SELECT count(*) FROM gw_meta.relation_edges_inferred",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored, 1, "full recompute must not accumulate edges");
}

#[test]
fn derived_tables_are_excluded() {
    let db = coverage_fixture();
    seed(
        &db,
        "merged",
        SourceType::Derived,
        "CREATE TABLE t_merged_v1 AS SELECT * FROM (VALUES
            (1, 'ada'), (2, 'grace')) AS v(customer_id, name)",
    );
    let edges = refresh_inferred_relations(db.conn(), 0.6).unwrap();
    assert!(
        edges
            .iter()
            .all(|e| e.fk_table_id != "merged" && e.pk_table_id != "merged"),
        "derived tables must not participate in inference"
    );
}

#[test]
fn empty_fk_column_is_skipped() {
    let db = CatalogDb::open_memory().unwrap();
    seed(
        &db,
        "blank",
        SourceType::Imported,
        "CREATE TABLE t_blank_v1 AS SELECT * FROM (VALUES
            (1, NULL), (2, NULL)) AS v(id, tag_id)",
    );
    seed(
        &db,
        "tags",
        SourceType::Imported,
        "CREATE TABLE t_tags_v1 AS SELECT * FROM (VALUES
            (1, 'a'), (2, 'b')) AS v(tag_id, label)",
    );
    let edges = refresh_inferred_relations(db.conn(), 0.5).unwrap();
    assert!(
        edges
            .iter()
            .all(|e| !(e.fk_table_id == "blank" && e.fk_fields == vec!["tag_id"])),
        "all-missing fk columns must be skipped"
    );
}

#[test]
fn text_keys_match_after_normalization() {
    let db = CatalogDb::open_memory().unwrap();
    seed(
        &db,
        "shipments",
        SourceType::Imported,
        "CREATE TABLE t_shipments_v1 AS SELECT * FROM (VALUES
            (1, 'DE '), (2, ' FR')) AS v(id, country_code)",
    );
    seed(
        &db,
        "countries",
        SourceType::Imported,
        "CREATE TABLE t_countries_v1 AS SELECT * FROM (VALUES
            ('DE', 'Germany'), ('FR', 'France')) AS v(country_code, name)",
    );
    let edges = refresh_inferred_relations(db.conn(), 0.9).unwrap();
    assert!(
        edges
            .iter()
            .any(|e| e.fk_table_id == "shipments" && e.pk_table_id == "countries"),
        "trimmed text values should match"
    );
}
