//! Tests for CatalogDb connection, migration, DDL, and constraints.

use crate::CatalogDb;

// ── Helpers ────────────────────────────────────────────────────────────

/// Query a single i64 value (convenience for COUNT(*) assertions).
fn count(db: &CatalogDb, sql: &str) -> i64 {
    db.conn()
        .query_row(sql, [], |row| row.get::<_, i64>(0))
        .unwrap()
}

/// Execute a statement, ignoring the returned row count.
fn exec(db: &CatalogDb, sql: &str) {
    db.conn().execute(sql, []).unwrap();
}

/// Expect a statement to fail (constraint violation, etc.).
fn expect_err(db: &CatalogDb, sql: &str) {
    assert!(
        db.conn().execute(sql, []).is_err(),
        "Expected error for: {sql}"
    );
}

// ── Connection & migration ─────────────────────────────────────────────

#[test]
fn open_memory_succeeds() {
    let db = CatalogDb::open_memory().unwrap();
    assert!(count(&db, "SELECT COUNT(*) FROM gw_meta.schema_version") >= 1);
}

#[test]
fn open_file_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.duckdb");
    assert!(!path.exists());
    let _db = CatalogDb::open(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn open_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.duckdb");
    {
        let _db1 = CatalogDb::open(&path).unwrap();
        // drop db1 so the file is not held open
    }
    let db2 = CatalogDb::open(&path).unwrap();
    let migration_count = crate::ddl::MIGRATIONS.len() as i64;
    assert_eq!(
        count(&db2, "SELECT COUNT(*) FROM gw_meta.schema_version"),
        migration_count,
        "schema_version should have one row per migration"
    );
}

// ── All expected tables exist ──────────────────────────────────────────

#[test]
fn all_tables_exist() {
    let db = CatalogDb::open_memory().unwrap();
    let expected_tables = [
        "schema_version",
        "files",
        "tables",
        "table_versions",
        "primary_keys",
        "primary_keys_inferred",
        "relation_edges",
        "relation_edges_inferred",
        "column_profiles",
        "lineage_edges",
        "operation_logs",
    ];

    for table in &expected_tables {
        let sql = format!(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = 'gw_meta' AND table_name = '{table}'"
        );
        assert_eq!(count(&db, &sql), 1, "Table gw_meta.{table} should exist");
    }
}

// ── Transaction helper ─────────────────────────────────────────────────

#[test]
fn transaction_commits_on_success() {
    let db = CatalogDb::open_memory().unwrap();
    db.transaction(|conn| {
        conn.execute(
            "INSERT INTO gw_meta.tables (id, name, source_type) VALUES ('t1', 'orders', 'imported')",
            [],
        )
        .map_err(|e| crate::CatalogError::Transaction(e.to_string()))?;
        Ok(())
    })
    .unwrap();

    assert_eq!(
        count(&db, "SELECT COUNT(*) FROM gw_meta.tables WHERE id = 't1'"),
        1
    );
}

#[test]
fn transaction_rolls_back_on_error() {
    let db = CatalogDb::open_memory().unwrap();
    let result: crate::CatalogResult<()> = db.transaction(|conn| {
        conn.execute(
            "INSERT INTO gw_meta.tables (id, name, source_type) VALUES ('t2', 'orders', 'imported')",
            [],
        )
        .map_err(|e| crate::CatalogError::Transaction(e.to_string()))?;
        Err(crate::CatalogError::validation("intentional failure"))
    });

    assert!(result.is_err());
    assert_eq!(
        count(&db, "SELECT COUNT(*) FROM gw_meta.tables WHERE id = 't2'"),
        0,
        "Row should have been rolled back"
    );
}

// ── CHECK constraints ──────────────────────────────────────────────────

#[test]
fn check_table_source_type() {
    let db = CatalogDb::open_memory().unwrap();
    for st in &["imported", "derived"] {
        exec(
            &db,
            &format!(
                "INSERT INTO gw_meta.tables (id, name, source_type) VALUES ('t_{st}', 'x', '{st}')"
            ),
        );
    }
    expect_err(
        &db,
        "INSERT INTO gw_meta.tables (id, name, source_type) VALUES ('t_bad', 'x', 'virtual')",
    );
}

#[test]
fn check_version_number_positive() {
    let db = CatalogDb::open_memory().unwrap();
    expect_err(
        &db,
        "INSERT INTO gw_meta.table_versions (id, table_id, version, physical_name, is_active) \
         VALUES ('v0', 't1', 0, 't_t1_v0', true)",
    );
}

#[test]
fn check_version_unique_per_table() {
    let db = CatalogDb::open_memory().unwrap();
    exec(
        &db,
        "INSERT INTO gw_meta.table_versions (id, table_id, version, physical_name, is_active) \
         VALUES ('v1', 't1', 1, 't_t1_v1', true)",
    );
    expect_err(
        &db,
        "INSERT INTO gw_meta.table_versions (id, table_id, version, physical_name, is_active) \
         VALUES ('v2', 't1', 1, 't_t1_v1b', false)",
    );
}

#[test]
fn check_relation_cardinality() {
    let db = CatalogDb::open_memory().unwrap();
    for c in &["1:1", "1:m", "m:1"] {
        exec(
            &db,
            &format!(
                "INSERT INTO gw_meta.relation_edges \
                   (id, fk_table_id, fk_fields_json, pk_table_id, pk_fields_json, cardinality) \
                 VALUES ('r_{c}', 'a', '[]', 'b', '[]', '{c}')"
            ),
        );
    }
    expect_err(
        &db,
        "INSERT INTO gw_meta.relation_edges \
           (id, fk_table_id, fk_fields_json, pk_table_id, pk_fields_json, cardinality) \
         VALUES ('r_bad', 'a', '[]', 'b', '[]', 'n:m')",
    );
}

#[test]
fn check_lineage_operation() {
    let db = CatalogDb::open_memory().unwrap();
    for op in &["merge", "reshape", "clean"] {
        exec(
            &db,
            &format!(
                "INSERT INTO gw_meta.lineage_edges \
                   (id, derived_table_id, source_table_ids_json, operation) \
                 VALUES ('l_{op}', 'd', '[]', '{op}')"
            ),
        );
    }
    expect_err(
        &db,
        "INSERT INTO gw_meta.lineage_edges (id, derived_table_id, source_table_ids_json, operation) \
         VALUES ('l_bad', 'd', '[]', 'import')",
    );
}

#[test]
fn check_operation_log_type() {
    let db = CatalogDb::open_memory().unwrap();
    expect_err(
        &db,
        "INSERT INTO gw_meta.operation_logs (id, type, table_id, table_name, params_json, undoable) \
         VALUES ('o_bad', 'export', 't', 'x', '{}', false)",
    );
}

// ── Operation log sequence ─────────────────────────────────────────────

#[test]
fn operation_log_seq_is_monotonic() {
    let db = CatalogDb::open_memory().unwrap();
    for i in 0..3 {
        exec(
            &db,
            &format!(
                "INSERT INTO gw_meta.operation_logs \
                   (id, type, table_id, table_name, params_json, undoable) \
                 VALUES ('o{i}', 'clean', 't', 'x', '{{}}', true)"
            ),
        );
    }
    let first = count(&db, "SELECT seq FROM gw_meta.operation_logs WHERE id = 'o0'");
    let last = count(&db, "SELECT seq FROM gw_meta.operation_logs WHERE id = 'o2'");
    assert!(last > first, "seq should increase with insertion order");
}
