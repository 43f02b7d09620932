//! Tests for physical-table operations.

use super::*;
use duckdb::Connection;
use std::io::Write as _;

fn conn() -> Connection {
    Connection::open_in_memory().unwrap()
}

#[test]
fn create_table_as_materializes_select() {
    let c = conn();
    create_table_as(&c, "t_a_v1", "SELECT 1 AS id, 'x' AS name", &[]).unwrap();
    assert_eq!(count_rows(&c, "t_a_v1").unwrap(), 1);
}

#[test]
fn create_table_as_binds_params() {
    let c = conn();
    create_table_as(
        &c,
        "t_b_v1",
        "SELECT ? AS fill",
        &[DuckValue::Double(3.5)],
    )
    .unwrap();
    let rows = query_json_rows(&c, "SELECT fill FROM t_b_v1", &[]).unwrap();
    assert_eq!(rows[0]["fill"], serde_json::json!(3.5));
}

#[test]
fn import_csv_reads_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.csv");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "id,name").unwrap();
    writeln!(f, "1,ada").unwrap();
    writeln!(f, "2,grace").unwrap();
    drop(f);

    let c = conn();
    import_csv(&c, "t_people_v1", &path).unwrap();
    assert_eq!(count_rows(&c, "t_people_v1").unwrap(), 2);
    let names = column_names(&c, "t_people_v1").unwrap();
    assert_eq!(names, vec!["id", "name"]);
}

#[test]
fn table_columns_reports_types() {
    let c = conn();
    c.execute_batch("CREATE TABLE t_c_v1 (id INTEGER NOT NULL, score DOUBLE, label VARCHAR)")
        .unwrap();
    let cols = table_columns(&c, "t_c_v1").unwrap();
    assert_eq!(cols.len(), 3);
    assert_eq!(cols[0].name, "id");
    assert!(cols[0].is_integer());
    assert!(!cols[0].nullable);
    assert!(cols[1].is_floating());
    assert!(cols[1].nullable);
    assert!(cols[2].is_text());
}

#[test]
fn count_where_with_params() {
    let c = conn();
    c.execute_batch("CREATE TABLE t_d_v1 AS SELECT * FROM range(10) r(n)")
        .unwrap();
    let n = count_where(&c, "t_d_v1", "n >= ?", &[DuckValue::BigInt(7)]).unwrap();
    assert_eq!(n, 3);
}

#[test]
fn scalar_i64_maps_null_to_zero() {
    let c = conn();
    assert_eq!(scalar_i64(&c, "SELECT NULL::BIGINT", &[]).unwrap(), 0);
}

#[test]
fn scalar_f64_preserves_null() {
    let c = conn();
    assert_eq!(scalar_f64(&c, "SELECT NULL::DOUBLE", &[]).unwrap(), None);
    assert_eq!(
        scalar_f64(&c, "SELECT avg(n) FROM range(3) r(n)", &[]).unwrap(),
        Some(1.0)
    );
}

#[test]
fn min_max_i64_on_empty_is_none() {
    let c = conn();
    c.execute_batch("CREATE TABLE t_e_v1 (n INTEGER)").unwrap();
    assert_eq!(min_max_i64(&c, "t_e_v1", "n").unwrap(), None);
    c.execute_batch("INSERT INTO t_e_v1 VALUES (2), (5)").unwrap();
    assert_eq!(min_max_i64(&c, "t_e_v1", "n").unwrap(), Some((2, 5)));
}

#[test]
fn query_json_rows_keys_by_column_name() {
    let c = conn();
    let rows = query_json_rows(&c, "SELECT 1 AS a, 'x' AS b UNION ALL SELECT 2, 'y' ORDER BY a", &[])
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["a"], serde_json::json!(1));
    assert_eq!(rows[1]["b"], serde_json::json!("y"));
}
