//! Tests for the closed variant types.

use super::*;
use std::str::FromStr;

#[test]
fn clean_action_round_trips_wire_names() {
    for s in [
        "drop-missing",
        "fill-mean",
        "fill-median",
        "trim",
        "lowercase",
        "standardize-missing",
    ] {
        let action = CleanAction::from_str(s).unwrap();
        assert_eq!(action.as_str(), s);
        let json: CleanAction = serde_json::from_str(&format!("\"{s}\"")).unwrap();
        assert_eq!(json, action);
    }
}

#[test]
fn unknown_clean_action_rejected() {
    assert!(CleanAction::from_str("uppercase").is_err());
    assert!(serde_json::from_str::<CleanAction>("\"uppercase\"").is_err());
}

#[test]
fn join_kind_sql_keywords() {
    assert_eq!(JoinKind::Full.sql(), "full outer");
    assert_eq!(JoinKind::Left.sql(), "left");
    assert_eq!(JoinKind::Right.sql(), "right");
    assert_eq!(JoinKind::Inner.sql(), "inner");
}

#[test]
fn cardinality_wire_names() {
    assert_eq!(
        serde_json::to_string(&Cardinality::ManyToOne).unwrap(),
        "\"m:1\""
    );
    assert_eq!(Cardinality::from_str("1:1").unwrap(), Cardinality::OneToOne);
    assert!(Cardinality::from_str("1:n").is_err());
}

#[test]
fn filter_op_comparisons() {
    assert_eq!(FilterOp::Lte.comparison_sql(), Some("<="));
    assert_eq!(FilterOp::Contains.comparison_sql(), None);
    assert_eq!(FilterOp::from_str("isnull").unwrap(), FilterOp::IsNull);
    assert!(FilterOp::from_str("like").is_err());
}

#[test]
fn sort_direction_defaults_asc() {
    assert_eq!(SortDirection::default(), SortDirection::Asc);
}

#[test]
fn source_type_parse() {
    assert_eq!(
        SourceType::from_str("imported").unwrap(),
        SourceType::Imported
    );
    assert_eq!(SourceType::from_str("derived").unwrap(), SourceType::Derived);
    assert!(SourceType::from_str("virtual").is_err());
}

#[test]
fn reshape_direction_parse() {
    assert_eq!(
        ReshapeDirection::from_str("wide-to-long").unwrap(),
        ReshapeDirection::WideToLong
    );
    assert!(ReshapeDirection::from_str("pivot").is_err());
}
