//! Closed tagged-variant types for every string-dispatched operation family.
//!
//! Unrecognized tags are rejected at the boundary (serde or [`FromStr`]);
//! nothing downstream ever matches on raw strings.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a logical table came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Materialized from an uploaded file.
    Imported,
    /// Output of a merge or reshape.
    Derived,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Imported => "imported",
            SourceType::Derived => "derived",
        }
    }
}

impl FromStr for SourceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "imported" => Ok(SourceType::Imported),
            "derived" => Ok(SourceType::Derived),
            other => Err(CoreError::UnknownTag {
                kind: "source type",
                value: other.to_string(),
            }),
        }
    }
}

/// Relation cardinality in FK → PK direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    #[serde(rename = "1:1")]
    OneToOne,
    #[serde(rename = "1:m")]
    OneToMany,
    #[serde(rename = "m:1")]
    ManyToOne,
}

impl Cardinality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::OneToOne => "1:1",
            Cardinality::OneToMany => "1:m",
            Cardinality::ManyToOne => "m:1",
        }
    }
}

impl FromStr for Cardinality {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1:1" => Ok(Cardinality::OneToOne),
            "1:m" => Ok(Cardinality::OneToMany),
            "m:1" => Ok(Cardinality::ManyToOne),
            other => Err(CoreError::UnknownTag {
                kind: "cardinality",
                value: other.to_string(),
            }),
        }
    }
}

/// Join kind for merge operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinKind {
    Full,
    Left,
    Right,
    Inner,
}

impl JoinKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::Full => "full",
            JoinKind::Left => "left",
            JoinKind::Right => "right",
            JoinKind::Inner => "inner",
        }
    }

    /// SQL join keyword for the engine.
    pub fn sql(&self) -> &'static str {
        match self {
            JoinKind::Full => "full outer",
            JoinKind::Left => "left",
            JoinKind::Right => "right",
            JoinKind::Inner => "inner",
        }
    }
}

impl FromStr for JoinKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(JoinKind::Full),
            "left" => Ok(JoinKind::Left),
            "right" => Ok(JoinKind::Right),
            "inner" => Ok(JoinKind::Inner),
            other => Err(CoreError::UnknownTag {
                kind: "join kind",
                value: other.to_string(),
            }),
        }
    }
}

/// Clean actions over a field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleanAction {
    /// Drop rows with a null in any selected field.
    DropMissing,
    /// Fill numeric nulls with the column mean.
    FillMean,
    /// Fill numeric nulls with the column median.
    FillMedian,
    /// Trim surrounding whitespace.
    Trim,
    /// Lowercase text values.
    Lowercase,
    /// Map placeholder missing tokens to true null.
    StandardizeMissing,
}

impl CleanAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CleanAction::DropMissing => "drop-missing",
            CleanAction::FillMean => "fill-mean",
            CleanAction::FillMedian => "fill-median",
            CleanAction::Trim => "trim",
            CleanAction::Lowercase => "lowercase",
            CleanAction::StandardizeMissing => "standardize-missing",
        }
    }

    /// Whether the aggregate fill value is computed over the whole snapshot.
    pub fn is_fill(&self) -> bool {
        matches!(self, CleanAction::FillMean | CleanAction::FillMedian)
    }
}

impl fmt::Display for CleanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CleanAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drop-missing" => Ok(CleanAction::DropMissing),
            "fill-mean" => Ok(CleanAction::FillMean),
            "fill-median" => Ok(CleanAction::FillMedian),
            "trim" => Ok(CleanAction::Trim),
            "lowercase" => Ok(CleanAction::Lowercase),
            "standardize-missing" => Ok(CleanAction::StandardizeMissing),
            other => Err(CoreError::UnknownTag {
                kind: "clean action",
                value: other.to_string(),
            }),
        }
    }
}

/// Reshape direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReshapeDirection {
    WideToLong,
    LongToWide,
}

impl ReshapeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReshapeDirection::WideToLong => "wide-to-long",
            ReshapeDirection::LongToWide => "long-to-wide",
        }
    }
}

impl FromStr for ReshapeDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wide-to-long" => Ok(ReshapeDirection::WideToLong),
            "long-to-wide" => Ok(ReshapeDirection::LongToWide),
            other => Err(CoreError::UnknownTag {
                kind: "reshape direction",
                value: other.to_string(),
            }),
        }
    }
}

/// Operation-log entry types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Import,
    Clean,
    Merge,
    Reshape,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Import => "import",
            OperationType::Clean => "clean",
            OperationType::Merge => "merge",
            OperationType::Reshape => "reshape",
        }
    }
}

impl FromStr for OperationType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "import" => Ok(OperationType::Import),
            "clean" => Ok(OperationType::Clean),
            "merge" => Ok(OperationType::Merge),
            "reshape" => Ok(OperationType::Reshape),
            other => Err(CoreError::UnknownTag {
                kind: "operation type",
                value: other.to_string(),
            }),
        }
    }
}

/// Row filter operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    /// Case-insensitive substring match.
    Contains,
    /// Membership in a non-empty list.
    In,
    IsNull,
    NotNull,
    /// Inclusive range with exactly two bounds.
    Between,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Neq => "neq",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Contains => "contains",
            FilterOp::In => "in",
            FilterOp::IsNull => "isnull",
            FilterOp::NotNull => "notnull",
            FilterOp::Between => "between",
        }
    }

    /// Binary comparison SQL operator, if this is one.
    pub fn comparison_sql(&self) -> Option<&'static str> {
        match self {
            FilterOp::Eq => Some("="),
            FilterOp::Neq => Some("!="),
            FilterOp::Lt => Some("<"),
            FilterOp::Lte => Some("<="),
            FilterOp::Gt => Some(">"),
            FilterOp::Gte => Some(">="),
            _ => None,
        }
    }
}

impl FromStr for FilterOp {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(FilterOp::Eq),
            "neq" => Ok(FilterOp::Neq),
            "lt" => Ok(FilterOp::Lt),
            "lte" => Ok(FilterOp::Lte),
            "gt" => Ok(FilterOp::Gt),
            "gte" => Ok(FilterOp::Gte),
            "contains" => Ok(FilterOp::Contains),
            "in" => Ok(FilterOp::In),
            "isnull" => Ok(FilterOp::IsNull),
            "notnull" => Ok(FilterOp::NotNull),
            "between" => Ok(FilterOp::Between),
            other => Err(CoreError::UnknownTag {
                kind: "filter operator",
                value: other.to_string(),
            }),
        }
    }
}

/// Sort direction for the query façade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(CoreError::UnknownTag {
                kind: "sort direction",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
