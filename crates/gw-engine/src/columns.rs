//! Column introspection types and engine type classification.

/// One physical column as reported by the engine.
#[derive(Debug, Clone)]
pub struct ColumnInfo {
    pub name: String,
    /// Engine type name, uppercased (e.g. `INTEGER`, `VARCHAR`).
    pub duck_type: String,
    pub nullable: bool,
}

impl ColumnInfo {
    pub fn is_integer(&self) -> bool {
        is_integer_type(&self.duck_type)
    }

    pub fn is_floating(&self) -> bool {
        is_floating_type(&self.duck_type)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_floating()
    }

    pub fn is_text(&self) -> bool {
        is_text_type(&self.duck_type)
    }
}

pub(crate) fn is_integer_type(t: &str) -> bool {
    matches!(t, "INTEGER" | "INT" | "INT4" | "BIGINT" | "INT8")
}

pub(crate) fn is_floating_type(t: &str) -> bool {
    matches!(t, "DOUBLE" | "FLOAT" | "FLOAT8" | "REAL" | "DECIMAL")
}

pub(crate) fn is_text_type(t: &str) -> bool {
    matches!(t, "VARCHAR" | "TEXT")
}

/// Map an engine type name to the catalog's wire field type.
pub fn field_type(duck_type: &str) -> &'static str {
    match duck_type {
        "INTEGER" | "INT" | "INT4" => "int4",
        "BIGINT" | "INT8" => "int8",
        "DOUBLE" | "FLOAT" | "FLOAT8" | "REAL" | "DECIMAL" | "HUGEINT" => "float8",
        "BOOLEAN" => "boolean",
        "DATE" => "date",
        "TIMESTAMP" | "TIMESTAMP_S" => "timestamp",
        "TIMESTAMP_TZ" | "TIMESTAMPTZ" => "timestamptz",
        "VARCHAR" => "varchar",
        "TEXT" => "text",
        _ => "string",
    }
}

#[cfg(test)]
#[path = "columns_test.rs"]
mod tests;
