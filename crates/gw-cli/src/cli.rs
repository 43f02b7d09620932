//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// Gridworks - versioned tabular catalog with schema inference and lineage
#[derive(Parser, Debug)]
#[command(name = "gw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to the catalog database
    #[arg(short, long, global = true, env = "GW_DB", default_value = "gridworks.duckdb")]
    pub db: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import a CSV file as a new table
    Import(ImportArgs),

    /// List all tables with merged metadata
    Tables,

    /// Show merged metadata for one table
    Table(TableArgs),

    /// List registered upload files
    Files,

    /// Query rows of a table's active version
    Query(QueryArgs),

    /// Apply a clean action, producing a new version of the table
    Clean(CleanArgs),

    /// Join two tables into a new derived table
    Merge(MergeArgs),

    /// Pivot or un-pivot a table into a new derived table
    Reshape(ReshapeArgs),

    /// Undo the most recent undoable clean
    Undo,

    /// Show the operation history (most recent 200, newest first)
    History,

    /// List lineage edges, newest first
    Lineage,

    /// List relations (explicit plus non-duplicate inferred)
    Relations,

    /// Create an explicit relation edge
    CreateRelation(CreateRelationArgs),

    /// Report live coverage and integrity counters for one relation
    RelationReport(RelationReportArgs),

    /// Declare an explicit primary key for a table
    SetPk(SetPkArgs),

    /// Refresh profiles, inferred keys, and inferred relations
    Refresh(RefreshArgs),
}

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// CSV file to import
    pub path: String,

    /// Table name (defaults to the file stem)
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Arguments for the table command
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Table id
    pub table_id: String,
}

/// Arguments for the query command
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Table id
    pub table_id: String,

    /// Filter clause as JSON, e.g. '{"field":"age","op":"gte","value":30}' (repeatable)
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Sort clause as field or field:desc (repeatable)
    #[arg(long = "sort")]
    pub sort: Vec<String>,

    /// Rows to skip
    #[arg(long, default_value_t = 0)]
    pub offset: i64,

    /// Maximum rows to return
    #[arg(long, default_value_t = 50)]
    pub limit: i64,
}

/// Arguments for the clean command
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Table id
    pub table_id: String,

    /// Clean action: drop-missing, fill-mean, fill-median, trim, lowercase,
    /// standardize-missing
    #[arg(short, long)]
    pub action: String,

    /// Target fields (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Row-scope filter as JSON (repeatable; eq, neq, contains, isnull, notnull)
    #[arg(long = "filter")]
    pub filters: Vec<String>,
}

/// Arguments for the merge command
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Left table id
    #[arg(long)]
    pub left: String,

    /// Right table id
    #[arg(long)]
    pub right: String,

    /// Left join keys (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub left_keys: Vec<String>,

    /// Right join keys (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub right_keys: Vec<String>,

    /// Join kind: full, left, right, inner
    #[arg(long, default_value = "full")]
    pub join: String,

    /// Result table name
    #[arg(long)]
    pub name: Option<String>,
}

/// Arguments for the reshape command
#[derive(Args, Debug)]
pub struct ReshapeArgs {
    /// Table id
    pub table_id: String,

    /// Direction: wide-to-long or long-to-wide
    #[arg(short, long)]
    pub direction: String,

    /// Carried identifier columns (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub id_vars: Vec<String>,

    /// Wide-to-long: columns to un-pivot (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub value_vars: Vec<String>,

    /// Wide-to-long: name of the variable column
    #[arg(long)]
    pub variable_name: Option<String>,

    /// Wide-to-long: name of the value column
    #[arg(long)]
    pub value_name: Option<String>,

    /// Long-to-wide: columns whose values become new columns (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub pivot_columns: Vec<String>,

    /// Long-to-wide: value columns aggregated into cells (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub pivot_values: Vec<String>,

    /// Result table name
    #[arg(long)]
    pub name: Option<String>,
}

/// Arguments for the create-relation command
#[derive(Args, Debug)]
pub struct CreateRelationArgs {
    /// Foreign-key side table id
    #[arg(long)]
    pub fk_table: String,

    /// Foreign-key fields (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub fk_fields: Vec<String>,

    /// Primary-key side table id
    #[arg(long)]
    pub pk_table: String,

    /// Primary-key fields (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub pk_fields: Vec<String>,

    /// Cardinality: 1:1, 1:m, m:1
    #[arg(long, default_value = "m:1")]
    pub cardinality: String,
}

/// Arguments for the relation-report command
#[derive(Args, Debug)]
pub struct RelationReportArgs {
    /// Relation id (explicit or inferred)
    pub relation_id: String,
}

/// Arguments for the set-pk command
#[derive(Args, Debug)]
pub struct SetPkArgs {
    /// Table id
    pub table_id: String,

    /// Key fields (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub fields: Vec<String>,
}

/// Arguments for the refresh command
#[derive(Args, Debug)]
pub struct RefreshArgs {
    /// Restrict the profile/key refresh to one table
    pub table_id: Option<String>,

    /// Coverage threshold for relation inference
    #[arg(long, default_value_t = gw_infer::DEFAULT_COVERAGE_THRESHOLD)]
    pub threshold: f64,
}
