//! Gridworks CLI - versioned tabular catalog with schema inference and lineage

use anyhow::Result;
use clap::Parser;
use gw_catalog::CatalogDb;
use std::path::Path;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let catalog = CatalogDb::open(Path::new(&cli.global.db))?;

    match &cli.command {
        Commands::Import(args) => commands::import::execute(args, &catalog),
        Commands::Tables => commands::inspect::tables(&catalog),
        Commands::Table(args) => commands::inspect::table(args, &catalog),
        Commands::Files => commands::inspect::files(&catalog),
        Commands::Query(args) => commands::query::execute(args, &catalog),
        Commands::Clean(args) => commands::transform::clean(args, &catalog),
        Commands::Merge(args) => commands::transform::merge(args, &catalog),
        Commands::Reshape(args) => commands::transform::reshape(args, &catalog),
        Commands::Undo => commands::transform::undo(&catalog),
        Commands::History => commands::inspect::history(&catalog),
        Commands::Lineage => commands::inspect::lineage(&catalog),
        Commands::Relations => commands::inspect::relations(&catalog),
        Commands::CreateRelation(args) => commands::schema::create_relation(args, &catalog),
        Commands::RelationReport(args) => commands::schema::relation_report(args, &catalog),
        Commands::SetPk(args) => commands::schema::set_pk(args, &catalog),
        Commands::Refresh(args) => commands::schema::refresh(args, &catalog),
    }
}
