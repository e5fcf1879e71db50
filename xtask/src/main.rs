// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Development commands for the gigbook workspace: linting, building,
//! testing, and a migration check.
//!
//! ### Migration Verification
//!
//! `cargo xtask verify-migrations` applies the persistence migrations to an
//! in-memory `SQLite` database, checks the resulting schema against the
//! tables the persistence layer expects, then reverts and re-applies every
//! migration to prove the down scripts are complete.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, process::Output, vec};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, eyre::eyre, Result};
use diesel::sql_types::{Integer, Text};
use diesel::{Connection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use duct::cmd;
use std::collections::{BTreeMap, BTreeSet};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

/// Tables the persistence layer reads and writes.
const EXPECTED_TABLES: [&str; 5] = [
    "band_members",
    "bands",
    "setlist_versions",
    "setlists",
    "songs",
];

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test, migrations)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Check dependencies
    #[command(visible_alias = "cd")]
    Deny,

    /// Check unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Check for typos in the project
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Verify migrations apply, match the expected schema, and revert cleanly
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Deny => deny(),
            Self::Machete => machete(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::LintTypos => lint_typos(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

/// Run CI checks (lint, build, test, migrations)
fn ci() -> Result<()> {
    lint()?;
    deny()?;
    machete()?;
    build()?;
    test()?;
    verify_migrations()?;
    Ok(())
}

fn deny() -> Result<()> {
    run_cargo(vec!["deny", "check"])
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_with_trace()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Lint formatting, typos, clippy, and docs
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    lint_typos()?;
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without errors using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Check for typos in the project using [typos-cli](https://github.com/crate-ci/typos/)
fn lint_typos() -> Result<()> {
    cmd!("typos").run_with_trace()?;
    Ok(())
}

/// Run all tests, then doc tests
fn test() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])?;
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Verify the persistence migrations.
///
/// ## What This Command Does
///
/// 1. Applies every migration to an in-memory `SQLite` database
/// 2. Introspects the resulting schema
/// 3. Checks the expected tables, foreign keys and lookup indexes exist
/// 4. Reverts every migration and checks no tables remain
/// 5. Re-applies every migration and checks the schema is unchanged
///
/// ## Usage
///
/// ```bash
/// cargo xtask verify-migrations
/// ```
fn verify_migrations() -> Result<()> {
    tracing::info!("Starting migration verification");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply migrations: {}", e))?;
    tracing::info!("Migrations applied successfully");

    let applied = introspect_sqlite_schema(&mut conn)?;
    check_expected_schema(&applied)?;

    tracing::info!("Reverting all migrations");
    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to revert migrations: {}", e))?;
    let reverted = introspect_sqlite_schema(&mut conn)?;
    if !reverted.tables.is_empty() {
        return Err(eyre!(
            "Tables left behind after revert: {:?}",
            reverted.tables.keys().collect::<Vec<_>>()
        ));
    }

    tracing::info!("Re-applying migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to re-apply migrations: {}", e))?;
    let reapplied = introspect_sqlite_schema(&mut conn)?;
    if reapplied != applied {
        return Err(eyre!("Schema differs after revert and re-apply"));
    }

    tracing::info!("✓ Migration verification passed");
    Ok(())
}

/// Checks the tables and relations the persistence layer depends on.
fn check_expected_schema(schema: &Schema) -> Result<()> {
    let actual: BTreeSet<&str> = schema.tables.keys().map(String::as_str).collect();
    let expected: BTreeSet<&str> = EXPECTED_TABLES.into_iter().collect();
    if actual != expected {
        return Err(eyre!(
            "Table mismatch: expected {expected:?}, found {actual:?}"
        ));
    }

    require_foreign_key(schema, "band_members", "band_id", "bands", "band_id")?;
    require_foreign_key(
        schema,
        "setlist_versions",
        "setlist_id",
        "setlists",
        "setlist_id",
    )?;

    // Band ownership outlives the band row, so it must not be enforced.
    let setlists = table(schema, "setlists")?;
    if !setlists.foreign_keys.is_empty() {
        return Err(eyre!(
            "setlists must not declare foreign keys, found {:?}",
            setlists.foreign_keys
        ));
    }
    for (name, column) in [
        ("idx_setlists_owner_id", "owner_id"),
        ("idx_setlists_band_id", "band_id"),
    ] {
        let wanted = Index {
            name: name.to_string(),
            columns: vec![column.to_string()],
        };
        if !setlists.indexes.contains(&wanted) {
            return Err(eyre!("Missing index {name} on setlists({column})"));
        }
    }

    let versions = table(schema, "setlist_versions")?;
    let expected_keys: BTreeSet<String> = ["setlist_id", "version"]
        .into_iter()
        .map(String::from)
        .collect();
    if versions.primary_keys != expected_keys {
        return Err(eyre!(
            "setlist_versions primary key must be (setlist_id, version), found {:?}",
            versions.primary_keys
        ));
    }

    Ok(())
}

fn table<'a>(schema: &'a Schema, name: &str) -> Result<&'a Table> {
    schema
        .tables
        .get(name)
        .ok_or_else(|| eyre!("Missing table {name}"))
}

fn require_foreign_key(
    schema: &Schema,
    from_table: &str,
    from_column: &str,
    to_table: &str,
    to_column: &str,
) -> Result<()> {
    let wanted = ForeignKey {
        from_column: from_column.to_string(),
        to_table: to_table.to_string(),
        to_column: to_column.to_string(),
    };
    if table(schema, from_table)?.foreign_keys.contains(&wanted) {
        Ok(())
    } else {
        Err(eyre!(
            "Missing foreign key {from_table}.{from_column} -> {to_table}.{to_column}"
        ))
    }
}

/// Normalized schema representation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Table {
    columns: BTreeMap<String, Column>,
    primary_keys: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    indexes: BTreeSet<Index>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Column {
    declared_type: String,
    nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Index {
    name: String,
    columns: Vec<String>,
}

/// Introspect `SQLite` schema
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let mut table_info = Table {
            columns: BTreeMap::new(),
            primary_keys: BTreeSet::new(),
            foreign_keys: BTreeSet::new(),
            indexes: BTreeSet::new(),
        };

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        for col in columns {
            if col.pk > 0 {
                table_info.primary_keys.insert(col.name.clone());
            }
            table_info.columns.insert(
                col.name,
                Column {
                    declared_type: col.r#type.to_uppercase(),
                    nullable: col.notnull == 0,
                },
            );
        }

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err(format!(
                    "Failed to get foreign keys for table {}",
                    table.name
                ))?;

        for fk in fks {
            table_info.foreign_keys.insert(ForeignKey {
                from_column: fk.from,
                to_table: fk.table,
                to_column: fk.to,
            });
        }

        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get indexes for table {}", table.name))?;

        // Skip the automatic indexes backing primary keys
        for idx in indexes
            .into_iter()
            .filter(|idx| !idx.name.starts_with("sqlite_autoindex_"))
        {
            let index_columns: Vec<IndexColumnInfo> =
                diesel::sql_query(format!("PRAGMA index_info({})", idx.name))
                    .load(conn)
                    .wrap_err(format!("Failed to get index columns for {}", idx.name))?;

            table_info.indexes.insert(Index {
                name: idx.name,
                columns: index_columns.into_iter().map(|c| c.name).collect(),
            });
        }

        schema.tables.insert(table.name, table_info);
    }

    Ok(schema)
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
