// CLI Layer
// ユーザー入力の受付とコマンドルーティング

pub mod command_context;
pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stratum DDL - Table description to SQL translator
///
/// Translates declarative table descriptions into dialect-specific DDL.
#[derive(Parser, Debug)]
#[command(name = crate::core::naming::BINARY_NAME)]
#[command(author = "Stratum Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Translate table descriptions into dialect-specific DDL")]
#[command(long_about = "Stratum DDL - Table description to SQL translator

Translates declarative table descriptions (JSON or YAML) into
CREATE TABLE statements for a target SQL dialect.

Stratum DDL helps you:
  • Keep table definitions as data and generate DDL from them
  • Emit idempotent guarded CREATE INDEX blocks for PostgreSQL
  • Emit column encodings and distribution/sort keys for Redshift
  • Render your own SQL templates with safely quoted parameters

Supported dialects: postgres, redshift")]
#[command(propagate_version = true)]
#[command(after_help = "GETTING STARTED:
  1. Describe a table:              albums.json with type, schema, table, columns
  2. Translate for PostgreSQL:      stratum-ddl translate albums.json
  3. Translate for Redshift:        stratum-ddl translate albums.json --dialect redshift
  4. Render a custom template:      stratum-ddl render grant.sql --param role=reader

For detailed help on each command, use: stratum-ddl <command> --help")]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a table description into SQL
    ///
    /// Reads a JSON or YAML table description and prints the DDL for the
    /// selected dialect. The `type` field selects the operation.
    ///
    /// EXAMPLES:
    ///   # Translate using the configured dialect
    ///   stratum-ddl translate albums.json
    ///
    ///   # Translate for Redshift and write to a file
    ///   stratum-ddl translate albums.yaml --dialect redshift --output albums.sql
    ///
    ///   # Input without a type field
    ///   stratum-ddl translate albums.json --operation create
    Translate {
        /// Table description file (.json, .yaml, .yml)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Path to configuration file (default: .stratum-ddl.yaml if present)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// SQL dialect (postgres, redshift)
        #[arg(short, long, value_name = "DIALECT")]
        dialect: Option<String>,

        /// Operation type used when the input has no `type` field
        #[arg(long, value_name = "TYPE")]
        operation: Option<String>,

        /// Directory containing create-index.sql
        #[arg(long, value_name = "DIR")]
        template_dir: Option<PathBuf>,

        /// Write the SQL to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Render a SQL template with named parameters
    ///
    /// Placeholders: %I:name (identifier), %L:name (literal),
    /// %s:name (raw), %F:name (include name.sql from the same directory).
    ///
    /// EXAMPLES:
    ///   # Parameters from a file
    ///   stratum-ddl render create-index.sql --params index.json
    ///
    ///   # Parameters on the command line
    ///   stratum-ddl render grant.sql --param schema=music --param role=reader
    Render {
        /// Template file
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Parameter file (.json, .yaml, .yml) containing a mapping
        #[arg(short, long, value_name = "FILE")]
        params: Option<PathBuf>,

        /// Parameter as key=value (overrides the parameter file)
        #[arg(long = "param", value_name = "KEY=VALUE")]
        param: Vec<String>,

        /// Write the SQL to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}
