pub mod analyze;
pub mod categories;
pub mod dashboard;
pub mod export;
pub mod init;
pub mod mappings;
pub mod review;

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::categorizer::{Categorizer, RuleSet};
use crate::error::Result;
use crate::mapping;
use crate::models::{Transaction, UnknownGroup};
use crate::parser;

#[derive(Parser)]
#[command(
    name = "khata",
    about = "Personal bank-statement analyzer: parse, categorize, and report spending."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up Khata: choose a data directory for mappings and exports.
    Init {
        /// Path for Khata data (default: ~/Documents/khata)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Parse a statement, categorize every transaction, and list
    /// unresolved payees.
    Analyze {
        /// Path to a PDF, CSV or XLSX statement
        file: String,
    },
    /// Spending summary: totals, per-category and monthly breakdowns.
    Dashboard {
        /// Path to a PDF, CSV or XLSX statement
        file: String,
    },
    /// Export the categorized register and summary as CSV.
    Export {
        /// Path to a PDF, CSV or XLSX statement
        file: String,
        /// Output path for the register CSV (default: <data_dir>/exports)
        #[arg(long)]
        output: Option<String>,
    },
    /// Interactively map unresolved payees to categories.
    Review {
        /// Path to a PDF, CSV or XLSX statement
        file: String,
    },
    /// Manage payee → category mapping overrides.
    Mappings {
        #[command(subcommand)]
        command: MappingsCommands,
    },
    /// List the suggested category vocabulary.
    Categories,
}

#[derive(Subcommand)]
pub enum MappingsCommands {
    /// Add or replace a mapping override.
    Add {
        /// Payee description, exactly as it appears in statements
        name: String,
        /// Category to assign
        #[arg(long)]
        category: String,
    },
    /// List all mapping overrides.
    List,
    /// Remove a mapping override.
    Remove {
        /// Payee description to unmap
        name: String,
    },
}

pub(crate) struct Analysis {
    pub transactions: Vec<Transaction>,
    pub unknowns: Vec<UnknownGroup>,
    pub skipped_lines: usize,
}

/// Shared pipeline: parse → standardize → categorize with the stored
/// mapping overrides applied. Overridden payees never reach the
/// unknown list, so `unknowns` is already the unresolved set.
pub(crate) fn analyze_file(file: &str) -> Result<Analysis> {
    let parsed = parser::parse_file(Path::new(file))?;
    let categorizer =
        Categorizer::new(RuleSet::default_rules()).with_overrides(mapping::load_mapping());
    let (transactions, unknowns) = categorizer.categorize_table(&parsed.table)?;
    Ok(Analysis {
        transactions,
        unknowns,
        skipped_lines: parsed.skipped_lines,
    })
}
