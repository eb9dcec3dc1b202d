use crate::types::ManipCategory;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// boxmanip - batch sort, clear and modify operations over stored records
#[derive(Parser)]
#[command(name = "boxmanip")]
#[command(about = "Apply batch manipulations to a paginated record grid")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the operations a grid supports, in menu order
    List {
        /// Grid JSON document
        #[arg(short, long)]
        grid: PathBuf,

        /// Only show one category (sort, clear, modify)
        #[arg(short, long)]
        category: Option<ManipCategory>,
    },
    /// Run one operation against a grid
    Run {
        /// Grid JSON document
        #[arg(short, long)]
        grid: PathBuf,

        /// Operation name (e.g., SortSpecies, DeleteEggs, ModifyHeal)
        #[arg(long)]
        op: String,

        /// Target a single page instead of every page
        #[arg(short, long)]
        page: Option<usize>,

        /// Walk pages from last to first
        #[arg(short, long)]
        reverse: bool,

        /// Configuration file (command-line flags take precedence)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the resulting grid here (defaults to printing the report only)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file, optionally against a grid
    Validate {
        /// Path to configuration file to validate
        config: PathBuf,

        /// Grid the configuration will be used with
        #[arg(short, long)]
        grid: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
