//! boxmanip - fixture harness for the manipulation engine
//!
//! Loads a grid document, runs one operation against it and prints the
//! resulting report.

use anyhow::{Context, Result};
use boxmanip::cli::{Cli, Commands};
use boxmanip::engine::{execute_with, list_usable, lookup};
use boxmanip::grid::{MemoryGrid, StorageGrid};
use boxmanip::report::describe;
use boxmanip::types::ManipCategory;
use boxmanip::ManipConfig;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Initialize the logger; `RUST_LOG` overrides the default `info` level
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .init();
}

fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    match cli.command {
        Commands::List { grid, category } => list_operations(&grid, category),
        Commands::Run {
            grid,
            op,
            page,
            reverse,
            config,
            output,
        } => run_operation(&grid, &op, page, reverse, config.as_deref(), output),
        Commands::Validate { config, grid } => validate_config(&config, grid.as_deref()),
    }
}

fn list_operations(grid_path: &Path, category: Option<ManipCategory>) -> Result<()> {
    let grid = MemoryGrid::load_from_file(grid_path)?;
    info!(
        "Loaded grid: {} pages x {} cells, generation {}",
        grid.page_count(),
        grid.cells_per_page(),
        grid.profile().generation
    );

    let categories: Vec<ManipCategory> = match category {
        Some(category) => vec![category],
        None => ManipCategory::iter().collect(),
    };

    for category in categories {
        println!("[{}]", category);
        for descriptor in list_usable(category, &grid) {
            println!("  {:<24} {}", descriptor.kind.to_string(), descriptor.label());
        }
    }

    Ok(())
}

fn run_operation(
    grid_path: &Path,
    op: &str,
    page: Option<usize>,
    reverse: bool,
    config_path: Option<&Path>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut grid = MemoryGrid::load_from_file(grid_path)?;

    let mut config = match config_path {
        Some(path) => ManipConfig::load_from_file(path)?,
        None => ManipConfig::default(),
    };
    if page.is_some() {
        config.page = page;
    }
    if reverse {
        config.reverse = true;
    }
    config.validate(grid.page_count())?;

    let descriptor = lookup(op)?;
    let scope = config.scope();
    let range = config.range(grid.page_count());

    let outcome = execute_with(&mut grid, descriptor.kind, range, &config.execute_options());
    let report = describe(descriptor.kind, scope, &outcome);
    println!("{}", report);

    if let Err(err) = outcome {
        error!("{} failed: {}", descriptor.kind, err);
        return Err(err).context("Manipulation failed");
    }

    if let Some(path) = output {
        grid.save_to_file(&path)?;
        info!("Grid written to {:?}", path);
    }

    Ok(())
}

fn validate_config(config_path: &Path, grid_path: Option<&Path>) -> Result<()> {
    let config = ManipConfig::load_from_file(config_path)?;

    if let Some(grid_path) = grid_path {
        let grid = MemoryGrid::load_from_file(grid_path)?;
        config.validate(grid.page_count())?;
    }

    println!("✓ Configuration file is valid: {:?}", config);
    Ok(())
}
