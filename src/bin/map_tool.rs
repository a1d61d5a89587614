//! Map Tool - Command-line map file utility
//!
//! Validates, inspects, migrates and creates Warlords map files without
//! opening the editor.
//!
//! Run with: `cargo run --bin map_tool -- <COMMAND>`
//!
//! Commands:
//! - validate <FILE>: report every structural problem in a map file
//! - info <FILE>: print dimensions, counts and size estimate
//! - migrate <INPUT> <OUTPUT>: rewrite any version as the current format
//! - new <OUTPUT> --size <SIZE>: write a map filled with one terrain
//!
//! Set `RUST_LOG=debug` (or pass `-v`) for serializer diagnostics.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::Value;

use warlords_map_engine::MapConfig;
use warlords_map_engine::io::{self, SerializeOptions};
use warlords_map_engine::map::{MapSize, Terrain};

#[derive(Parser, Debug)]
#[command(name = "map_tool", about = "Warlords map file utility")]
struct Cli {
    /// JSON config file overriding map limits and defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a map file's structure and report every problem found
    Validate { file: PathBuf },
    /// Print a summary of a map file
    Info { file: PathBuf },
    /// Load a map of any version and write it in the current format
    Migrate { input: PathBuf, output: PathBuf },
    /// Create a new map filled with a single terrain
    New {
        output: PathBuf,
        /// tiny, small, medium, large or very-large
        #[arg(long, default_value = "medium")]
        size: MapSize,
        /// Fill terrain (defaults to the config's default terrain)
        #[arg(long)]
        terrain: Option<Terrain>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_document(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Returns `false` when the file is structurally invalid.
fn run_validate(file: &Path) -> Result<bool> {
    let data = read_document(file)?;
    let value: Value = serde_json::from_str(&data)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    let report = io::validate(&value);
    if report.valid {
        println!("{}: OK", file.display());
    } else {
        println!("{}: {} problem(s)", file.display(), report.errors.len());
        for error in &report.errors {
            println!("  - {error}");
        }
    }
    Ok(report.valid)
}

fn run_info(file: &Path, config: &MapConfig) -> Result<()> {
    let data = read_document(file)?;
    let loaded = config
        .load_map(&data)
        .with_context(|| format!("failed to load {}", file.display()))?;
    let map = &loaded.map;
    let extent = config.layout(map).world_extent();

    println!("File:        {}", file.display());
    println!("Version:     {}", loaded.version);
    if let Some(name) = &loaded.metadata.name {
        println!("Name:        {name}");
    }
    if let Some(description) = &loaded.metadata.description {
        println!("Description: {description}");
    }
    println!("Size:        {} ({}x{})", loaded.map_size, map.width(), map.height());
    println!("Positions:   {}", map.position_count());
    println!("Hexes:       {}", map.hex_count());
    println!(
        "Buildings:   {}",
        loaded.buildings.as_ref().map_or(0, Vec::len)
    );
    println!("Estimated:   {} bytes", io::estimate_size(map));
    println!(
        "World:       {:.1} x {:.1} (hex size {})",
        extent.x, extent.y, config.hex_size
    );
    Ok(())
}

fn run_migrate(input: &Path, output: &Path, config: &MapConfig) -> Result<()> {
    let data = read_document(input)?;
    let loaded = config
        .load_map(&data)
        .with_context(|| format!("failed to load {}", input.display()))?;

    let options = SerializeOptions {
        pretty: true,
        ..loaded.save_options()
    };
    let json = io::serialize(&loaded.map, loaded.map_size, &options)?;
    write_document(output, &json)?;

    if loaded.was_migrated() {
        log::info!(
            "[Map Tool] Migrated {} from version {} to {}",
            input.display(),
            loaded.version,
            io::CURRENT_VERSION
        );
    } else {
        log::info!("[Map Tool] {} was already current, rewrote as-is", input.display());
    }
    Ok(())
}

fn run_new(
    output: &Path,
    size: MapSize,
    terrain: Option<Terrain>,
    name: Option<String>,
    description: Option<String>,
    config: &MapConfig,
) -> Result<()> {
    let (width, height) = size.dimensions();
    let terrain = terrain.unwrap_or_else(|| config.default_terrain.clone());

    let mut map = config.new_map(width, height)?;
    map.fill_rectangle(&terrain)?;

    let options = SerializeOptions {
        name,
        description,
        pretty: true,
        ..Default::default()
    };
    let json = io::serialize(&map, size, &options)?;
    write_document(output, &json)?;

    log::info!(
        "[Map Tool] Created {size} map ({width}x{height}, {terrain}) at {}",
        output.display()
    );
    Ok(())
}

fn run(cli: Cli) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => MapConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => MapConfig::default(),
    };
    if config.hex_size <= 0.0 || !config.hex_size.is_finite() {
        bail!("config hexSize must be a positive number, got {}", config.hex_size);
    }

    match cli.command {
        Command::Validate { file } => return run_validate(&file),
        Command::Info { file } => run_info(&file, &config)?,
        Command::Migrate { input, output } => run_migrate(&input, &output, &config)?,
        Command::New {
            output,
            size,
            terrain,
            name,
            description,
        } => run_new(&output, size, terrain, name, description, &config)?,
    }
    Ok(true)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
