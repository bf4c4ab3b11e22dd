//! gameshelfctl: headless host for the gameshelf engine

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::{Builder, Target};
use gameshelf_core::collection::load_collection;
use gameshelf_core::shelf::directives::{shelf_height, tile_edge};
use gameshelf_core::{RowMode, ShelfConfig, ShelfModel, ShelfOptions, Windower};
use log::LevelFilter;
use serde::Serialize;

mod replay;
mod script;

use replay::Replay;

#[derive(Parser)]
#[command(
    name = "gameshelfctl",
    about = "Drive the gameshelf engine without a renderer"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay an input script against a collection and print the signals
    Replay {
        /// JSON array of resource strings or catalog records
        #[arg(long)]
        collection: PathBuf,
        /// Line-oriented input script
        #[arg(long)]
        script: PathBuf,
        /// Shelf config JSON (defaults to the user config file)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Prefix for catalog record image URLs
        #[arg(long, default_value = "")]
        base_url: String,
        #[arg(long, value_enum)]
        rows: Option<RowsArg>,
        #[arg(long, default_value_t = 1280.0)]
        width: f32,
        #[arg(long, default_value_t = 800.0)]
        height: f32,
        /// Omit the trailing add slot
        #[arg(long)]
        no_add_slot: bool,
    },
    /// Print the layout derived for a viewport
    Layout {
        #[arg(long)]
        width: f32,
        #[arg(long)]
        height: f32,
        #[arg(long, value_enum, default_value = "1")]
        rows: RowsArg,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RowsArg {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
}

impl From<RowsArg> for RowMode {
    fn from(value: RowsArg) -> Self {
        match value {
            RowsArg::One => RowMode::One,
            RowsArg::Two => RowMode::Two,
        }
    }
}

#[derive(Serialize)]
struct LayoutReport {
    width: f32,
    height: f32,
    row_mode: RowMode,
    columns: usize,
    visible_slots: usize,
    shelf_height: f32,
    tile_edge: f32,
}

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("gameshelf_core", LevelFilter::Info)
        .filter_module("gameshelfctl", LevelFilter::Info)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ShelfConfig> {
    match path {
        Some(path) => ShelfConfig::from_path(path).with_context(|| {
            format!("failed to read config {}", path.display())
        }),
        None => Ok(ShelfConfig::load()),
    }
}

fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Replay {
            collection,
            script,
            config,
            base_url,
            rows,
            width,
            height,
            no_add_slot,
        } => {
            let config = load_config(config.as_deref())?;
            let items = load_collection(&collection, &base_url)
                .with_context(|| {
                    format!("failed to load collection {}", collection.display())
                })?;
            let source = std::fs::read_to_string(&script).with_context(|| {
                format!("failed to read script {}", script.display())
            })?;
            let events = script::parse(&source)
                .with_context(|| format!("invalid script {}", script.display()))?;

            let row_mode = rows.map_or_else(|| config.row_mode(), RowMode::from);
            let mut options = ShelfOptions::new(items, row_mode)
                .with_viewport(width, height);
            if no_add_slot {
                options = options.without_add_slot();
            }
            let model = ShelfModel::new(options, config);

            log::info!("Replaying {} events", events.len());
            let report = Replay::new(model).run(events);
            for record in &report.signals {
                println!("{}", serde_json::to_string(record)?);
            }
            println!("{}", serde_json::to_string_pretty(&report.directives)?);
        }
        Command::Layout {
            width,
            height,
            rows,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let row_mode = RowMode::from(rows);
            let windower = match config.columns() {
                Some(columns) => Windower::new(columns),
                None => Windower::from_viewport(
                    width,
                    config.tile_width(),
                    config.tile_spacing(),
                ),
            };
            let shelf_height = shelf_height(width);
            let report = LayoutReport {
                width,
                height,
                row_mode,
                columns: windower.columns(),
                visible_slots: windower.visible_slots(row_mode),
                shelf_height,
                tile_edge: tile_edge(
                    config.tile_width(),
                    config.tile_spacing(),
                    shelf_height,
                    row_mode,
                ),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
