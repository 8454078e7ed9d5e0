//! Command-line front end.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use deckcalc::board::{self, BoardSpec};
use deckcalc::config::Config;
use deckcalc::estimate::{
    CalcMode, CalculationResult, compute, format_area, format_price, format_quantity,
};
use deckcalc::export::{
    CardExporter, ClipboardExporter, ExportArtifact, TextCardExporter, export_record,
};
use deckcalc::records::{FileStorage, Persistence, RecordStore, SavedRecord};

#[derive(Parser, Debug)]
#[command(name = "deckcalc", version, about = "Deck board quantity, area and cost estimator")]
pub struct Cli {
    /// Path to config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute an estimate
    Calc(EstimateArgs),
    /// Compute an estimate and save it as a quote
    Save {
        #[command(flatten)]
        estimate: EstimateArgs,
        /// Quote title (defaults to the board dimensions)
        #[arg(long)]
        title: Option<String>,
    },
    /// List saved quotes, newest first
    List,
    /// Delete a saved quote
    Remove { id: i64 },
    /// Delete all saved quotes
    Clear,
    /// Export a saved quote card
    Export {
        id: i64,
        /// Copy the card to the clipboard instead of writing a file
        #[arg(long)]
        clipboard: bool,
        /// Directory to write the card to
        #[arg(long, conflicts_with = "clipboard")]
        out: Option<PathBuf>,
    },
    /// List the board catalogue
    Presets,
}

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Catalogue board name (see `presets`)
    #[arg(long, conflicts_with = "board")]
    preset: Option<String>,

    /// Custom board as THICKNESSxWIDTHxLENGTH in mm
    #[arg(long)]
    board: Option<BoardSpec>,

    /// Price per board
    #[arg(long)]
    price: Option<f64>,

    /// What the input means: quantity, m2 or pyeong
    #[arg(long, default_value = "quantity")]
    mode: CalcMode,

    /// Board count or target area
    #[arg(allow_hyphen_values = true)]
    input: String,
}

impl EstimateArgs {
    fn board(&self, config: &Config) -> Result<BoardSpec> {
        if let Some(spec) = self.board {
            return Ok(spec);
        }
        let name = self.preset.as_deref().unwrap_or(&config.default_preset);
        Ok(board::preset(name)?.spec)
    }

    fn unit_price(&self, config: &Config) -> f64 {
        self.price.unwrap_or(config.default_unit_price)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Calc(args) => {
            let spec = args.board(&config)?;
            let result = compute(&spec, args.unit_price(&config), args.mode, &args.input);
            print_result(&spec, &result);
            Ok(())
        }
        Command::Save { estimate, title } => {
            let spec = estimate.board(&config)?;
            let unit_price = estimate.unit_price(&config);
            let result = compute(&spec, unit_price, estimate.mode, &estimate.input);
            if !result.valid {
                anyhow::bail!(
                    "Nothing to save: '{}' is not a positive {} input",
                    estimate.input,
                    estimate.mode
                );
            }

            let record = SavedRecord::from_result(
                &spec,
                unit_price,
                &result,
                title.as_deref(),
                Utc::now().timestamp_millis(),
            )?;
            let id = record.id;

            let mut store = open_store(&config);
            report(store.append(record));
            print_result(&spec, &result);
            println!("Saved quote {}", id);
            Ok(())
        }
        Command::List => {
            let store = open_store(&config);
            if store.is_empty() {
                println!("No saved quotes.");
            }
            for record in store.records() {
                println!(
                    "{}  {}  [{}]  {} boards  {}  {}",
                    record.id,
                    record.title,
                    record.input_label,
                    format_quantity(record.total_quantity),
                    format_area(record.total_area_m2),
                    format_price(record.total_price)
                );
            }
            Ok(())
        }
        Command::Remove { id } => {
            let mut store = open_store(&config);
            match store.remove(id) {
                Persistence::Unchanged => println!("No saved quote {}", id),
                outcome => {
                    report(outcome);
                    println!("Removed quote {}", id);
                }
            }
            Ok(())
        }
        Command::Clear => {
            let mut store = open_store(&config);
            let count = store.len();
            report(store.clear());
            println!("Cleared {} saved quotes", count);
            Ok(())
        }
        Command::Export { id, clipboard, out } => {
            let store = open_store(&config);
            let exporter: Box<dyn CardExporter> = if clipboard {
                Box::new(ClipboardExporter)
            } else {
                Box::new(TextCardExporter::new(
                    out.unwrap_or_else(|| config.resolved_export_dir()),
                ))
            };

            let artifact = export_record(&store, id, exporter.as_ref())
                .with_context(|| format!("Failed to export quote {}", id))?;
            match artifact {
                ExportArtifact::File(path) => println!("Wrote {}", path.display()),
                ExportArtifact::Clipboard => println!("Copied quote {} to clipboard", id),
            }
            Ok(())
        }
        Command::Presets => {
            for preset in board::presets() {
                println!("{:<20} {:<16} {}", preset.name, preset.material, preset.spec);
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path).context("Failed to load config"),
        None => match Config::default_path() {
            Some(path) => Config::load(&path).context("Failed to load config"),
            None => Ok(Config::default()),
        },
    }
}

fn open_store(config: &Config) -> RecordStore<FileStorage> {
    let storage = FileStorage::new(config.resolved_data_dir());
    let mut store = RecordStore::new(storage).with_retention_days(config.retention_days);
    store.load();
    store
}

fn report(outcome: Persistence) {
    if outcome == Persistence::Failed {
        eprintln!("warning: saved quotes could not be written; changes will be lost on exit");
    }
}

fn print_result(spec: &BoardSpec, result: &CalculationResult) {
    if !result.valid {
        println!("Enter a positive number to estimate.");
        return;
    }

    println!("Board:            {}", spec);
    println!("Input:            {}", result.input_label);
    println!("Area per board:   {}", format_area(result.area_per_board));
    println!("Price per m²:     {}", format_price(result.price_per_area_unit));
    println!("Price per pyeong: {}", format_price(result.price_per_pyeong));
    println!("Boards:           {}", format_quantity(result.total_quantity));
    println!("Total area:       {}", format_area(result.total_area));
    println!("Total price:      {}", format_price(result.total_price));
}
