use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use kitchen_units::catalog::{receive_order, reorder_suggestion, CatalogItem, PurchaseOrderLine};
use kitchen_units::config::KitchenConfig;
use kitchen_units::conversion_graph::ConversionGraph;
use kitchen_units::costing::summarize_costs;
use kitchen_units::recipe::Recipe;
use kitchen_units::scaling::scale_to_portions;
use kitchen_units::system_conversion::convert_recipe;
use kitchen_units::telemetry::init_logging;
use kitchen_units::units::UnitSystem;
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "kitchen-units")]
#[command(about = "Recipe unit conversion, scaling and costing", long_about = None)]
struct Opts {
    /// JSON settings file; KITCHEN_* environment variables are used when absent
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Convert a recipe to metric units
    Metric { recipe: PathBuf },
    /// Convert a recipe to imperial units
    Imperial { recipe: PathBuf },
    /// Scale a recipe to a new portion count
    Scale { recipe: PathBuf, portions: u32 },
    /// Switch the recipe currency to the next one in the cycle
    CycleCurrency { recipe: PathBuf },
    /// Print the cost roll-up and per-serving nutrition
    Summary { recipe: PathBuf },
    /// Suggest pack counts for items below par
    Reorder {
        catalog: PathBuf,
        /// Pack unit to order in, such as "case"
        pack_unit: String,
    },
    /// Apply a purchase order to on-hand stock
    Receive { catalog: PathBuf, order: PathBuf },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let opts = Opts::parse();
    let config = load_config(opts.config.as_deref())?;
    init_logging(&config)?;

    info!("Starting kitchen-units");
    run(&config, opts.command)
}

fn load_config(path: Option<&Path>) -> Result<KitchenConfig> {
    match path {
        Some(path) => KitchenConfig::from_json_file(path),
        None => KitchenConfig::from_env().context("Invalid KITCHEN_* environment"),
    }
}

fn run(config: &KitchenConfig, command: Command) -> Result<()> {
    let graph = ConversionGraph::standard();

    match command {
        Command::Metric { recipe } => {
            let recipe = load_recipe(config, &recipe)?;
            print_json(&convert_recipe(graph, &recipe, UnitSystem::Metric, &config.conversion))
        }
        Command::Imperial { recipe } => {
            let recipe = load_recipe(config, &recipe)?;
            print_json(&convert_recipe(graph, &recipe, UnitSystem::Imperial, &config.conversion))
        }
        Command::Scale { recipe, portions } => {
            let recipe = load_recipe(config, &recipe)?;
            print_json(&scale_to_portions(&recipe, portions)?)
        }
        Command::CycleCurrency { recipe } => print_json(&load_recipe(config, &recipe)?.cycle_currency()),
        Command::Summary { recipe } => {
            let recipe = load_recipe(config, &recipe)?;
            print_json(&serde_json::json!({
                "name": recipe.name,
                "portions": recipe.portions,
                "currency": recipe.currency,
                "costs": summarize_costs(&recipe),
                "nutrition_per_serving": recipe.nutrition_per_serving().map(|facts| facts.label_rounded()),
            }))
        }
        Command::Reorder { catalog, pack_unit } => reorder(&catalog, &pack_unit),
        Command::Receive { catalog, order } => receive(&catalog, &order),
    }
}

fn reorder(catalog_path: &Path, pack_unit: &str) -> Result<()> {
    let items = load_catalog(catalog_path)?;
    let suggestions: Vec<_> = items
        .iter()
        .filter_map(|item| reorder_suggestion(item, pack_unit))
        .collect();
    info!("{} of {} items below par", suggestions.len(), items.len());
    print_json(&suggestions)
}

fn receive(catalog_path: &Path, order_path: &Path) -> Result<()> {
    let items = load_catalog(catalog_path)?;
    let lines: Vec<PurchaseOrderLine> = read_json(order_path)?;
    let outcome = receive_order(&items, &lines, Utc::now());
    info!(
        "Applied {} lines, {} unmatched",
        outcome.records.len(),
        outcome.unmatched.len()
    );
    print_json(&outcome)
}

/// Read a recipe, filling a missing unit system or currency from configuration
fn load_recipe(config: &KitchenConfig, path: &Path) -> Result<Recipe> {
    let mut value: serde_json::Value = read_json(path)?;
    if let Some(fields) = value.as_object_mut() {
        fields
            .entry("unit_system")
            .or_insert_with(|| serde_json::json!(config.default_system));
        fields
            .entry("currency")
            .or_insert_with(|| serde_json::json!(config.currency));
    }
    serde_json::from_value(value).with_context(|| format!("Invalid recipe in {}", path.display()))
}

fn load_catalog(path: &Path) -> Result<Vec<CatalogItem>> {
    let items: Vec<CatalogItem> = read_json(path)?;
    Ok(items.into_iter().map(CatalogItem::with_base_unit).collect())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
