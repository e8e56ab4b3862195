//! Command-line interface - argument parsing and command execution.
//!
//! Each command returns its rendered output as a string; `main` decides where
//! it goes.

use crate::api::{CatalogApi, DashboardApi};
use crate::config::Settings;
use crate::core::dashboard::build_dashboard;
use crate::core::filter::{self, FilterCriteria, QuantityBand};
use crate::core::store::CatalogStore;
use crate::core::upload::{UploadFile, validate_upload};
use crate::errors::{Error, Result};
use crate::models::CatalogRecord;
use crate::render::{CatalogRenderer, HtmlSurface};
use crate::view::{CatalogView, ViewState};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// StockSense inventory dashboard client
#[derive(Debug, Parser)]
#[command(name = "stocksense", version, about)]
pub struct Cli {
    /// Backend base URL (overrides the settings file)
    #[arg(long, global = true, env = "STOCKSENSE_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch the stock catalog, filter it and render the stock table
    Catalog(CatalogArgs),
    /// Render the dashboard from demo data or uploaded spreadsheets
    Dashboard(DashboardArgs),
}

/// Output format for rendered commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone HTML page
    #[default]
    Html,
    /// Pretty-printed JSON
    Json,
}

/// Flags of the `catalog` command.
#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Product name contains (case- and accent-insensitive)
    #[arg(long, default_value = "")]
    pub name: String,

    /// Exact category
    #[arg(long, default_value = "")]
    pub category: String,

    /// Supplier (accepted but not applied)
    #[arg(long, default_value = "")]
    pub supplier: String,

    /// Quantity band: low|baixo, medium|medio, high|alto
    #[arg(long, default_value = "", value_parser = parse_band)]
    pub band: QuantityBand,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl CatalogArgs {
    /// Filter criteria described by the flags.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            name_query: self.name.clone(),
            category: self.category.clone(),
            supplier: self.supplier.clone(),
            quantity_band: self.band,
        }
    }
}

/// Flags of the `dashboard` command.
#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Use the backend's bundled demo data
    #[arg(long, conflicts_with_all = ["vendas", "estoque"])]
    pub demo: bool,

    /// Sales spreadsheet (.csv, .xls, .xlsx)
    #[arg(long)]
    pub vendas: Option<PathBuf>,

    /// Stock spreadsheet (.csv, .xls, .xlsx)
    #[arg(long)]
    pub estoque: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

fn parse_band(value: &str) -> std::result::Result<QuantityBand, String> {
    value.parse().map_err(|e: Error| e.to_string())
}

#[derive(Debug, Serialize)]
struct CatalogReport {
    state: String,
    shown: usize,
    total: usize,
    categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    records: Vec<CatalogRecord>,
}

/// Loads the catalog, applies the flags' criteria and renders the result.
///
/// A failed catalog load is not an error here: the HTML output carries the
/// error row and the JSON output an `error` field.
///
/// # Errors
/// Returns an error if rendering or serialization fails.
pub async fn run_catalog<A: CatalogApi>(
    api: A,
    settings: &Settings,
    args: &CatalogArgs,
) -> Result<String> {
    let renderer = CatalogRenderer::new(settings.currency_prefix.clone())?;
    let mut view = CatalogView::new(
        api,
        Arc::new(CatalogStore::new()),
        renderer,
        HtmlSurface::default(),
    );

    view.initialize().await?;
    let criteria = args.criteria();
    if !criteria.is_empty() {
        view.apply_filters(criteria).await?;
    }
    if view.state() == ViewState::Error {
        warn!("Catalog unavailable: {}", view.last_error().unwrap_or("unknown error"));
    }

    match args.format {
        OutputFormat::Html => view.page().await,
        OutputFormat::Json => {
            let snapshot = view.store().current().await;
            let records = filter::apply(&snapshot.records, view.criteria());
            let report = CatalogReport {
                state: format!("{:?}", view.state()).to_lowercase(),
                shown: records.len(),
                total: snapshot.len(),
                categories: view.categories().to_vec(),
                error: view.last_error().map(str::to_string),
                records,
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}

/// Fetches or computes the dashboard and renders it.
///
/// # Errors
/// Returns an error if the upload is rejected, the backend fails, or
/// rendering fails.
pub async fn run_dashboard<D: DashboardApi>(
    api: &D,
    settings: &Settings,
    args: &DashboardArgs,
) -> Result<String> {
    let summary = if args.demo {
        info!("Loading demo dashboard");
        api.fetch_demo_dashboard().await?
    } else {
        let sales = args.vendas.as_ref().map(UploadFile::from_path).transpose()?;
        let stock = args.estoque.as_ref().map(UploadFile::from_path).transpose()?;
        let upload = validate_upload(sales, stock)?;
        info!(
            "Processing {} and {}",
            upload.sales.file_name, upload.stock.file_name
        );
        api.process_upload(&upload).await?
    };

    let dashboard = build_dashboard(&summary, &settings.currency_prefix);
    match args.format {
        OutputFormat::Html => {
            CatalogRenderer::new(settings.currency_prefix.clone())?.dashboard_page(&dashboard)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&dashboard)?),
    }
}
