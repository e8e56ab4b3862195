//! Render pipeline - projects records and dashboard data into escaped HTML.
//!
//! All markup comes from the Tera templates in [`templates`]; product names,
//! categories and every other backend value are escaped on the way in.

/// Output elements the catalog view writes to
pub mod surface;
/// Built-in Tera templates
pub mod templates;

pub use surface::{CatalogSurface, HtmlSurface};

use crate::core::dashboard::DashboardView;
use crate::core::filter::{FilterCriteria, QuantityBand};
use crate::errors::Result;
use crate::models::CatalogRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tera::{Context, Tera};

/// Placeholder for absent optional values.
pub const MISSING_VALUE: &str = "-";

/// Number of columns in the stock table.
pub const CATALOG_COLUMNS: usize = 10;

/// Message shown in the table when the first catalog load fails.
pub const LOAD_ERROR_MESSAGE: &str = "Erro ao carregar produtos.";

#[derive(Debug, Serialize)]
struct RowContext<'a> {
    id: i64,
    name: &'a str,
    category: &'a str,
    price: String,
    quantity: u32,
    unit: &'a str,
    supplier: &'a str,
    date_received: &'a str,
    expiration_date: &'a str,
    barcode: &'a str,
}

#[derive(Debug, Serialize)]
struct CriteriaContext<'a> {
    name_query: &'a str,
    supplier: &'a str,
    band: &'static str,
}

const fn band_value(band: QuantityBand) -> &'static str {
    match band {
        QuantityBand::None => "",
        QuantityBand::Low => "baixo",
        QuantityBand::Medium => "medio",
        QuantityBand::High => "alto",
    }
}

fn display_date(value: Option<&str>) -> &str {
    match value {
        Some(date) if !date.trim().is_empty() => date,
        _ => MISSING_VALUE,
    }
}

/// Renders catalog and dashboard fragments.
#[derive(Debug)]
pub struct CatalogRenderer {
    tera: Tera,
    currency_prefix: String,
}

impl CatalogRenderer {
    /// Compiles the built-in templates.
    ///
    /// # Errors
    /// Returns an error if a template fails to compile.
    pub fn new(currency_prefix: impl Into<String>) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates::ALL)?;
        Ok(Self {
            tera,
            currency_prefix: currency_prefix.into(),
        })
    }

    /// Formats a price with two decimals and the currency prefix.
    #[must_use]
    pub fn format_price(&self, price: f64) -> String {
        format!("{} {price:.2}", self.currency_prefix)
    }

    /// Table body rows for `records`; the empty string for no records.
    ///
    /// # Errors
    /// Returns an error if the row template fails to render.
    pub fn rows_html(&self, records: &[CatalogRecord]) -> Result<String> {
        let rows: Vec<RowContext<'_>> = records
            .iter()
            .map(|r| RowContext {
                id: r.id,
                name: &r.name,
                category: &r.category,
                price: self.format_price(r.unit_price),
                quantity: r.quantity_on_hand,
                unit: &r.unit_of_measure,
                supplier: &r.supplier,
                date_received: display_date(r.date_received.as_deref()),
                expiration_date: display_date(r.expiration_date.as_deref()),
                barcode: &r.barcode,
            })
            .collect();

        let mut context = Context::new();
        context.insert("rows", &rows);
        Ok(self.tera.render(templates::CATALOG_ROWS, &context)?)
    }

    /// Replaces the table body with one row per record.
    ///
    /// # Errors
    /// Returns an error if the row template fails to render.
    pub fn render<S: CatalogSurface>(
        &self,
        surface: &mut S,
        records: &[CatalogRecord],
    ) -> Result<()> {
        let html = self.rows_html(records)?;
        surface.replace_table_body(html);
        Ok(())
    }

    /// Updates the shown/total counters.
    #[allow(clippy::unused_self)]
    pub fn render_summary<S: CatalogSurface>(&self, surface: &mut S, shown: usize, total: usize) {
        surface.set_counters(shown, total);
    }

    /// Replaces the table body with a single full-width error row.
    ///
    /// # Errors
    /// Returns an error if the error template fails to render.
    pub fn render_error<S: CatalogSurface>(&self, surface: &mut S, message: &str) -> Result<()> {
        let mut context = Context::new();
        context.insert("colspan", &CATALOG_COLUMNS);
        context.insert("message", message);
        let html = self.tera.render(templates::ERROR_ROW, &context)?;
        surface.replace_table_body(html);
        Ok(())
    }

    /// Fills the category control: the default option plus one per category.
    ///
    /// # Errors
    /// Returns an error if the options template fails to render.
    pub fn render_categories<S: CatalogSurface>(
        &self,
        surface: &mut S,
        categories: &[String],
        selected: &str,
    ) -> Result<()> {
        let mut context = Context::new();
        context.insert("categories", categories);
        context.insert("selected", selected);
        let html = self.tera.render(templates::CATEGORY_OPTIONS, &context)?;
        surface.set_category_options(html);
        Ok(())
    }

    /// Renders a standalone catalog page from the surface's current fragments.
    ///
    /// # Errors
    /// Returns an error if the page template fails to render.
    pub fn catalog_page(
        &self,
        surface: &HtmlSurface,
        criteria: &FilterCriteria,
        loaded_at: Option<DateTime<Utc>>,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert(
            "criteria",
            &CriteriaContext {
                name_query: &criteria.name_query,
                supplier: &criteria.supplier,
                band: band_value(criteria.quantity_band),
            },
        );
        context.insert("category_options", &surface.category_options);
        context.insert("table_body", &surface.table_body);
        context.insert("filtered_count", &surface.filtered_count);
        context.insert("total_count", &surface.total_count);
        context.insert(
            "loaded_at",
            &loaded_at.map(|t| t.format("%d/%m/%Y %H:%M UTC").to_string()),
        );
        Ok(self.tera.render(templates::CATALOG_PAGE, &context)?)
    }

    /// Alert list entries.
    ///
    /// # Errors
    /// Returns an error if the alerts template fails to render.
    pub fn alerts_html(&self, view: &DashboardView) -> Result<String> {
        let mut context = Context::new();
        context.insert("alerts", &view.alerts);
        Ok(self.tera.render(templates::ALERTS, &context)?)
    }

    /// Renders the dashboard page: KPI cards, chart payloads and alert list.
    ///
    /// Chart payloads are embedded as JSON in `data-chart` attributes for the
    /// charting library to pick up.
    ///
    /// # Errors
    /// Returns an error if serialization or a template fails.
    pub fn dashboard_page(&self, view: &DashboardView) -> Result<String> {
        let mut context = Context::new();
        context.insert("cards", &view.cards);
        context.insert("sales_chart", &serde_json::to_string(&view.sales_chart)?);
        context.insert("status_chart", &serde_json::to_string(&view.status_chart)?);
        context.insert("alerts", &self.alerts_html(view)?);
        Ok(self.tera.render(templates::DASHBOARD_PAGE, &context)?)
    }
}
