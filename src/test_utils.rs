//! Shared test utilities for `StockSense`.
//!
//! This module provides an in-memory backend and sample catalogs with
//! sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::api::{CATALOG_PATH, CATEGORIES_PATH, CatalogApi, DashboardApi};
use crate::core::upload::UploadPair;
use crate::errors::{Error, FetchError, Result};
use crate::models::{CatalogRecord, DashboardSummary};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tracing_subscriber::EnvFilter;

/// Routes tracing output to the test harness.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates a catalog record with sensible defaults.
///
/// # Defaults
/// * `category`: "Mercearia"
/// * `unit_price`: 9.9
/// * `unit_of_measure`: "un"
/// * `supplier`: "Distribuidora Central"
/// * dates: `Some("2025-01-10")` and `Some("2025-12-31")`
pub fn test_record(id: i64, name: &str, quantity: u32) -> CatalogRecord {
    CatalogRecord {
        id,
        name: name.to_string(),
        category: "Mercearia".to_string(),
        unit_price: 9.9,
        quantity_on_hand: quantity,
        unit_of_measure: "un".to_string(),
        supplier: "Distribuidora Central".to_string(),
        date_received: Some("2025-01-10".to_string()),
        expiration_date: Some("2025-12-31".to_string()),
        barcode: format!("789100000{id:04}"),
    }
}

fn categorized(mut record: CatalogRecord, category: &str) -> CatalogRecord {
    record.category = category.to_string();
    record
}

/// The three-item coffee/sugar catalog used throughout the filter tests.
pub fn coffee_scenario() -> Vec<CatalogRecord> {
    vec![
        categorized(test_record(1, "Café Moído", 15), "Bebidas"),
        categorized(test_record(2, "cafe em grao", 50), "Bebidas"),
        test_record(3, "Açúcar", 300),
    ]
}

/// A mixed catalog spanning three categories and all quantity bands.
pub fn sample_catalog() -> Vec<CatalogRecord> {
    let mut leite = categorized(test_record(4, "Leite Integral", 19), "Laticínios");
    leite.expiration_date = None;
    let mut queijo = categorized(test_record(5, "Queijo Minas", 20), "Laticínios");
    queijo.date_received = None;

    let mut catalog = coffee_scenario();
    catalog.extend([
        leite,
        queijo,
        test_record(6, "Arroz Integral", 200),
        test_record(7, "Feijão Carioca", 201),
        categorized(test_record(8, "Suco de Maçã", 0), "Bebidas"),
        test_record(9, "Farinha de Mandioca", 75),
    ]);
    catalog
}

/// Blocks a fake catalog fetch until released.
#[derive(Debug, Clone)]
pub struct CatalogGate(Arc<Notify>);

impl CatalogGate {
    /// Lets the held fetch resolve.
    pub fn release(&self) {
        self.0.notify_one();
    }
}

/// In-memory backend. Failures are injected as HTTP statuses.
#[derive(Debug)]
pub struct FakeBackend {
    catalog: Mutex<std::result::Result<Vec<CatalogRecord>, u16>>,
    categories: Mutex<std::result::Result<Vec<String>, u16>>,
    dashboard: Mutex<Option<DashboardSummary>>,
    gate: Mutex<Option<Arc<Notify>>>,
    catalog_calls: AtomicUsize,
    category_calls: AtomicUsize,
    upload_calls: AtomicUsize,
}

impl Default for FakeBackend {
    /// An empty catalog, no categories and no dashboard.
    fn default() -> Self {
        Self {
            catalog: Mutex::new(Ok(Vec::new())),
            categories: Mutex::new(Ok(Vec::new())),
            dashboard: Mutex::new(None),
            gate: Mutex::new(None),
            catalog_calls: AtomicUsize::new(0),
            category_calls: AtomicUsize::new(0),
            upload_calls: AtomicUsize::new(0),
        }
    }
}

impl FakeBackend {
    /// Serves `catalog` and its distinct categories in first-seen order.
    pub fn with_catalog(catalog: Vec<CatalogRecord>) -> Self {
        let backend = Self::default();
        backend.set_catalog(catalog);
        backend
    }

    /// Serves `summary` from both dashboard endpoints.
    pub fn with_dashboard(summary: DashboardSummary) -> Self {
        let backend = Self::default();
        *backend.dashboard.lock().unwrap() = Some(summary);
        backend
    }

    pub fn set_catalog(&self, catalog: Vec<CatalogRecord>) {
        let mut categories: Vec<String> = Vec::new();
        for record in &catalog {
            if !categories.contains(&record.category) {
                categories.push(record.category.clone());
            }
        }
        *self.catalog.lock().unwrap() = Ok(catalog);
        *self.categories.lock().unwrap() = Ok(categories);
    }

    pub fn fail_catalog_with_status(&self, status: u16) {
        *self.catalog.lock().unwrap() = Err(status);
    }

    pub fn fail_categories_with_status(&self, status: u16) {
        *self.categories.lock().unwrap() = Err(status);
    }

    /// Makes the next catalog fetch wait until the returned gate is released.
    pub fn hold_catalog(&self) -> CatalogGate {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(Arc::clone(&notify));
        CatalogGate(notify)
    }

    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }

    pub fn category_calls(&self) -> usize {
        self.category_calls.load(Ordering::SeqCst)
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    fn dashboard_or_error(&self) -> Result<DashboardSummary> {
        self.dashboard
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::Backend {
                message: "Erro ao ler arquivos demo".to_string(),
            })
    }
}

fn status_error(path: &str, status: u16) -> FetchError {
    FetchError::Status {
        url: format!("fake://{}", path.trim_start_matches('/')),
        status,
    }
}

impl CatalogApi for FakeBackend {
    async fn fetch_catalog(&self) -> std::result::Result<Vec<CatalogRecord>, FetchError> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.catalog
            .lock()
            .unwrap()
            .clone()
            .map_err(|status| status_error(CATALOG_PATH, status))
    }

    async fn fetch_categories(&self) -> std::result::Result<Vec<String>, FetchError> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        self.categories
            .lock()
            .unwrap()
            .clone()
            .map_err(|status| status_error(CATEGORIES_PATH, status))
    }
}

impl DashboardApi for FakeBackend {
    async fn fetch_demo_dashboard(&self) -> Result<DashboardSummary> {
        self.dashboard_or_error()
    }

    async fn process_upload(&self, _upload: &UploadPair) -> Result<DashboardSummary> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.dashboard_or_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_backend_serves_empty_catalog() {
        let backend = FakeBackend::default();
        assert!(backend.fetch_catalog().await.unwrap().is_empty());
        assert!(backend.fetch_categories().await.unwrap().is_empty());
        assert!(backend.fetch_demo_dashboard().await.is_err());
        assert_eq!(backend.catalog_calls(), 1);
        assert_eq!(backend.category_calls(), 1);
    }
}
