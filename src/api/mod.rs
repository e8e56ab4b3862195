//! Backend API seams.
//!
//! The catalog view and the dashboard only see these traits, so tests can swap
//! in an in-memory backend while the binary uses [`HttpBackend`].

#![allow(async_fn_in_trait)]

/// `reqwest` implementation of the backend traits
pub mod http;

pub use http::HttpBackend;

use crate::core::upload::UploadPair;
use crate::errors::{FetchError, Result};
use crate::models::{CatalogRecord, DashboardSummary};

/// Catalog endpoint path
pub const CATALOG_PATH: &str = "/api/estoque";
/// Category list endpoint path
pub const CATEGORIES_PATH: &str = "/api/categorias";
/// Demo dashboard endpoint path
pub const DEMO_DASHBOARD_PATH: &str = "/mock";
/// Spreadsheet processing endpoint path
pub const PROCESS_UPLOAD_PATH: &str = "/processar";

/// Read access to the stock catalog and its category list.
pub trait CatalogApi {
    /// Fetches the full catalog snapshot.
    async fn fetch_catalog(&self) -> std::result::Result<Vec<CatalogRecord>, FetchError>;

    /// Fetches the category names used by the category filter control.
    async fn fetch_categories(&self) -> std::result::Result<Vec<String>, FetchError>;
}

/// Dashboard data produced by the backend's spreadsheet processing.
pub trait DashboardApi {
    /// Fetches the dashboard computed from the backend's bundled demo data.
    async fn fetch_demo_dashboard(&self) -> Result<DashboardSummary>;

    /// Uploads a sales and a stock spreadsheet and returns the processed dashboard.
    async fn process_upload(&self, upload: &UploadPair) -> Result<DashboardSummary>;
}
