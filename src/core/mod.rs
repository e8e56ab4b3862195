/// Dashboard KPI texts and chart datasets
pub mod dashboard;
/// Client-side catalog filtering
pub mod filter;
/// In-memory catalog snapshot store
pub mod store;
/// Spreadsheet upload validation
pub mod upload;
