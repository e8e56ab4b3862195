//! Wire models returned by the `StockSense` backend.
//!
//! Field names on the wire are the backend's Portuguese column names; the Rust
//! side uses English names and maps them with `serde(rename)`.

use serde::{Deserialize, Serialize};

/// One inventory item, as served by `GET /api/estoque`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Unique within a single catalog snapshot
    pub id: i64,
    /// Product name
    #[serde(rename = "nome_produto")]
    pub name: String,
    /// Category name
    #[serde(rename = "categoria")]
    pub category: String,
    /// Price per unit
    #[serde(rename = "preco_unitario")]
    pub unit_price: f64,
    /// Units in stock
    #[serde(rename = "quantidade_estoque")]
    pub quantity_on_hand: u32,
    /// Unit of measure, e.g. "kg"
    #[serde(rename = "unidade_medida")]
    pub unit_of_measure: String,
    /// Supplier name
    #[serde(rename = "fornecedor")]
    pub supplier: String,
    /// Date the stock entered, as sent by the backend
    #[serde(rename = "data_entrada", default)]
    pub date_received: Option<String>,
    /// Expiration date, as sent by the backend
    #[serde(rename = "data_validade", default)]
    pub expiration_date: Option<String>,
    /// EAN barcode
    #[serde(rename = "codigo_barras")]
    pub barcode: String,
}

/// One entry of the dashboard alert list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Alert kind, e.g. "Ruptura Iminente" or "Excesso de Estoque"
    #[serde(rename = "tipo", default)]
    pub kind: String,
    /// Product name
    #[serde(rename = "produto", default)]
    pub product: String,
    /// Units in stock when the alert was raised
    #[serde(rename = "estoque_atual", default)]
    pub current_stock: i64,
    /// Days until the item runs out; only set on rupture alerts
    #[serde(rename = "dias_restantes", default)]
    pub days_remaining: Option<i64>,
    /// Days the item has been idle; only set on excess alerts
    #[serde(rename = "dias_parado", default, skip_serializing_if = "Option::is_none")]
    pub days_idle: Option<i64>,
}

impl Alert {
    /// Whether this alert announces an imminent stock rupture.
    #[must_use]
    pub fn is_rupture(&self) -> bool {
        self.kind.to_lowercase().contains("ruptura")
    }
}

/// Processed dashboard payload from `GET /mock` and `POST /processar`.
///
/// Every field is optional on the wire; missing values default to zero or empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Products at risk of rupture
    #[serde(rename = "produtos_em_risco", default)]
    pub at_risk: u32,
    /// Products with excess stock
    #[serde(rename = "excesso_estoque", default)]
    pub excess: u32,
    /// Recommended restocks
    #[serde(rename = "sugestoes_compra", default)]
    pub purchase_suggestions: u32,
    /// Estimated financial opportunity
    #[serde(rename = "oportunidade", default)]
    pub opportunity: Option<f64>,
    /// Day labels of the sales chart
    #[serde(rename = "vendas_labels", default)]
    pub sales_labels: Vec<String>,
    /// Units sold per labelled day
    #[serde(rename = "vendas_valores", default)]
    pub sales_values: Vec<f64>,
    /// Alert list entries
    #[serde(rename = "alertas", default)]
    pub alerts: Vec<Alert>,
}

/// Error payload the backend sends alongside a failing status.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendError {
    /// Error message
    #[serde(rename = "erro")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_catalog_record_from_backend_json() {
        let json = r#"{
            "id": 7,
            "nome_produto": "Café Moído",
            "categoria": "Bebidas",
            "preco_unitario": 18.9,
            "quantidade_estoque": 15,
            "unidade_medida": "pct",
            "fornecedor": "Torrefação Sul",
            "data_entrada": "2025-01-10",
            "data_validade": null,
            "codigo_barras": "7891000100103"
        }"#;

        let record: CatalogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.name, "Café Moído");
        assert_eq!(record.unit_price, 18.9);
        assert_eq!(record.quantity_on_hand, 15);
        assert_eq!(record.date_received.as_deref(), Some("2025-01-10"));
        assert!(record.expiration_date.is_none());
    }

    #[test]
    fn test_catalog_record_missing_dates_default_to_none() {
        let json = r#"{
            "id": 1, "nome_produto": "Sal", "categoria": "Mercearia",
            "preco_unitario": 2.5, "quantidade_estoque": 40, "unidade_medida": "kg",
            "fornecedor": "Salinas", "codigo_barras": "1"
        }"#;

        let record: CatalogRecord = serde_json::from_str(json).unwrap();
        assert!(record.date_received.is_none());
        assert!(record.expiration_date.is_none());
    }

    #[test]
    fn test_dashboard_summary_defaults_missing_fields() {
        let summary: DashboardSummary = serde_json::from_str("{}").unwrap();
        assert_eq!(summary, DashboardSummary::default());
    }

    #[test]
    fn test_alert_rupture_detection_is_case_insensitive() {
        let json = r#"[
            {"tipo": "Ruptura Iminente", "produto": "Leite", "estoque_atual": 4, "dias_restantes": 1},
            {"tipo": "Excesso de Estoque", "produto": "Arroz", "estoque_atual": 150, "dias_parado": 45}
        ]"#;
        let alerts: Vec<Alert> = serde_json::from_str(json).unwrap();
        assert!(alerts[0].is_rupture());
        assert!(!alerts[1].is_rupture());
        assert_eq!(alerts[1].days_idle, Some(45));
    }
}
