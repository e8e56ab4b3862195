//! Dashboard business logic - KPI card texts and chart datasets.
//!
//! Everything here is a pure projection of a [`DashboardSummary`]. Chart
//! drawing is left to the external charting library; this module only builds
//! the `{labels, datasets}` payloads it consumes.

use crate::models::{Alert, DashboardSummary};
use serde::Serialize;

/// Percentage base the doughnut chart's "adequate" slice is derived from.
const DOUGHNUT_TOTAL: u32 = 100;

/// Texts shown on the four KPI cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCards {
    /// At-risk product count
    pub at_risk: u32,
    /// Text under the at-risk count
    pub at_risk_description: String,
    /// Excess stock count
    pub excess: u32,
    /// Text under the excess count
    pub excess_description: String,
    /// Restock suggestion count
    pub purchase_suggestions: u32,
    /// Text under the suggestion count
    pub suggestions_description: String,
    /// Pre-formatted opportunity value, e.g. "R$ 12.500"
    pub opportunity: String,
}

/// Chart kind, named as the charting library expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Sales over time
    Line,
    /// Stock status split
    Doughnut,
}

/// One dataset of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Legend label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// One value per label
    pub data: Vec<f64>,
    /// Line color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Either one fill color or one color per slice
    pub background_color: Vec<String>,
    /// Line width in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    /// Whether the area under the line is filled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    /// Line curve tension
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

/// Chart payload: the chart kind plus its `{labels, datasets}` data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Chart type
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// X axis or slice labels
    pub labels: Vec<String>,
    /// Chart datasets
    pub datasets: Vec<Dataset>,
}

/// Everything the dashboard page needs, derived from one summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// KPI card texts
    pub cards: KpiCards,
    /// Sales line chart
    pub sales_chart: ChartData,
    /// Stock status doughnut
    pub status_chart: ChartData,
    /// Alert list entries
    pub alerts: Vec<Alert>,
}

/// Formats an integer amount with `.` as thousands separator.
#[must_use]
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Describes the nearest stock rupture, falling back to the risk count.
#[must_use]
pub fn risk_description(summary: &DashboardSummary) -> String {
    let ruptures: Vec<&Alert> = summary.alerts.iter().filter(|a| a.is_rupture()).collect();

    if ruptures.is_empty() {
        return if summary.at_risk > 0 {
            format!(
                "{} produto(s) com nível crítico de estoque",
                summary.at_risk
            )
        } else {
            "Nenhuma ruptura prevista".to_string()
        };
    }

    // Alerts keep backend order, so the first one with the minimum wins ties.
    let Some(nearest) = ruptures
        .iter()
        .filter_map(|a| a.days_remaining.map(|days| (days, *a)))
        .reduce(|best, next| if next.0 < best.0 { next } else { best })
    else {
        return format!("{} produto(s) com risco de ruptura", ruptures.len());
    };

    let (days, alert) = nearest;
    let same_deadline = ruptures
        .iter()
        .filter(|a| a.days_remaining == Some(days))
        .count();

    if same_deadline > 1 {
        format!("Ruptura prevista em {days} dias ( {same_deadline} produtos )")
    } else {
        let plural = if days > 1 { "s" } else { "" };
        format!("Ruptura prevista em {days} dia{plural} — {}", alert.product)
    }
}

/// Describes idle stock.
#[must_use]
pub fn excess_description(summary: &DashboardSummary) -> String {
    if summary.excess > 0 {
        format!("{} produto(s) possivelmente parados", summary.excess)
    } else {
        "Sem excesso relevante".to_string()
    }
}

/// Describes the purchase suggestions.
#[must_use]
pub fn suggestions_description(summary: &DashboardSummary) -> String {
    if summary.purchase_suggestions > 0 {
        format!(
            "{} reposição(ões) recomendadas",
            summary.purchase_suggestions
        )
    } else {
        "Nenhuma reposição sugerida".to_string()
    }
}

/// Builds the KPI card texts.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn kpi_cards(summary: &DashboardSummary, currency_prefix: &str) -> KpiCards {
    let opportunity = summary.opportunity.unwrap_or(0.0).round() as i64;
    KpiCards {
        at_risk: summary.at_risk,
        at_risk_description: risk_description(summary),
        excess: summary.excess,
        excess_description: excess_description(summary),
        purchase_suggestions: summary.purchase_suggestions,
        suggestions_description: suggestions_description(summary),
        opportunity: format!("{currency_prefix} {}", group_thousands(opportunity)),
    }
}

/// Line chart of the last days of sales.
#[must_use]
pub fn sales_chart(summary: &DashboardSummary) -> ChartData {
    ChartData {
        kind: ChartKind::Line,
        labels: summary.sales_labels.clone(),
        datasets: vec![Dataset {
            label: Some("Vendas (últimos 7 dias)".to_string()),
            data: summary.sales_values.clone(),
            border_color: Some("#4e79a7".to_string()),
            background_color: vec!["rgba(78,121,167,0.2)".to_string()],
            border_width: Some(2),
            fill: Some(true),
            tension: Some(0.3),
        }],
    }
}

/// Doughnut chart splitting stock into at-risk, excess and adequate.
#[must_use]
pub fn status_chart(summary: &DashboardSummary) -> ChartData {
    let adequate = DOUGHNUT_TOTAL.saturating_sub(summary.at_risk.saturating_add(summary.excess));
    ChartData {
        kind: ChartKind::Doughnut,
        labels: vec![
            "Em risco".to_string(),
            "Excesso".to_string(),
            "Adequado".to_string(),
        ],
        datasets: vec![Dataset {
            label: None,
            data: vec![
                f64::from(summary.at_risk),
                f64::from(summary.excess),
                f64::from(adequate),
            ],
            border_color: None,
            background_color: vec![
                "#e74c3c".to_string(),
                "#f1c40f".to_string(),
                "#2ecc71".to_string(),
            ],
            border_width: None,
            fill: None,
            tension: None,
        }],
    }
}

/// Derives the whole dashboard from one summary.
#[must_use]
pub fn build_dashboard(summary: &DashboardSummary, currency_prefix: &str) -> DashboardView {
    DashboardView {
        cards: kpi_cards(summary, currency_prefix),
        sales_chart: sales_chart(summary),
        status_chart: status_chart(summary),
        alerts: summary.alerts.clone(),
    }
}
