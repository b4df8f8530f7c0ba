//! Request and response models for the five reports.
//!
//! Query structs carry parameters as raw text; the endpoints parse and
//! validate them, so nothing here rejects anything. Each row struct mirrors
//! its backing view column for column and is serialized to callers
//! verbatim; no field is computed or rewritten here. Monetary and
//! percentage values arrive from the store as `NUMERIC` and go out as
//! decimal-formatted JSON strings, so no precision is lost in transit.
//! Field names are the view's column names, Spanish included.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Query parameters for the daily sales report.
///
/// Every parameter arrives as raw text and is validated by the endpoint
/// before any SQL is built; a malformed value is a 400, never a silent
/// fallback.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct SalesDailyQuery {
    /// Earliest day to include, `YYYY-MM-DD`
    pub date_from: Option<String>,

    /// Latest day to include, `YYYY-MM-DD`
    pub date_to: Option<String>,
}

/// Query parameters for the top products report.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct TopProductsQuery {
    /// Page number, starting at 1 (default: 1)
    pub page: Option<String>,

    /// Rows per page, 1 to 50 (default: 10)
    pub limit: Option<String>,

    /// Case-insensitive product name filter, at most 100 characters
    pub search: Option<String>,
}

/// Query parameters for the customer value report.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct CustomerValueQuery {
    /// Page number, starting at 1 (default: 1)
    pub page: Option<String>,

    /// Rows per page, 1 to 100 (default: 10)
    pub limit: Option<String>,
}

/// Query parameters for the inventory risk report.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct InventoryRiskQuery {
    /// Restrict to one product category; accepted values are 1, 2 and 3
    pub category_id: Option<String>,
}

/// One day of sales, from `vw_sales_daily`.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct SalesDailyRow {
    /// Calendar day the tickets were rung up
    #[schema(value_type = String, format = "date")]
    pub fecha: NaiveDate,
    /// Number of tickets closed that day
    pub tickets: i64,
    /// Gross revenue for the day
    #[schema(value_type = String)]
    pub total_ventas: Decimal,
    /// Average ticket value for the day
    #[schema(value_type = String)]
    pub ticket_promedio: Decimal,
}

/// One product with its sales ranking, from `vw_top_products_ranked`.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TopProductRow {
    pub product_id: i32,
    pub product_name: String,
    pub category_name: String,
    /// Units sold over the ranking window
    pub unidades_vendidas: i64,
    /// Revenue over the ranking window
    #[schema(value_type = String)]
    pub revenue_total: Decimal,
    /// Average sale price
    #[schema(value_type = String)]
    pub precio_promedio: Decimal,
    /// Rank by revenue, 1 = highest
    pub ranking_revenue: i64,
    /// Rank by units sold, 1 = highest
    pub ranking_unidades: i64,
}

/// One customer with lifetime value figures, from `vw_customer_value`.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CustomerValueRow {
    pub customer_id: i32,
    pub customer_name: String,
    pub customer_email: String,
    /// Orders placed to date
    pub num_ordenes: i64,
    /// Lifetime spend
    #[schema(value_type = String)]
    pub total_gastado: Decimal,
    /// Average spend per order
    #[schema(value_type = String)]
    pub gasto_promedio: Decimal,
    /// Most recent purchase
    #[schema(value_type = String, format = "date-time")]
    pub ultima_compra: DateTime<Utc>,
    /// Segment label computed by the view (e.g. VIP, Frecuente), opaque here
    pub estado_cliente: String,
}

/// One product's stock risk assessment, from `vw_inventory_risk`.
///
/// The risk figures are null for products with no recent sales; the view
/// cannot project days of inventory without a consumption rate.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct InventoryRiskRow {
    pub product_id: i32,
    pub product_name: String,
    pub category_id: i32,
    pub category_name: String,
    /// Units currently in stock
    pub stock_actual: i32,
    /// Units sold in the last month
    pub unidades_vendidas_mes: i64,
    /// Projected days until stock runs out
    #[schema(value_type = Option<String>)]
    pub dias_inventario: Option<Decimal>,
    /// Risk score as a percentage
    #[schema(value_type = Option<String>)]
    pub porcentaje_riesgo: Option<Decimal>,
    /// Risk bucket label computed by the view, opaque here
    pub nivel_riesgo: String,
}

/// One payment method's share of revenue, from `vw_payment_mix`.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct PaymentMixRow {
    pub method_id: i32,
    pub method_name: String,
    pub num_transacciones: i64,
    /// Total collected through this method
    #[schema(value_type = String)]
    pub total_pagado: Decimal,
    /// Average transaction amount
    #[schema(value_type = String)]
    pub monto_promedio: Decimal,
    /// Share of all revenue, as a percentage
    #[schema(value_type = String)]
    pub porcentaje: Decimal,
}

/// Paged envelope for the top-products report.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TopProductsResponse {
    pub data: Vec<TopProductRow>,
    pub page: i64,
    pub limit: i64,
    /// The search filter that was applied, null when none was
    pub search: Option<String>,
}

/// Paged envelope with totals for the customer-value report.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerValueResponse {
    pub data: Vec<CustomerValueRow>,
    /// Total customers across all pages
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}
