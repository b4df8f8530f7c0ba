//! Common type definitions for the reporting API.
//!
//! This module defines:
//! - [`Report`]: the fixed set of reports served by this API
//! - [`ViewName`]: alias for the SQL view identifiers backing each report
//!
//! Every report reads from exactly one database view. The views are owned by
//! the database and treated as opaque here; their names are part of the
//! deployment contract, never derived from request input.

use std::fmt;

/// SQL view identifier backing a report. Always a compile-time constant.
pub type ViewName = &'static str;

/// The five reports served under `/api/reports`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Report {
    SalesDaily,
    TopProducts,
    CustomerValue,
    InventoryRisk,
    PaymentMix,
}

impl Report {
    /// Route slug under `/api/reports`.
    pub fn slug(&self) -> &'static str {
        match self {
            Report::SalesDaily => "sales-daily",
            Report::TopProducts => "top-products",
            Report::CustomerValue => "customer-value",
            Report::InventoryRisk => "inventory-risk",
            Report::PaymentMix => "payment-mix",
        }
    }

    /// The database view this report reads from.
    pub fn view(&self) -> ViewName {
        match self {
            Report::SalesDaily => "vw_sales_daily",
            Report::TopProducts => "vw_top_products_ranked",
            Report::CustomerValue => "vw_customer_value",
            Report::InventoryRisk => "vw_inventory_risk",
            Report::PaymentMix => "vw_payment_mix",
        }
    }

    /// Message returned to callers when the backing query fails. The
    /// underlying cause is logged, never exposed.
    pub fn unavailable_message(&self) -> &'static str {
        match self {
            Report::SalesDaily => "Error al obtener ventas diarias",
            Report::TopProducts => "Error al obtener productos",
            Report::CustomerValue => "Error al obtener valor de clientes",
            Report::InventoryRisk => "Error al obtener inventario en riesgo",
            Report::PaymentMix => "Error al obtener mix de pagos",
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
