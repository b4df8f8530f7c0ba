//! Database queries for the five reports.
//!
//! One function per report. Each builds a single SELECT over the report's
//! view with [`ViewQuery`] and decodes rows straight into the response
//! models; the views own all aggregation and ranking logic. Customer value
//! is the only report that needs two round trips (count + page), issued
//! concurrently since neither depends on the other.

use crate::api::models::pagination::Page;
use crate::api::models::reports::{CustomerValueRow, InventoryRiskRow, PaymentMixRow, SalesDailyRow, TopProductRow};
use crate::db::errors::Result;
use crate::db::statement::ViewQuery;
use crate::types::Report;
use sqlx::PgPool;
use tracing::instrument;

/// Filter options for the daily sales report.
///
/// Bounds are kept as the caller's `YYYY-MM-DD` text and cast by the store;
/// see [`ViewQuery::and_where_date`].
#[derive(Debug, Clone, Default)]
pub struct SalesDailyFilter {
    /// Inclusive lower bound on `fecha`
    pub date_from: Option<String>,
    /// Inclusive upper bound on `fecha`
    pub date_to: Option<String>,
}

/// Filter options for the ranked products report.
#[derive(Debug, Clone)]
pub struct TopProductsFilter {
    pub page: Page,
    /// Sanitized search term, matched as a case-insensitive substring of the
    /// product name
    pub search: Option<String>,
}

/// Filter options for the inventory risk report.
#[derive(Debug, Clone, Default)]
pub struct InventoryRiskFilter {
    /// Restrict to one category; already checked against the allow-list
    pub category_id: Option<i32>,
}

/// Daily sales totals, most recent day first.
#[instrument(skip(db), err)]
pub async fn sales_daily(db: &PgPool, filter: &SalesDailyFilter) -> Result<Vec<SalesDailyRow>> {
    let mut query = ViewQuery::select(Report::SalesDaily.view());

    if let Some(from) = &filter.date_from {
        query = query.and_where_date("fecha >=", from.clone());
    }
    if let Some(to) = &filter.date_to {
        query = query.and_where_date("fecha <=", to.clone());
    }

    query.order_by("fecha DESC").fetch_all(db).await
}

/// One page of products in revenue-ranking order.
#[instrument(skip(db), err)]
pub async fn top_products(db: &PgPool, filter: &TopProductsFilter) -> Result<Vec<TopProductRow>> {
    let mut query = ViewQuery::select(Report::TopProducts.view());

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        query = query.and_where("product_name ILIKE", pattern);
    }

    query
        .order_by("ranking_revenue")
        .paginate(filter.page.limit, filter.page.offset())
        .fetch_all(db)
        .await
}

/// One page of customers by lifetime spend, plus the total customer count.
///
/// The count and the page are independent reads with no transactional
/// coupling; a customer appearing between the two is an accepted race.
#[instrument(skip(db), err)]
pub async fn customer_value(db: &PgPool, page: &Page) -> Result<(Vec<CustomerValueRow>, i64)> {
    let data = ViewQuery::select(Report::CustomerValue.view())
        .order_by("total_gastado DESC")
        .paginate(page.limit, page.offset())
        .fetch_all(db);
    let count = ViewQuery::count(Report::CustomerValue.view()).fetch_one::<(i64,)>(db);

    let (rows, (total,)) = tokio::try_join!(data, count)?;
    Ok((rows, total))
}

/// Products at risk of stockout, highest risk first, unknown risk last.
#[instrument(skip(db), err)]
pub async fn inventory_risk(db: &PgPool, filter: &InventoryRiskFilter) -> Result<Vec<InventoryRiskRow>> {
    let mut query = ViewQuery::select(Report::InventoryRisk.view());

    if let Some(category_id) = filter.category_id {
        query = query.and_where("category_id =", category_id);
    }

    query.order_by("porcentaje_riesgo DESC NULLS LAST").fetch_all(db).await
}

/// Revenue share per payment method, largest first.
#[instrument(skip(db), err)]
pub async fn payment_mix(db: &PgPool) -> Result<Vec<PaymentMixRow>> {
    ViewQuery::select(Report::PaymentMix.view())
        .order_by("total_pagado DESC")
        .fetch_all(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[sqlx::test(migrations = false, fixtures(path = "fixtures", scripts("reports")))]
    async fn sales_daily_orders_by_date_descending(pool: PgPool) {
        let rows = sales_daily(&pool, &SalesDailyFilter::default()).await.unwrap();

        assert_eq!(rows.len(), 5);
        let dates: Vec<String> = rows.iter().map(|r| r.fecha.to_string()).collect();
        assert_eq!(dates, ["2024-02-01", "2024-01-31", "2024-01-15", "2024-01-01", "2023-12-31"]);
    }

    #[sqlx::test(migrations = false, fixtures(path = "fixtures", scripts("reports")))]
    async fn sales_daily_date_bounds_are_inclusive(pool: PgPool) {
        let filter = SalesDailyFilter {
            date_from: Some("2024-01-01".into()),
            date_to: Some("2024-01-31".into()),
        };
        let rows = sales_daily(&pool, &filter).await.unwrap();

        let dates: Vec<String> = rows.iter().map(|r| r.fecha.to_string()).collect();
        assert_eq!(dates, ["2024-01-31", "2024-01-15", "2024-01-01"]);
        assert_eq!(rows[2].tickets, 25);
        assert_eq!(rows[2].total_ventas, dec("1150.50"));
    }

    #[sqlx::test(migrations = false, fixtures(path = "fixtures", scripts("reports")))]
    async fn sales_daily_bad_calendar_date_fails_at_the_store(pool: PgPool) {
        // "2024-13-40" has the right shape but is no calendar date; the
        // server-side cast rejects it at execution
        let filter = SalesDailyFilter {
            date_from: Some("2024-13-40".into()),
            date_to: None,
        };

        assert!(sales_daily(&pool, &filter).await.is_err());
    }

    #[sqlx::test(migrations = false, fixtures(path = "fixtures", scripts("reports")))]
    async fn top_products_pages_follow_the_ranking(pool: PgPool) {
        let filter = TopProductsFilter {
            page: Page { page: 2, limit: 5 },
            search: None,
        };
        let rows = top_products(&pool, &filter).await.unwrap();

        let rankings: Vec<i64> = rows.iter().map(|r| r.ranking_revenue).collect();
        assert_eq!(rankings, [6, 7, 8, 9, 10]);
    }

    #[sqlx::test(migrations = false, fixtures(path = "fixtures", scripts("reports")))]
    async fn top_products_search_matches_substrings_case_insensitively(pool: PgPool) {
        let filter = TopProductsFilter {
            page: Page { page: 1, limit: 10 },
            search: Some("latte".into()),
        };
        let rows = top_products(&pool, &filter).await.unwrap();

        let names: Vec<&str> = rows.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, ["Latte", "Latte helado"]);
    }

    #[sqlx::test(migrations = false, fixtures(path = "fixtures", scripts("reports")))]
    async fn top_products_beyond_last_page_is_empty(pool: PgPool) {
        let filter = TopProductsFilter {
            page: Page { page: 4, limit: 5 },
            search: None,
        };
        let rows = top_products(&pool, &filter).await.unwrap();

        assert!(rows.is_empty());
    }

    #[sqlx::test(migrations = false, fixtures(path = "fixtures", scripts("reports")))]
    async fn customer_value_returns_page_and_total(pool: PgPool) {
        let page = Page { page: 1, limit: 3 };
        let (rows, total) = customer_value(&pool, &page).await.unwrap();

        assert_eq!(total, 7);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].customer_name, "Lucía Fernández");
        assert_eq!(rows[0].total_gastado, dec("2450.00"));
        assert!(rows[0].total_gastado > rows[1].total_gastado);
        assert!(rows[1].total_gastado > rows[2].total_gastado);
    }

    #[sqlx::test(migrations = false, fixtures(path = "fixtures", scripts("reports")))]
    async fn customer_value_past_the_last_page_still_counts(pool: PgPool) {
        let page = Page { page: 4, limit: 3 };
        let (rows, total) = customer_value(&pool, &page).await.unwrap();

        assert_eq!(total, 7);
        assert!(rows.is_empty());
    }

    #[sqlx::test(migrations = false, fixtures(path = "fixtures", scripts("reports")))]
    async fn inventory_risk_sorts_unknown_risk_last(pool: PgPool) {
        let rows = inventory_risk(&pool, &InventoryRiskFilter::default()).await.unwrap();

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].porcentaje_riesgo, Some(dec("95.50")));
        assert_eq!(rows[0].nivel_riesgo, "CRÍTICO");

        let last = rows.last().unwrap();
        assert!(last.porcentaje_riesgo.is_none());
        assert_eq!(last.product_name, "Vasos compostables");
    }

    #[sqlx::test(migrations = false, fixtures(path = "fixtures", scripts("reports")))]
    async fn inventory_risk_filters_by_category(pool: PgPool) {
        let filter = InventoryRiskFilter { category_id: Some(2) };
        let rows = inventory_risk(&pool, &filter).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.category_id == 2));
    }

    #[sqlx::test(migrations = false, fixtures(path = "fixtures", scripts("reports")))]
    async fn payment_mix_orders_by_total_paid(pool: PgPool) {
        let rows = payment_mix(&pool).await.unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].method_name, "Efectivo");
        assert_eq!(rows[0].num_transacciones, 820);

        let totals: Vec<Decimal> = rows.iter().map(|r| r.total_pagado).collect();
        let mut sorted = totals.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(totals, sorted);
    }
}
