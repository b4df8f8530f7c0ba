//! Report endpoints
//!
//! Five read-only GET endpoints, one per backing view. Each follows the same
//! shape: parse and validate the query string, run one SELECT through the
//! statement builder (two for customer value), and serialize the rows.
//! Failures map to exactly two responses: 400 listing what was wrong with
//! the parameters, or 500 with a fixed per-report message that never leaks
//! the underlying cause.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    AppState,
    api::models::{
        pagination::{CUSTOMER_VALUE_MAX_LIMIT, DEFAULT_LIMIT, DEFAULT_PAGE, Page, TOP_PRODUCTS_MAX_LIMIT},
        reports::{
            CustomerValueQuery, CustomerValueResponse, InventoryRiskQuery, InventoryRiskRow, PaymentMixRow,
            SalesDailyQuery, SalesDailyRow, TopProductsQuery, TopProductsResponse,
        },
    },
    api::validation::{self, ParamProblem},
    db::handlers::reports::{self, InventoryRiskFilter, SalesDailyFilter, TopProductsFilter},
    errors::{Error, ErrorBody},
    types::Report,
};

fn validate_sales_daily(query: &SalesDailyQuery) -> Result<SalesDailyFilter, Vec<ParamProblem>> {
    let mut problems = Vec::new();

    let date_from = validation::parse_date(query.date_from.as_deref(), "date_from").unwrap_or_else(|p| {
        problems.push(p);
        None
    });
    let date_to = validation::parse_date(query.date_to.as_deref(), "date_to").unwrap_or_else(|p| {
        problems.push(p);
        None
    });

    if problems.is_empty() {
        Ok(SalesDailyFilter { date_from, date_to })
    } else {
        Err(problems)
    }
}

fn validate_top_products(query: &TopProductsQuery) -> Result<TopProductsFilter, Vec<ParamProblem>> {
    let mut problems = Vec::new();

    let page = validation::parse_page(query.page.as_deref()).unwrap_or_else(|p| {
        problems.push(p);
        DEFAULT_PAGE
    });
    let limit = validation::parse_limit(query.limit.as_deref(), TOP_PRODUCTS_MAX_LIMIT).unwrap_or_else(|p| {
        problems.push(p);
        DEFAULT_LIMIT
    });
    let search = validation::parse_search(query.search.as_deref()).unwrap_or_else(|p| {
        problems.push(p);
        None
    });

    if problems.is_empty() {
        Ok(TopProductsFilter {
            page: Page { page, limit },
            search,
        })
    } else {
        Err(problems)
    }
}

fn validate_customer_value(query: &CustomerValueQuery) -> Result<Page, Vec<ParamProblem>> {
    let mut problems = Vec::new();

    let page = validation::parse_page(query.page.as_deref()).unwrap_or_else(|p| {
        problems.push(p);
        DEFAULT_PAGE
    });
    let limit = validation::parse_limit(query.limit.as_deref(), CUSTOMER_VALUE_MAX_LIMIT).unwrap_or_else(|p| {
        problems.push(p);
        DEFAULT_LIMIT
    });

    if problems.is_empty() {
        Ok(Page { page, limit })
    } else {
        Err(problems)
    }
}

fn validate_inventory_risk(query: &InventoryRiskQuery) -> Result<InventoryRiskFilter, Vec<ParamProblem>> {
    match validation::parse_category_id(query.category_id.as_deref()) {
        Ok(category_id) => Ok(InventoryRiskFilter { category_id }),
        Err(problem) => Err(vec![problem]),
    }
}

/// Daily sales totals
///
/// One row per day with ticket count, gross revenue, and average ticket,
/// newest day first. Both date bounds are optional and inclusive.
#[utoipa::path(
    get,
    path = "/api/reports/sales-daily",
    params(SalesDailyQuery),
    responses(
        (status = 200, description = "One row per day, newest first", body = [SalesDailyRow]),
        (status = 400, description = "Malformed date parameter", body = ErrorBody),
        (status = 500, description = "Report unavailable", body = ErrorBody),
    ),
    tag = "reports",
)]
#[tracing::instrument(skip_all)]
pub async fn sales_daily(
    Query(query): Query<SalesDailyQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<SalesDailyRow>>, Error> {
    let filter =
        validate_sales_daily(&query).map_err(|_| Error::invalid("Parámetros inválidos. Formato de fecha: YYYY-MM-DD"))?;

    let rows = reports::sales_daily(state.db.read(), &filter)
        .await
        .map_err(|e| Error::unavailable(Report::SalesDaily, e))?;

    Ok(Json(rows))
}

/// Product sales ranking
///
/// Products ordered by revenue rank, paged, with an optional
/// case-insensitive name filter. The envelope echoes the page, the limit,
/// and the search term actually applied (null when none survived
/// sanitizing).
#[utoipa::path(
    get,
    path = "/api/reports/top-products",
    params(TopProductsQuery),
    responses(
        (status = 200, description = "One page of ranked products", body = TopProductsResponse),
        (status = 400, description = "Invalid paging or search parameter", body = ErrorBody),
        (status = 500, description = "Report unavailable", body = ErrorBody),
    ),
    tag = "reports",
)]
#[tracing::instrument(skip_all)]
pub async fn top_products(
    Query(query): Query<TopProductsQuery>,
    State(state): State<AppState>,
) -> Result<Json<TopProductsResponse>, Error> {
    let filter = validate_top_products(&query).map_err(Error::invalid_params)?;
    let Page { page, limit } = filter.page;
    let search = filter.search.clone();

    let data = reports::top_products(state.db.read(), &filter)
        .await
        .map_err(|e| Error::unavailable(Report::TopProducts, e))?;

    Ok(Json(TopProductsResponse { data, page, limit, search }))
}

/// Customer lifetime value
///
/// Customers ordered by lifetime spend, paged, with the total row count and
/// page count so clients can render pagination without a second request.
#[utoipa::path(
    get,
    path = "/api/reports/customer-value",
    params(CustomerValueQuery),
    responses(
        (status = 200, description = "One page of customers plus totals", body = CustomerValueResponse),
        (status = 400, description = "Invalid paging parameter", body = ErrorBody),
        (status = 500, description = "Report unavailable", body = ErrorBody),
    ),
    tag = "reports",
)]
#[tracing::instrument(skip_all)]
pub async fn customer_value(
    Query(query): Query<CustomerValueQuery>,
    State(state): State<AppState>,
) -> Result<Json<CustomerValueResponse>, Error> {
    let page = validate_customer_value(&query).map_err(Error::invalid_params)?;

    let (data, total) = reports::customer_value(state.db.read(), &page)
        .await
        .map_err(|e| Error::unavailable(Report::CustomerValue, e))?;

    Ok(Json(CustomerValueResponse {
        data,
        total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages(total),
    }))
}

/// Inventory at risk of stock-out
///
/// Products with stock and consumption figures, riskiest first; products
/// with no recent movement sort last. Optionally restricted to a single
/// category.
#[utoipa::path(
    get,
    path = "/api/reports/inventory-risk",
    params(InventoryRiskQuery),
    responses(
        (status = 200, description = "Products ordered by stock-out risk", body = [InventoryRiskRow]),
        (status = 400, description = "Disallowed category", body = ErrorBody),
        (status = 500, description = "Report unavailable", body = ErrorBody),
    ),
    tag = "reports",
)]
#[tracing::instrument(skip_all)]
pub async fn inventory_risk(
    Query(query): Query<InventoryRiskQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryRiskRow>>, Error> {
    let filter = validate_inventory_risk(&query)
        .map_err(|_| Error::invalid("Parámetro category_id inválido. Valores permitidos: 1, 2, 3"))?;

    let rows = reports::inventory_risk(state.db.read(), &filter)
        .await
        .map_err(|e| Error::unavailable(Report::InventoryRisk, e))?;

    Ok(Json(rows))
}

/// Payment method mix
///
/// Transaction count, amount collected, and revenue share for every payment
/// method, largest share first. Takes no parameters.
#[utoipa::path(
    get,
    path = "/api/reports/payment-mix",
    responses(
        (status = 200, description = "All payment methods by amount collected", body = [PaymentMixRow]),
        (status = 500, description = "Report unavailable", body = ErrorBody),
    ),
    tag = "reports",
)]
#[tracing::instrument(skip_all)]
pub async fn payment_mix(State(state): State<AppState>) -> Result<Json<Vec<PaymentMixRow>>, Error> {
    let rows = reports::payment_mix(state.db.read())
        .await
        .map_err(|e| Error::unavailable(Report::PaymentMix, e))?;

    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use crate::test::utils::{create_test_app, create_unroutable_app};
    use serde_json::Value;
    use sqlx::PgPool;

    // Test: a malformed date is rejected before any query is built. The
    // server's pool points at a closed port, so reaching the store would fail
    // loudly with a 500 instead of the asserted 400.
    #[tokio::test]
    async fn sales_daily_rejects_malformed_dates() {
        let app = create_unroutable_app();

        let response = app.get("/api/reports/sales-daily?date_from=2024-1-05").await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["error"], "Parámetros inválidos. Formato de fecha: YYYY-MM-DD");
        assert!(body.get("details").is_none());
    }

    // Test: every bad paging parameter is itemized in one response
    #[tokio::test]
    async fn top_products_rejects_bad_paging() {
        let app = create_unroutable_app();

        let response = app.get("/api/reports/top-products?page=0&limit=abc").await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["error"], "Parámetros inválidos");
        let details = body["details"].as_array().unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0]["param"], "page");
        assert_eq!(details[1]["param"], "limit");
    }

    #[tokio::test]
    async fn top_products_rejects_oversize_search() {
        let app = create_unroutable_app();

        let response = app.get(&format!("/api/reports/top-products?search={}", "x".repeat(101))).await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["details"][0]["param"], "search");
    }

    // Test: the customer-value cap is 100, not the top-products 50
    #[tokio::test]
    async fn customer_value_rejects_limit_above_cap() {
        let app = create_unroutable_app();

        let response = app.get("/api/reports/customer-value?limit=1000").await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["details"][0]["param"], "limit");
        assert!(body["details"][0]["message"].as_str().unwrap().contains("100"));
    }

    #[tokio::test]
    async fn inventory_risk_rejects_unknown_categories() {
        let app = create_unroutable_app();

        for bad in ["0", "4", "abc"] {
            let response = app.get(&format!("/api/reports/inventory-risk?category_id={bad}")).await;

            response.assert_status_bad_request();
            let body: Value = response.json();
            assert_eq!(body["error"], "Parámetro category_id inválido. Valores permitidos: 1, 2, 3");
            assert!(body.get("details").is_none());
        }
    }

    // Test: a store failure surfaces as a 500 with the fixed per-report
    // message, never the underlying error
    #[tokio::test]
    async fn sales_daily_unreachable_store_is_500() {
        let app = create_unroutable_app();

        let response = app.get("/api/reports/sales-daily").await;

        response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], "Error al obtener ventas diarias");
    }

    #[tokio::test]
    async fn healthz_responds() {
        let app = create_unroutable_app();

        let response = app.get("/healthz").await;

        response.assert_status_ok();
        assert_eq!(response.text(), "OK");
    }

    #[tokio::test]
    async fn openapi_document_lists_every_report() {
        let app = create_unroutable_app();

        let response = app.get("/api-docs/openapi.json").await;

        response.assert_status_ok();
        let doc: Value = response.json();
        for path in [
            "/api/reports/sales-daily",
            "/api/reports/top-products",
            "/api/reports/customer-value",
            "/api/reports/inventory-risk",
            "/api/reports/payment-mix",
        ] {
            assert!(doc["paths"].get(path).is_some(), "missing {path}");
        }
    }

    #[sqlx::test(migrations = false, fixtures(path = "../../db/handlers/fixtures", scripts("reports")))]
    #[test_log::test]
    async fn sales_daily_returns_newest_first(pool: PgPool) {
        let app = create_test_app(pool);

        let response = app.get("/api/reports/sales-daily").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0]["fecha"], "2024-02-01");
        assert_eq!(rows[0]["tickets"], 27);
        assert_eq!(rows[0]["total_ventas"], "990.00");
    }

    #[sqlx::test(migrations = false, fixtures(path = "../../db/handlers/fixtures", scripts("reports")))]
    #[test_log::test]
    async fn sales_daily_range_is_inclusive(pool: PgPool) {
        let app = create_test_app(pool);

        let response = app.get("/api/reports/sales-daily?date_from=2024-01-01&date_to=2024-01-31").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["fecha"], "2024-01-31");
        assert_eq!(rows[2]["fecha"], "2024-01-01");
    }

    #[sqlx::test(migrations = false, fixtures(path = "../../db/handlers/fixtures", scripts("reports")))]
    #[test_log::test]
    async fn top_products_second_page_follows_the_ranking(pool: PgPool) {
        let app = create_test_app(pool);

        let response = app.get("/api/reports/top-products?page=2&limit=5").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let rankings: Vec<i64> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["ranking_revenue"].as_i64().unwrap())
            .collect();
        assert_eq!(rankings, vec![6, 7, 8, 9, 10]);
        assert_eq!(body["page"], 2);
        assert_eq!(body["limit"], 5);
        assert!(body["search"].is_null());
    }

    #[sqlx::test(migrations = false, fixtures(path = "../../db/handlers/fixtures", scripts("reports")))]
    #[test_log::test]
    async fn top_products_echoes_the_sanitized_search(pool: PgPool) {
        let app = create_test_app(pool);

        let response = app.get("/api/reports/top-products?search=latte!").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["search"], "latte");
        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["product_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Latte", "Latte helado"]);
    }

    // Test: empty parameters behave exactly like absent ones
    #[sqlx::test(migrations = false, fixtures(path = "../../db/handlers/fixtures", scripts("reports")))]
    #[test_log::test]
    async fn top_products_defaults_for_empty_params(pool: PgPool) {
        let app = create_test_app(pool);

        let response = app.get("/api/reports/top-products?page=&limit=&search=").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["page"], 1);
        assert_eq!(body["limit"], 10);
        assert!(body["search"].is_null());
        assert_eq!(body["data"].as_array().unwrap().len(), 10);
    }

    // Test: the largest expressible page still comes back as an ordinary
    // empty page, not an overflowed offset
    #[sqlx::test(migrations = false, fixtures(path = "../../db/handlers/fixtures", scripts("reports")))]
    #[test_log::test]
    async fn top_products_empty_at_the_largest_page(pool: PgPool) {
        let app = create_test_app(pool);

        let response = app.get("/api/reports/top-products?page=9223372036854775807&limit=10").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
        assert_eq!(body["page"].as_i64(), Some(i64::MAX));
    }

    #[sqlx::test(migrations = false, fixtures(path = "../../db/handlers/fixtures", scripts("reports")))]
    #[test_log::test]
    async fn customer_value_wraps_rows_with_totals(pool: PgPool) {
        let app = create_test_app(pool);

        let response = app.get("/api/reports/customer-value?page=1&limit=3").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 3);
        assert_eq!(body["data"][0]["customer_name"], "Lucía Fernández");
        assert_eq!(body["total"], 7);
        assert_eq!(body["page"], 1);
        assert_eq!(body["limit"], 3);
        assert_eq!(body["totalPages"], 3);
    }

    // Test: pages past the end stay a success and keep the real totals
    #[sqlx::test(migrations = false, fixtures(path = "../../db/handlers/fixtures", scripts("reports")))]
    #[test_log::test]
    async fn customer_value_empty_past_the_last_page(pool: PgPool) {
        let app = create_test_app(pool);

        let response = app.get("/api/reports/customer-value?page=4&limit=3").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
        assert_eq!(body["total"], 7);
        assert_eq!(body["totalPages"], 3);
        assert_eq!(body["page"], 4);
    }

    #[sqlx::test(migrations = false, fixtures(path = "../../db/handlers/fixtures", scripts("reports")))]
    #[test_log::test]
    async fn inventory_risk_riskiest_first_unknown_last(pool: PgPool) {
        let app = create_test_app(pool);

        let response = app.get("/api/reports/inventory-risk").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0]["porcentaje_riesgo"], "95.50");
        assert_eq!(rows[0]["nivel_riesgo"], "CRÍTICO");
        assert!(rows[5]["porcentaje_riesgo"].is_null());
        assert_eq!(rows[5]["nivel_riesgo"], "SIN MOVIMIENTO");
    }

    #[sqlx::test(migrations = false, fixtures(path = "../../db/handlers/fixtures", scripts("reports")))]
    #[test_log::test]
    async fn inventory_risk_filters_by_category(pool: PgPool) {
        let app = create_test_app(pool);

        let response = app.get("/api/reports/inventory-risk?category_id=2").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row["category_id"] == 2));
    }

    #[sqlx::test(migrations = false, fixtures(path = "../../db/handlers/fixtures", scripts("reports")))]
    #[test_log::test]
    async fn payment_mix_shares_by_amount_collected(pool: PgPool) {
        let app = create_test_app(pool);

        let response = app.get("/api/reports/payment-mix").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["method_name"], "Efectivo");
        assert_eq!(rows[0]["porcentaje"], "46.30");
    }

    // Test: unknown query parameters are ignored, not rejected
    #[sqlx::test(migrations = false, fixtures(path = "../../db/handlers/fixtures", scripts("reports")))]
    #[test_log::test]
    async fn unknown_params_are_ignored(pool: PgPool) {
        let app = create_test_app(pool);

        let response = app.get("/api/reports/sales-daily?utm_source=dashboard").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>().as_array().unwrap().len(), 5);
    }
}
