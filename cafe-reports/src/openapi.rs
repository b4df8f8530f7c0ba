//! OpenAPI documentation for the report API.
//!
//! The interactive reference is served at `/docs` and the raw document at
//! `/api-docs/openapi.json` when the server is running.

use utoipa::OpenApi;

use crate::{
    api::{
        models::reports::{
            CustomerValueResponse, CustomerValueRow, InventoryRiskRow, PaymentMixRow, SalesDailyRow, TopProductRow,
            TopProductsResponse,
        },
        validation::ParamProblem,
    },
    errors::ErrorBody,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "cafe-reports",
        description = "Read-only reporting API over the cafeteria point-of-sale views. \
                       Every endpoint is a GET returning JSON; there is nothing to create, \
                       update, or delete here."
    ),
    paths(
        crate::api::handlers::reports::sales_daily,
        crate::api::handlers::reports::top_products,
        crate::api::handlers::reports::customer_value,
        crate::api::handlers::reports::inventory_risk,
        crate::api::handlers::reports::payment_mix,
    ),
    components(schemas(
        SalesDailyRow,
        TopProductRow,
        TopProductsResponse,
        CustomerValueRow,
        CustomerValueResponse,
        InventoryRiskRow,
        PaymentMixRow,
        ParamProblem,
        ErrorBody,
    )),
    tags(
        (name = "reports", description = "Cafeteria sales, customer, and inventory reports")
    )
)]
pub struct ApiDoc;
