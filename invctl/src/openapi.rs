//! OpenAPI document assembly for the management API.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "invctl",
        description = "Inventory reconciliation and reporting API for RFID-tagged rental and resale assets"
    ),
    paths(
        crate::api::handlers::inventory::get_resale_summary,
        crate::api::handlers::inventory::list_resale_items,
        crate::api::handlers::inventory::mark_item_sold,
    ),
    components(schemas(
        crate::categorize::Category,
        crate::aggregate::CategorySummary,
        crate::aggregate::CommonNameCount,
        crate::api::models::inventory::ResaleSummaryResponse,
        crate::api::models::inventory::ItemListResponse,
        crate::api::models::inventory::ItemResponse,
        crate::api::models::inventory::SoldResponse,
    )),
    tags((name = "inventory", description = "Resale inventory views and tag lifecycle"))
)]
pub struct ApiDoc;
