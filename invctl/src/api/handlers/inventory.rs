//! HTTP handlers for the resale inventory views and lifecycle mutation.
//!
//! Both read endpoints embed a reconciliation pass: the tag record store is
//! corrected against the item master as a side effect of the fetch, and a
//! correction failure never fails the request.

use crate::{
    aggregate::aggregate,
    api::models::inventory::{
        ItemListQuery, ItemListResponse, ItemResponse, ResaleSummaryResponse, SoldResponse, SummaryQuery,
    },
    db::handlers::{Items, Tags},
    db::models::items::Item,
    errors::{Error, Result},
    filters::paginate,
    lifecycle,
    reconcile::reconcile,
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use std::collections::HashMap;

/// Fetch the resale rows and reconcile tag state as a read side effect.
///
/// Returns the (authoritative) item rows in display order plus the number of
/// corrections persisted during this pass.
async fn fetch_and_reconcile(state: &AppState) -> Result<(Vec<Item>, usize)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let items = Items::new(&mut conn).list_resale().await?;
    let tags = Tags::new(&mut conn).list_resale().await?;

    let items_by_tag: HashMap<&str, &Item> = items.iter().map(|item| (item.tag_id.as_str(), item)).collect();
    let (_, corrections) = reconcile(&mut conn, &items_by_tag, tags).await;

    Ok((items, corrections.len()))
}

/// Aggregate view of resale inventory
#[utoipa::path(
    get,
    path = "/api/v1/inventory/resale/summary",
    tag = "inventory",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Category roll-up of resale inventory", body = ResaleSummaryResponse),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_resale_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<ResaleSummaryResponse>> {
    let refresh = query.refresh.unwrap_or(false);
    if let Some(cached) = state.summary_cache.get(refresh) {
        return Ok(Json(cached));
    }

    let (items, corrections_applied) = fetch_and_reconcile(&state).await?;
    let (categories, subcategories) = aggregate(&items);

    let response = ResaleSummaryResponse::new(categories, subcategories, corrections_applied);
    state.summary_cache.store(response.clone());

    Ok(Json(response))
}

/// Filtered, paginated listing of resale items
#[utoipa::path(
    get,
    path = "/api/v1/inventory/resale/items",
    tag = "inventory",
    params(ItemListQuery),
    responses(
        (status = 200, description = "One page of matching items", body = ItemListResponse),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_resale_items(
    State(state): State<AppState>,
    Query(query): Query<ItemListQuery>,
) -> Result<Json<ItemListResponse>> {
    let (items, _) = fetch_and_reconcile(&state).await?;

    let filtered = query.filter().apply(items);
    let page = paginate(filtered, query.page(), state.config.page_size);

    Ok(Json(ItemListResponse {
        items: page.items.into_iter().map(ItemResponse::from).collect(),
        page: page.page,
        page_size: state.config.page_size,
        total_items: page.total_items,
        total_pages: page.total_pages,
    }))
}

/// Mark a resale item as sold
#[utoipa::path(
    post,
    path = "/api/v1/inventory/resale/items/{tag_id}/sold",
    tag = "inventory",
    params(("tag_id" = String, Path, description = "RFID tag identifier")),
    responses(
        (status = 200, description = "Tag marked sold", body = SoldResponse),
        (status = 400, description = "Tag is not a resale item"),
        (status = 404, description = "Tag not found"),
        (status = 500, description = "Update did not take effect"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn mark_item_sold(State(state): State<AppState>, Path(tag_id): Path<String>) -> Result<Json<SoldResponse>> {
    let confirmation = lifecycle::mark_item_sold(&state.db, &tag_id).await?;

    // The summary view counts this item; force the next read to recompute.
    state.summary_cache.invalidate();

    Ok(Json(SoldResponse {
        message: format!("Tag {} marked sold", confirmation.tag_id),
    }))
}

#[cfg(test)]
mod tests {
    use crate::db::handlers::{Repository, Tags};
    use crate::test_utils::{create_test_app, seed_item, seed_tag};
    use axum::http::StatusCode;
    use serde_json::Value;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn summary_counts_and_reconciles(pool: PgPool) {
        seed_item(&pool, "T1", "FOG FLUID QUART", "On Rent", Some("C100"), None).await;
        seed_tag(&pool, "T1", "active", "resale").await;
        seed_item(&pool, "T2", "FOG FLUID QUART", "Ready to Rent", None, None).await;
        seed_tag(&pool, "T2", "active", "resale").await;
        seed_item(&pool, "T3", "CHOCOLATE BAR DARK", "Delivered", Some("C200"), None).await;
        seed_tag(&pool, "T3", "active", "resale").await;
        // Rental-classified tags stay out of the resale view.
        seed_item(&pool, "T4", "TABLE ROUND 60IN", "On Rent", Some("C300"), None).await;
        seed_tag(&pool, "T4", "active", "rental").await;

        let server = create_test_app(pool.clone()).await;
        let response = server.get("/api/v1/inventory/resale/summary").await;
        response.assert_status_ok();
        let body: Value = response.json();

        let categories = body["categories"].as_array().expect("categories array");
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0]["category"], "A/V Resale");
        assert_eq!(categories[0]["total_amount"], 2);
        assert_eq!(categories[0]["on_contract"], 1);
        assert_eq!(categories[1]["category"], "Chocolate Resale");
        assert_eq!(categories[1]["on_contract"], 1);

        let names = body["subcategories"]["A/V Resale"].as_array().expect("subcategory array");
        assert_eq!(names.len(), 1);
        assert_eq!(names[0]["common_name"], "FOG FLUID QUART");
        assert_eq!(names[0]["total"], 2);

        // T1 (On Rent) and T3 (Delivered) had drifted tags.
        assert_eq!(body["corrections_applied"], 2);

        let mut conn = pool.acquire().await.expect("acquire");
        let t1 = Tags::new(&mut conn).get_by_id("T1").await.expect("query").expect("row");
        assert_eq!(t1.status, "out/used");
        assert_eq!(t1.last_contract_num.as_deref(), Some("C100"));
        let t4 = Tags::new(&mut conn).get_by_id("T4").await.expect("query").expect("row");
        assert_eq!(t4.status, "active");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn summary_is_cached_until_refresh(pool: PgPool) {
        seed_item(&pool, "T1", "FOG FLUID QUART", "Ready to Rent", None, None).await;
        seed_tag(&pool, "T1", "active", "resale").await;

        let server = create_test_app(pool.clone()).await;
        let first: Value = server.get("/api/v1/inventory/resale/summary").await.json();

        // New stock lands after the first render.
        seed_item(&pool, "T2", "CHOCOLATE BAR DARK", "Ready to Rent", None, None).await;
        seed_tag(&pool, "T2", "active", "resale").await;

        let cached: Value = server.get("/api/v1/inventory/resale/summary").await.json();
        assert_eq!(cached["generated_at"], first["generated_at"]);
        assert_eq!(cached["categories"].as_array().expect("categories").len(), 1);

        let refreshed: Value = server
            .get("/api/v1/inventory/resale/summary")
            .add_query_param("refresh", "true")
            .await
            .json();
        assert_eq!(refreshed["categories"].as_array().expect("categories").len(), 2);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn item_listing_filters_and_paginates(pool: PgPool) {
        for n in 0..25 {
            let tag = format!("FOG{n:03}");
            seed_item(&pool, &tag, "FOG FLUID QUART", "Ready to Rent", None, Some("100")).await;
            seed_tag(&pool, &tag, "active", "resale").await;
        }
        seed_item(&pool, "CHOC1", "CHOCOLATE BAR DARK", "Ready to Rent", None, Some("200")).await;
        seed_tag(&pool, "CHOC1", "active", "resale").await;

        let server = create_test_app(pool.clone()).await;

        let body: Value = server.get("/api/v1/inventory/resale/items").await.json();
        assert_eq!(body["total_items"], 26);
        assert_eq!(body["total_pages"], 2);
        assert_eq!(body["page"], 1);
        assert_eq!(body["items"].as_array().expect("items").len(), 20);

        // Out-of-range and non-numeric pages never error.
        let body: Value = server
            .get("/api/v1/inventory/resale/items")
            .add_query_param("page", "99")
            .await
            .json();
        assert_eq!(body["page"], 2);
        assert_eq!(body["items"].as_array().expect("items").len(), 6);

        let body: Value = server
            .get("/api/v1/inventory/resale/items")
            .add_query_param("page", "abc")
            .await
            .json();
        assert_eq!(body["page"], 1);

        // Filters compose as an intersection.
        let body: Value = server
            .get("/api/v1/inventory/resale/items")
            .add_query_param("common_name", "fog")
            .add_query_param("rental_class_num", "100, 300")
            .await
            .json();
        assert_eq!(body["total_items"], 25);

        let body: Value = server
            .get("/api/v1/inventory/resale/items")
            .add_query_param("common_name", "chocolate")
            .add_query_param("rental_class_num", "100")
            .await
            .json();
        assert_eq!(body["total_items"], 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn mark_sold_enforces_preconditions_in_order(pool: PgPool) {
        seed_item(&pool, "R1", "CHOCOLATE BAR DARK", "Ready to Rent", None, None).await;
        seed_tag(&pool, "R1", "active", "resale").await;
        seed_item(&pool, "X1", "TABLE ROUND 60IN", "Ready to Rent", None, None).await;
        seed_tag(&pool, "X1", "active", "rental").await;

        let server = create_test_app(pool.clone()).await;

        let response = server.post("/api/v1/inventory/resale/items/MISSING/sold").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert!(body["error"].as_str().expect("error string").contains("not found"));

        let response = server.post("/api/v1/inventory/resale/items/X1/sold").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].as_str().expect("error string").contains("not a resale item"));

        let mut conn = pool.acquire().await.expect("acquire");
        let x1 = Tags::new(&mut conn).get_by_id("X1").await.expect("query").expect("row");
        assert_eq!(x1.status, "active");
        assert_eq!(x1.reuse_count, 0);

        let response = server.post("/api/v1/inventory/resale/items/R1/sold").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body["message"].as_str().expect("message string").contains("R1"));

        let r1 = Tags::new(&mut conn).get_by_id("R1").await.expect("query").expect("row");
        assert_eq!(r1.status, "sold");
        assert_eq!(r1.reuse_count, 1);
        assert!(r1.date_sold.is_some());
        assert!(r1.date_updated.is_some());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn reconciliation_is_persisted_and_idempotent(pool: PgPool) {
        seed_item(&pool, "T1", "FOG FLUID QUART", "On Rent", Some("C42"), None).await;
        seed_tag(&pool, "T1", "active", "resale").await;

        let server = create_test_app(pool.clone()).await;

        let first: Value = server
            .get("/api/v1/inventory/resale/summary")
            .add_query_param("refresh", "true")
            .await
            .json();
        assert_eq!(first["corrections_applied"], 1);

        // No item change between passes: the second pass is a no-op.
        let second: Value = server
            .get("/api/v1/inventory/resale/summary")
            .add_query_param("refresh", "true")
            .await
            .json();
        assert_eq!(second["corrections_applied"], 0);

        // The item returns to the shelf; its tag reactivates and sheds the contract.
        sqlx::query("UPDATE item_master SET status = 'Ready to Rent', last_contract_num = NULL WHERE tag_id = 'T1'")
            .execute(&pool)
            .await
            .expect("update item");

        let third: Value = server
            .get("/api/v1/inventory/resale/summary")
            .add_query_param("refresh", "true")
            .await
            .json();
        assert_eq!(third["corrections_applied"], 1);

        let mut conn = pool.acquire().await.expect("acquire");
        let t1 = Tags::new(&mut conn).get_by_id("T1").await.expect("query").expect("row");
        assert_eq!(t1.status, "active");
        assert_eq!(t1.last_contract_num, None);
    }
}
