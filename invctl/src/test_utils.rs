//! Shared helpers for database-backed tests.

use crate::cache::{SystemClock, TtlCache};
use crate::config::Config;
use crate::db::handlers::{Items, Repository, Tags};
use crate::db::models::items::{Item, ItemCreateDBRequest};
use crate::db::models::tags::{TagCreateDBRequest, TagRecord};
use crate::{build_router, AppState};
use sqlx::PgPool;
use std::sync::Arc;

/// Build a test server over the real router with default configuration.
pub async fn create_test_app(pool: PgPool) -> axum_test::TestServer {
    let config = Config::default();
    let summary_cache = Arc::new(TtlCache::new(config.summary_cache_ttl, Arc::new(SystemClock)));
    let state = AppState::builder()
        .db(pool)
        .config(config)
        .summary_cache(summary_cache)
        .build();
    axum_test::TestServer::new(build_router(state)).expect("Failed to create test server")
}

pub async fn seed_item(
    pool: &PgPool,
    tag_id: &str,
    common_name: &str,
    status: &str,
    last_contract_num: Option<&str>,
    rental_class_num: Option<&str>,
) -> Item {
    let mut conn = pool.acquire().await.expect("acquire connection");
    Items::new(&mut conn)
        .create(&ItemCreateDBRequest {
            tag_id: tag_id.to_string(),
            common_name: common_name.to_string(),
            bin_location: Some("A-01".to_string()),
            status: status.to_string(),
            last_contract_num: last_contract_num.map(str::to_string),
            rental_class_num: rental_class_num.map(str::to_string),
            last_scanned_by: Some("test-reader".to_string()),
        })
        .await
        .expect("seed item")
}

pub async fn seed_tag(pool: &PgPool, tag_id: &str, status: &str, item_type: &str) -> TagRecord {
    let mut conn = pool.acquire().await.expect("acquire connection");
    Tags::new(&mut conn)
        .create(&TagCreateDBRequest {
            tag_id: tag_id.to_string(),
            status: status.to_string(),
            item_type: item_type.to_string(),
            last_contract_num: None,
        })
        .await
        .expect("seed tag")
}
