use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // Cost center handlers
        .route(
            "/api/cost_center",
            get(handlers::a001_cost_center::list_all).post(handlers::a001_cost_center::upsert),
        )
        .route(
            "/api/cost_center/analysis",
            get(handlers::a001_cost_center::analysis),
        )
        .route(
            "/api/cost_center/tree",
            get(handlers::a001_cost_center::tree),
        )
        .route(
            "/api/cost_center/testdata",
            post(handlers::a001_cost_center::insert_test_data),
        )
        .route(
            "/api/cost_center/:id",
            get(handlers::a001_cost_center::get_by_id).delete(handlers::a001_cost_center::delete),
        )
        // Warehouse handlers
        .route(
            "/api/warehouse",
            get(handlers::a002_warehouse::list_all).post(handlers::a002_warehouse::upsert),
        )
        .route(
            "/api/warehouse/summary",
            get(handlers::a002_warehouse::summary),
        )
        .route(
            "/api/warehouse/testdata",
            post(handlers::a002_warehouse::insert_test_data),
        )
        .route(
            "/api/warehouse/:id",
            get(handlers::a002_warehouse::get_by_id).delete(handlers::a002_warehouse::delete),
        )
        .route(
            "/api/warehouse/:id/inventory",
            get(handlers::a002_warehouse::get_inventory)
                .put(handlers::a002_warehouse::replace_inventory),
        )
        // Employee handlers
        .route(
            "/api/employee",
            get(handlers::a003_employee::list_all).post(handlers::a003_employee::upsert),
        )
        // Logs handlers
        .route(
            "/api/logs",
            get(handlers::logs::list_all)
                .post(handlers::logs::create)
                .delete(handlers::logs::clear_all),
        )
}
