//! Route definitions for the Tour Merch Tracker

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public, plus /me)
        .nest("/auth", auth_routes(state.clone()))
        // Protected routes - tours, their shows and reports
        .nest("/tours", tour_routes(state.clone()))
        // Protected routes - single shows and their counts
        .nest("/shows", show_routes(state.clone()))
        // Protected routes - merch catalog
        .nest("/merch", merch_routes(state))
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
        .route(
            "/me",
            get(handlers::me).route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}

/// Tour management routes (protected)
fn tour_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_tours).post(handlers::create_tour))
        .route(
            "/:tour_id",
            get(handlers::get_tour)
                .put(handlers::update_tour)
                .delete(handlers::delete_tour),
        )
        .route(
            "/:tour_id/shows",
            get(handlers::list_shows).post(handlers::create_show),
        )
        .route("/:tour_id/inventory", get(handlers::list_tour_inventory))
        .route("/:tour_id/report", get(handlers::get_tour_report))
        .route("/:tour_id/report/shrinkage", get(handlers::get_shrinkage_report))
        .route("/:tour_id/report/stats", get(handlers::get_stats_report))
        .route("/:tour_id/report/top-sellers", get(handlers::get_top_sellers_report))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Show routes (protected)
fn show_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/:show_id",
            get(handlers::get_show)
                .put(handlers::update_show)
                .delete(handlers::delete_show),
        )
        .route(
            "/:show_id/inventory",
            get(handlers::list_show_inventory).put(handlers::upsert_count),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Merch catalog routes (protected)
fn merch_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/items", get(handlers::list_items).post(handlers::create_item))
        .route(
            "/items/:item_id",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        .route("/items/:item_id/variants", post(handlers::add_variant))
        .route(
            "/variants/:variant_id",
            put(handlers::update_variant).delete(handlers::delete_variant),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
