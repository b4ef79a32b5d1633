//! WebAssembly module for the Tour Merch Tracker
//!
//! Provides client-side computation for:
//! - Shrinkage between shows
//! - Tour sales statistics
//! - Top-selling merch rankings
//! - Sold-count previews while a seller is typing counts

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::reports::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&"Tour Merch Tracker reports ready".into());
}

/// Calculate shrinkage from a JSON array of inventory records
#[wasm_bindgen]
pub fn calculate_shrinkage_json(records_json: &str) -> Result<String, JsValue> {
    shrinkage_report(records_json).map_err(|e| JsValue::from_str(&e))
}

/// Calculate tour statistics from records, an optional tour and shrinkage items
#[wasm_bindgen]
pub fn tour_stats_json(
    records_json: &str,
    tour_json: &str,
    shrinkage_json: &str,
) -> Result<String, JsValue> {
    stats_report(records_json, tour_json, shrinkage_json).map_err(|e| JsValue::from_str(&e))
}

/// Rank the best-selling merch items from a JSON array of inventory records
#[wasm_bindgen]
pub fn top_selling_items_json(records_json: &str) -> Result<String, JsValue> {
    top_sellers_report(records_json).map_err(|e| JsValue::from_str(&e))
}

/// Build the full tour report (stats, shrinkage, top sellers)
#[wasm_bindgen]
pub fn tour_report_json(records_json: &str, tour_json: &str) -> Result<String, JsValue> {
    full_report(records_json, tour_json).map_err(|e| JsValue::from_str(&e))
}

/// Preview the sold count for a start/end pair. Negative inputs mean "not counted".
#[wasm_bindgen]
pub fn preview_sold_count(start_count: i32, end_count: i32) -> Option<i32> {
    let known = |n: i32| if n < 0 { None } else { Some(n) };
    derive_sold_count(known(start_count), known(end_count))
}

/// Display label for a variant ("Mens M" or "M")
#[wasm_bindgen]
pub fn variant_display_label(variant_type: Option<String>, size: &str) -> String {
    variant_label(variant_type.as_deref(), size)
}

fn parse_records(records_json: &str) -> Result<Vec<InventoryRecord>, String> {
    serde_json::from_str(records_json).map_err(|e| format!("Invalid records JSON: {}", e))
}

fn parse_tour(tour_json: &str) -> Result<Option<TourWithShows>, String> {
    serde_json::from_str(tour_json).map_err(|e| format!("Invalid tour JSON: {}", e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn shrinkage_report(records_json: &str) -> Result<String, String> {
    let records = parse_records(records_json)?;
    to_json(&calculate_shrinkage(&records))
}

fn stats_report(records_json: &str, tour_json: &str, shrinkage_json: &str) -> Result<String, String> {
    let records = parse_records(records_json)?;
    let tour = parse_tour(tour_json)?;
    let shrinkage: Vec<ShrinkageItem> = serde_json::from_str(shrinkage_json)
        .map_err(|e| format!("Invalid shrinkage JSON: {}", e))?;
    to_json(&tour_stats(&records, tour.as_ref(), &shrinkage))
}

fn top_sellers_report(records_json: &str) -> Result<String, String> {
    let records = parse_records(records_json)?;
    to_json(&top_selling_items(&records))
}

fn full_report(records_json: &str, tour_json: &str) -> Result<String, String> {
    let records = parse_records(records_json)?;
    let tour = parse_tour(tour_json)?;
    to_json(&build_tour_report(&records, tour.as_ref()))
}
