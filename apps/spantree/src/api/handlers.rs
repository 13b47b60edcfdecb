//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Every handler takes the shared controller lock: reads take it shared,
//! link events and cost updates take it exclusively, so notifications and
//! configuration changes enter the engine one at a time, in arrival order.

use super::{
    AppState,
    types::{
        CostUpdateResponse, HealthResponse, LinkEventRequest, LinkEventResponse, SetCostsRequest,
        StatusResponse,
    },
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use spantree_core::{LinkRecord, render_cost_key};
use std::collections::BTreeMap;

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Get controller status.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let controller = state.controller.read().await;

    let response = StatusResponse {
        switch_count: controller.topology().switches().len(),
        link_count: controller.topology().len(),
        mst_size: controller.mst_links().len(),
        redundant_count: controller.redundant_links().len(),
    };

    (StatusCode::OK, Json(response))
}

// =============================================================================
// COST HANDLERS
// =============================================================================

/// List the configured cost table as `{"<src>,<dst>": cost}`.
pub async fn list_topocosts_handler(State(state): State<AppState>) -> impl IntoResponse {
    let controller = state.controller.read().await;

    let costs: BTreeMap<String, i64> = controller
        .costs()
        .entries()
        .map(|((src, dst), cost)| (render_cost_key(src, dst), cost.value()))
        .collect();

    (StatusCode::OK, Json(costs))
}

/// Apply a bulk cost update.
///
/// Validation is atomic: the whole batch is parsed before the engine sees
/// anything, and a single malformed entry rejects the lot with no state
/// change. A successful update triggers a full cost refresh and MST
/// recomputation even though the physical topology did not move.
pub async fn set_topocosts_handler(
    State(state): State<AppState>,
    Json(request): Json<SetCostsRequest>,
) -> impl IntoResponse {
    let table = match request.into_table() {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!("Rejected cost update: {}", e);
            return (StatusCode::BAD_REQUEST, Json(CostUpdateResponse::rejected()));
        }
    };

    let mut controller = state.controller.write().await;
    controller.set_costs(table);

    (StatusCode::OK, Json(CostUpdateResponse::applied()))
}

// =============================================================================
// TOPOLOGY INTROSPECTION HANDLERS
// =============================================================================

/// List the live topology.
pub async fn list_topoedges_handler(State(state): State<AppState>) -> impl IntoResponse {
    let controller = state.controller.read().await;
    let records = LinkRecord::from_links(controller.topology().links());
    (StatusCode::OK, Json(records))
}

/// List the current spanning forest.
pub async fn list_mstedges_handler(State(state): State<AppState>) -> impl IntoResponse {
    let controller = state.controller.read().await;
    let records = LinkRecord::from_links(controller.mst_links());
    (StatusCode::OK, Json(records))
}

/// List the redundant (blocked) links.
pub async fn list_redundantedges_handler(State(state): State<AppState>) -> impl IntoResponse {
    let controller = state.controller.read().await;
    let records = LinkRecord::from_links(controller.redundant_links());
    (StatusCode::OK, Json(records))
}

// =============================================================================
// LINK EVENT HANDLERS
// =============================================================================

/// Boundary adapter for `LinkAdded` from the discovery collaborator.
pub async fn link_added_handler(
    State(state): State<AppState>,
    Json(request): Json<LinkEventRequest>,
) -> impl IntoResponse {
    let event = match request.to_event() {
        Ok(ev) => ev,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(LinkEventResponse::error(format!("Invalid link: {}", e))),
            );
        }
    };

    let mut controller = state.controller.write().await;
    let changed = controller.link_added(&event);
    if changed {
        tracing::info!(
            "Link added: ({}, {}) with cost {}.",
            event.src.0,
            event.dst.0,
            controller
                .topology()
                .links()
                .last()
                .map_or(0, |l| l.cost.value()),
        );
    }

    (StatusCode::OK, Json(LinkEventResponse::processed(changed)))
}

/// Boundary adapter for `LinkRemoved` from the discovery collaborator.
///
/// Removal of a link never added is a no-op, not an error.
pub async fn link_removed_handler(
    State(state): State<AppState>,
    Json(request): Json<LinkEventRequest>,
) -> impl IntoResponse {
    let event = match request.to_event() {
        Ok(ev) => ev,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(LinkEventResponse::error(format!("Invalid link: {}", e))),
            );
        }
    };

    let mut controller = state.controller.write().await;
    let changed = controller.link_removed(&event);
    if changed {
        tracing::info!("Link removed: ({}, {}).", event.src.0, event.dst.0);
    }

    (StatusCode::OK, Json(LinkEventResponse::processed(changed)))
}
