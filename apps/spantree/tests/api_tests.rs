//! Integration tests for the spantree HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum_test::TestServer;
use serde_json::json;
use spantree::api::{
    AppState, COSTS_REJECTED_STATUS, COSTS_SET_STATUS, CostUpdateResponse, HealthResponse,
    LinkEventResponse, StatusResponse, create_router,
};
use spantree::sink::LogPortControl;
use spantree_core::{Controller, LinkRecord};
use std::collections::BTreeMap;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a test server with a fresh controller.
fn create_test_server() -> TestServer {
    let controller = Controller::new(LogPortControl::new(false));
    let state = AppState::new(controller);
    TestServer::new(create_router(state)).unwrap()
}

/// Post one link-add notification and assert it was processed.
async fn add_link(server: &TestServer, src: u64, src_port: u32, dst: u64, dst_port: u32) {
    let response = server
        .post("/links")
        .json(&json!({
            "src": src,
            "src_port": src_port,
            "dst": dst,
            "dst_port": dst_port,
        }))
        .await;
    response.assert_status_ok();
    let body: LinkEventResponse = response.json();
    assert!(body.success);
}

/// Create a test server populated with the six-switch reference topology:
/// configured costs plus six links, three of which end up redundant.
async fn create_populated_test_server() -> TestServer {
    let server = create_test_server();

    let costs = json!([{
        "1,2": 1, "1,3": 4, "1,4": 2, "2,3": 3, "2,4": 4, "3,4": 1,
    }]);
    server.post("/topocosts").json(&costs).await.assert_status_ok();

    add_link(&server, 1, 1, 2, 1).await;
    add_link(&server, 1, 2, 3, 1).await;
    add_link(&server, 1, 3, 4, 1).await;
    add_link(&server, 2, 2, 3, 2).await;
    add_link(&server, 2, 3, 4, 2).await;
    add_link(&server, 3, 3, 4, 3).await;

    server
}

/// Collapse an edge-record list into comparable (src, sport, dst, dport, cost)
/// tuples, orientation preserved.
fn record_tuples(records: &[LinkRecord]) -> Vec<(String, u32, String, u32, i64)> {
    records
        .iter()
        .map(|r| {
            (
                r.source_switch.clone(),
                r.source_port,
                r.destination_switch.clone(),
                r.destination_port,
                r.cost,
            )
        })
        .collect()
}

fn hex(dpid: u64) -> String {
    spantree_core::dpid_hex(spantree_core::Dpid(dpid))
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[tokio::test]
async fn test_health_returns_correct_version() {
    let server = create_test_server();

    let response = server.get("/health").await;
    let health: HealthResponse = response.json();

    // Version should match Cargo.toml
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// STATUS ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_status_empty_controller() {
    let server = create_test_server();

    let response = server.get("/status").await;

    response.assert_status_ok();
    let status: StatusResponse = response.json();
    assert_eq!(status.switch_count, 0);
    assert_eq!(status.link_count, 0);
    assert_eq!(status.mst_size, 0);
    assert_eq!(status.redundant_count, 0);
}

#[tokio::test]
async fn test_status_populated_controller() {
    let server = create_populated_test_server().await;

    let response = server.get("/status").await;

    response.assert_status_ok();
    let status: StatusResponse = response.json();
    assert_eq!(status.switch_count, 4);
    assert_eq!(status.link_count, 6);
    assert_eq!(status.mst_size, 3);
    assert_eq!(status.redundant_count, 3);
}

// =============================================================================
// COST ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_topocosts_empty() {
    let server = create_test_server();

    let response = server.get("/topocosts").await;

    response.assert_status_ok();
    let costs: BTreeMap<String, i64> = response.json();
    assert!(costs.is_empty());
}

#[tokio::test]
async fn test_set_topocosts_valid() {
    let server = create_test_server();

    let body = json!([{"1,2": 10, "1,3": 40, "1,4": 20, "2,3": 30, "2,4": 10, "3,4": 40}]);
    let response = server.post("/topocosts").json(&body).await;

    response.assert_status_ok();
    let update: CostUpdateResponse = response.json();
    assert_eq!(update.status, COSTS_SET_STATUS);

    let costs: BTreeMap<String, i64> = server.get("/topocosts").await.json();
    assert_eq!(costs.len(), 6);
    assert_eq!(costs.get("1,2"), Some(&10));
    assert_eq!(costs.get("3,4"), Some(&40));
}

#[tokio::test]
async fn test_set_topocosts_invalid_key_rejected() {
    let server = create_test_server();

    let body = json!([{"1;2": 5}]);
    let response = server.post("/topocosts").json(&body).await;

    response.assert_status_bad_request();
    let update: CostUpdateResponse = response.json();
    assert_eq!(update.status, COSTS_REJECTED_STATUS);
}

#[tokio::test]
async fn test_set_topocosts_invalid_value_rejected() {
    let server = create_test_server();

    let body = json!([{"1,2": "ten"}]);
    let response = server.post("/topocosts").json(&body).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_set_topocosts_rejection_is_atomic() {
    let server = create_test_server();

    // One good entry, one bad: nothing may apply.
    let body = json!([{"1,2": 5}, {"oops": 7}]);
    let response = server.post("/topocosts").json(&body).await;
    response.assert_status_bad_request();

    let costs: BTreeMap<String, i64> = server.get("/topocosts").await.json();
    assert!(costs.is_empty());
}

#[tokio::test]
async fn test_set_topocosts_float_truncates() {
    let server = create_test_server();

    let body = json!([{"1,2": 2.9}]);
    server.post("/topocosts").json(&body).await.assert_status_ok();

    let costs: BTreeMap<String, i64> = server.get("/topocosts").await.json();
    assert_eq!(costs.get("1,2"), Some(&2));
}

#[tokio::test]
async fn test_set_topocosts_non_list_body_rejected() {
    let server = create_test_server();

    let response = server.post("/topocosts").json(&json!("invalid input")).await;
    assert!(response.status_code().is_client_error());
}

// =============================================================================
// LINK EVENT TESTS
// =============================================================================

#[tokio::test]
async fn test_link_add_reports_change() {
    let server = create_test_server();

    let body = json!({"src": 1, "src_port": 1, "dst": 2, "dst_port": 1});
    let response = server.post("/links").json(&body).await;

    response.assert_status_ok();
    let event: LinkEventResponse = response.json();
    assert!(event.success);
    assert!(event.changed);
}

#[tokio::test]
async fn test_duplicate_link_add_is_noop() {
    let server = create_test_server();

    let body = json!({"src": 1, "src_port": 1, "dst": 2, "dst_port": 1});
    server.post("/links").json(&body).await.assert_status_ok();

    // Same orientation.
    let response = server.post("/links").json(&body).await;
    let event: LinkEventResponse = response.json();
    assert!(!event.changed);

    // Swapped orientation is the same physical link.
    let swapped = json!({"src": 2, "src_port": 1, "dst": 1, "dst_port": 1});
    let response = server.post("/links").json(&swapped).await;
    let event: LinkEventResponse = response.json();
    assert!(!event.changed);

    let status: StatusResponse = server.get("/status").await.json();
    assert_eq!(status.link_count, 1);
}

#[tokio::test]
async fn test_remove_unknown_link_is_noop() {
    let server = create_test_server();

    let body = json!({"src": 7, "src_port": 1, "dst": 8, "dst_port": 1});
    let response = server.delete("/links").json(&body).await;

    response.assert_status_ok();
    let event: LinkEventResponse = response.json();
    assert!(event.success);
    assert!(!event.changed);
}

#[tokio::test]
async fn test_remove_link_by_swapped_orientation() {
    let server = create_test_server();

    add_link(&server, 1, 1, 2, 2).await;

    let swapped = json!({"src": 2, "src_port": 2, "dst": 1, "dst_port": 1});
    let response = server.delete("/links").json(&swapped).await;
    let event: LinkEventResponse = response.json();
    assert!(event.changed);

    let status: StatusResponse = server.get("/status").await.json();
    assert_eq!(status.link_count, 0);
}

#[tokio::test]
async fn test_self_link_rejected() {
    let server = create_test_server();

    let body = json!({"src": 3, "src_port": 1, "dst": 3, "dst_port": 2});
    let response = server.post("/links").json(&body).await;

    response.assert_status_bad_request();
    let event: LinkEventResponse = response.json();
    assert!(!event.success);
    assert!(event.error.is_some());
}

// =============================================================================
// INTROSPECTION ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_topoedges_render_hex_switches() {
    let server = create_populated_test_server().await;

    let records: Vec<LinkRecord> = server.get("/topoedges").await.json();

    assert_eq!(records.len(), 6);
    assert_eq!(records[0].source_switch, "00:00:00:00:00:00:00:01");
    assert_eq!(records[0].source_port, 1);
    assert_eq!(records[0].destination_switch, "00:00:00:00:00:00:00:02");
    assert_eq!(records[0].destination_port, 1);
    assert_eq!(records[0].cost, 1);
}

#[tokio::test]
async fn test_mstedges_reference_topology() {
    let server = create_populated_test_server().await;

    let records: Vec<LinkRecord> = server.get("/mstedges").await.json();
    let tuples = record_tuples(&records);

    assert_eq!(tuples.len(), 3);
    for expected in [
        (hex(1), 1, hex(2), 1, 1),
        (hex(1), 3, hex(4), 1, 2),
        (hex(3), 3, hex(4), 3, 1),
    ] {
        assert!(tuples.contains(&expected), "missing {:?}", expected);
    }
}

#[tokio::test]
async fn test_redundantedges_reference_topology() {
    let server = create_populated_test_server().await;

    let records: Vec<LinkRecord> = server.get("/redundantedges").await.json();
    let tuples = record_tuples(&records);

    assert_eq!(tuples.len(), 3);
    for expected in [
        (hex(1), 2, hex(3), 1, 4),
        (hex(2), 2, hex(3), 2, 3),
        (hex(2), 3, hex(4), 2, 4),
    ] {
        assert!(tuples.contains(&expected), "missing {:?}", expected);
    }
}

#[tokio::test]
async fn test_cost_update_moves_the_tree() {
    // Square topology, uniform costs: (3,4) is the redundant link.
    let server = create_test_server();
    add_link(&server, 1, 1, 2, 1).await;
    add_link(&server, 2, 2, 3, 1).await;
    add_link(&server, 3, 2, 4, 1).await;
    add_link(&server, 1, 2, 4, 2).await;

    let records: Vec<LinkRecord> = server.get("/redundantedges").await.json();
    assert_eq!(record_tuples(&records), vec![(hex(3), 2, hex(4), 1, 1)]);

    // Pricing (2,3) out of the tree moves the redundancy with no physical
    // topology change.
    let body = json!([{"2,3": 10}]);
    server.post("/topocosts").json(&body).await.assert_status_ok();

    let records: Vec<LinkRecord> = server.get("/redundantedges").await.json();
    assert_eq!(record_tuples(&records), vec![(hex(2), 2, hex(3), 1, 10)]);

    let status: StatusResponse = server.get("/status").await.json();
    assert_eq!(status.link_count, 4);
    assert_eq!(status.mst_size, 3);
}

#[tokio::test]
async fn test_link_removal_updates_derived_sets() {
    let server = create_populated_test_server().await;

    // Remove the redundant (1,3) link; the other two stay redundant.
    let body = json!({"src": 1, "src_port": 2, "dst": 3, "dst_port": 1});
    let response = server.delete("/links").json(&body).await;
    let event: LinkEventResponse = response.json();
    assert!(event.changed);

    let status: StatusResponse = server.get("/status").await.json();
    assert_eq!(status.link_count, 5);
    assert_eq!(status.mst_size, 3);
    assert_eq!(status.redundant_count, 2);
}
