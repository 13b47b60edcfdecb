//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::sink::LogPortControl;
use serde::Deserialize;
use spantree_core::{
    Controller, CostRegistry, Dpid, Link, LinkCost, LinkEvent, LinkRecord, PortNo,
    RecordingPortControl, SpantreeError, dpid_hex, parse_cost_key, primitives::MAX_COST_ENTRIES,
    render_cost_key,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum file size for replay event files (16 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
const MAX_REPLAY_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Maximum file size for TOML cost tables (1 MB).
const MAX_COSTS_FILE_SIZE: u64 = 1024 * 1024;

/// Maximum number of events accepted from a single replay file.
const MAX_REPLAY_EVENTS: usize = 100_000;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), SpantreeError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| SpantreeError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(SpantreeError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate file path for security.
///
/// This function:
/// 1. Canonicalizes the path to resolve symlinks and ".."
/// 2. Ensures the path exists
/// 3. Ensures the path is a file (not a directory)
fn validate_file_path(path: &Path) -> Result<PathBuf, SpantreeError> {
    let canonical = path.canonicalize().map_err(|e| {
        SpantreeError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(SpantreeError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

// =============================================================================
// COST TABLE LOADING
// =============================================================================

/// Shape of the TOML cost file:
///
/// ```toml
/// [costs]
/// "1,2" = 10
/// "3,4" = 40
/// ```
#[derive(Debug, Deserialize)]
struct CostsFile {
    #[serde(default)]
    costs: BTreeMap<String, toml::Value>,
}

/// Load and validate a TOML cost table.
///
/// Validation is atomic: any malformed key or value rejects the whole file
/// and nothing is applied. Keys follow the same `\d+,\d+` rule as the HTTP
/// configuration surface; float values truncate toward zero.
fn load_cost_table(path: &Path) -> Result<BTreeMap<(Dpid, Dpid), LinkCost>, SpantreeError> {
    let canonical = validate_file_path(path)?;
    validate_file_size(&canonical, MAX_COSTS_FILE_SIZE)?;

    let content = std::fs::read_to_string(&canonical)
        .map_err(|e| SpantreeError::IoError(format!("Cannot read cost file: {}", e)))?;
    let parsed: CostsFile = toml::from_str(&content)
        .map_err(|e| SpantreeError::SerializationError(format!("Invalid cost file: {}", e)))?;

    if parsed.costs.len() > MAX_COST_ENTRIES {
        return Err(SpantreeError::SerializationError(format!(
            "Cost file has {} entries, maximum is {}",
            parsed.costs.len(),
            MAX_COST_ENTRIES
        )));
    }

    let mut table = BTreeMap::new();
    for (key, value) in parsed.costs {
        let pair = parse_cost_key(&key)?;
        let cost = match value {
            toml::Value::Integer(i) => LinkCost::new(i),
            toml::Value::Float(f) => LinkCost::new(f as i64),
            _ => return Err(SpantreeError::InvalidCostValue(key)),
        };
        table.insert(pair, cost);
    }
    Ok(table)
}

/// Build the registry for a fresh controller, optionally preloaded from a
/// cost file.
fn load_registry(
    costs_path: Option<&Path>,
    persist_default: bool,
) -> Result<CostRegistry, SpantreeError> {
    let mut registry = if persist_default {
        CostRegistry::persisting_defaults()
    } else {
        CostRegistry::new()
    };

    if let Some(path) = costs_path {
        let table = load_cost_table(path)?;
        tracing::info!("Loaded {} cost entries from {}", table.len(), path.display());
        for ((src, dst), cost) in table {
            registry.set_cost(src, dst, cost);
        }
    }

    Ok(registry)
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP controller surface.
pub async fn cmd_server(
    host: &str,
    port: u16,
    costs_path: Option<&Path>,
    persist_default: bool,
    port_down: bool,
) -> Result<(), SpantreeError> {
    let registry = load_registry(costs_path, persist_default)?;
    let controller = Controller::with_costs(LogPortControl::new(port_down), registry);

    println!("spantree Loop-Prevention Controller Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:            {}", host);
    println!("  Port:            {}", port);
    println!(
        "  Cost file:       {}",
        costs_path.map_or_else(|| "(none)".to_string(), |p| p.display().to_string())
    );
    println!("  Persist default: {}", persist_default);
    println!("  Disable mode:    {}", if port_down { "port-down" } else { "no-flood" });
    println!();
    println!("Endpoints:");
    println!("  GET    /health         - Health check");
    println!("  GET    /status         - Topology/MST summary");
    println!("  GET    /topocosts      - Configured cost table");
    println!("  POST   /topocosts      - Bulk cost update");
    println!("  GET    /topoedges      - Live topology");
    println!("  GET    /mstedges       - Current spanning forest");
    println!("  GET    /redundantedges - Blocked links");
    println!("  POST   /links          - Link-added notification");
    println!("  DELETE /links          - Link-removed notification");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, controller).await
}

// =============================================================================
// REPLAY COMMAND
// =============================================================================

/// One entry of a replay event file.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum ReplayEvent {
    /// A link was discovered.
    Add {
        src: u64,
        src_port: u32,
        dst: u64,
        dst_port: u32,
    },
    /// A link went away.
    Remove {
        src: u64,
        src_port: u32,
        dst: u64,
        dst_port: u32,
    },
}

impl ReplayEvent {
    fn to_link_event(&self) -> LinkEvent {
        match *self {
            Self::Add {
                src,
                src_port,
                dst,
                dst_port,
            }
            | Self::Remove {
                src,
                src_port,
                dst,
                dst_port,
            } => LinkEvent::new(Dpid(src), PortNo(src_port), Dpid(dst), PortNo(dst_port)),
        }
    }
}

/// Feed a link-event file through a fresh controller and print the result.
///
/// Events are processed strictly in file order, one full
/// recompute-and-reconcile pass per event, exactly like the live surface.
pub fn cmd_replay(
    file: &Path,
    costs_path: Option<&Path>,
    persist_default: bool,
    json_mode: bool,
) -> Result<(), SpantreeError> {
    let canonical = validate_file_path(file)?;
    validate_file_size(&canonical, MAX_REPLAY_FILE_SIZE)?;

    let content = std::fs::read_to_string(&canonical)
        .map_err(|e| SpantreeError::IoError(format!("Cannot read event file: {}", e)))?;
    let events: Vec<ReplayEvent> = serde_json::from_str(&content)
        .map_err(|e| SpantreeError::SerializationError(format!("Invalid event file: {}", e)))?;

    if events.len() > MAX_REPLAY_EVENTS {
        return Err(SpantreeError::SerializationError(format!(
            "Event file has {} events, maximum is {}",
            events.len(),
            MAX_REPLAY_EVENTS
        )));
    }

    let registry = load_registry(costs_path, persist_default)?;
    let mut controller = Controller::with_costs(RecordingPortControl::new(), registry);

    for event in &events {
        let link_event = event.to_link_event();
        match event {
            ReplayEvent::Add { .. } => {
                controller.link_added(&link_event);
            }
            ReplayEvent::Remove { .. } => {
                controller.link_removed(&link_event);
            }
        }
    }

    if json_mode {
        let output = serde_json::json!({
            "events": events.len(),
            "topoedges": LinkRecord::from_links(controller.topology().links()),
            "mstedges": LinkRecord::from_links(controller.mst_links()),
            "redundantedges": LinkRecord::from_links(controller.redundant_links()),
            "commands": controller.sink().commands(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Replayed {} events", events.len());
    println!();
    print_links("Topology", controller.topology().links());
    print_links("MST", controller.mst_links());
    print_links("Redundant", controller.redundant_links());

    let commands = controller.sink().commands();
    println!("Port commands ({}):", commands.len());
    for c in commands {
        println!(
            "  {} switch {} port {}",
            if c.open { "open " } else { "close" },
            dpid_hex(c.dpid),
            c.port.0
        );
    }

    Ok(())
}

/// Print one edge-record section.
fn print_links(title: &str, links: &[Link]) {
    println!("{} ({} links):", title, links.len());
    for record in LinkRecord::from_links(links) {
        println!(
            "  {} port {} <-> {} port {} cost {}",
            record.source_switch,
            record.source_port,
            record.destination_switch,
            record.destination_port,
            record.cost
        );
    }
    println!();
}

// =============================================================================
// COSTS COMMAND
// =============================================================================

/// Validate and print a TOML cost table.
pub fn cmd_costs(costs_path: Option<&Path>, json_mode: bool) -> Result<(), SpantreeError> {
    let Some(path) = costs_path else {
        return Err(SpantreeError::IoError(
            "No cost file given; pass --costs <FILE>".to_string(),
        ));
    };

    let table = load_cost_table(path)?;

    if json_mode {
        let rendered: BTreeMap<String, i64> = table
            .iter()
            .map(|(&(src, dst), cost)| (render_cost_key(src, dst), cost.value()))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&rendered).unwrap_or_default()
        );
        return Ok(());
    }

    for (&(src, dst), cost) in &table {
        println!("{} = {}", render_cost_key(src, dst), cost.value());
    }
    println!();
    println!("{} cost entries OK", table.len());

    Ok(())
}
