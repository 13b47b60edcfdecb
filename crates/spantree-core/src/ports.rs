//! # Port Control
//!
//! The seam between the reconciler and the switch-facing wire layer.
//!
//! The engine decides WHICH ports change state; delivering that decision to
//! hardware (OpenFlow port-mod, CLI, whatever the deployment uses) is an
//! external concern behind the [`PortControl`] trait. Delivery is
//! fire-and-forget from the reconciler's point of view: a failed command is
//! the implementor's problem to surface, and never aborts the rest of a
//! reconciliation batch.

use crate::types::{Dpid, PortNo, SpantreeError};
use serde::{Deserialize, Serialize};

// =============================================================================
// PORT COMMAND
// =============================================================================

/// A single port state change produced by reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortCommand {
    /// Switch owning the port.
    pub dpid: Dpid,
    /// Port to reconfigure.
    pub port: PortNo,
    /// `true` restores forwarding, `false` cuts it.
    pub open: bool,
}

impl PortCommand {
    /// Create a new port command.
    #[must_use]
    pub const fn new(dpid: Dpid, port: PortNo, open: bool) -> Self {
        Self { dpid, port, open }
    }
}

// =============================================================================
// PORT CONTROL TRAIT
// =============================================================================

/// Executes port state changes against the switches.
///
/// # Extension Point
///
/// This trait is intentionally defined without a wire implementation in
/// this crate. Implementors translate the call into whatever the deployment
/// speaks; `dpid`/`port` always identify a previously-seen topology
/// endpoint. Returning `Err` (e.g. [`SpantreeError::UnknownSwitch`]) marks
/// that one delivery as failed without affecting the rest of the batch.
pub trait PortControl {
    /// Open (`true`) or close (`false`) forwarding on a port.
    fn set_port_state(
        &mut self,
        dpid: Dpid,
        port: PortNo,
        open: bool,
    ) -> Result<(), SpantreeError>;
}

// =============================================================================
// RECORDING SINK
// =============================================================================

/// A sink that records every command instead of delivering it.
///
/// Used by the replay tooling and by embedders that want to inspect the
/// command stream before committing it to hardware.
#[derive(Debug, Clone, Default)]
pub struct RecordingPortControl {
    commands: Vec<PortCommand>,
}

impl RecordingPortControl {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded so far, in emission order.
    #[must_use]
    pub fn commands(&self) -> &[PortCommand] {
        &self.commands
    }

    /// Drop all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl PortControl for RecordingPortControl {
    fn set_port_state(
        &mut self,
        dpid: Dpid,
        port: PortNo,
        open: bool,
    ) -> Result<(), SpantreeError> {
        self.commands.push(PortCommand::new(dpid, port, open));
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
