//! # Port Delivery Sink
//!
//! The app-side implementation of [`PortControl`]: structured-log delivery
//! standing in for the switch wire layer. Real deployments replace this
//! with an implementation that speaks to their switches; the engine never
//! knows the difference.

use spantree_core::{Dpid, PortControl, PortNo, SpantreeError, dpid_hex};

// =============================================================================
// DISABLE MODE
// =============================================================================

/// How a "close" is delivered to the switch.
///
/// `NoFlood` removes the port from flooding while leaving it up (the safe
/// default: discovery traffic still flows, so a reopened link is noticed
/// immediately). `PortDown` administratively disables the port outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisableMode {
    /// Mask the port out of flooding only.
    NoFlood,
    /// Administratively bring the port down.
    PortDown,
}

impl DisableMode {
    /// Human-readable label used in delivery logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoFlood => "no-flood",
            Self::PortDown => "port-down",
        }
    }
}

// =============================================================================
// LOGGING SINK
// =============================================================================

/// Sink that reports every port command through tracing.
#[derive(Debug, Clone)]
pub struct LogPortControl {
    mode: DisableMode,
}

impl LogPortControl {
    /// Create a sink; `port_down` selects the administrative-down mode.
    #[must_use]
    pub const fn new(port_down: bool) -> Self {
        let mode = if port_down {
            DisableMode::PortDown
        } else {
            DisableMode::NoFlood
        };
        Self { mode }
    }

    /// The configured disable mode.
    #[must_use]
    pub const fn mode(&self) -> DisableMode {
        self.mode
    }
}

impl PortControl for LogPortControl {
    fn set_port_state(
        &mut self,
        dpid: Dpid,
        port: PortNo,
        open: bool,
    ) -> Result<(), SpantreeError> {
        tracing::info!(
            "Sending port-mod to switch {} - {} port {} (mode {})",
            dpid_hex(dpid),
            if open { "opening" } else { "closing" },
            port.0,
            self.mode.label(),
        );
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_follows_flag() {
        assert_eq!(LogPortControl::new(false).mode(), DisableMode::NoFlood);
        assert_eq!(LogPortControl::new(true).mode(), DisableMode::PortDown);
    }

    #[test]
    fn delivery_always_succeeds() {
        let mut sink = LogPortControl::new(false);
        assert!(sink.set_port_state(Dpid(1), PortNo(2), false).is_ok());
    }
}
