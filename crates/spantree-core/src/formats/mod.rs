//! # External Formats
//!
//! Serializable representations of engine state for reporting surfaces.

mod records;

pub use records::{LinkRecord, dpid_hex};
