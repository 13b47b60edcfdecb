//! # spantree library surface
//!
//! Exposes the API router, CLI, and sink modules so integration tests (and
//! embedders that want the controller surface without the binary) can reach
//! them via `spantree::api::*`.

pub mod api;
pub mod cli;
pub mod sink;
