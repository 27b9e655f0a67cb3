//! Ring protocol modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets and constants (source of truth)
//! - `reader` / `builder`: safe byte access or packet assembly
//! - `parser`: domain-level decoding
//! - `error`: explicit, actionable errors
//!
//! Nothing here performs I/O; sources and the analysis layer handle files
//! and aggregation.

pub mod command;
pub(crate) mod common;
pub mod firehose;
