//! # ABL Bridge FFI
//!
//! Host bindings for the ABL grammar bridge. The Node.js addon (feature
//! `node`) publishes `{ name: "abl", language: <External> }` when required.

#[cfg(feature = "node")]
mod node;
pub mod publish;

pub use abl_bridge_core::{BridgeError, ExportRecord, LanguageBridge};
pub use publish::{publish_record, ExportSink};

#[cfg(feature = "node")]
pub use node::{to_napi_error, NodeHost, NodeValue};
