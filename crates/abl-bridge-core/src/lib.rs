//! # ABL Bridge Core
//!
//! Publishes the compiled ABL tree-sitter grammar to an embedding host as a
//! two-field export record: the language name and an opaque, non-owning
//! handle to the automaton.
//!
//! The grammar itself is an external static library. Build with the `linked`
//! feature to link it; without it, loading fails fast with
//! [`BridgeError::LinkResolutionFailure`].
//!
//! ## Quick Start
//!
//! ```rust
//! use abl_bridge_core::{BridgeError, LanguageBridge, MemoryHost};
//!
//! let bridge = LanguageBridge::abl();
//! let mut host = MemoryHost::new("docs");
//!
//! match bridge.register(Some(&mut host)) {
//!     Ok(record) => assert_eq!(record.name(), "abl"),
//!     Err(err) => assert!(matches!(err, BridgeError::LinkResolutionFailure { .. })),
//! }
//! ```
pub mod bridge;
pub mod error;
pub mod export;
pub mod host;
pub mod language;
pub mod locator;
pub mod node_types;
pub mod source;

// Re-export primary API
pub use bridge::LanguageBridge;
pub use error::{BridgeError, Result};
pub use export::{
    ExportRecord, ExportValue, RecordSummary, ENTRY_SYMBOL, LANGUAGE_FIELD, LANGUAGE_NAME,
    NAME_FIELD,
};
pub use host::{HostEnvironment, MemoryHost, ModuleHost, Registration};
pub use language::{GrammarHandle, TSLanguage};
pub use locator::{node_platform, LocatorConfig, ModuleLocator, DEFAULT_BINARY_NAME};
pub use node_types::{ChildInfo, NodeTypeInfo, NodeTypeRef, NodeTypes};
#[cfg(feature = "linked")]
pub use source::LANGUAGE;
pub use source::{EntryPoint, LanguageSource};
