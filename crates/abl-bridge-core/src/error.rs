use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading and publishing the ABL grammar.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The grammar entry point is not available in this build.
    #[error("grammar entry point `{symbol}` could not be resolved")]
    LinkResolutionFailure {
        /// The C symbol that was expected to provide the automaton.
        symbol: String,
    },

    /// The host did not supply a usable environment for registering exports.
    #[error("invalid host environment: {0}")]
    InvalidHostEnvironment(String),

    /// The export record was already published to this host.
    #[error("module `{name}` is already registered with this host")]
    AlreadyRegistered {
        /// Language name of the record that is already registered.
        name: String,
    },

    /// The host failed while attaching an export.
    #[error("host rejected export `{field}`: {reason}")]
    HostRejected {
        /// Export key being attached.
        field: String,
        /// Host-supplied failure message.
        reason: String,
    },

    /// No compiled binding was found in any of the searched locations.
    #[error("no compiled binding found (searched {} locations)", searched.len())]
    ModuleNotFound {
        /// Every path that was probed, in search order.
        searched: Vec<PathBuf>,
    },

    /// `node-types.json` was present but malformed.
    #[error("invalid node type metadata: {0}")]
    NodeTypes(#[from] serde_json::Error),

    /// Reading grammar metadata from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Returns `true` for failures caused by a misconfigured build rather than the host.
    #[must_use]
    pub fn is_link_failure(&self) -> bool {
        matches!(self, Self::LinkResolutionFailure { .. })
    }
}

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
