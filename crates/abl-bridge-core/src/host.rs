//! # Host Surface
//!
//! Traits the embedding runtime implements so the bridge can hand it an
//! export record, plus an in-memory host for tests and tooling.

use tracing::debug;

use crate::error::{BridgeError, Result};
use crate::export::ExportRecord;

/// The environment/context a host supplies when it loads the module.
pub trait HostEnvironment {
    /// Returns `false` if the host cannot accept exports (e.g. a null env).
    fn is_usable(&self) -> bool;

    /// Short description used in error messages and logs.
    fn describe(&self) -> String;
}

/// A host that owns its own module registry.
pub trait ModuleHost: HostEnvironment {
    /// Publishes a complete record to the host's registry.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::AlreadyRegistered`] if this host already holds
    /// the module, or a host-specific failure.
    fn publish(&mut self, record: &ExportRecord) -> Result<()>;
}

/// Load state of the module within one host.
///
/// One-shot: there is no transition back to `Unregistered`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Registration {
    /// `initialize` has not completed for this host.
    #[default]
    Unregistered,
    /// The record has been published.
    Registered(ExportRecord),
}

impl Registration {
    /// Moves to `Registered`, failing if already there.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::AlreadyRegistered`] on a second registration.
    pub fn register(&mut self, record: ExportRecord) -> Result<()> {
        if let Self::Registered(existing) = self {
            return Err(BridgeError::AlreadyRegistered {
                name: existing.name().to_string(),
            });
        }
        *self = Self::Registered(record);
        Ok(())
    }

    /// The published record, if any.
    #[must_use]
    pub fn record(&self) -> Option<&ExportRecord> {
        match self {
            Self::Registered(record) => Some(record),
            Self::Unregistered => None,
        }
    }

    #[must_use]
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered(_))
    }
}

/// In-process host with a single module slot.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    label: String,
    usable: bool,
    registration: Registration,
}

impl MemoryHost {
    /// Creates a usable host.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            usable: true,
            registration: Registration::Unregistered,
        }
    }

    /// Creates a host that refuses exports, as a torn-down context would.
    pub fn unusable(label: impl Into<String>) -> Self {
        Self {
            usable: false,
            ..Self::new(label)
        }
    }

    #[must_use]
    pub fn registration(&self) -> &Registration {
        &self.registration
    }

    /// The record published to this host, if any.
    #[must_use]
    pub fn exports(&self) -> Option<&ExportRecord> {
        self.registration.record()
    }
}

impl HostEnvironment for MemoryHost {
    fn is_usable(&self) -> bool {
        self.usable
    }

    fn describe(&self) -> String {
        format!("memory host `{}`", self.label)
    }
}

impl ModuleHost for MemoryHost {
    fn publish(&mut self, record: &ExportRecord) -> Result<()> {
        self.registration.register(*record)?;
        debug!(host = %self.label, name = record.name(), "exports published");
        Ok(())
    }
}
