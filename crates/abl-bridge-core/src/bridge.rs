//! # Language Module Bridge
//!
//! Turns a host load into an [`ExportRecord`]: validate the host, ask the
//! grammar source for its handle, build the record. The bridge keeps no state
//! of its own; registration is the host's job.

use tracing::{debug, trace, warn};

use crate::error::{BridgeError, Result};
use crate::export::ExportRecord;
use crate::host::{HostEnvironment, ModuleHost};
use crate::source::{EntryPoint, LanguageSource};

/// Publishes the ABL grammar to embedding hosts.
#[derive(Debug, Clone)]
pub struct LanguageBridge<S = EntryPoint> {
    source: S,
}

impl LanguageBridge<EntryPoint> {
    /// Bridge over the `tree_sitter_abl` entry point of this build.
    #[must_use]
    pub fn abl() -> Self {
        Self::new(EntryPoint::abl())
    }
}

impl<S: LanguageSource> LanguageBridge<S> {
    /// Creates a bridge over an injected grammar source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Builds the export record for one host load.
    ///
    /// The environment is checked before the entry point is touched, so an
    /// invalid host costs nothing and leaves no trace.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::InvalidHostEnvironment`] if `env` is absent or unusable.
    /// - [`BridgeError::LinkResolutionFailure`] if the grammar is not linked.
    pub fn initialize<E>(&self, env: Option<&E>) -> Result<ExportRecord>
    where
        E: HostEnvironment + ?Sized,
    {
        let env = validate(env)?;
        trace!(host = %env.describe(), symbol = self.source.symbol(), "resolving grammar");

        let language = self.source.resolve().inspect_err(|e| {
            warn!(symbol = self.source.symbol(), error = %e, "grammar entry point unavailable");
        })?;

        let record = ExportRecord::new(language);
        debug!(name = record.name(), language = %language, "export record built");
        Ok(record)
    }

    /// Initializes and publishes the record to `host` exactly once.
    ///
    /// Nothing is published if initialization fails.
    ///
    /// # Errors
    ///
    /// Any error from [`LanguageBridge::initialize`] or from the host's
    /// [`ModuleHost::publish`].
    pub fn register<H>(&self, host: Option<&mut H>) -> Result<ExportRecord>
    where
        H: ModuleHost + ?Sized,
    {
        let host = host.ok_or_else(missing_env)?;
        let record = self.initialize(Some(&*host))?;
        host.publish(&record)?;
        Ok(record)
    }
}

fn missing_env() -> BridgeError {
    BridgeError::InvalidHostEnvironment("no environment supplied".into())
}

fn validate<E: HostEnvironment + ?Sized>(env: Option<&E>) -> Result<&E> {
    let env = env.ok_or_else(missing_env)?;
    if !env.is_usable() {
        return Err(BridgeError::InvalidHostEnvironment(format!(
            "{} cannot accept exports",
            env.describe()
        )));
    }
    Ok(env)
}
