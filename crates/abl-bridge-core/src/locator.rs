//! # Module Locator
//!
//! Finds the compiled Node binding on disk. Prebuilt binaries for the running
//! platform and Node ABI win; local `build/Release` and `build/Debug`
//! outputs are the fallbacks.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{BridgeError, Result};

/// File stem of the compiled binding.
pub const DEFAULT_BINARY_NAME: &str = "tree_sitter_abl_binding";

/// Node-style `{platform}-{arch}` identifier for the running process,
/// e.g. `linux-x64`, `win32-x64` or `darwin-arm64`.
#[must_use]
pub fn node_platform() -> String {
    format!(
        "{}-{}",
        node_os(std::env::consts::OS),
        node_arch(std::env::consts::ARCH)
    )
}

fn node_os(os: &str) -> &str {
    match os {
        "windows" => "win32",
        "macos" => "darwin",
        other => other,
    }
}

fn node_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "x64",
        "x86" => "ia32",
        "aarch64" => "arm64",
        "arm" => "arm",
        "powerpc64" => "ppc64",
        other => other,
    }
}

/// Where and what to look for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorConfig {
    /// Package root containing `prebuilds/` and `build/`.
    pub root: PathBuf,
    /// File stem of the binding.
    pub binary_name: String,
    /// Node platform directory under `prebuilds/`.
    pub platform: String,
    /// Node module ABI version (`process.versions.modules`).
    pub abi: Option<u32>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            binary_name: DEFAULT_BINARY_NAME.to_string(),
            platform: node_platform(),
            abi: None,
        }
    }
}

impl LocatorConfig {
    /// Create a new locator configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the package root.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the binding file stem.
    pub fn with_binary_name(mut self, name: impl Into<String>) -> Self {
        self.binary_name = name.into();
        self
    }

    /// Override the platform directory.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Set the Node ABI, enabling the prebuilt lookup.
    pub fn with_abi(mut self, abi: u32) -> Self {
        self.abi = Some(abi);
        self
    }
}

/// Resolves the binding path from a [`LocatorConfig`].
#[derive(Debug, Clone)]
pub struct ModuleLocator {
    config: LocatorConfig,
}

impl ModuleLocator {
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Every path probed by [`ModuleLocator::locate`], in order.
    #[must_use]
    pub fn candidates(&self) -> Vec<PathBuf> {
        let root = &self.config.root;
        let name = &self.config.binary_name;
        let mut paths = Vec::with_capacity(3);

        if let Some(abi) = self.config.abi {
            paths.push(
                root.join("prebuilds")
                    .join(&self.config.platform)
                    .join(format!("{name}-{abi}.node")),
            );
        }
        for profile in ["Release", "Debug"] {
            paths.push(root.join("build").join(profile).join(format!("{name}.node")));
        }
        paths
    }

    /// Returns the first candidate that exists.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ModuleNotFound`] listing every searched path, or
    /// [`BridgeError::Io`] if probing a candidate fails for any reason other
    /// than the file being absent.
    pub fn locate(&self) -> Result<PathBuf> {
        let searched = self.candidates();
        for path in &searched {
            trace!(path = %path.display(), "probing binding");
            if is_file(path)? {
                debug!(path = %path.display(), "binding found");
                return Ok(path.clone());
            }
        }
        Err(BridgeError::ModuleNotFound { searched })
    }
}

fn is_file(path: &Path) -> Result<bool> {
    match path.metadata() {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
