//! ABL Bridge Inspector
//!
//! Drives the grammar bridge outside of Node: builds the export record
//! against an in-memory host, shows where the compiled binding would be
//! loaded from, and summarizes `node-types.json`.

use std::path::{Path, PathBuf};

use abl_bridge_core::{
    BridgeError, LanguageBridge, LocatorConfig, MemoryHost, ModuleLocator, NodeTypes,
    RecordSummary,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn, Level};

/// CLI arguments
#[derive(Parser)]
#[command(name = "abl-inspect")]
#[command(about = "Inspect the ABL tree-sitter grammar bridge")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log bridge activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and register the export record against an in-memory host
    Record {
        /// Simulate a host whose environment cannot accept exports
        #[arg(long)]
        invalid_host: bool,
    },
    /// Show where the compiled Node binding is searched for
    Locate {
        /// Package root containing `prebuilds/` and `build/`
        #[arg(short, long, env = "ABL_MODULE_ROOT", default_value = ".")]
        root: PathBuf,

        /// Node module ABI (`process.versions.modules`)
        #[arg(short, long, env = "ABL_NODE_ABI")]
        abi: Option<u32>,

        /// Node platform directory, e.g. `win32-x64`
        #[arg(short, long)]
        platform: Option<String>,
    },
    /// Summarize a `node-types.json` file
    NodeTypes {
        /// Path to `node-types.json`
        path: PathBuf,

        /// List named kinds only
        #[arg(long)]
        named: bool,
    },
}

/// Output of the `record` command.
#[derive(Debug, Serialize)]
struct RecordOutput {
    host: String,
    record: Option<RecordSummary>,
    error: Option<String>,
}

/// Output of the `locate` command.
#[derive(Debug, Serialize)]
struct LocateOutput {
    candidates: Vec<PathBuf>,
    found: Option<PathBuf>,
}

/// Output of the `node-types` command.
#[derive(Debug, Serialize)]
struct NodeTypesOutput {
    count: usize,
    supertypes: usize,
    kinds: Vec<String>,
}

fn run_record(invalid_host: bool) -> RecordOutput {
    let mut host = if invalid_host {
        MemoryHost::unusable("abl-inspect")
    } else {
        MemoryHost::new("abl-inspect")
    };

    let bridge = LanguageBridge::abl();
    let result = bridge.register(Some(&mut host));
    if let Err(ref e) = result {
        warn!(error = %e, "registration failed");
    }

    RecordOutput {
        host: "abl-inspect".to_string(),
        record: result.as_ref().ok().map(|r| r.summary()),
        error: result.err().map(|e| e.to_string()),
    }
}

fn run_locate(root: PathBuf, abi: Option<u32>, platform: Option<String>) -> Result<LocateOutput> {
    let mut config = LocatorConfig::new().with_root(root);
    if let Some(abi) = abi {
        config = config.with_abi(abi);
    }
    if let Some(platform) = platform {
        config = config.with_platform(platform);
    }

    let locator = ModuleLocator::new(config);
    let found = match locator.locate() {
        Ok(path) => Some(path),
        Err(BridgeError::ModuleNotFound { .. }) => None,
        Err(e) => return Err(e).context("failed to probe binding locations"),
    };

    Ok(LocateOutput {
        candidates: locator.candidates(),
        found,
    })
}

fn run_node_types(path: &Path, named: bool) -> Result<NodeTypesOutput> {
    let types = NodeTypes::load(path)
        .with_context(|| format!("failed to read {}", path.display()))?
        .with_context(|| format!("{} does not exist", path.display()))?;

    let kinds = if named {
        types.named_kinds().map(str::to_string).collect()
    } else {
        types.iter().map(|t| t.kind.clone()).collect()
    };

    Ok(NodeTypesOutput {
        count: types.len(),
        supertypes: types.supertypes().count(),
        kinds,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Record { invalid_host } => {
            let output = run_record(invalid_host);
            print_json(&output)?;
            if output.error.is_some() {
                std::process::exit(1);
            }
        }
        Commands::Locate {
            root,
            abi,
            platform,
        } => {
            let output = run_locate(root, abi, platform)?;
            if let Some(ref found) = output.found {
                info!(path = %found.display(), "binding located");
            }
            print_json(&output)?;
        }
        Commands::NodeTypes { path, named } => {
            print_json(&run_node_types(&path, named)?)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn record_matches_build() {
        let output = run_record(false);
        if cfg!(feature = "linked") {
            assert_eq!(output.record.unwrap().name, "abl");
        } else {
            assert!(output.record.is_none());
            assert!(output.error.unwrap().contains("tree_sitter_abl"));
        }
    }

    #[test]
    fn invalid_host_is_reported() {
        let output = run_record(true);
        assert!(output.record.is_none());
        assert!(output.error.unwrap().contains("invalid host environment"));
    }

    #[test]
    fn locate_in_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let output =
            run_locate(dir.path().to_path_buf(), Some(115), Some("linux-x64".into())).unwrap();
        assert_eq!(output.candidates.len(), 3);
        assert!(output.found.is_none());
    }

    #[test]
    fn node_types_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node-types.json");
        std::fs::write(
            &path,
            r#"[{"type": "source_code", "named": true}, {"type": "DO", "named": false}]"#,
        )
        .unwrap();

        let all = run_node_types(&path, false).unwrap();
        assert_eq!(all.count, 2);
        assert_eq!(all.kinds, ["source_code", "DO"]);

        let named = run_node_types(&path, true).unwrap();
        assert_eq!(named.kinds, ["source_code"]);
    }

    #[test]
    fn node_types_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run_node_types(&dir.path().join("missing.json"), false).is_err());
    }
}
