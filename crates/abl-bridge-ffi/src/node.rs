//! Node.js bindings using NAPI.
//!
//! Loading the addon runs `init` once per Node environment. The export
//! object ends up as:
//!
//! ```js
//! const Parser = require('tree-sitter');
//! const Abl = require('tree-sitter-abl');
//!
//! console.log(Abl.name); // 'abl'
//! const parser = new Parser();
//! parser.setLanguage(Abl); // Abl.language is the external automaton handle
//! ```

use abl_bridge_core::{
    BridgeError, ExportRecord, GrammarHandle, HostEnvironment, LanguageBridge, ModuleHost,
};
use napi::bindgen_prelude::*;
use napi::{Env, JsExternal, JsObject, JsString};
use napi_derive::module_exports;
use tracing::debug;

use crate::publish::{publish_record, ExportSink};

/// The addon's view of a Node environment and its `exports` object.
pub struct NodeHost<'a> {
    env: Env,
    exports: &'a mut JsObject,
}

impl<'a> NodeHost<'a> {
    pub fn new(env: Env, exports: &'a mut JsObject) -> Self {
        Self { env, exports }
    }
}

/// A created JS value waiting to be attached.
pub enum NodeValue {
    Name(JsString),
    Language(JsExternal),
}

impl ExportSink for NodeHost<'_> {
    type Value = NodeValue;
    type Error = Error;

    fn create_name(&mut self, name: &str) -> Result<NodeValue> {
        self.env.create_string(name).map(NodeValue::Name)
    }

    // The external owns only a copy of the handle; finalizing it never
    // touches the automaton.
    fn create_language(&mut self, handle: GrammarHandle) -> Result<NodeValue> {
        self.env
            .create_external::<GrammarHandle>(handle, None)
            .map(NodeValue::Language)
    }

    fn set(&mut self, field: &str, value: NodeValue) -> Result<()> {
        match value {
            NodeValue::Name(name) => self.exports.set_named_property(field, name),
            NodeValue::Language(external) => self.exports.set_named_property(field, external),
        }
    }
}

impl HostEnvironment for NodeHost<'_> {
    fn is_usable(&self) -> bool {
        !self.env.raw().is_null()
    }

    fn describe(&self) -> String {
        format!("node env {:p}", self.env.raw())
    }
}

impl ModuleHost for NodeHost<'_> {
    fn publish(&mut self, record: &ExportRecord) -> abl_bridge_core::Result<()> {
        publish_record(self, record)
    }
}

/// Converts a bridge failure into the JS exception thrown from `require`.
pub fn to_napi_error(err: BridgeError) -> Error {
    Error::new(Status::GenericFailure, format!("tree-sitter-abl: {err}"))
}

/// Module initializer, registered with N-API as the addon's exports hook.
///
/// Fails the `require` call if the grammar is not linked into this build or
/// the environment cannot take exports.
#[module_exports]
fn init(mut exports: JsObject, env: Env) -> Result<()> {
    let mut host = NodeHost::new(env, &mut exports);
    let record = LanguageBridge::abl()
        .register(Some(&mut host))
        .map_err(to_napi_error)?;

    debug!(name = record.name(), language = %record.language(), "abl module registered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_host_is_a_module_host() {
        fn assert_host<H: ModuleHost + ExportSink>() {}
        assert_host::<NodeHost<'static>>();
    }

    #[test]
    fn bridge_errors_become_generic_failures() {
        let err = to_napi_error(BridgeError::LinkResolutionFailure {
            symbol: "tree_sitter_abl".into(),
        });
        assert_eq!(err.status, Status::GenericFailure);
        assert!(err.reason.starts_with("tree-sitter-abl:"));
        assert!(err.reason.contains("tree_sitter_abl"));
    }
}
