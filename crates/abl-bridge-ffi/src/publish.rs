//! Two-phase publication of an [`ExportRecord`] onto a host object.
//!
//! Every host value is created before any key is attached, so a failure while
//! building the grammar handle's wrapper leaves the exports object untouched.

use std::fmt::Display;

use abl_bridge_core::{BridgeError, ExportRecord, ExportValue, GrammarHandle, Result};

/// A host object that can hold the record's fields.
pub trait ExportSink {
    /// A value in the host's object model.
    type Value;
    /// Failure reported by the host.
    type Error: Display;

    /// Creates a host string.
    fn create_name(&mut self, name: &str) -> std::result::Result<Self::Value, Self::Error>;

    /// Wraps the handle as an opaque foreign reference.
    fn create_language(
        &mut self,
        handle: GrammarHandle,
    ) -> std::result::Result<Self::Value, Self::Error>;

    /// Attaches a created value under `field`.
    fn set(&mut self, field: &str, value: Self::Value) -> std::result::Result<(), Self::Error>;
}

/// Creates both field values, then attaches them in publication order.
///
/// # Errors
///
/// Returns [`BridgeError::HostRejected`] naming the field the host failed on.
pub fn publish_record<S: ExportSink + ?Sized>(sink: &mut S, record: &ExportRecord) -> Result<()> {
    let mut values = Vec::with_capacity(2);
    for (field, value) in record.fields() {
        let created = match value {
            ExportValue::Name(name) => sink.create_name(name),
            ExportValue::Language(handle) => sink.create_language(handle),
        };
        values.push((field, created.map_err(|e| rejected(field, e))?));
    }

    for (field, value) in values {
        sink.set(field, value).map_err(|e| rejected(field, e))?;
    }
    Ok(())
}

fn rejected(field: &str, reason: impl Display) -> BridgeError {
    BridgeError::HostRejected {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
