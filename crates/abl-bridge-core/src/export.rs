use serde::{Deserialize, Serialize};

use crate::language::GrammarHandle;

/// Language identifier published under [`NAME_FIELD`].
pub const LANGUAGE_NAME: &str = "abl";

/// Key of the language identifier in the export record.
pub const NAME_FIELD: &str = "name";

/// Key of the grammar handle in the export record.
pub const LANGUAGE_FIELD: &str = "language";

/// C symbol exported by the grammar library.
pub const ENTRY_SYMBOL: &str = "tree_sitter_abl";

/// A single value in the export record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportValue {
    /// A host string.
    Name(&'static str),
    /// An opaque foreign reference to the automaton.
    Language(GrammarHandle),
}

/// What the module publishes to its host.
///
/// Always carries both fields; there is no way to build a partial record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExportRecord {
    name: &'static str,
    language: GrammarHandle,
}

impl ExportRecord {
    pub(crate) fn new(language: GrammarHandle) -> Self {
        Self {
            name: LANGUAGE_NAME,
            language,
        }
    }

    /// The language identifier, always `"abl"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The non-owning grammar handle.
    #[must_use]
    pub fn language(&self) -> GrammarHandle {
        self.language
    }

    /// Both fields, keyed and in publication order.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, ExportValue); 2] {
        [
            (NAME_FIELD, ExportValue::Name(self.name)),
            (LANGUAGE_FIELD, ExportValue::Language(self.language)),
        ]
    }

    /// A printable view of the record for tooling.
    #[must_use]
    pub fn summary(&self) -> RecordSummary {
        RecordSummary {
            name: self.name.to_string(),
            language: self.language.to_string(),
        }
    }
}

/// Serializable view of an [`ExportRecord`], with the handle as a hex address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    /// Language identifier.
    pub name: String,
    /// Automaton address, e.g. `"0x7f2a1c0040"`.
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::TSLanguage;

    static AUTOMATON: [u8; 16] = [0; 16];

    fn handle() -> GrammarHandle {
        GrammarHandle::from_raw(AUTOMATON.as_ptr().cast::<TSLanguage>()).unwrap()
    }

    #[test]
    fn record_has_fixed_name() {
        let record = ExportRecord::new(handle());
        assert_eq!(record.name(), "abl");
        assert_eq!(record.language(), handle());
    }

    #[test]
    fn record_has_exactly_two_fields() {
        let record = ExportRecord::new(handle());
        let fields = record.fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("name", ExportValue::Name("abl")));
        assert_eq!(fields[1], ("language", ExportValue::Language(handle())));
    }

    #[test]
    fn summary_serializes() {
        let record = ExportRecord::new(handle());
        let json = serde_json::to_value(record.summary()).unwrap();
        assert_eq!(json["name"], "abl");
        assert_eq!(json["language"], handle().to_string());
    }
}
