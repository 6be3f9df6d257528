//! # Grammar Entry Point
//!
//! The automaton is process-wide state owned by the grammar library. The
//! bridge never reaches for it directly; it is handed a [`LanguageSource`] and
//! asks that source for a handle when a host loads the module.

use tree_sitter_language::LanguageFn;

use crate::error::{BridgeError, Result};
use crate::export::ENTRY_SYMBOL;
use crate::language::GrammarHandle;

#[cfg(feature = "linked")]
unsafe extern "C" {
    fn tree_sitter_abl() -> *const ();
}

/// The statically linked ABL grammar.
///
/// ```ignore
/// let mut parser = tree_sitter::Parser::new();
/// parser.set_language(&abl_bridge_core::LANGUAGE.into()).unwrap();
/// ```
#[cfg(feature = "linked")]
pub const LANGUAGE: LanguageFn = unsafe { LanguageFn::from_raw(tree_sitter_abl) };

/// Something that can produce the grammar handle.
pub trait LanguageSource {
    /// Name of the symbol backing this source, used in diagnostics.
    fn symbol(&self) -> &str;

    /// Obtains the handle to the compiled automaton.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::LinkResolutionFailure`] if the automaton is not
    /// available.
    fn resolve(&self) -> Result<GrammarHandle>;
}

type RawLanguageFn = unsafe extern "C" fn() -> *const ();

/// An argument-less C entry point returning the compiled automaton.
#[derive(Debug, Clone, Copy)]
pub struct EntryPoint {
    symbol: &'static str,
    func: Option<RawLanguageFn>,
}

impl EntryPoint {
    /// Creates an entry point backed by a grammar's language function.
    #[must_use]
    pub fn new(symbol: &'static str, language: LanguageFn) -> Self {
        Self {
            symbol,
            func: Some(language.into_raw()),
        }
    }

    /// Creates an entry point for a symbol that is absent from this build.
    ///
    /// Resolving it always fails with [`BridgeError::LinkResolutionFailure`].
    #[must_use]
    pub const fn unresolved(symbol: &'static str) -> Self {
        Self { symbol, func: None }
    }

    /// The linked `tree_sitter_abl` entry point.
    #[cfg(feature = "linked")]
    #[must_use]
    pub fn linked() -> Self {
        Self::new(ENTRY_SYMBOL, LANGUAGE)
    }

    /// The `tree_sitter_abl` entry point for this build: linked when the
    /// `linked` feature is on, unresolved otherwise.
    #[must_use]
    pub fn abl() -> Self {
        #[cfg(feature = "linked")]
        {
            Self::linked()
        }
        #[cfg(not(feature = "linked"))]
        {
            Self::unresolved(ENTRY_SYMBOL)
        }
    }

    /// Returns `true` if this build carries the symbol.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.func.is_some()
    }
}

impl LanguageSource for EntryPoint {
    fn symbol(&self) -> &str {
        self.symbol
    }

    fn resolve(&self) -> Result<GrammarHandle> {
        let unresolved = || BridgeError::LinkResolutionFailure {
            symbol: self.symbol.to_string(),
        };

        let func = self.func.ok_or_else(unresolved)?;
        // SAFETY: grammar entry points take no arguments, have no
        // preconditions and return a pointer into static storage.
        let raw = unsafe { func() };
        GrammarHandle::from_raw(raw.cast()).ok_or_else(unresolved)
    }
}

impl<S: LanguageSource + ?Sized> LanguageSource for &S {
    fn symbol(&self) -> &str {
        (**self).symbol()
    }

    fn resolve(&self) -> Result<GrammarHandle> {
        (**self).resolve()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    static AUTOMATON: [u64; 8] = [0; 8];

    unsafe extern "C" fn fake_language() -> *const () {
        AUTOMATON.as_ptr().cast()
    }

    unsafe extern "C" fn null_language() -> *const () {
        std::ptr::null()
    }

    pub fn fake_entry() -> EntryPoint {
        EntryPoint::new(ENTRY_SYMBOL, unsafe { LanguageFn::from_raw(fake_language) })
    }

    pub fn null_entry() -> EntryPoint {
        EntryPoint::new(ENTRY_SYMBOL, unsafe { LanguageFn::from_raw(null_language) })
    }

    pub fn automaton_address() -> usize {
        AUTOMATON.as_ptr() as usize
    }
}
