//! # Grammar Handle
//!
//! Non-owning reference to the compiled ABL automaton.
//!
//! The automaton lives in the grammar library's static storage. We never
//! allocate, mutate or free it; the handle is only an address that hosts can
//! pass back into the parsing engine.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr::NonNull;

/// Opaque tree-sitter language structure.
///
/// Only ever seen behind a pointer returned by the grammar entry point.
#[repr(C)]
pub struct TSLanguage {
    _private: [u8; 0],
}

/// Process-lifetime, non-owning handle to a compiled grammar automaton.
///
/// Copying the handle copies the address only. There is no `Drop` impl:
/// releasing the automaton is the grammar library's business (in practice,
/// process exit).
#[derive(Clone, Copy)]
pub struct GrammarHandle {
    ptr: NonNull<TSLanguage>,
}

// SAFETY: tree-sitter languages are immutable once the grammar library has
// finished its static initialization, and the parsing engine only reads from
// them. We rely on that contract; nothing in this crate writes through `ptr`.
unsafe impl Send for GrammarHandle {}
unsafe impl Sync for GrammarHandle {}

impl GrammarHandle {
    /// Wraps a pointer returned by a grammar entry point.
    ///
    /// Returns `None` for a null pointer.
    #[must_use]
    pub fn from_raw(ptr: *const TSLanguage) -> Option<Self> {
        NonNull::new(ptr.cast_mut()).map(|ptr| Self { ptr })
    }

    /// Returns the raw pointer for handing back to the parsing engine.
    #[must_use]
    pub fn as_ptr(self) -> *const TSLanguage {
        self.ptr.as_ptr().cast_const()
    }

    /// Returns the automaton address.
    #[must_use]
    pub fn address(self) -> usize {
        self.ptr.as_ptr() as usize
    }
}

impl PartialEq for GrammarHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl Eq for GrammarHandle {}

impl Hash for GrammarHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl fmt::Debug for GrammarHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GrammarHandle").field(&self.ptr).finish()
    }
}

impl fmt::Display for GrammarHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static AUTOMATON: [u64; 4] = [0; 4];

    fn automaton_ptr() -> *const TSLanguage {
        AUTOMATON.as_ptr().cast()
    }

    #[test]
    fn null_pointer_is_rejected() {
        assert!(GrammarHandle::from_raw(std::ptr::null()).is_none());
    }

    #[test]
    fn handle_preserves_address() {
        let handle = GrammarHandle::from_raw(automaton_ptr()).unwrap();
        assert_eq!(handle.as_ptr(), automaton_ptr());
        assert_eq!(handle.address(), automaton_ptr() as usize);
    }

    #[test]
    fn copies_compare_equal() {
        let a = GrammarHandle::from_raw(automaton_ptr()).unwrap();
        let b = a;
        assert_eq!(a, b);

        let other = GrammarHandle::from_raw(AUTOMATON[1..].as_ptr().cast()).unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn display_is_hex_address() {
        let handle = GrammarHandle::from_raw(automaton_ptr()).unwrap();
        let shown = handle.to_string();
        assert!(shown.starts_with("0x"));
        assert_eq!(usize::from_str_radix(&shown[2..], 16).unwrap(), handle.address());
    }

    #[test]
    fn handle_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GrammarHandle>();
    }
}
