//! Term normalization.
//!
//! Raw terms arrive in whatever casing the data authors used, and entries in a
//! mapping's value list may carry the exclusion sigil to say "this is the key
//! itself, not a member value". Normalization turns both conventions into data:
//! a lowercase comparison form plus an explicit [`Role`].

/// Leading marker on a raw term meaning "this entry names the enclosing key".
pub const EXCLUSION_SIGIL: char = '~';

/// Which side of a mapping entry a term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// A primary key, or a value entry marked with [`EXCLUSION_SIGIL`].
    KeyName,
    /// An ordinary value entry.
    MemberValue,
}

/// A normalized term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    pub text: String,
    pub role: Role,
}

/// Lowercase `raw`, stripping at most one leading [`EXCLUSION_SIGIL`].
///
/// Never fails; the empty string normalizes to itself.
pub fn normalize(raw: &str) -> Term {
    match raw.strip_prefix(EXCLUSION_SIGIL) {
        Some(rest) => Term { text: rest.to_lowercase(), role: Role::KeyName },
        None => Term { text: raw.to_lowercase(), role: Role::MemberValue },
    }
}

/// Lowercase a term that carries no role information (primary keys, list lines).
pub fn lower(raw: &str) -> String {
    raw.to_lowercase()
}
