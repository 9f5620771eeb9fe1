//! Error types for unnoise-content

/// Result type for unnoise-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in unnoise-content operations
///
/// Normalization and alignment never fail; only parsing user-supplied
/// grammar names can.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Unknown comment grammar '{0}' (expected one of: hash, c-style, jsx, markup, sql, lua, none)")]
    UnknownGrammar(String),
}
