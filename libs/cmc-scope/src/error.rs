//! Error types for the scope library.

use thiserror::Error;

/// Errors raised while parsing stored authorization data.
///
/// Scope resolution itself never fails: denial is `None` or `false`. These
/// errors only surface from explicit parsing such as `"REGION".parse::<AuthLevel>()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// A stored level string is not one of the known levels.
    #[error("unknown authorization level '{0}'")]
    UnknownLevel(String),
}
