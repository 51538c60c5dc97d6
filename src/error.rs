//! Error types for the ALCQ reasoner

use thiserror::Error;

/// ALCQ reasoner error type
///
/// Clashes are *not* errors: a clash is the normal signal that a tableau
/// branch is unsatisfiable and is handled inside the search. The variants
/// here cover malformed input, which fails fast before reasoning starts,
/// and exhaustion of the configured search budgets.
#[derive(Error, Debug)]
pub enum DlError {
    /// Syntax-level parse errors
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Unknown operator or tag in a prefix expression
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// Structurally ill-formed expression (wrong arity, misplaced form)
    #[error("Malformed expression: {0}")]
    MalformedExpression(String),

    /// Number restriction with a cardinality that is not a non-negative integer
    #[error("Invalid cardinality in {0}")]
    InvalidCardinality(String),

    /// A configured search budget was exhausted before a verdict was reached
    #[error("Search limit exceeded: {0}")]
    SearchLimitExceeded(String),
}

/// Result type for ALCQ operations
pub type DlResult<T> = Result<T, DlError>;
