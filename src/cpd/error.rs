use thiserror::Error;

/// Errors raised while building or querying a CPD tree.
///
/// All of them are contract violations by the caller or the data, scoped to
/// the single call that raised them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CpdError {
    /// Malformed attribute list: empty list, unknown or repeated attribute,
    /// continuous attribute, or an attribute with no legal values
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),

    /// A query did not supply a value for an attribute tested on its path
    #[error("assignment has no value for attribute '{attribute}'")]
    IncompleteAssignment { attribute: String },

    /// A query or lookup used a value outside an attribute's legal set
    #[error("'{value}' is not a legal value of attribute '{attribute}'")]
    UnknownValue { attribute: String, value: String },
}
