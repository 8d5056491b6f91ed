use thiserror::Error;

use crate::cpd::CpdError;

/// Errors raised while wiring a network or building its CPD trees
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NetworkError {
    #[error("bad structure specification: {0}")]
    BadStructureSpec(String),

    #[error("unknown node '{0}'")]
    UnknownNode(String),

    #[error("node '{0}' cannot be its own parent")]
    SelfParent(String),

    #[error("node '{node}' lists parent '{parent}' more than once")]
    DuplicateParent { node: String, parent: String },

    #[error("making '{parent}' a parent of '{node}' would create a cycle")]
    Cycle { node: String, parent: String },

    #[error("node '{node}' does not match attribute {attribute} of the dataset")]
    DataMismatch { node: String, attribute: usize },

    #[error("failed to build CPD tree for '{node}'")]
    Cpd {
        node: String,
        #[source]
        source: CpdError,
    },
}
