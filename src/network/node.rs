use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cpd::CpdTree;

/// Stable handle of a node inside its network
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One nominal attribute of the dataset, its parent links and its CPD tree
#[derive(Debug, Clone)]
pub struct BNNode {
    id: NodeId,
    name: String,
    /// Position of the attribute in the dataset it was created from
    attribute: usize,
    parents: Vec<NodeId>,
    cpd: Option<CpdTree>,
}

impl BNNode {
    pub(crate) fn new(id: NodeId, name: &str, attribute: usize) -> Self {
        BNNode {
            id,
            name: name.to_string(),
            attribute,
            parents: Vec::new(),
            cpd: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute_index(&self) -> usize {
        self.attribute
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    pub fn cpd_tree(&self) -> Option<&CpdTree> {
        self.cpd.as_ref()
    }

    /// Replacing the parents invalidates the CPD tree built for the old ones
    pub(crate) fn replace_parents(&mut self, parents: Vec<NodeId>) {
        self.parents = parents;
        self.cpd = None;
    }

    pub(crate) fn attach_cpd_tree(&mut self, tree: CpdTree) {
        self.cpd = Some(tree);
    }
}
