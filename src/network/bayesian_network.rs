use log::trace;
use std::collections::HashSet;

use super::error::NetworkError;
use super::node::{BNNode, NodeId};

/// A Bayesian network over the nominal attributes of a dataset.
///
/// Nodes live in an arena and refer to their parents by [`NodeId`], so parent
/// links never own anything. Node order is the order the nodes were added in.
#[derive(Debug, Clone, Default)]
pub struct BayesianNetwork {
    nodes: Vec<BNNode>,
}

impl BayesianNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node for the dataset attribute at `attribute`
    pub fn add_node(&mut self, name: &str, attribute: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(BNNode::new(id, name, attribute));
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&BNNode> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut BNNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn node_by_name(&self, name: &str) -> Option<&BNNode> {
        self.nodes.iter().find(|n| n.name() == name)
    }

    /// Id of the node called `name`
    pub fn id_of(&self, name: &str) -> Result<NodeId, NetworkError> {
        self.node_by_name(name)
            .map(BNNode::id)
            .ok_or_else(|| NetworkError::UnknownNode(name.to_string()))
    }

    pub fn nodes(&self) -> &[BNNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parents_of(&self, id: NodeId) -> Result<&[NodeId], NetworkError> {
        Ok(self.checked(id)?.parents())
    }

    /// Nodes that list `id` as a parent, in node order
    pub fn children_of(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.parents().contains(&id))
            .map(BNNode::id)
            .collect()
    }

    /// Replace the parent set of `child`.
    ///
    /// The network must stay acyclic. Any CPD tree attached to `child` is
    /// dropped because it no longer matches the parent set.
    pub fn set_parents(&mut self, child: NodeId, parents: Vec<NodeId>) -> Result<(), NetworkError> {
        let child_name = self.checked(child)?.name().to_string();

        let mut seen = HashSet::new();
        for &parent in &parents {
            let parent_name = self.checked(parent)?.name().to_string();
            if parent == child {
                return Err(NetworkError::SelfParent(child_name));
            }
            if !seen.insert(parent) {
                return Err(NetworkError::DuplicateParent {
                    node: child_name,
                    parent: parent_name,
                });
            }
            if self.is_ancestor(child, parent) {
                return Err(NetworkError::Cycle {
                    node: child_name,
                    parent: parent_name,
                });
            }
        }

        trace!("Setting parents of '{}' to {:?}", child_name, parents);
        if let Some(node) = self.node_mut(child) {
            node.replace_parents(parents);
        }
        Ok(())
    }

    /// Append one parent to `child`
    pub fn add_parent(&mut self, child: NodeId, parent: NodeId) -> Result<(), NetworkError> {
        let mut parents = self.parents_of(child)?.to_vec();
        parents.push(parent);
        self.set_parents(child, parents)
    }

    /// True once every node carries a CPD tree
    pub fn is_complete(&self) -> bool {
        self.nodes.iter().all(|n| n.cpd_tree().is_some())
    }

    /// Whether `ancestor` is reachable from `node` by following parent links
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut stack = vec![node];
        let mut visited = HashSet::new();
        while let Some(current) = stack.pop() {
            if current == ancestor {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(n) = self.node(current) {
                stack.extend_from_slice(n.parents());
            }
        }
        false
    }

    fn checked(&self, id: NodeId) -> Result<&BNNode, NetworkError> {
        self.node(id)
            .ok_or_else(|| NetworkError::UnknownNode(id.to_string()))
    }
}
