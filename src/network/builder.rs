use clap::ValueEnum;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Deserialize;

use super::bayesian_network::BayesianNetwork;
use super::error::NetworkError;
use super::node::NodeId;
use super::structure::StructureSource;
use crate::cpd::{CpdError, CpdTree, CpdTreeBuilder};
use crate::data::DataSet;

/// What to do when one node's CPD tree cannot be built
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, ValueEnum)]
pub enum FailurePolicy {
    /// Attach nothing and report the first failure
    #[default]
    #[serde(rename = "abort")]
    Abort,

    /// Attach every tree that could be built and report the rest
    #[serde(rename = "skip")]
    Skip,
}

/// Outcome of building the CPD trees of a network
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildSummary {
    pub built: usize,
    pub skipped: Vec<(String, CpdError)>,
}

/// Assembles a [`BayesianNetwork`] from a dataset.
///
/// The Laplace count is passed to every call rather than kept on the builder,
/// so concurrent builds never share smoothing state.
pub struct NetworkBuilder;

impl NetworkBuilder {
    /// One node per nominal attribute, in dataset order. Continuous attributes are ignored.
    pub fn create_nodes(data: &DataSet) -> BayesianNetwork {
        let mut net = BayesianNetwork::new();
        for (index, attr) in data.attributes().iter().enumerate() {
            if attr.is_nominal() {
                net.add_node(&attr.name, index);
            } else {
                debug!("Skipping continuous attribute '{}'", attr.name);
            }
        }
        info!(
            "Created {} nodes from {} attributes",
            net.len(),
            data.attributes().len()
        );
        net
    }

    /// Build and attach the CPD tree of every node from its current parents.
    ///
    /// Trees are built in parallel; each build only reads the dataset.
    pub fn build_cpds(
        net: &mut BayesianNetwork,
        data: &DataSet,
        laplace_count: u32,
        policy: FailurePolicy,
    ) -> Result<BuildSummary, NetworkError> {
        let mut jobs: Vec<(NodeId, Vec<usize>)> = Vec::with_capacity(net.len());
        for node in net.nodes() {
            match data.attribute(node.attribute_index()) {
                Some(attr) if attr.name == node.name() => {}
                _ => {
                    return Err(NetworkError::DataMismatch {
                        node: node.name().to_string(),
                        attribute: node.attribute_index(),
                    });
                }
            }
            let mut attributes = Vec::with_capacity(node.parents().len() + 1);
            for &parent in node.parents() {
                let parent = net
                    .node(parent)
                    .ok_or_else(|| NetworkError::UnknownNode(parent.to_string()))?;
                attributes.push(parent.attribute_index());
            }
            attributes.push(node.attribute_index());
            jobs.push((node.id(), attributes));
        }

        let results: Vec<(NodeId, Result<CpdTree, CpdError>)> = jobs
            .into_par_iter()
            .map(|(id, attributes)| (id, CpdTreeBuilder::build(data, &attributes, laplace_count)))
            .collect();

        if policy == FailurePolicy::Abort {
            if let Some((id, Err(source))) = results.iter().find(|(_, r)| r.is_err()) {
                let node = net
                    .node(*id)
                    .map(|n| n.name().to_string())
                    .unwrap_or_else(|| id.to_string());
                return Err(NetworkError::Cpd {
                    node,
                    source: source.clone(),
                });
            }
        }

        let mut summary = BuildSummary::default();
        for (id, result) in results {
            let Some(node) = net.node_mut(id) else {
                continue;
            };
            match result {
                Ok(tree) => {
                    debug!(
                        "Attached CPD tree to '{}': depth {}, {} leaves",
                        node.name(),
                        tree.depth(),
                        tree.leaf_count()
                    );
                    node.attach_cpd_tree(tree);
                    summary.built += 1;
                }
                Err(e) => {
                    warn!("Skipping CPD tree for '{}': {}", node.name(), e);
                    summary.skipped.push((node.name().to_string(), e));
                }
            }
        }

        info!(
            "Built {} CPD trees, skipped {}",
            summary.built,
            summary.skipped.len()
        );
        Ok(summary)
    }

    /// Create the nodes, wire them with `structure`, then build every CPD tree
    pub fn build_network(
        data: &DataSet,
        structure: &dyn StructureSource,
        laplace_count: u32,
        policy: FailurePolicy,
    ) -> Result<(BayesianNetwork, BuildSummary), NetworkError> {
        let mut net = Self::create_nodes(data);
        structure.assign_parents(&mut net)?;
        let summary = Self::build_cpds(&mut net, data, laplace_count, policy)?;
        Ok((net, summary))
    }
}
