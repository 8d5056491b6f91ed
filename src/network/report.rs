use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;

use super::bayesian_network::BayesianNetwork;
use crate::cpd::CpdTree;

/// Serializable snapshot of one node
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NodeReport {
    pub name: String,
    pub parents: Vec<String>,
    /// Absent when the node's CPD tree was not built
    pub cpd: Option<CpdTree>,
}

/// Serializable snapshot of a finished network
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NetworkReport {
    pub relation: String,
    pub laplace_count: u32,
    pub built_at: DateTime<Utc>,
    pub nodes: Vec<NodeReport>,
}

impl NetworkReport {
    pub fn from_network(net: &BayesianNetwork, relation: &str, laplace_count: u32) -> Self {
        let nodes = net
            .nodes()
            .iter()
            .map(|node| NodeReport {
                name: node.name().to_string(),
                parents: node
                    .parents()
                    .iter()
                    .filter_map(|&p| net.node(p).map(|n| n.name().to_string()))
                    .collect(),
                cpd: node.cpd_tree().cloned(),
            })
            .collect();

        NetworkReport {
            relation: relation.to_string(),
            laplace_count,
            built_at: Utc::now(),
            nodes,
        }
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize network report")?;
        fs::write(path, json).with_context(|| format!("Failed to write report to {}", path))?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let json =
            fs::read_to_string(path).with_context(|| format!("Failed to read report {}", path))?;
        serde_json::from_str(&json).context("Failed to deserialize network report")
    }
}
