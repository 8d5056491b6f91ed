use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::CpdError;
use crate::data::Assignment;

/// Smoothed categorical distribution over the child attribute's values.
///
/// Probabilities are aligned with the child's legal values, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    probabilities: Vec<f64>,
}

impl Distribution {
    pub(crate) fn new(probabilities: Vec<f64>) -> Self {
        Distribution { probabilities }
    }

    /// Equal mass on each of `n` values
    pub(crate) fn uniform(n: usize) -> Self {
        Distribution {
            probabilities: vec![1.0 / n as f64; n],
        }
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.probabilities.get(index).copied()
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Index of the most probable value; the first one wins ties
    pub fn most_likely(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &p) in self.probabilities.iter().enumerate() {
            match best {
                Some((_, q)) if q >= p => {}
                _ => best = Some((i, p)),
            }
        }
        best.map(|(i, _)| i)
    }
}

/// A node of a CPD tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CpdNode {
    /// Tests one parent attribute; one branch per legal value, in value order
    Split {
        attribute: String,
        values: Vec<String>,
        branches: Vec<CpdNode>,
    },
    /// Distribution over the child values, with the number of instances behind it
    Leaf {
        distribution: Distribution,
        support: usize,
    },
}

impl CpdNode {
    fn depth(&self) -> usize {
        match self {
            CpdNode::Leaf { .. } => 0,
            CpdNode::Split { branches, .. } => {
                1 + branches.iter().map(CpdNode::depth).max().unwrap_or(0)
            }
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            CpdNode::Leaf { .. } => 1,
            CpdNode::Split { branches, .. } => branches.iter().map(CpdNode::leaf_count).sum(),
        }
    }

    fn collect_leaves<'a>(&'a self, path: &mut Vec<(&'a str, &'a str)>, out: &mut Vec<LeafRef<'a>>) {
        match self {
            CpdNode::Leaf {
                distribution,
                support,
            } => out.push(LeafRef {
                path: path.clone(),
                distribution,
                support: *support,
            }),
            CpdNode::Split {
                attribute,
                values,
                branches,
            } => {
                for (value, branch) in values.iter().zip(branches.iter()) {
                    path.push((attribute.as_str(), value.as_str()));
                    branch.collect_leaves(path, out);
                    path.pop();
                }
            }
        }
    }
}

/// A leaf together with the attribute tests that lead to it
#[derive(Debug, Clone)]
pub struct LeafRef<'a> {
    pub path: Vec<(&'a str, &'a str)>,
    pub distribution: &'a Distribution,
    pub support: usize,
}

/// Decision-tree encoding of the conditional distribution of one attribute
/// given its parents.
///
/// Internal nodes test a parent attribute, leaves hold a Laplace-smoothed
/// distribution over the child's values. Every combination of parent values
/// reaches exactly one leaf; parents not tested on a path are marginalised at
/// that leaf. Trees come out of [`CpdTreeBuilder`](super::CpdTreeBuilder) and
/// are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpdTree {
    child: String,
    child_values: Vec<String>,
    parents: Vec<String>,
    /// Legal values of each parent, aligned with `parents`
    parent_values: Vec<Vec<String>>,
    root: CpdNode,
}

impl CpdTree {
    pub(crate) fn new(
        child: String,
        child_values: Vec<String>,
        parents: Vec<String>,
        parent_values: Vec<Vec<String>>,
        root: CpdNode,
    ) -> Self {
        CpdTree {
            child,
            child_values,
            parents,
            parent_values,
            root,
        }
    }

    /// Name of the attribute whose distribution this tree models
    pub fn child(&self) -> &str {
        &self.child
    }

    pub fn child_values(&self) -> &[String] {
        &self.child_values
    }

    /// Parent attribute names in split order
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    pub fn root(&self) -> &CpdNode {
        &self.root
    }

    /// Number of attribute tests on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn leaves(&self) -> Vec<LeafRef<'_>> {
        let mut out = Vec::new();
        self.root.collect_leaves(&mut Vec::new(), &mut out);
        out
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Follow the branches matching `assignment` and return the leaf distribution.
    ///
    /// Only the attributes actually tested on the path need a value, but a
    /// value given for any parent must be one of its legal values.
    pub fn query(&self, assignment: &Assignment) -> Result<&Distribution, CpdError> {
        for (parent, legal) in self.parents.iter().zip(&self.parent_values) {
            if let Some(value) = assignment.get(parent) {
                if !legal.iter().any(|v| v == value) {
                    return Err(CpdError::UnknownValue {
                        attribute: parent.clone(),
                        value: value.to_string(),
                    });
                }
            }
        }

        let mut node = &self.root;
        loop {
            match node {
                CpdNode::Leaf { distribution, .. } => return Ok(distribution),
                CpdNode::Split {
                    attribute,
                    values,
                    branches,
                } => {
                    let value = assignment.get(attribute).ok_or_else(|| {
                        CpdError::IncompleteAssignment {
                            attribute: attribute.clone(),
                        }
                    })?;
                    node = values
                        .iter()
                        .position(|v| v == value)
                        .and_then(|index| branches.get(index))
                        .ok_or_else(|| CpdError::UnknownValue {
                            attribute: attribute.clone(),
                            value: value.to_string(),
                        })?;
                }
            }
        }
    }

    /// P(child = `value` | `assignment`)
    pub fn probability_of(&self, value: &str, assignment: &Assignment) -> Result<f64, CpdError> {
        let index = self
            .child_values
            .iter()
            .position(|v| v == value)
            .ok_or_else(|| CpdError::UnknownValue {
                attribute: self.child.clone(),
                value: value.to_string(),
            })?;
        self.probability_of_index(index, assignment)
    }

    /// P(child = value at `index` | `assignment`)
    pub fn probability_of_index(
        &self,
        index: usize,
        assignment: &Assignment,
    ) -> Result<f64, CpdError> {
        if index >= self.child_values.len() {
            return Err(CpdError::UnknownValue {
                attribute: self.child.clone(),
                value: format!("#{}", index),
            });
        }
        self.query(assignment)?
            .get(index)
            .ok_or_else(|| CpdError::UnknownValue {
                attribute: self.child.clone(),
                value: self.child_values[index].clone(),
            })
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, node: &CpdNode, indent: usize) -> fmt::Result {
        match node {
            CpdNode::Leaf {
                distribution,
                support,
            } => {
                let cells: Vec<String> = self
                    .child_values
                    .iter()
                    .zip(distribution.probabilities())
                    .map(|(v, p)| format!("{}={:.4}", v, p))
                    .collect();
                writeln!(f, "{:indent$}[{}] n={}", "", cells.join(", "), support, indent = indent)
            }
            CpdNode::Split {
                attribute,
                values,
                branches,
            } => {
                for (value, branch) in values.iter().zip(branches) {
                    writeln!(f, "{:indent$}{} = {}", "", attribute, value, indent = indent)?;
                    self.fmt_node(f, branch, indent + 2)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for CpdTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parents.is_empty() {
            writeln!(f, "P({})", self.child)?;
        } else {
            writeln!(f, "P({} | {})", self.child, self.parents.join(", "))?;
        }
        self.fmt_node(f, &self.root, 2)
    }
}
