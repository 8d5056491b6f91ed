use log::{debug, trace};

use super::error::CpdError;
use super::tree::{CpdNode, CpdTree, Distribution};
use crate::data::{Attribute, AttributeKind, DataSet};

/// Grows CPD trees from data by recursive partitioning.
///
/// The attribute list is `[parent_1, ..., parent_k, child]`. Parents are split
/// on in the order given, so the same list always yields the same tree. Leaves
/// hold Laplace-smoothed estimates: `(count(v) + L) / (n + L * |values|)`.
pub struct CpdTreeBuilder;

/// State shared by every level of one build
struct Partitioner<'a> {
    data: &'a DataSet,
    child: usize,
    child_values: usize,
    laplace_count: u32,
}

impl CpdTreeBuilder {
    /// Build the CPD tree for the last attribute of `attributes` given the others.
    ///
    /// `attributes` holds indices into `data.attributes()`.
    pub fn build(
        data: &DataSet,
        attributes: &[usize],
        laplace_count: u32,
    ) -> Result<CpdTree, CpdError> {
        let (&child, parents) = attributes
            .split_last()
            .ok_or_else(|| CpdError::InvalidAttribute("empty attribute list".to_string()))?;

        let child_attr = Self::checked_attribute(data, attributes, child)?;
        let parent_attrs = parents
            .iter()
            .map(|&p| Self::checked_attribute(data, attributes, p))
            .collect::<Result<Vec<_>, _>>()?;
        let parent_names: Vec<String> = parent_attrs.iter().map(|a| a.name.clone()).collect();

        debug!(
            "Building CPD tree for '{}' with parents {:?} (laplace count {})",
            child_attr.name, parent_names, laplace_count
        );

        let partitioner = Partitioner {
            data,
            child,
            child_values: child_attr.value_count(),
            laplace_count,
        };
        let subset: Vec<usize> = (0..data.len()).collect();
        let root = partitioner.grow(subset, parents);

        Ok(CpdTree::new(
            child_attr.name.clone(),
            child_attr.legal_values().to_vec(),
            parent_names,
            parent_attrs.iter().map(|a| a.legal_values().to_vec()).collect(),
            root,
        ))
    }

    /// Build from attribute names instead of indices
    pub fn build_named(
        data: &DataSet,
        attributes: &[&str],
        laplace_count: u32,
    ) -> Result<CpdTree, CpdError> {
        let indices = attributes
            .iter()
            .map(|name| {
                data.attribute_index(name).ok_or_else(|| {
                    CpdError::InvalidAttribute(format!("unknown attribute '{}'", name))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::build(data, &indices, laplace_count)
    }

    /// Look up an attribute of the list and check it can take part in a CPD
    fn checked_attribute<'a>(
        data: &'a DataSet,
        attributes: &[usize],
        index: usize,
    ) -> Result<&'a Attribute, CpdError> {
        let attr = data.attribute(index).ok_or_else(|| {
            CpdError::InvalidAttribute(format!("attribute index {} is out of range", index))
        })?;
        if attributes.iter().filter(|&&a| a == index).count() > 1 {
            return Err(CpdError::InvalidAttribute(format!(
                "attribute '{}' appears more than once",
                attr.name
            )));
        }
        match &attr.kind {
            AttributeKind::Continuous(_) => Err(CpdError::InvalidAttribute(format!(
                "attribute '{}' is continuous",
                attr.name
            ))),
            AttributeKind::Nominal(values) if values.is_empty() => Err(
                CpdError::InvalidAttribute(format!("attribute '{}' has no legal values", attr.name)),
            ),
            AttributeKind::Nominal(_) => Ok(attr),
        }
    }
}

impl Partitioner<'_> {
    /// Grow the subtree for the instances in `subset`, splitting on `untested` in order
    fn grow(&self, subset: Vec<usize>, untested: &[usize]) -> CpdNode {
        let Some((&next, rest)) = untested.split_first() else {
            return self.leaf(&subset);
        };
        if subset.is_empty() {
            return self.leaf(&subset);
        }

        let attr = &self.data.attributes()[next];
        let mut partitions: Vec<Vec<usize>> = vec![Vec::new(); attr.value_count()];
        for i in subset {
            if let Some(partition) = self.data.instances()[i]
                .nominal_value(next)
                .and_then(|v| partitions.get_mut(v))
            {
                partition.push(i);
            }
        }
        trace!(
            "Split on '{}': {:?}",
            attr.name,
            partitions.iter().map(Vec::len).collect::<Vec<_>>()
        );

        let branches = partitions
            .into_iter()
            .map(|partition| self.grow(partition, rest))
            .collect();

        CpdNode::Split {
            attribute: attr.name.clone(),
            values: attr.legal_values().to_vec(),
            branches,
        }
    }

    fn leaf(&self, subset: &[usize]) -> CpdNode {
        if subset.is_empty() {
            return CpdNode::Leaf {
                distribution: Distribution::uniform(self.child_values),
                support: 0,
            };
        }

        let mut counts = vec![0usize; self.child_values];
        for &i in subset {
            if let Some(count) = self.data.instances()[i]
                .nominal_value(self.child)
                .and_then(|v| counts.get_mut(v))
            {
                *count += 1;
            }
        }

        let laplace = self.laplace_count as f64;
        let total = subset.len() as f64 + laplace * self.child_values as f64;
        let probabilities = counts
            .iter()
            .map(|&c| (c as f64 + laplace) / total)
            .collect();
        trace!("Leaf over {} instances: counts {:?}", subset.len(), counts);

        CpdNode::Leaf {
            distribution: Distribution::new(probabilities),
            support: subset.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Assignment, ValueRange};

    fn rain_rows(yes: usize, no: usize) -> Vec<Vec<&'static str>> {
        let mut rows = vec![vec!["yes"]; yes];
        rows.extend(vec![vec!["no"]; no]);
        rows
    }

    fn rain_only(yes: usize, no: usize) -> DataSet {
        DataSet::from_nominal_rows(
            "rain",
            vec![Attribute::nominal("Rain", ["yes", "no"])],
            &rain_rows(yes, no),
        )
        .unwrap()
    }

    #[test]
    fn test_no_parents_no_smoothing() {
        let tree = CpdTreeBuilder::build(&rain_only(7, 3), &[0], 0).unwrap();
        assert_eq!(tree.depth(), 0);
        let d = tree.query(&Assignment::new()).unwrap();
        assert!((d.probabilities()[0] - 0.7).abs() < 1e-12);
        assert!((d.probabilities()[1] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_no_parents_laplace_one() {
        let tree = CpdTreeBuilder::build(&rain_only(7, 3), &[0], 1).unwrap();
        let d = tree.query(&Assignment::new()).unwrap();
        assert!((d.probabilities()[0] - 8.0 / 12.0).abs() < 1e-12);
        assert!((d.probabilities()[1] - 4.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_data_is_uniform() {
        for laplace in [0, 1, 5] {
            let tree = CpdTreeBuilder::build(&rain_only(0, 0), &[0], laplace).unwrap();
            let d = tree.query(&Assignment::new()).unwrap();
            assert_eq!(d.probabilities(), &[0.5, 0.5]);
        }
    }

    #[test]
    fn test_invalid_attribute_lists() {
        let data = DataSet::new(
            "mixed",
            vec![
                Attribute::nominal("Rain", ["yes", "no"]),
                Attribute::continuous("Temp", ValueRange::new(0.0, 30.0)),
                Attribute::nominal("Empty", Vec::<String>::new()),
            ],
            vec![],
        )
        .unwrap();

        for attributes in [vec![], vec![1], vec![2], vec![1, 0], vec![0, 0], vec![7]] {
            assert!(
                matches!(
                    CpdTreeBuilder::build(&data, &attributes, 1),
                    Err(CpdError::InvalidAttribute(_))
                ),
                "expected {:?} to be rejected",
                attributes
            );
        }
    }

    #[test]
    fn test_build_named_unknown_attribute() {
        let result = CpdTreeBuilder::build_named(&rain_only(1, 1), &["Cloudy", "Rain"], 1);
        assert!(matches!(result, Err(CpdError::InvalidAttribute(_))));
    }
}
