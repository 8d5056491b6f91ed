use log::debug;

use super::bayesian_network::BayesianNetwork;
use super::error::NetworkError;

/// Supplies the parent links of a network whose nodes already exist.
///
/// Searching for a structure is not part of this crate; implementations
/// encode a structure that is known up front.
pub trait StructureSource: Send + Sync {
    fn assign_parents(&self, net: &mut BayesianNetwork) -> Result<(), NetworkError>;
}

/// Parent lists given by name, one entry per child.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplicitStructure {
    edges: Vec<(String, Vec<String>)>,
}

impl ExplicitStructure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parents of `child`; parents are split on in the order given
    pub fn with(mut self, child: &str, parents: &[&str]) -> Self {
        self.edges.retain(|(c, _)| c != child);
        self.edges.push((
            child.to_string(),
            parents.iter().map(|p| p.to_string()).collect(),
        ));
        self
    }

    /// Parse `child=parent1,parent2` specifications
    pub fn parse<S: AsRef<str>>(specs: &[S]) -> Result<Self, NetworkError> {
        let mut structure = ExplicitStructure::new();
        for spec in specs {
            let spec = spec.as_ref();
            let (child, parents) = spec
                .split_once('=')
                .ok_or_else(|| {
                    NetworkError::BadStructureSpec(format!(
                        "expected child=parent1,parent2 but got '{}'",
                        spec
                    ))
                })?;
            let parents: Vec<&str> = parents
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect();
            structure = structure.with(child.trim(), &parents);
        }
        Ok(structure)
    }

    pub fn edges(&self) -> &[(String, Vec<String>)] {
        &self.edges
    }
}

impl StructureSource for ExplicitStructure {
    fn assign_parents(&self, net: &mut BayesianNetwork) -> Result<(), NetworkError> {
        for (child, parents) in &self.edges {
            let child_id = net.id_of(child)?;
            let parent_ids = parents
                .iter()
                .map(|p| net.id_of(p))
                .collect::<Result<Vec<_>, _>>()?;
            debug!("'{}' <- {:?}", child, parents);
            net.set_parents(child_id, parent_ids)?;
        }
        Ok(())
    }
}

/// Naive Bayes: the class node is the only parent of every other node
#[derive(Debug, Clone, PartialEq)]
pub struct NaiveBayes {
    pub class: String,
}

impl NaiveBayes {
    pub fn new(class: &str) -> Self {
        NaiveBayes {
            class: class.to_string(),
        }
    }
}

impl StructureSource for NaiveBayes {
    fn assign_parents(&self, net: &mut BayesianNetwork) -> Result<(), NetworkError> {
        let class = net.id_of(&self.class)?;
        let others: Vec<_> = net
            .nodes()
            .iter()
            .map(|n| n.id())
            .filter(|&id| id != class)
            .collect();
        net.set_parents(class, Vec::new())?;
        for id in others {
            net.set_parents(id, vec![class])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_nodes() -> BayesianNetwork {
        let mut net = BayesianNetwork::new();
        net.add_node("Class", 0);
        net.add_node("X", 1);
        net.add_node("Y", 2);
        net
    }

    #[test]
    fn test_parse_explicit() {
        let structure = ExplicitStructure::parse(&["Y = X, Class", "X=Class"]).unwrap();
        assert_eq!(
            structure.edges(),
            &[
                ("Y".to_string(), vec!["X".to_string(), "Class".to_string()]),
                ("X".to_string(), vec!["Class".to_string()]),
            ]
        );
        assert!(matches!(
            ExplicitStructure::parse(&["Y"]),
            Err(NetworkError::BadStructureSpec(_))
        ));
    }

    #[test]
    fn test_explicit_assigns_in_order() {
        let mut net = three_nodes();
        ExplicitStructure::new()
            .with("Y", &["X", "Class"])
            .assign_parents(&mut net)
            .unwrap();
        let y = net.id_of("Y").unwrap();
        let names: Vec<_> = net
            .parents_of(y)
            .unwrap()
            .iter()
            .map(|&p| net.node(p).unwrap().name())
            .collect();
        assert_eq!(names, vec!["X", "Class"]);
    }

    #[test]
    fn test_explicit_unknown_node() {
        let mut net = three_nodes();
        let result = ExplicitStructure::new()
            .with("Z", &["X"])
            .assign_parents(&mut net);
        assert_eq!(result, Err(NetworkError::UnknownNode("Z".to_string())));
    }

    #[test]
    fn test_naive_bayes() {
        let mut net = three_nodes();
        NaiveBayes::new("Class").assign_parents(&mut net).unwrap();
        let class = net.id_of("Class").unwrap();
        assert!(net.parents_of(class).unwrap().is_empty());
        for name in ["X", "Y"] {
            let id = net.id_of(name).unwrap();
            assert_eq!(net.parents_of(id).unwrap(), &[class]);
        }
    }
}
