pub mod bayesian_network;
pub mod builder;
pub mod error;
pub mod node;
pub mod report;
pub mod structure;

pub use bayesian_network::BayesianNetwork;
pub use builder::{BuildSummary, FailurePolicy, NetworkBuilder};
pub use error::NetworkError;
pub use node::{BNNode, NodeId};
pub use report::{NetworkReport, NodeReport};
pub use structure::{ExplicitStructure, NaiveBayes, StructureSource};
