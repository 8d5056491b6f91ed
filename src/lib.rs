#[macro_use]
pub mod common;
pub mod cpd;
pub mod data;
pub mod network;
pub mod scenarios;

pub use cpd::{CpdError, CpdTree, CpdTreeBuilder};
pub use data::{Assignment, DataSet};
pub use network::{BayesianNetwork, NetworkBuilder};
