pub mod builder;
pub mod error;
pub mod tree;

pub use builder::CpdTreeBuilder;
pub use error::CpdError;
pub use tree::{CpdNode, CpdTree, Distribution, LeafRef};
