pub mod arff;
pub mod attribute;
pub mod dataset;

pub use arff::{load_arff, parse_arff};
pub use attribute::{Attribute, AttributeKind, ValueRange};
pub use dataset::{Assignment, DataError, DataSet, Instance, Value};
