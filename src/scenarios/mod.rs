pub mod factory;
pub mod rain;
pub mod sprinkler;

use rand::{rngs::StdRng, Rng};

use crate::data::{DataError, DataSet};
use crate::network::ExplicitStructure;

/// A known network that synthetic training data is sampled from
pub trait ScenarioMaker {
    fn name(&self) -> &str;

    /// Sample `instances` rows from the scenario's ground-truth distribution
    fn generate(&self, instances: usize, rng: &mut StdRng) -> Result<DataSet, DataError>;

    /// The structure the data was generated from
    fn structure(&self) -> ExplicitStructure;
}

/// `"T"` with probability `threshold`, `"F"` otherwise
pub(crate) fn weighted_cointoss(rng: &mut StdRng, threshold: f64) -> &'static str {
    if rng.gen_bool(threshold) {
        "T"
    } else {
        "F"
    }
}
