use rand::rngs::StdRng;

use super::{weighted_cointoss, ScenarioMaker};
use crate::data::{Attribute, DataError, DataSet};
use crate::network::ExplicitStructure;

/// Cloudy -> Rain
pub struct Rain {}

pub const P_CLOUDY: f64 = 0.5;
pub const P_RAIN_IF_CLOUDY: f64 = 0.8;
pub const P_RAIN_IF_CLEAR: f64 = 0.2;

impl ScenarioMaker for Rain {
    fn name(&self) -> &str {
        "rain"
    }

    fn generate(&self, instances: usize, rng: &mut StdRng) -> Result<DataSet, DataError> {
        let attributes = vec![
            Attribute::nominal("Cloudy", ["T", "F"]),
            Attribute::nominal("Rain", ["T", "F"]),
        ];
        let rows: Vec<Vec<&str>> = (0..instances)
            .map(|_| {
                let cloudy = weighted_cointoss(rng, P_CLOUDY);
                let p_rain = if cloudy == "T" {
                    P_RAIN_IF_CLOUDY
                } else {
                    P_RAIN_IF_CLEAR
                };
                vec![cloudy, weighted_cointoss(rng, p_rain)]
            })
            .collect();
        DataSet::from_nominal_rows(self.name(), attributes, &rows)
    }

    fn structure(&self) -> ExplicitStructure {
        ExplicitStructure::new().with("Rain", &["Cloudy"])
    }
}
