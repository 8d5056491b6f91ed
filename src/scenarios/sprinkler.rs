use rand::rngs::StdRng;

use super::{weighted_cointoss, ScenarioMaker};
use crate::data::{Attribute, DataError, DataSet};
use crate::network::ExplicitStructure;

/// The classic four-variable network:
/// Cloudy -> Sprinkler, Cloudy -> Rain, (Sprinkler, Rain) -> WetGrass
pub struct Sprinkler {}

fn p_sprinkler(cloudy: bool) -> f64 {
    if cloudy { 0.1 } else { 0.5 }
}

fn p_rain(cloudy: bool) -> f64 {
    if cloudy { 0.8 } else { 0.2 }
}

fn p_wet_grass(sprinkler: bool, rain: bool) -> f64 {
    match (sprinkler, rain) {
        (true, true) => 0.99,
        (true, false) | (false, true) => 0.9,
        (false, false) => 0.0,
    }
}

impl ScenarioMaker for Sprinkler {
    fn name(&self) -> &str {
        "sprinkler"
    }

    fn generate(&self, instances: usize, rng: &mut StdRng) -> Result<DataSet, DataError> {
        let attributes = ["Cloudy", "Sprinkler", "Rain", "WetGrass"]
            .into_iter()
            .map(|name| Attribute::nominal(name, ["T", "F"]))
            .collect();

        let mut rows: Vec<Vec<&str>> = Vec::with_capacity(instances);
        for _ in 0..instances {
            let cloudy = weighted_cointoss(rng, 0.5);
            let sprinkler = weighted_cointoss(rng, p_sprinkler(cloudy == "T"));
            let rain = weighted_cointoss(rng, p_rain(cloudy == "T"));
            let wet = weighted_cointoss(rng, p_wet_grass(sprinkler == "T", rain == "T"));
            rows.push(vec![cloudy, sprinkler, rain, wet]);
        }
        DataSet::from_nominal_rows(self.name(), attributes, &rows)
    }

    fn structure(&self) -> ExplicitStructure {
        ExplicitStructure::new()
            .with("Sprinkler", &["Cloudy"])
            .with("Rain", &["Cloudy"])
            .with("WetGrass", &["Sprinkler", "Rain"])
    }
}
