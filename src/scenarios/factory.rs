use anyhow::{bail, Result};

use super::{rain::Rain, sprinkler::Sprinkler, ScenarioMaker};

pub struct ScenarioMakerFactory;

impl ScenarioMakerFactory {
    pub fn new_shared(name: &str) -> Result<Box<dyn ScenarioMaker>> {
        match name {
            "rain" => Ok(Box::new(Rain {})),
            "sprinkler" => Ok(Box::new(Sprinkler {})),
            _ => bail!("Unknown scenario '{}'", name),
        }
    }
}
