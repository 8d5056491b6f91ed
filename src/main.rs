use anyhow::{anyhow, Result};
use bayesnet::common::{init_logging, parse_configuration_options, CommandLineOptions};
use bayesnet::data::{load_arff, DataSet};
use bayesnet::network::{
    ExplicitStructure, NaiveBayes, NetworkBuilder, NetworkReport, StructureSource,
};
use bayesnet::scenarios::{factory::ScenarioMakerFactory, ScenarioMaker};
use bayesnet::{print_blue, print_green, print_red, print_yellow};
use log::info;
use rand::{rngs::StdRng, SeedableRng};

/// Load the dataset, plus the scenario's own structure when it was generated
fn load_data(options: &CommandLineOptions) -> Result<(DataSet, Option<ExplicitStructure>)> {
    if let Some(path) = &options.data_file {
        return Ok((load_arff(path)?, None));
    }
    let name = options
        .scenario
        .as_deref()
        .ok_or_else(|| anyhow!("no data source given"))?;
    let scenario = ScenarioMakerFactory::new_shared(name)?;
    let mut rng = StdRng::seed_from_u64(options.seed);
    let data = scenario.generate(options.instances, &mut rng)?;
    info!(
        "Generated {} instances from scenario '{}' (seed {})",
        data.len(),
        name,
        options.seed
    );
    Ok((data, Some(scenario.structure())))
}

fn choose_structure(
    options: &CommandLineOptions,
    fallback: Option<ExplicitStructure>,
) -> Result<Box<dyn StructureSource>> {
    if let Some(class) = &options.naive_bayes {
        return Ok(Box::new(NaiveBayes::new(class)));
    }
    if !options.parents.is_empty() {
        let structure = ExplicitStructure::parse(options.parents.as_slice())?;
        return Ok(Box::new(structure));
    }
    Ok(Box::new(fallback.unwrap_or_default()))
}

fn main() -> Result<()> {
    init_logging();
    let options = parse_configuration_options()?;

    let (data, scenario_structure) = load_data(&options)?;
    let structure = choose_structure(&options, scenario_structure)?;

    let (net, summary) = NetworkBuilder::build_network(
        &data,
        structure.as_ref(),
        options.laplace_count,
        options.on_error,
    )?;

    for node in net.nodes() {
        match node.cpd_tree() {
            Some(tree) => {
                print_blue!("{}", node.name());
                print!("{}", tree);
            }
            None => print_yellow!("{}: no CPD tree", node.name()),
        }
    }
    for (name, error) in &summary.skipped {
        print_red!("{}: {}", name, error);
    }
    print_green!(
        "Built {} of {} CPD trees (laplace count {})",
        summary.built,
        net.len(),
        options.laplace_count
    );

    if let Some(path) = &options.report_file {
        NetworkReport::from_network(&net, &data.name, options.laplace_count).save_to_file(path)?;
        info!("Wrote network report to {}", path);
    }

    Ok(())
}
