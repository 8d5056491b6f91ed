use anyhow::{bail, Context, Result};
use clap::{builder::EnumValueParser, Arg, ArgAction, ArgMatches, Command};
use serde::Deserialize;

use crate::network::FailurePolicy;

/// Everything the binary needs from the command line, as plain owned values
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct CommandLineOptions {
    /// ARFF file to learn from
    pub data_file: Option<String>,
    /// Synthetic scenario to generate data from instead of a file
    pub scenario: Option<String>,
    pub instances: usize,
    pub seed: u64,
    pub laplace_count: u32,
    /// Class attribute for a naive Bayes structure
    pub naive_bayes: Option<String>,
    /// `child=parent1,parent2` specifications
    pub parents: Vec<String>,
    pub on_error: FailurePolicy,
    pub report_file: Option<String>,
}

pub fn command() -> Command {
    Command::new("BAYESNET")
        .version("1.0")
        .about("Builds the CPD trees of a Bayesian network over nominal attributes.")
        .arg(
            Arg::new("data")
                .long("data")
                .value_name("FILE")
                .help("ARFF file with the training data")
                .conflicts_with("scenario"),
        )
        .arg(
            Arg::new("scenario")
                .long("scenario")
                .value_name("STRING")
                .help("Generate synthetic data from a named scenario (rain, sprinkler)"),
        )
        .arg(
            Arg::new("instances")
                .long("instances")
                .value_name("NUMBER")
                .help("Number of instances a scenario generates")
                .default_value("1000"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("NUMBER")
                .help("Random seed for scenario data")
                .default_value("42"),
        )
        .arg(
            Arg::new("laplace_count")
                .long("laplace_count")
                .value_name("NUMBER")
                .help("Additive smoothing count used at every leaf")
                .default_value("1"),
        )
        .arg(
            Arg::new("naive_bayes")
                .long("naive_bayes")
                .value_name("CLASS")
                .help("Use a naive Bayes structure with this class attribute")
                .conflicts_with("parents"),
        )
        .arg(
            Arg::new("parents")
                .long("parents")
                .value_name("CHILD=P1,P2")
                .help("Parents of a node, in split order (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("on_error")
                .long("on_error")
                .value_parser(EnumValueParser::<FailurePolicy>::new())
                .help("What to do when a node's CPD tree cannot be built: 'abort' or 'skip'")
                .default_value("abort"),
        )
        .arg(
            Arg::new("report_file")
                .long("report_file")
                .value_name("FILE")
                .help("Write the finished network as JSON to this file"),
        )
}

/// Turn parsed matches into options
pub fn options_from_matches(matches: &ArgMatches) -> Result<CommandLineOptions> {
    let data_file = matches.get_one::<String>("data").cloned();
    let scenario = matches.get_one::<String>("scenario").cloned();
    if data_file.is_none() && scenario.is_none() {
        bail!("one of --data or --scenario is required");
    }

    let instances = parse_number::<usize>(matches, "instances")?;
    let seed = parse_number::<u64>(matches, "seed")?;
    let laplace_count = parse_number::<u32>(matches, "laplace_count")?;
    let naive_bayes = matches.get_one::<String>("naive_bayes").cloned();
    let parents = matches
        .get_many::<String>("parents")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let on_error = matches
        .get_one::<FailurePolicy>("on_error")
        .copied()
        .unwrap_or_default();
    let report_file = matches.get_one::<String>("report_file").cloned();

    Ok(CommandLineOptions {
        data_file,
        scenario,
        instances,
        seed,
        laplace_count,
        naive_bayes,
        parents,
        on_error,
        report_file,
    })
}

fn parse_number<T>(matches: &ArgMatches, name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = matches
        .get_one::<String>(name)
        .with_context(|| format!("{} has no value", name))?;
    raw.parse()
        .with_context(|| format!("{} needs to be a non-negative integer, got '{}'", name, raw))
}

/// Parse the process arguments
pub fn parse_configuration_options() -> Result<CommandLineOptions> {
    let matches = command().get_matches();
    options_from_matches(&matches)
}
