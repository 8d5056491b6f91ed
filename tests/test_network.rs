#[cfg(test)]
mod test_network {
    use bayesnet::cpd::CpdError;
    use bayesnet::data::{load_arff, Assignment, Attribute, DataSet, Instance, Value, ValueRange};
    use bayesnet::network::{
        BayesianNetwork, ExplicitStructure, FailurePolicy, NaiveBayes, NetworkBuilder,
        NetworkError, NetworkReport, StructureSource,
    };
    use bayesnet::scenarios::{factory::ScenarioMakerFactory, rain, ScenarioMaker};
    use rand::{rngs::StdRng, SeedableRng};
    use std::io::Write;

    const WEATHER_ARFF: &str = "% small weather relation
@relation weather
@attribute Outlook {sunny, overcast, rainy}
@attribute Temperature numeric
@attribute Windy {TRUE, FALSE}
@attribute Play {yes, no}
@data
sunny, 85, FALSE, no
sunny, 80, TRUE, no
overcast, 83, FALSE, yes
rainy, 70, FALSE, yes
rainy, 68, FALSE, yes
rainy, 65, TRUE, no
overcast, 64, TRUE, yes
sunny, 72, FALSE, no
";

    fn generated(name: &str, instances: usize) -> (DataSet, ExplicitStructure) {
        let scenario = ScenarioMakerFactory::new_shared(name).unwrap();
        let mut rng = StdRng::seed_from_u64(1234);
        let data = scenario.generate(instances, &mut rng).unwrap();
        (data, scenario.structure())
    }

    #[test]
    fn test_create_nodes_skips_continuous() {
        let data = DataSet::new(
            "mixed",
            vec![
                Attribute::nominal("A", ["x", "y"]),
                Attribute::continuous("T", ValueRange::new(0.0, 1.0)),
                Attribute::nominal("B", ["x", "y"]),
            ],
            vec![Instance::new(vec![
                Value::Nominal(0),
                Value::Numeric(0.5),
                Value::Nominal(1),
            ])],
        )
        .unwrap();

        let net = NetworkBuilder::create_nodes(&data);
        let names: Vec<&str> = net.nodes().iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(net.node_by_name("B").unwrap().attribute_index(), 2);
        assert!(!net.is_complete());
    }

    #[test]
    fn test_build_rain_network() {
        let (data, structure) = generated("rain", 2000);
        let (net, summary) =
            NetworkBuilder::build_network(&data, &structure, 1, FailurePolicy::Abort).unwrap();
        assert_eq!(summary.built, 2);
        assert!(summary.skipped.is_empty());
        assert!(net.is_complete());

        let tree = net.node_by_name("Rain").unwrap().cpd_tree().unwrap();
        assert_eq!(tree.parents(), ["Cloudy"]);
        let p = tree
            .probability_of("T", &Assignment::new().with("Cloudy", "T"))
            .unwrap();
        assert!((p - rain::P_RAIN_IF_CLOUDY).abs() < 0.05, "estimated {}", p);
        let p = tree
            .probability_of("T", &Assignment::new().with("Cloudy", "F"))
            .unwrap();
        assert!((p - rain::P_RAIN_IF_CLEAR).abs() < 0.05, "estimated {}", p);

        let cloudy = net.node_by_name("Cloudy").unwrap().cpd_tree().unwrap();
        assert_eq!(cloudy.depth(), 0);
    }

    #[test]
    fn test_build_sprinkler_network_is_deterministic() {
        let (data, structure) = generated("sprinkler", 500);
        let (first, _) =
            NetworkBuilder::build_network(&data, &structure, 1, FailurePolicy::Abort).unwrap();
        let (second, _) =
            NetworkBuilder::build_network(&data, &structure, 1, FailurePolicy::Abort).unwrap();

        for (a, b) in first.nodes().iter().zip(second.nodes()) {
            assert_eq!(a.cpd_tree(), b.cpd_tree());
        }
        let wet = first.node_by_name("WetGrass").unwrap().cpd_tree().unwrap();
        assert_eq!(wet.parents(), ["Sprinkler", "Rain"]);
        assert_eq!(wet.depth(), 2);
    }

    #[test]
    fn test_naive_bayes_from_arff_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(WEATHER_ARFF.as_bytes()).unwrap();
        let data = load_arff(file.path()).unwrap();

        let (net, summary) = NetworkBuilder::build_network(
            &data,
            &NaiveBayes::new("Play"),
            1,
            FailurePolicy::Abort,
        )
        .unwrap();
        assert_eq!(net.len(), 3);
        assert_eq!(summary.built, 3);

        // 2 of the 4 "yes" days are overcast: (2 + 1) / (4 + 3)
        let outlook = net.node_by_name("Outlook").unwrap().cpd_tree().unwrap();
        let p = outlook
            .probability_of("overcast", &Assignment::new().with("Play", "yes"))
            .unwrap();
        assert!((p - 3.0 / 7.0).abs() < 1e-9);

        // class prior: 4 yes, 4 no
        let play = net.node_by_name("Play").unwrap().cpd_tree().unwrap();
        assert_eq!(
            play.probability_of("yes", &Assignment::new()).unwrap(),
            0.5
        );
    }

    fn with_empty_attribute() -> DataSet {
        DataSet::new(
            "broken",
            vec![
                Attribute::nominal("A", ["x", "y"]),
                Attribute::nominal("Empty", Vec::<String>::new()),
                Attribute::nominal("B", ["x", "y"]),
            ],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_abort_policy_attaches_nothing() {
        let data = with_empty_attribute();
        let mut net = NetworkBuilder::create_nodes(&data);
        let result = NetworkBuilder::build_cpds(&mut net, &data, 1, FailurePolicy::Abort);
        match result {
            Err(NetworkError::Cpd { node, source }) => {
                assert_eq!(node, "Empty");
                assert!(matches!(source, CpdError::InvalidAttribute(_)));
            }
            other => panic!("expected a CPD error, got {:?}", other),
        }
        assert!(net.nodes().iter().all(|n| n.cpd_tree().is_none()));
    }

    #[test]
    fn test_skip_policy_keeps_other_nodes() {
        let data = with_empty_attribute();
        let mut net = NetworkBuilder::create_nodes(&data);
        let summary = NetworkBuilder::build_cpds(&mut net, &data, 1, FailurePolicy::Skip).unwrap();
        assert_eq!(summary.built, 2);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].0, "Empty");
        assert!(net.node_by_name("A").unwrap().cpd_tree().is_some());
        assert!(net.node_by_name("Empty").unwrap().cpd_tree().is_none());
        assert!(!net.is_complete());
    }

    #[test]
    fn test_changing_parents_drops_cpd_tree() {
        let (data, structure) = generated("rain", 100);
        let (mut net, _) =
            NetworkBuilder::build_network(&data, &structure, 1, FailurePolicy::Abort).unwrap();
        let rain = net.id_of("Rain").unwrap();
        net.set_parents(rain, vec![]).unwrap();
        assert!(net.node(rain).unwrap().cpd_tree().is_none());

        NetworkBuilder::build_cpds(&mut net, &data, 1, FailurePolicy::Abort).unwrap();
        let tree = net.node(rain).unwrap().cpd_tree().unwrap();
        assert!(tree.parents().is_empty());
    }

    #[test]
    fn test_rejects_foreign_dataset() {
        let (rain_data, _) = generated("rain", 10);
        let (sprinkler_data, _) = generated("sprinkler", 10);
        let mut net = NetworkBuilder::create_nodes(&sprinkler_data);
        let result = NetworkBuilder::build_cpds(&mut net, &rain_data, 1, FailurePolicy::Skip);
        assert!(matches!(result, Err(NetworkError::DataMismatch { .. })));
    }

    #[test]
    fn test_structure_errors_surface() {
        let (data, _) = generated("sprinkler", 10);
        let cyclic = ExplicitStructure::new()
            .with("Rain", &["WetGrass"])
            .with("WetGrass", &["Rain"]);
        let result = NetworkBuilder::build_network(&data, &cyclic, 1, FailurePolicy::Abort);
        assert!(matches!(result, Err(NetworkError::Cycle { .. })));

        let mut net = BayesianNetwork::new();
        net.add_node("Cloudy", 0);
        assert!(NaiveBayes::new("Play").assign_parents(&mut net).is_err());
    }

    #[test]
    fn test_report_round_trip() {
        let (data, structure) = generated("sprinkler", 200);
        let (net, _) =
            NetworkBuilder::build_network(&data, &structure, 2, FailurePolicy::Abort).unwrap();
        let report = NetworkReport::from_network(&net, &data.name, 2);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.json");
        let path = path.to_str().unwrap();
        report.save_to_file(path).unwrap();
        let loaded = NetworkReport::load_from_file(path).unwrap();

        assert_eq!(loaded.relation, "sprinkler");
        assert_eq!(loaded.laplace_count, 2);
        assert_eq!(loaded.nodes.len(), 4);
        let wet = &loaded.nodes[3];
        assert_eq!(wet.name, "WetGrass");
        assert_eq!(wet.parents, vec!["Sprinkler", "Rain"]);

        let original = net.node_by_name("WetGrass").unwrap().cpd_tree().unwrap();
        let restored = wet.cpd.as_ref().unwrap();
        assert_eq!(restored.leaf_count(), original.leaf_count());
        let assignment = Assignment::new().with("Sprinkler", "T").with("Rain", "F");
        let a = original.probability_of("T", &assignment).unwrap();
        let b = restored.probability_of("T", &assignment).unwrap();
        assert!((a - b).abs() < 1e-12);
    }
}
