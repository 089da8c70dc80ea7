mod common;

use otter_mig::{
    config::Config,
    graph::Graph,
    structures::{
        cnf::Cnf,
        literal::{CLiteral, Literal},
    },
};

fn plain_config() -> Config {
    let mut config = Config::default();
    config.detect_strong.value = false;
    config.check_redundancy.value = false;
    config
}

mod scenarios {
    use super::*;

    #[test]
    fn weak_clause_forces_last_literal() {
        common::init_logger();
        let cnf = Cnf::from_clauses([vec![-1, -2, 3]]);
        let graph = Graph::build_regular(&cnf, &plain_config()).unwrap();

        let registered = |literal: CLiteral| graph.vertex(literal).unwrap().weak_clauses().count();
        assert_eq!(registered(1), 1);
        assert_eq!(registered(2), 1);
        assert_eq!(registered(-3), 1);
        assert_eq!(registered(-1), 0);
        assert_eq!(registered(3), 0);

        let mut engine = graph.engine();
        assert!(engine.propagate(&[1]).is_ok());
        assert_eq!(engine.value_of(3), None);
        assert!(engine.propagate(&[2]).is_ok());
        assert_eq!(engine.value_of(3), Some(3));
    }

    #[test]
    fn contradiction_from_weak_clause() {
        let cnf = Cnf::from_clauses([vec![-1, -2, 3], vec![-3, 4]]);
        let graph = Graph::build_regular(&cnf, &plain_config()).unwrap();
        let mut engine = graph.engine();

        assert!(engine.is_contradiction(&[1, 2, -4]));
        assert!(engine.is_contradiction(&[-4, 2, 1]));
        assert!(!engine.is_contradiction(&[1, -4]));
        assert!(engine.added_literals().is_empty());
    }
}

mod reset {
    use super::*;

    #[test]
    fn reset_matches_fresh_engine() {
        for seed in 0..24 {
            let cnf = common::random_cnf(seed, 10, 20, 4);
            let Ok(graph) = Graph::build_regular(&cnf, &plain_config()) else {
                continue;
            };
            let fresh = graph.engine();
            let mut engine = graph.engine();

            for literal in [1, -2, 3, -4, 5] {
                let _ = engine.propagate(&[literal]);
            }
            engine.reset();

            assert_eq!(engine.model(), fresh.model(), "seed {seed}");
            assert!(engine.added_literals().is_empty());
            assert_eq!(engine.clause_counts(), fresh.clause_counts(), "seed {seed}");
        }
    }

    #[test]
    fn reset_to_checkpoint() {
        let cnf = Cnf::from_clauses([vec![-1, 2], vec![-3, 4], vec![-5, 6]]);
        let graph = Graph::build_regular(&cnf, &plain_config()).unwrap();
        let mut engine = graph.engine();

        assert_eq!(engine.propagate(&[1]), Ok(2));
        let checkpoint = engine.added_count();
        assert_eq!(engine.propagate(&[3, 5]), Ok(4));

        engine.reset_to(checkpoint);
        assert_eq!(engine.added_literals(), vec![1, 2]);
        assert_eq!(engine.model(), &[1, 2, 0, 0, 0, 0]);
    }
}

mod counts {
    use super::*;

    /// For each weak clause, the count of literals which are not false on the model of the engine.
    fn open_literals(graph: &Graph, model: &[CLiteral]) -> Vec<u32> {
        graph
            .weak()
            .clauses()
            .map(|clause| clause.iter().filter(|l| model[l.atom_index()] != -**l).count() as u32)
            .collect()
    }

    #[test]
    fn counts_track_open_literals() {
        for seed in 40..64 {
            let cnf = common::random_cnf(seed, 10, 18, 5);
            let Ok(graph) = Graph::build_regular(&cnf, &plain_config()) else {
                continue;
            };
            let mut engine = graph.engine();

            for literal in [2, -7, 5, 1, -9] {
                let checkpoint = engine.added_count();
                match engine.propagate(&[literal]) {
                    Ok(_) => {}
                    Err(_) => engine.reset_to(checkpoint),
                }
                assert_eq!(
                    engine.clause_counts(),
                    open_literals(&graph, engine.model()).as_slice(),
                    "seed {seed}"
                );
            }
        }
    }
}

mod soundness {
    use super::*;

    #[test]
    fn propagation_is_entailed() {
        for config in [Config::default(), plain_config()] {
            for seed in 100..140 {
                let cnf = common::random_cnf(seed, 9, 18, 3);
                let models = common::models(&cnf);
                let Ok(graph) = Graph::build_regular(&cnf, &config) else {
                    continue;
                };
                let mut engine = graph.engine();

                for given in [[1, 2], [-3, 4], [5, -6], [-7, -8], [9, -1]] {
                    let consistent = common::models_given(&models, &given).next().is_some();
                    match engine.propagate(&given) {
                        Ok(_) => {
                            for literal in engine.added_literals() {
                                assert!(common::entails(&models, &given, literal), "seed {seed}: {given:?} ⊭ {literal}");
                            }
                        }
                        Err(_) => assert!(!consistent, "seed {seed}: {given:?}"),
                    }
                    engine.reset();
                }
            }
        }
    }

    #[test]
    fn deterministic() {
        let cnf = common::random_cnf(7, 12, 30, 4);
        let Ok(graph) = Graph::build_regular(&cnf, &plain_config()) else {
            return;
        };

        let mut first = graph.engine();
        let mut second = graph.engine();
        for literal in [3, -5, 8] {
            assert_eq!(first.propagate(&[literal]).is_ok(), second.propagate(&[literal]).is_ok());
        }
        assert_eq!(first.added_literals(), second.added_literals());
    }
}

mod preset {
    use super::*;

    #[test]
    fn core_as_preset() {
        let cnf = Cnf::from_clauses([vec![1], vec![-1, 2, 3], vec![-3, 4]]);
        let graph = Graph::build_regular(&cnf, &Config::default()).unwrap();
        let mut engine = graph.engine_with(graph.core());

        assert_eq!(engine.value_of(1), Some(1));
        assert!(engine.added_literals().is_empty());

        assert!(engine.propagate(&[-2]).is_ok());
        assert_eq!(engine.value_of(3), Some(3));
        assert_eq!(engine.value_of(4), Some(4));

        engine.reset();
        assert_eq!(engine.model(), &[1, 0, 0, 0]);
    }
}

mod light {
    use super::*;

    #[test]
    fn light_is_weaker() {
        for seed in 500..530 {
            let cnf = common::random_cnf(seed, 10, 20, 3);
            let Ok(graph) = Graph::build_regular(&cnf, &Config::default()) else {
                continue;
            };

            let mut engine = graph.engine();
            let mut light = graph.light_engine();
            for literal in [1, -2, 3, -4] {
                let full = engine.propagate(&[literal]);
                let weak = light.propagate(&[literal]);

                if full.is_ok() {
                    assert!(weak.is_ok(), "seed {seed}");
                    for added in light.added_literals() {
                        assert_eq!(engine.value_of(added.atom()), Some(*added));
                    }
                }
                engine.reset();
                light.reset();
            }
        }
    }
}
