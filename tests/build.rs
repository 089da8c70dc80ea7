mod common;

use otter_mig::{
    config::Config,
    graph::Graph,
    structures::{
        cnf::Cnf,
        literal::{CLiteral, Literal},
        vertex::{vertex_literal, Status},
    },
    types::err::{BuildError, ErrorKind},
};

mod scenarios {
    use super::*;

    #[test]
    fn unit_clause() {
        common::init_logger();
        let cnf = Cnf::from_clauses([vec![1]]);
        let graph = Graph::build_regular(&cnf, &Config::default()).unwrap();

        assert_eq!(graph.core(), &[1]);
        assert_eq!(graph.dead(), vec![-1]);
        assert_eq!(graph.vertex(-1).unwrap().status(), Status::Dead);
        assert_eq!(graph.strong_edge_count(), 0);
        assert!(graph.weak().is_empty());
    }

    #[test]
    fn equivalence() {
        let cnf = Cnf::from_clauses([vec![-1, 2], vec![-2, 1]]);
        let graph = Graph::build_regular(&cnf, &Config::default()).unwrap();

        assert!(graph.core().is_empty());
        assert!(graph.has_strong_edge(1, 2));
        assert!(graph.has_strong_edge(2, 1));
        assert!(graph.has_strong_edge(-1, -2));

        let mut engine = graph.engine();
        assert!(engine.propagate(&[1]).is_ok());
        assert_eq!(engine.value_of(2), Some(2));
    }

    #[test]
    fn empty_formula() {
        let cnf = Cnf::default();
        let graph = Graph::build_regular(&cnf, &Config::default()).unwrap();

        assert_eq!(graph.size(), 0);
        assert!(graph.core().is_empty());
        assert_eq!(graph.strong_edge_count(), 0);

        let mut engine = graph.engine();
        assert_eq!(engine.propagate(&[0]), Ok(0));
        assert!(engine.added_literals().is_empty());
    }

    #[test]
    fn atoms_without_clauses() {
        let cnf = Cnf::with_variable_count(3);
        let graph = Graph::build_regular(&cnf, &Config::default()).unwrap();

        assert_eq!(graph.size(), 3);
        assert!(graph.statuses().iter().all(|status| *status == Status::Normal));
    }

    #[test]
    fn unsatisfiable() {
        let cnf = Cnf::from_clauses([vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]]);
        let result = Graph::build_regular(&cnf, &Config::default());
        assert_eq!(result.unwrap_err(), ErrorKind::Build(BuildError::Unsatisfiable));

        let cnf = Cnf::from_clauses([vec![1], vec![-1]]);
        assert!(Graph::build_regular(&cnf, &Config::default()).is_err());

        let empty_clause: Vec<CLiteral> = Vec::default();
        let cnf = Cnf::from_clauses([vec![1, 2], empty_clause]);
        let e = Graph::build_regular(&cnf, &Config::default()).unwrap_err();
        assert_eq!(e.to_string(), "formula unsatisfiable");
    }

    #[test]
    fn zero_literals_ignored() {
        let cnf = Cnf::from_clauses([vec![0, 1, 0], vec![0], vec![-1, 0, 2]]);
        let graph = Graph::build_regular(&cnf, &Config::default()).unwrap();

        assert_eq!(graph.core(), &[1, 2]);
    }
}

mod brute_force {
    use super::*;

    fn small_configs() -> Vec<Config> {
        let mut plain = Config::default();
        plain.detect_strong.value = false;
        plain.check_redundancy.value = false;
        vec![Config::default(), plain]
    }

    #[test]
    fn core_and_dead() {
        common::init_logger();

        for config in small_configs() {
            for seed in 0..48 {
                let cnf = common::random_cnf(seed, 8, 16, 4);
                let models = common::models(&cnf);

                let graph = match Graph::build_regular(&cnf, &config) {
                    Ok(graph) => graph,
                    Err(e) => {
                        assert!(models.is_empty(), "seed {seed}: {e}");
                        continue;
                    }
                };
                assert!(!models.is_empty(), "seed {seed}");
                assert!(graph.is_complete());

                for atom in 1..=8_u32 {
                    let literal = CLiteral::new(atom, true);
                    let expected = match (
                        common::entails(&models, &[], literal),
                        common::entails(&models, &[], -literal),
                    ) {
                        (true, _) => Status::Core,
                        (_, true) => Status::Dead,
                        _ => Status::Normal,
                    };
                    assert_eq!(graph.vertex(literal).unwrap().status(), expected, "seed {seed}, {literal}");
                    assert_eq!(graph.vertex(-literal).unwrap().status(), expected.complement());
                }
            }
        }
    }

    #[test]
    fn strong_edges_are_implications() {
        for config in small_configs() {
            for seed in 200..240 {
                let cnf = common::random_cnf(seed, 8, 14, 3);
                let models = common::models(&cnf);
                let Ok(graph) = Graph::build_regular(&cnf, &config) else {
                    continue;
                };

                for vertex in 0..16 {
                    let from = vertex_literal(vertex);
                    for to in graph.strong(from) {
                        assert!(common::entails(&models, &[from], *to), "seed {seed}: {from} → {to}");
                        assert_ne!(*to, from);
                    }
                    assert!(graph.strong(from).windows(2).all(|pair| pair[0] < pair[1]));
                }
            }
        }
    }

    #[test]
    fn weak_clauses_are_clean() {
        for seed in 300..330 {
            let cnf = common::random_cnf(seed, 8, 16, 5);
            let Ok(graph) = Graph::build_regular(&cnf, &Config::default()) else {
                continue;
            };

            assert!(graph.check().is_ok());
            for clause in graph.weak().clauses() {
                assert!(clause.len() > 2);
                for literal in clause {
                    assert!(graph.vertex(*literal).unwrap().is_normal());
                }
            }
        }
    }
}

mod discovery {
    use super::*;

    #[test]
    fn hidden_implication() {
        // 1 implies 2, though only through clauses of three literals.
        let cnf = Cnf::from_clauses([vec![-1, 2, 3], vec![-1, 2, -3], vec![4, 5, 6]]);

        let graph = Graph::build_regular(&cnf, &Config::default()).unwrap();
        assert!(graph.has_strong_edge(1, 2));
        assert!(graph.has_strong_edge(-2, -1));
        assert!(graph.detected_strong().contains(&[-1, 2]));
        assert!(graph.counters().detected_strong > 0);

        let mut config = Config::default();
        config.detect_strong.value = false;
        let graph = Graph::build_regular(&cnf, &config).unwrap();
        assert!(!graph.has_strong_edge(1, 2));
        assert!(graph.detected_strong().is_empty());
    }

    #[test]
    fn zero_time_limit() {
        let mut config = Config::default();
        config.time_limit.value = std::time::Duration::ZERO;

        let cnf = Cnf::from_clauses([vec![1], vec![-1, 2, 3], vec![-1, 2, -3]]);
        let graph = Graph::build_regular(&cnf, &config).unwrap();

        assert!(graph.core().is_empty());
        assert!(graph.detected_strong().is_empty());
        assert!(!graph.is_complete());
        assert!(graph.counters().timeouts > 0);
    }
}

mod redundancy {
    use super::*;

    #[test]
    fn entailed_clause_removed() {
        let cnf = Cnf::from_clauses([vec![-1, 2], vec![-2, 3, 4], vec![-1, 3, 4], vec![1, 5, 6]]);
        let mut config = Config::default();
        config.detect_strong.value = false;

        let graph = Graph::build_regular(&cnf, &config).unwrap();
        assert_eq!(graph.redundant(), &[vec![-1, 3, 4]]);
        assert_eq!(graph.weak().len(), 2);

        config.check_redundancy.value = false;
        let graph = Graph::build_regular(&cnf, &config).unwrap();
        assert!(graph.redundant().is_empty());
        assert_eq!(graph.weak().len(), 3);
    }
}

mod sharing {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn graph_is_shared() {
        assert_send_sync::<Graph>();

        let cnf = Cnf::from_clauses([vec![-1, 2], vec![-2, 3]]);
        let graph = Graph::build_regular(&cnf, &Config::default()).unwrap();

        std::thread::scope(|scope| {
            for literal in [1, 2, -3] {
                let graph = &graph;
                scope.spawn(move || {
                    let mut engine = graph.engine();
                    assert!(engine.propagate(&[literal]).is_ok());
                });
            }
        });
    }
}
