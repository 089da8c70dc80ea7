mod common;

use otter_mig::{
    config::Config,
    oracle::{Oracle, PhaseSelection},
    reports::Report,
    structures::{cnf::Cnf, literal::Literal},
    types::err::OracleError,
};

mod brute_force {
    use super::*;

    #[test]
    fn satisfiability_agrees() {
        common::init_logger();
        let config = Config::default();

        for seed in 0..64 {
            let cnf = common::random_cnf(seed, 8, 24, 3);
            let models = common::models(&cnf);

            let mut oracle = match Oracle::from_cnf(&cnf, &config) {
                Ok(oracle) => oracle,
                Err(OracleError::Contradiction) => {
                    assert!(models.is_empty(), "seed {seed}");
                    continue;
                }
                Err(e) => panic!("{e:?}"),
            };

            match oracle.solve() {
                Report::Satisfiable => {
                    let model = oracle.model().unwrap().to_vec();
                    assert!(models.contains(&model), "seed {seed}");
                }
                Report::Unsatisfiable => assert!(models.is_empty(), "seed {seed}"),
                Report::Unknown => panic!("timeout on a small formula"),
            }
        }
    }

    #[test]
    fn assumptions_agree() {
        let config = Config::default();

        for seed in 100..132 {
            let cnf = common::random_cnf(seed, 6, 12, 3);
            let models = common::models(&cnf);
            let Ok(mut oracle) = Oracle::from_cnf(&cnf, &config) else {
                continue;
            };

            for a in [-3, -1, 2, 4] {
                for b in [-6, -2, 1, 5] {
                    let expected = common::models_given(&models, &[a, b]).next().is_some();
                    let report = oracle.solve_given(&[a, b]);
                    assert_eq!(report == Report::Satisfiable, expected, "seed {seed}, {a} {b}");

                    if report == Report::Satisfiable {
                        let model = oracle.model().unwrap();
                        assert_eq!(model[a.atom_index()], a);
                        assert_eq!(model[b.atom_index()], b);
                    }
                }
            }
            assert_eq!(oracle.assumption_count(), 0);
        }
    }
}

mod assumption_stack {
    use super::*;

    #[test]
    fn persistent_between_queries() {
        let mut oracle = Oracle::new(3, &Config::default());
        assert!(oracle.push_clause(&[-1, 2]).is_ok());
        assert!(oracle.push_clause(&[-2, 3]).is_ok());

        assert!(oracle.assumption_push(1).is_ok());
        assert!(oracle.assumption_push(-3).is_ok());
        assert_eq!(oracle.solve(), Report::Unsatisfiable);
        assert_eq!(oracle.solve(), Report::Unsatisfiable);

        assert!(oracle.assumption_replace_last(3).is_ok());
        assert_eq!(oracle.solve(), Report::Satisfiable);
        assert_eq!(oracle.assumptions(), &[1, 3]);

        oracle.assumption_clear_to(0);
        assert_eq!(oracle.solve_given(&[-3, 0]), Report::Satisfiable);
        assert_eq!(oracle.model(), Some([-1, -2, -3].as_slice()));
    }

    #[test]
    fn unknown_atoms() {
        let mut oracle = Oracle::new(2, &Config::default());
        assert_eq!(oracle.assumption_push(3), Err(OracleError::UnknownAtom(3)));
        assert_eq!(oracle.assumption_push(0), Err(OracleError::UnknownAtom(0)));
        assert_eq!(oracle.assumption_pop(), None);
    }
}

mod clause_stack {
    use super::*;

    #[test]
    fn pop_restores() {
        let mut oracle = Oracle::new(2, &Config::default());
        assert!(oracle.push_clause(&[1, 2]).is_ok());
        assert!(oracle.push_clause(&[-1]).is_ok());
        assert_eq!(oracle.solve_given(&[-2]), Report::Unsatisfiable);

        assert!(oracle.pop_clause().is_ok());
        assert_eq!(oracle.solve_given(&[-2]), Report::Satisfiable);
        assert_eq!(oracle.model(), Some([1, -2].as_slice()));
    }

    #[test]
    fn contradiction_is_not_added() {
        let mut oracle = Oracle::new(2, &Config::default());
        assert!(oracle.push_clause(&[1]).is_ok());
        assert!(oracle.push_clause(&[-1, 2]).is_ok());
        assert_eq!(oracle.push_clause(&[-2]), Err(OracleError::Contradiction));
        assert_eq!(oracle.push_clause(&[]), Err(OracleError::Contradiction));
    }

    #[test]
    fn added_clauses_stay() {
        let mut oracle = Oracle::new(2, &Config::default());
        assert!(oracle.add_clause(&[-1]).is_ok());
        assert!(oracle.push_clause(&[1, 2]).is_ok());
        assert_eq!(oracle.solve_given(&[-2]), Report::Unsatisfiable);

        assert!(oracle.pop_clause().is_ok());
        assert_eq!(oracle.pop_clause(), Err(OracleError::NothingToPop));
        assert_eq!(oracle.solve_given(&[1]), Report::Unsatisfiable);
        assert_eq!(oracle.solve_given(&[-2]), Report::Satisfiable);
    }

    #[test]
    fn nothing_to_pop() {
        let mut oracle = Oracle::new(1, &Config::default());
        assert_eq!(oracle.pop_clause(), Err(OracleError::NothingToPop));
    }
}

mod heuristics {
    use super::*;

    #[test]
    fn inverse_phase() {
        let mut oracle = Oracle::new(3, &Config::default());
        oracle.set_phase(PhaseSelection::Inverse(vec![1, 2, -3]));
        assert_eq!(oracle.solve(), Report::Satisfiable);
        assert_eq!(oracle.model(), Some([-1, -2, 3].as_slice()));
    }

    #[test]
    fn history_is_bounded() {
        let mut config = Config::default();
        config.solution_history.value = 2;
        let mut oracle = Oracle::new(2, &config);

        for literal in [1, -1, 2] {
            assert_eq!(oracle.solve_given(&[literal]), Report::Satisfiable);
        }

        assert_eq!(oracle.history().len(), 2);
        assert!(oracle.history().iter().next().unwrap().contains(&2));
        assert_eq!(oracle.history().containing(1).count(), 0);
    }

    #[test]
    fn zero_time_limit() {
        let mut config = Config::default();
        config.time_limit.value = std::time::Duration::ZERO;

        let cnf = Cnf::from_clauses([vec![1, 2]]);
        let mut oracle = Oracle::from_cnf(&cnf, &config).unwrap();
        assert_eq!(oracle.solve(), Report::Unknown);
        assert!(oracle.model().is_none());
        assert_eq!(oracle.counters().unknown, 1);
    }
}
