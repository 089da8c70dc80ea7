#![allow(dead_code)]

use otter_mig::{
    generic::random::MinimalPCG32,
    structures::{
        clause::CClause,
        cnf::Cnf,
        literal::{CLiteral, Literal},
    },
};
use rand::{Rng, SeedableRng};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Every model of `cnf`, each as a vector of literals indexed by atom - 1.
///
/// Only suitable for small formulas.
pub fn models(cnf: &Cnf) -> Vec<Vec<CLiteral>> {
    let atom_count = cnf.variable_count();
    assert!(atom_count <= 16, "too many atoms to enumerate");

    let mut the_models = Vec::default();
    for bits in 0..(1_u32 << atom_count) {
        let model = (0..atom_count)
            .map(|index| CLiteral::new(index as u32 + 1, bits & (1 << index) != 0))
            .collect::<Vec<_>>();

        let satisfied = cnf
            .clauses()
            .iter()
            .all(|clause| clause.iter().any(|literal| model[literal.atom_index()] == *literal));
        if satisfied {
            the_models.push(model);
        }
    }
    the_models
}

/// The models of `cnf` on which each of `literals` is true.
pub fn models_given<'m>(models: &'m [Vec<CLiteral>], literals: &'m [CLiteral]) -> impl Iterator<Item = &'m Vec<CLiteral>> {
    models.iter().filter(move |model| {
        literals
            .iter()
            .filter(|l| **l != 0)
            .all(|literal| model[literal.atom_index()] == *literal)
    })
}

/// Whether `literal` is true on every model on which each of `given` is true.
pub fn entails(models: &[Vec<CLiteral>], given: &[CLiteral], literal: CLiteral) -> bool {
    models_given(models, given).all(|model| model[literal.atom_index()] == literal)
}

/// A random formula of `clause_count` clauses, each of between one and `width` literals, over `atom_count` atoms.
pub fn random_cnf(seed: u64, atom_count: u32, clause_count: usize, width: usize) -> Cnf {
    let mut rng = MinimalPCG32::seed_from_u64(seed);
    let mut clauses: Vec<CClause> = Vec::with_capacity(clause_count);

    for _ in 0..clause_count {
        let length = rng.random_range(1..=width);
        let clause = (0..length)
            .map(|_| CLiteral::new(rng.random_range(1..=atom_count), rng.random_bool(0.5)))
            .collect();
        clauses.push(clause);
    }

    let mut cnf = Cnf::with_variable_count(atom_count as usize);
    for clause in clauses {
        cnf.add_clause(clause);
    }
    cnf
}
