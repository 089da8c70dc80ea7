/*!
An incremental SAT solver, used as an oracle when building a graph.

The oracle is a small conflict-driven clause-learning solver with the features required to build a graph, and no more:

- Queries are made with respect to a stack of [assumptions](crate::oracle::assumptions), which persists between queries.
- Each query is answered with a [Report], and a query which exceeds the [time limit](crate::config::Config::time_limit) is answered [Unknown](Report::Unknown).
- Clauses may be [pushed](GenericOracle::push_clause) and [popped](GenericOracle::pop_clause).
- The most recent models found are kept in a [history](history::SolutionHistory).
- The polarity of decisions follows a [phase selection](PhaseSelection), which may be set between queries.

```rust
# use otter_mig::config::Config;
# use otter_mig::oracle::Oracle;
# use otter_mig::reports::Report;
let mut oracle = Oracle::new(2, &Config::default());
assert!(oracle.push_clause(&[-1, 2]).is_ok());

assert!(oracle.assumption_push(1).is_ok());
assert_eq!(oracle.solve(), Report::Satisfiable);
assert_eq!(oracle.model(), Some([1, 2].as_slice()));

assert!(oracle.assumption_push(-2).is_ok());
assert_eq!(oracle.solve(), Report::Unsatisfiable);

oracle.assumption_clear_to(0);
assert_eq!(oracle.solve_given(&[-2]), Report::Satisfiable);
assert_eq!(oracle.model(), Some([-1, -2].as_slice()));
```

# Structure

Methods of the oracle are split across a handful of files, following the procedures of a solve:
- [bcp] propagates the literals of the trail through watched clauses.
- [analysis] derives an asserting clause from a conflict.
- [solve] manages the search, including decisions, restarts, and the time limit.

Clauses are stored in a [SlotMap](slotmap::SlotMap), and watch lists store keys.
A watch for a removed (learnt) clause is dropped when next inspected.
*/

pub mod analysis;
pub mod assumptions;
pub mod bcp;
mod counters;
pub mod db;
pub mod history;
mod phase;
pub mod solve;
pub mod trail;

pub use counters::Counters;
pub use phase::PhaseSelection;

use rand::SeedableRng;

use crate::{
    config::Config,
    generic::{activity_heap::ActivityHeap, random::MinimalPCG32},
    reports::Report,
    structures::{
        atom::Atom,
        cnf::Cnf,
        literal::{CLiteral, Literal},
    },
    types::err::{self},
};

use db::ClauseDB;
use history::SolutionHistory;
use trail::Trail;

/// An oracle, generic over the source of randomness.
pub struct GenericOracle<R: rand::Rng + SeedableRng> {
    /// The configuration of the oracle.
    pub config: Config,

    /// A count of atoms, so the atoms of the oracle are `1..=atom_count`.
    atom_count: usize,

    /// The clauses of the oracle, and watches.
    clause_db: ClauseDB,

    /// The value of each atom, indexed by atom - 1.
    valuation: Vec<Option<bool>>,

    /// The decision level at which each valued atom was valued.
    levels: Vec<u32>,

    /// Literals in the order they were valued, by decision level.
    trail: Trail,

    /// The persistent stack of assumptions.
    assumptions: Vec<CLiteral>,

    /// The phase selection of decisions.
    phase: PhaseSelection,

    /// The most recent value of each atom.
    saved_phase: Vec<bool>,

    /// Atoms ordered by activity.
    heap: ActivityHeap,

    /// The current amount by which activity is bumped.
    bump: f64,

    /// Scratch marks for conflict analysis, indexed by atom - 1.
    seen: Vec<bool>,

    /// A limit on the count of learnt clauses, revised on each reduction.
    learnt_limit: usize,

    /// Models found by previous queries.
    history: SolutionHistory,

    /// The model found by the most recent query, if the query was satisfiable.
    model: Option<Vec<CLiteral>>,

    /// Whether the clauses of the oracle are unsatisfiable, regardless of assumptions.
    unsatisfiable: bool,

    rng: R,

    counters: Counters,
}

/// An oracle, with the crate's default source of randomness.
pub type Oracle = GenericOracle<MinimalPCG32>;

impl<R: rand::Rng + SeedableRng> GenericOracle<R> {
    /// An oracle over the atoms `1..=atom_count`, without any clauses.
    pub fn new(atom_count: usize, config: &Config) -> Self {
        let mut heap = ActivityHeap::with_count(atom_count);
        for index in 0..atom_count {
            heap.activate(index);
        }

        GenericOracle {
            config: config.clone(),
            atom_count,
            clause_db: ClauseDB::with_atom_count(atom_count),
            valuation: vec![None; atom_count],
            levels: vec![0; atom_count],
            trail: Trail::default(),
            assumptions: Vec::default(),
            phase: PhaseSelection::Original,
            saved_phase: vec![false; atom_count],
            heap,
            bump: 1.0,
            seen: vec![false; atom_count],
            learnt_limit: (atom_count / 2).max(1024),
            history: SolutionHistory::with_capacity(config.solution_history.value),
            model: None,
            unsatisfiable: false,
            rng: R::seed_from_u64(config.random_seed.value),
            counters: Counters::default(),
        }
    }

    /// An oracle over the atoms of a formula, with each clause of the formula added.
    ///
    /// Returns [Contradiction](err::OracleError::Contradiction) if some clause is found to contradict the formula when added.
    pub fn from_cnf(cnf: &Cnf, config: &Config) -> Result<Self, err::OracleError> {
        let mut oracle = Self::new(cnf.variable_count(), config);
        for clause in cnf.clauses() {
            oracle.add_clause(clause)?;
        }
        Ok(oracle)
    }

    /// A count of atoms of the oracle.
    pub fn atom_count(&self) -> usize {
        self.atom_count
    }

    /// The model found by the most recent query, if the most recent query was satisfiable.
    ///
    /// The model is indexed by atom - 1, and contains the literal of each atom true on the model.
    pub fn model(&self) -> Option<&[CLiteral]> {
        self.model.as_deref()
    }

    /// Models found by previous queries, most recent first.
    pub fn history(&self) -> &SolutionHistory {
        &self.history
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Sets the phase selection for decisions of future queries.
    pub fn set_phase(&mut self, phase: PhaseSelection) {
        self.phase = phase;
    }

    pub fn phase(&self) -> &PhaseSelection {
        &self.phase
    }

    /// Gives each atom a random activity, and so a random place in the order of decisions.
    pub fn shuffle_order(&mut self) {
        self.bump = 1.0;
        for index in 0..self.atom_count {
            let activity = self.rng.random::<f64>();
            self.heap.set_activity(index, activity);
        }
    }

    /// Whether `atom` is an atom of the oracle.
    fn check_atom(&self, atom: Atom) -> Result<(), err::OracleError> {
        match atom == 0 || atom as usize > self.atom_count {
            true => Err(err::OracleError::UnknownAtom(atom)),
            false => Ok(()),
        }
    }

    /// The value of `literal` on the current valuation, if the atom of `literal` has a value.
    #[inline]
    fn value_of(&self, literal: CLiteral) -> Option<bool> {
        literal_value(&self.valuation, literal)
    }

    /// The valuation as a model, assuming every atom has a value.
    fn valuation_as_model(&self) -> Vec<CLiteral> {
        self.valuation
            .iter()
            .enumerate()
            .map(|(index, value)| CLiteral::new(index as Atom + 1, value.unwrap_or(false)))
            .collect()
    }
}

impl<R: rand::Rng + SeedableRng> GenericOracle<R> {
    /// Records a report in the counters of the oracle and returns the report.
    fn note_report(&mut self, report: Report) -> Report {
        self.counters.queries += 1;
        match report {
            Report::Satisfiable => self.counters.satisfiable += 1,
            Report::Unsatisfiable => self.counters.unsatisfiable += 1,
            Report::Unknown => self.counters.unknown += 1,
        }
        report
    }
}

/// The value of `literal` on `valuation`, if the atom of `literal` has a value.
#[inline]
fn literal_value(valuation: &[Option<bool>], literal: CLiteral) -> Option<bool> {
    valuation[literal.atom_index()].map(|value| value == literal.polarity())
}
