/*!
Tools for building a [graph](crate::graph).

# Overview

A graph is built in phases, each of which is a function over a [BuildContext]:

```none
formula
  → entry query        the formula is satisfiable, or the build ends with an error
  → core_dead          failed-literal sweep for core and dead literals
  → clean              remove core and dead literals from the clauses
  → discovery          (optional) strong edges hidden in weak clauses
  → redundancy         (optional) remove weak clauses entailed by other clauses
  → finish             close the strong edges, index the weak clauses, and check
  → graph
```

The same phases are used for a [regular](BuildMode::Regular) build from scratch, and an [incremental](BuildMode::Incremental) build from some previous graph.
On an incremental build the [changes](incremental::Changes) between the formula of the previous graph and the given formula are classified, and the phases are restricted to whatever the changes may affect.

```rust
# use otter_mig::builder::{Builder, BuildMode};
# use otter_mig::config::Config;
# use otter_mig::structures::cnf::Cnf;
let config = Config::default();

let cnf = Cnf::from_clauses([vec![-1, 2], vec![1, 2, 3]]);
let graph = Builder::new(&cnf, &config).build(BuildMode::Regular).unwrap();
assert!(graph.core().is_empty());

let cnf = Cnf::from_clauses([vec![-1, 2], vec![1, 2, 3], vec![1]]);
let next = Builder::new(&cnf, &config)
    .build(BuildMode::Incremental { previous: &graph })
    .unwrap();
assert_eq!(next.core(), &[1, 2]);
```

# Queries

Each query is made to a single [oracle](crate::oracle::Oracle), owned by the context of the build.
Literals found to be core are kept as assumptions of the oracle, so later queries are made relative to the core.

A query answered [Unknown](Report::Unknown) is counted as a timeout, and whatever the query was to decide is left undecided.
*/

pub mod clean;
pub mod core_dead;
pub mod discovery;
pub mod incremental;
pub mod redundancy;

use std::time::{Duration, Instant};

use crate::{
    config::Config,
    graph::{Draft, Graph},
    misc::log::targets::{self},
    oracle::Oracle,
    reports::Report,
    structures::{
        clause::CClause,
        cnf::Cnf,
        literal::{CLiteral, Literal},
        vertex::{vertex_index, Status},
    },
    types::err::{self},
};

/// Counts related to a build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counters {
    /// A count of queries made to an oracle.
    pub queries: usize,

    pub satisfiable: usize,

    pub unsatisfiable: usize,

    /// A count of queries which exceeded the time limit.
    pub timeouts: usize,

    /// A count of core literals found.
    pub core: usize,

    /// A count of strong edges found by discovery, each as a binary clause.
    pub detected_strong: usize,

    /// A count of clauses found to be redundant.
    pub redundant: usize,

    /// The time taken by the build.
    pub time: Duration,
}

impl Counters {
    /// Records a report, and returns the report.
    pub fn note(&mut self, report: Report) -> Report {
        self.queries += 1;
        match report {
            Report::Satisfiable => self.satisfiable += 1,
            Report::Unsatisfiable => self.unsatisfiable += 1,
            Report::Unknown => self.timeouts += 1,
        }
        report
    }
}

/// How to build a graph.
#[derive(Clone, Copy, Debug)]
pub enum BuildMode<'p> {
    /// From scratch.
    Regular,

    /// From a previous graph, with whatever of the previous graph remains valid.
    Incremental { previous: &'p Graph },
}

/// The state shared by the phases of a build.
pub struct BuildContext {
    /// The oracle used for each query of the build.
    pub oracle: Oracle,

    /// The status of each vertex, as found so far.
    pub status: Vec<Status>,

    /// Literals which may be core, indexed by atom - 1, with zero for an atom which is known not to be.
    pub candidates: Vec<CLiteral>,

    pub counters: Counters,
}

impl BuildContext {
    /// A context for building a graph of `cnf`.
    ///
    /// Returns [Unsatisfiable](err::BuildError::Unsatisfiable) if the oracle finds a contradiction when adding the clauses of `cnf`.
    pub fn open(cnf: &Cnf, config: &Config) -> Result<Self, err::BuildError> {
        let oracle = match Oracle::from_cnf(cnf, config) {
            Ok(oracle) => oracle,
            Err(_) => return Err(err::BuildError::Unsatisfiable),
        };

        let atom_count = cnf.variable_count();
        Ok(BuildContext {
            oracle,
            status: vec![Status::Normal; 2 * atom_count],
            candidates: vec![0; atom_count],
            counters: Counters::default(),
        })
    }

    /// A count of atoms.
    pub fn atom_count(&self) -> usize {
        self.candidates.len()
    }

    /// Queries the oracle given its assumptions, and counts the report.
    pub fn query(&mut self) -> Report {
        let report = self.oracle.solve();
        self.counters.note(report)
    }

    /// Queries the oracle given its assumptions together with `literals`, and counts the report.
    pub fn query_given(&mut self, literals: &[CLiteral]) -> Report {
        let report = self.oracle.solve_given(literals);
        self.counters.note(report)
    }

    pub fn status_of(&self, literal: CLiteral) -> Status {
        self.status[vertex_index(literal)]
    }

    /// Whether the atom of `literal` is neither core nor dead.
    pub fn is_normal(&self, literal: CLiteral) -> bool {
        self.status_of(literal) == Status::Normal
    }

    /// Notes `literal` as core, and so the negation of `literal` as dead.
    pub fn fix(&mut self, literal: CLiteral) {
        if self.status_of(literal) != Status::Core {
            self.counters.core += 1;
        }
        self.status[vertex_index(literal)] = Status::Core;
        self.status[vertex_index(literal.negate())] = Status::Dead;
    }

    /// Notes `literal` as core and keeps `literal` as an assumption of the oracle.
    pub fn fix_and_assume(&mut self, literal: CLiteral) -> Result<(), err::ErrorKind> {
        self.fix(literal);
        self.oracle.assumption_push(literal)?;
        Ok(())
    }

    /// The core literals found, sorted by atom.
    pub fn core(&self) -> Vec<CLiteral> {
        (1..=self.atom_count() as u32)
            .map(|atom| CLiteral::new(atom, true))
            .filter_map(|literal| match self.status_of(literal) {
                Status::Core => Some(literal),
                Status::Dead => Some(literal.negate()),
                Status::Normal => None,
            })
            .collect()
    }
}

/// Builds graphs of a formula.
pub struct Builder<'b> {
    cnf: &'b Cnf,
    config: &'b Config,
}

impl<'b> Builder<'b> {
    pub fn new(cnf: &'b Cnf, config: &'b Config) -> Self {
        Builder { cnf, config }
    }

    /// Builds a graph of the formula.
    pub fn build(&self, mode: BuildMode<'_>) -> Result<Graph, err::ErrorKind> {
        let start = Instant::now();
        let graph = match mode {
            BuildMode::Regular => self.build_regular(start),
            BuildMode::Incremental { previous } => incremental::build(self.cnf, self.config, previous, start),
        }?;

        let counters = graph.counters();
        log::info!(
            target: targets::BUILD,
            "Built a graph of {} atoms in {:.2?}: {} core, {} strong edges, {} weak clauses, {} timeouts",
            graph.size(),
            counters.time,
            counters.core,
            graph.strong_edge_count(),
            graph.weak().len(),
            counters.timeouts
        );
        Ok(graph)
    }

    fn build_regular(&self, start: Instant) -> Result<Graph, err::ErrorKind> {
        let mut context = BuildContext::open(self.cnf, self.config)?;

        let mut clauses = match context.query() {
            Report::Unsatisfiable => {
                log::info!(target: targets::CORE_DEAD, "Formula unsatisfiable");
                return Err(err::ErrorKind::from(err::BuildError::Unsatisfiable));
            }
            Report::Unknown => {
                log::warn!(target: targets::CORE_DEAD, "Entry query timed out, so every atom is normal");
                clean::clean(self.cnf.clauses(), &context.status)
            }
            Report::Satisfiable => {
                core_dead::detect(&mut context, None)?;
                clean::clean_with_units(&mut context, self.cnf.clauses())?
            }
        };

        let detected_strong = match self.config.detect_strong.value {
            true => discovery::discover(&mut context, &clauses, None)?,
            false => Vec::default(),
        };
        extend_with_detected(&mut clauses, &detected_strong);

        let (clauses, redundant) = match self.config.check_redundancy.value {
            true => redundancy::filter(
                clauses,
                self.cnf.variable_count(),
                self.config,
                &[],
                &mut context.counters,
            )?,
            false => (clauses, Vec::default()),
        };

        let mut counters = context.counters;
        counters.time = start.elapsed();

        let draft = Draft {
            cnf: self.cnf.clone(),
            status: context.status,
            clauses,
            detected_strong,
            redundant,
            counters,
            changes: None,
        };
        Ok(draft.finish()?)
    }
}

/// Adds the binary clause of each detected edge to `clauses`, without duplicates.
pub(crate) fn extend_with_detected(clauses: &mut Vec<CClause>, detected: &[[CLiteral; 2]]) {
    clauses.extend(detected.iter().map(|pair| {
        let mut clause = pair.to_vec();
        clause.sort_unstable_by_key(|l| (l.atom(), l.polarity()));
        clause
    }));
    clauses.sort_unstable();
    clauses.dedup();
}

impl Graph {
    /// Builds a graph of `cnf` from scratch.
    ///
    /// Returns [Unsatisfiable](err::BuildError::Unsatisfiable) if `cnf` is unsatisfiable.
    pub fn build_regular(cnf: &Cnf, config: &Config) -> Result<Graph, err::ErrorKind> {
        Builder::new(cnf, config).build(BuildMode::Regular)
    }

    /// Builds a graph of `cnf` from a previous graph, with variables of the two formulas matched by name.
    ///
    /// Returns [Unsatisfiable](err::BuildError::Unsatisfiable) if `cnf` is unsatisfiable.
    pub fn build_incremental(previous: &Graph, cnf: &Cnf, config: &Config) -> Result<Graph, err::ErrorKind> {
        Builder::new(cnf, config).build(BuildMode::Incremental { previous })
    }
}
