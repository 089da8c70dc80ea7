/*!
Determines the satisfiability of the clauses of an oracle, given the assumptions of the oracle.

# Overview

The search loop is a standard conflict-driven loop:

```none
loop {
    check the time limit
    propagate
      - on a conflict at the root level: unsatisfiable
      - on a conflict above the root: analyse, backjump, and assert
      - otherwise:
          + restart, if scheduled
          + decide on the next assumption, or on the most active atom without a value
          + if every atom has a value: satisfiable
}
```

Each assumption is decided on at its own level, before any other decision.
An assumption which is already true is given an empty level, and an assumption which is already false ends the search as unsatisfiable (given the assumptions).
As assumptions are decisions, every learnt clause is a consequence of the clauses of the oracle alone, and is kept between queries.

# Time limit

The time limit is checked on each pass through the loop.
If the time limit is exceeded the search ends with [Unknown](Report::Unknown), and no information about the query is retained.
So, in particular, a time limit of zero answers every query with unknown.
*/

use std::time::Instant;

use rand::SeedableRng;

use crate::{
    generic::luby::Luby,
    misc::log::targets::{self},
    oracle::{GenericOracle, PhaseSelection},
    reports::Report,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
};

/// Activity is rescaled when the bump exceeds this limit.
const ACTIVITY_LIMIT: f64 = 1e100;

impl<R: rand::Rng + SeedableRng> GenericOracle<R> {
    /// Determines satisfiability given the assumptions of the oracle.
    ///
    /// If satisfiable, the model found is available through [model](GenericOracle::model) and is recorded in the [history](GenericOracle::history).
    pub fn solve(&mut self) -> Report {
        let start = Instant::now();
        self.model = None;

        let report = match self.unsatisfiable {
            true => Report::Unsatisfiable,
            false => self.search(start),
        };

        if report == Report::Satisfiable {
            let model = self.valuation_as_model();
            self.history.record(model.clone());
            self.model = Some(model);
        }

        self.backjump(0);
        self.counters.time += start.elapsed();

        log::trace!(target: targets::ORACLE, "{report} given {:?}", self.assumptions);
        self.note_report(report)
    }

    /// Determines satisfiability given the assumptions of the oracle together with `literals`.
    ///
    /// The literals are assumed for this query only, and zero literals are ignored.
    /// A literal whose atom is not an atom of the oracle is also ignored.
    pub fn solve_given(&mut self, literals: &[CLiteral]) -> Report {
        let base = self.assumptions.len();
        for literal in literals {
            if *literal != 0 && self.check_atom(literal.atom()).is_ok() {
                self.assumptions.push(*literal);
            }
        }
        let report = self.solve();
        self.assumptions.truncate(base);
        report
    }

    fn search(&mut self, start: Instant) -> Report {
        let time_limit = self.config.time_limit.value;
        let luby_u = self.config.luby_u.value.max(1);
        let mut luby = Luby::default();
        let mut restart_limit = luby.current().saturating_mul(luby_u);
        let mut fresh_conflicts: u32 = 0;

        'search_loop: loop {
            if start.elapsed() >= time_limit {
                log::trace!(target: targets::ORACLE, "Time limit exceeded");
                return Report::Unknown;
            }

            match self.propagate() {
                Some(conflict) => {
                    self.counters.conflicts += 1;
                    fresh_conflicts = fresh_conflicts.saturating_add(1);

                    if self.trail.level() == 0 {
                        self.unsatisfiable = true;
                        return Report::Unsatisfiable;
                    }

                    let (learnt, level) = self.analyse(conflict);
                    self.backjump(level);

                    match learnt.len() {
                        1 => self.assign(learnt[0], None),
                        _ => {
                            let asserted = learnt[0];
                            let key = self.store_learnt(learnt);
                            self.assign(asserted, Some(key));
                        }
                    }

                    self.decay_activity();
                }

                None => {
                    if self.config.restart.value && fresh_conflicts >= restart_limit {
                        self.counters.restarts += 1;
                        fresh_conflicts = 0;
                        restart_limit = luby.next().unwrap_or(1).saturating_mul(luby_u);
                        self.backjump(0);

                        if self.clause_db.learnt_count() > self.learnt_limit {
                            self.reduce_learnt();
                            self.learnt_limit += self.learnt_limit / 10;
                        }
                        continue 'search_loop;
                    }

                    let mut decision = None;
                    while (self.trail.level() as usize) < self.assumptions.len() {
                        let assumption = self.assumptions[self.trail.level() as usize];
                        match self.value_of(assumption) {
                            Some(true) => self.new_level(),
                            Some(false) => return Report::Unsatisfiable,
                            None => {
                                decision = Some(assumption);
                                break;
                            }
                        }
                    }

                    let decision = match decision {
                        Some(assumption) => assumption,
                        None => match self.choose_literal() {
                            Some(literal) => {
                                self.counters.decisions += 1;
                                literal
                            }
                            None => return Report::Satisfiable,
                        },
                    };

                    self.new_level();
                    self.assign(decision, None);
                }
            }
        }
    }

    /// The literal of the most active atom without a value, with polarity given by the phase selection.
    fn choose_literal(&mut self) -> Option<CLiteral> {
        let index = loop {
            let index = self.heap.pop_max()?;
            if self.valuation[index].is_none() {
                break index;
            }
        };

        let saved = self.config.phase_saving.value && self.saved_phase[index];
        let polarity = match &self.phase {
            PhaseSelection::Original => saved,
            PhaseSelection::Inverse(model) => match model.get(index) {
                Some(literal) if *literal != 0 => !literal.polarity(),
                _ => saved,
            },
            PhaseSelection::Random => self.rng.random_bool(0.5),
        };

        Some(CLiteral::new(index as Atom + 1, polarity))
    }

    fn decay_activity(&mut self) {
        self.bump /= self.config.activity_decay.value.clamp(0.5, 1.0);
        if self.bump > ACTIVITY_LIMIT {
            self.heap.rescale(1.0 / ACTIVITY_LIMIT);
            self.bump /= ACTIVITY_LIMIT;
        }
    }
}
