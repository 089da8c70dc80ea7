/*!
Discovery of strong edges hidden in weak clauses.

A strong edge *v → m* may hold without following from the binary clauses of a formula.
For example, given the clauses *(-a ∨ b ∨ c)*, *(-a ∨ b ∨ -c)*, the edge *a → b* holds, though neither clause is binary.
Discovery searches for such edges, by query.

# Overview

For each normal vertex *v*:

1. A *forced* model is made, as the intersection of each model in the history of the oracle on which *v* is true.
   If no such model exists, the oracle is queried with *v* assumed.
   The forced model is an over-approximation of the literals implied by *v*: a literal false on some model with *v* true is not implied by *v*.
2. *v*, and each strong neighbour of *v*, is marked, and the literals of each weak clause registered with *v* (or some strong neighbour of *v*) are queued.
3. For each queued literal whose atom has a value *m* on the forced model, the oracle is queried with *v* and *-m* assumed:
   - Unsatisfiable: the edge *v → m* is recorded, *m* is assumed for the remaining queries of *v*, and the literals of weak clauses registered with *m* (and strong neighbours of *m*) are queued.
   - Satisfiable: the forced model is intersected with the model found.
   - Unknown: nothing is recorded.
4. The assumptions made for *v* are cleared.

Each recorded edge is returned as the binary clause *(-v ∨ m)*, with literals ordered by atom.

# Completeness

Discovery is best-effort.
Only literals which share some weak clause with *v*, or some literal found to be implied by *v*, are tested, and a test which times out is skipped.
So, some strong edge may remain undiscovered.

```rust
# use otter_mig::builder::{BuildContext, clean, discovery};
# use otter_mig::config::Config;
# use otter_mig::structures::cnf::Cnf;
let cnf = Cnf::from_clauses([vec![-1, 2, 3], vec![-1, 2, -3]]);
let mut context = BuildContext::open(&cnf, &Config::default()).unwrap();

let clauses = clean::clean(cnf.clauses(), &context.status);
let detected = discovery::discover(&mut context, &clauses, None).unwrap();

assert!(detected.contains(&[-1, 2]));
```
*/

use std::collections::VecDeque;

use crate::{
    builder::BuildContext,
    graph::{strong::StrongEdges, weak::WeakIndex},
    misc::log::targets::{self},
    oracle::PhaseSelection,
    reports::Report,
    structures::{
        clause::CClause,
        literal::{CLiteral, Literal},
        vertex::{vertex_index, vertex_literal},
    },
    types::err::{self},
};

/// Scratch structures used during discovery.
struct Scratch {
    strong: StrongEdges,
    weak: WeakIndex,

    /// Marks, by atom - 1.
    marked: Vec<bool>,

    /// Marked atoms, by atom - 1, to unmark.
    touched: Vec<usize>,

    queue: VecDeque<CLiteral>,
}

impl Scratch {
    fn mark(&mut self, literal: CLiteral) -> bool {
        let index = literal.atom_index();
        match self.marked[index] {
            true => false,
            false => {
                self.marked[index] = true;
                self.touched.push(index);
                true
            }
        }
    }

    fn clear_marks(&mut self) {
        for index in self.touched.drain(..) {
            self.marked[index] = false;
        }
        self.queue.clear();
    }

    /// Marks the strong neighbours of `literal`, and queues each unmarked literal of the weak clauses of `literal` or a strong neighbour.
    fn expand(&mut self, literal: CLiteral) {
        let neighbours = self.strong.neighbours(literal).to_vec();
        for neighbour in &neighbours {
            self.mark(*neighbour);
        }

        for source in std::iter::once(literal).chain(neighbours) {
            let clauses = self
                .weak
                .registered(vertex_index(source))
                .flat_map(|(start, slot)| self.weak.clause_at(start, slot).iter().copied())
                .collect::<Vec<_>>();

            for clause_literal in clauses {
                if self.mark(clause_literal) {
                    self.queue.push_back(clause_literal);
                }
            }
        }
    }
}

/// Searches for strong edges between literals of `clauses`, returning each edge found as a binary clause.
///
/// `clauses` are expected to be clean, relative to the status of the context.
/// If `scope` is given, only vertices whose atom has a true entry (by atom - 1) are searched from.
pub fn discover(
    context: &mut BuildContext,
    clauses: &[CClause],
    scope: Option<&[bool]>,
) -> Result<Vec<[CLiteral; 2]>, err::ErrorKind> {
    let atom_count = context.atom_count();

    let mut strong = StrongEdges::with_atom_count(atom_count);
    for clause in clauses.iter().filter(|clause| clause.len() == 2) {
        strong.add_clause(clause[0], clause[1]);
    }
    strong.close(&context.status);

    let weak = WeakIndex::build(
        atom_count,
        clauses
            .iter()
            .filter(|clause| clause.len() > 2)
            .map(|clause| clause.as_slice()),
    );

    let mut scratch = Scratch {
        strong,
        weak,
        marked: vec![false; atom_count],
        touched: Vec::default(),
        queue: VecDeque::default(),
    };

    let mut detected = Vec::default();
    let timeouts_before = context.counters.timeouts;

    for vertex in 0..2 * atom_count {
        let literal = vertex_literal(vertex);
        if !context.is_normal(literal) || !scope.map_or(true, |scope| scope[literal.atom_index()]) {
            continue;
        }

        let Some(mut forced) = forced_model(context, literal) else {
            continue;
        };

        let base = context.oracle.assumption_count();
        context.oracle.assumption_push(literal)?;

        scratch.mark(literal);
        scratch.expand(literal);

        while let Some(candidate) = scratch.queue.pop_front() {
            let implied = forced[candidate.atom_index()];
            if implied == 0 || !context.is_normal(implied) {
                continue;
            }

            context.oracle.assumption_push(implied.negate())?;
            match context.query() {
                Report::Unsatisfiable => {
                    log::trace!(target: targets::DISCOVERY, "{literal} → {implied}");
                    context.oracle.assumption_replace_last(implied)?;

                    let mut edge = [literal.negate(), implied];
                    edge.sort_unstable_by_key(|l| (l.atom(), l.polarity()));
                    detected.push(edge);
                    scratch.strong.add_edge(literal, implied);
                    scratch.strong.add_edge(implied.negate(), literal.negate());
                    scratch.expand(implied);
                }

                Report::Satisfiable => {
                    context.oracle.assumption_pop();
                    if let Some(model) = context.oracle.model() {
                        intersect(&mut forced, model);
                    }
                    context.oracle.set_phase(PhaseSelection::Inverse(forced.clone()));
                }

                Report::Unknown => {
                    context.oracle.assumption_pop();
                }
            }
        }

        context.oracle.assumption_clear_to(base);
        context.oracle.set_phase(PhaseSelection::Original);
        scratch.clear_marks();
    }

    context.counters.detected_strong += detected.len();

    let timeouts = context.counters.timeouts - timeouts_before;
    match timeouts {
        0 => log::info!(target: targets::DISCOVERY, "Detected {} strong edges", detected.len()),
        _ => log::warn!(
            target: targets::DISCOVERY,
            "Detected {} strong edges, with {timeouts} timeouts",
            detected.len()
        ),
    }

    Ok(detected)
}

/// The intersection of the models in the history of the oracle on which `literal` is true.
///
/// If no such model exists the oracle is queried with `literal` assumed, and `None` is returned if the query does not find a model.
fn forced_model(context: &mut BuildContext, literal: CLiteral) -> Option<Vec<CLiteral>> {
    let mut the_forced: Option<Vec<CLiteral>> = None;
    for model in context.oracle.history().containing(literal) {
        match the_forced.as_mut() {
            Some(forced) => intersect(forced, model),
            None => the_forced = Some(model.to_vec()),
        }
    }

    if the_forced.is_some() {
        return the_forced;
    }

    context.oracle.set_phase(PhaseSelection::Original);
    match context.query_given(&[literal]) {
        Report::Satisfiable => context.oracle.model().map(|model| model.to_vec()),
        _ => None,
    }
}

/// Clears each literal of `forced` which differs from the literal of the same atom on `model`.
fn intersect(forced: &mut [CLiteral], model: &[CLiteral]) {
    for (literal, other) in forced.iter_mut().zip(model) {
        if *literal != *other {
            *literal = 0;
        }
    }
}
