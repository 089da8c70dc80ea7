/*!
Incremental builds, from a previous graph.

# Changes

The clauses of the formula of the previous graph and the given formula are compared as sets, after each clause is [normalised](normalise) and the atoms of the previous formula are mapped to atoms of the given formula by [name](crate::structures::cnf::VariableMap).
A clause of the previous formula with some atom whose name is absent from the given formula is taken to be removed.

The comparison is summarised as [Changes]:

| Changes     | Added clauses | Removed clauses |
|-------------|---------------|-----------------|
| `Unchanged` | no            | no              |
| `Added`     | yes           | no              |
| `Removed`   | no            | yes             |
| `Replaced`  | yes           | yes             |

The atoms of added clauses are *affected*.

# Reuse

What may be reused from the previous graph depends on the changes:

- `Unchanged`: everything.
  If the atoms of the two formulas are identical the previous graph is copied, and otherwise the graph is rebuilt from the previous status of each atom without any query.
- `Added`: any model of the given formula is a model of the previous formula.
  So, each core literal of the previous graph is core, and each strong edge of the previous graph holds.
  Core literals are searched for among the affected atoms, and each new core literal is propagated through the previous graph.
- `Removed`: the given formula may have more models than the previous formula.
  So, each core literal of the previous graph is checked, and each strong edge found by discovery is checked.
  No literal outside the previous core can be core.
- `Replaced`: as `Removed`, and then core literals are searched for among the affected atoms.

On `Added` and `Replaced` an added clause may also fix atoms it does not contain, so the search continues over the remaining atoms.
Most candidates there are refuted by the models already found, without a query.

Clauses found to be redundant in the previous graph remain redundant on `Unchanged` and `Added`, and are skipped without a query.
If [detect_strong](crate::config::Config::detect_strong) and [add](crate::config::Config::add) are set, discovery is made from the vertices of affected atoms.

```rust
# use otter_mig::builder::incremental::Changes;
# use otter_mig::config::Config;
# use otter_mig::graph::Graph;
# use otter_mig::structures::cnf::Cnf;
let config = Config::default();
let cnf = Cnf::from_clauses([vec![1, 2], vec![-2, 3]]);
let graph = Graph::build_regular(&cnf, &config).unwrap();

let cnf = Cnf::from_clauses([vec![1, 2], vec![-2, 3], vec![-1]]);
let next = Graph::build_incremental(&graph, &cnf, &config).unwrap();

assert_eq!(next.changes(), Some(Changes::Added));
assert_eq!(next.core(), &[-1, 2, 3]);
```
*/

use std::{collections::HashSet, time::Instant};

use crate::{
    builder::{clean, core_dead, discovery, extend_with_detected, redundancy, BuildContext, Counters},
    config::Config,
    graph::{Draft, Graph},
    misc::log::targets::{self},
    reports::Report,
    structures::{
        atom::Atom,
        clause::{normalise, CClause},
        cnf::Cnf,
        literal::{CLiteral, Literal},
    },
    types::err::{self},
};

/// The changes between two formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Changes {
    Unchanged,
    Added,
    Removed,
    Replaced,
}

impl Changes {
    fn from_differences(added: bool, removed: bool) -> Self {
        match (added, removed) {
            (false, false) => Changes::Unchanged,
            (true, false) => Changes::Added,
            (false, true) => Changes::Removed,
            (true, true) => Changes::Replaced,
        }
    }

    /// Whether the models of the given formula are a subset of the models of the previous formula.
    pub fn is_monotone(&self) -> bool {
        matches!(self, Changes::Unchanged | Changes::Added)
    }
}

impl std::fmt::Display for Changes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unchanged => write!(f, "Unchanged"),
            Self::Added => write!(f, "Added"),
            Self::Removed => write!(f, "Removed"),
            Self::Replaced => write!(f, "Replaced"),
        }
    }
}

/// The differences between the clauses of a previous and a given formula.
#[derive(Clone, Debug)]
pub struct Delta {
    pub changes: Changes,

    /// Normalised clauses of the given formula absent from the previous formula.
    pub added: Vec<CClause>,

    /// Normalised clauses of the previous formula absent from the given formula, over the atoms of the previous formula.
    pub removed: Vec<CClause>,

    /// For each atom of the previous formula, the atom of the given formula with the same name, by atom - 1.
    pub translation: Vec<Option<Atom>>,

    /// For each atom of the given formula, the atom of the previous formula with the same name, by atom - 1.
    pub inverse: Vec<Option<Atom>>,
}

impl Delta {
    /// Whether each atom of the previous formula is the same atom of the given formula, and the reverse.
    pub fn is_identity(&self) -> bool {
        self.translation.len() == self.inverse.len()
            && self
                .translation
                .iter()
                .enumerate()
                .all(|(index, atom)| *atom == Some(index as Atom + 1))
    }

    /// The literal of the given formula for a literal of the previous formula.
    pub fn forward(&self, literal: CLiteral) -> Option<CLiteral> {
        translate(&self.translation, literal)
    }

    /// The literal of the previous formula for a literal of the given formula.
    pub fn backward(&self, literal: CLiteral) -> Option<CLiteral> {
        translate(&self.inverse, literal)
    }

    /// The atoms of added clauses, as a scope indexed by atom - 1.
    pub fn affected(&self) -> Vec<bool> {
        let mut scope = vec![false; self.inverse.len()];
        for literal in self.added.iter().flatten() {
            scope[literal.atom_index()] = true;
        }
        scope
    }
}

fn translate(translation: &[Option<Atom>], literal: CLiteral) -> Option<CLiteral> {
    match literal {
        0 => None,
        _ => translation
            .get(literal.atom_index())
            .copied()
            .flatten()
            .map(|atom| CLiteral::new(atom, literal.polarity())),
    }
}

/// Classifies the changes from `previous` to `cnf`.
pub fn classify(previous: &Cnf, cnf: &Cnf) -> Delta {
    let translation = previous.variables().translation_to(cnf.variables());
    let inverse = cnf.variables().translation_to(previous.variables());

    let given = cnf
        .clauses()
        .iter()
        .filter_map(|clause| normalise(clause))
        .collect::<HashSet<_>>();

    let mut translated = HashSet::with_capacity(previous.clauses().len());
    let mut removed = Vec::default();
    for clause in previous.clauses() {
        let Some(the_clause) = normalise(clause) else {
            continue;
        };

        let mapped = the_clause
            .iter()
            .map(|literal| translate(&translation, *literal))
            .collect::<Option<Vec<_>>>()
            .and_then(|mapped| normalise(&mapped));

        match mapped {
            Some(mapped) if given.contains(&mapped) => {
                translated.insert(mapped);
            }
            _ => removed.push(the_clause),
        }
    }

    let mut added = given
        .into_iter()
        .filter(|clause| !translated.contains(clause))
        .collect::<Vec<_>>();
    added.sort_unstable();
    removed.sort_unstable();
    removed.dedup();

    Delta {
        changes: Changes::from_differences(!added.is_empty(), !removed.is_empty()),
        added,
        removed,
        translation,
        inverse,
    }
}

/// Builds a graph of `cnf` from `previous`.
pub(super) fn build(
    cnf: &Cnf,
    config: &Config,
    previous: &Graph,
    start: Instant,
) -> Result<Graph, err::ErrorKind> {
    let delta = classify(previous.cnf(), cnf);
    log::info!(
        target: targets::INCREMENTAL,
        "{}: {} clauses added, {} removed",
        delta.changes,
        delta.added.len(),
        delta.removed.len()
    );

    if delta.changes == Changes::Unchanged && delta.is_identity() {
        let counters = Counters {
            time: start.elapsed(),
            ..Counters::default()
        };
        return Ok(previous.with_formula(cnf.clone(), counters, Changes::Unchanged));
    }

    let mut context = BuildContext::open(cnf, config)?;
    let previous_core = previous
        .core()
        .iter()
        .filter_map(|literal| delta.forward(*literal))
        .collect::<Vec<_>>();
    let affected = delta.affected();

    let mut clauses = match delta.changes {
        Changes::Unchanged => {
            for literal in &previous_core {
                context.fix(*literal);
            }
            clean::clean(cnf.clauses(), &context.status)
        }

        changes => {
            let report = context.query();
            match report {
                Report::Unsatisfiable => {
                    log::info!(target: targets::INCREMENTAL, "Formula unsatisfiable");
                    return Err(err::ErrorKind::from(err::BuildError::Unsatisfiable));
                }
                Report::Unknown => {
                    log::warn!(target: targets::INCREMENTAL, "Entry query timed out");
                }
                Report::Satisfiable => {}
            }

            if changes.is_monotone() {
                for literal in &previous_core {
                    context.fix_and_assume(*literal)?;
                }
            } else if report == Report::Satisfiable {
                core_dead::reverify(&mut context, &previous_core)?;
            }

            if report == Report::Satisfiable && !delta.added.is_empty() {
                ensure_model(&mut context);
                core_dead::detect(&mut context, Some(&affected))?;

                if changes.is_monotone() {
                    propagate_through(previous, &delta, &mut context)?;
                }

                // Added clauses may fix atoms outside the affected atoms.
                let unaffected = affected.iter().map(|a| !a).collect::<Vec<_>>();
                ensure_model(&mut context);
                core_dead::detect(&mut context, Some(&unaffected))?;
            }

            match report {
                Report::Satisfiable => clean::clean_with_units(&mut context, cnf.clauses())?,
                _ => clean::clean(cnf.clauses(), &context.status),
            }
        }
    };

    let mut detected_strong = carried_edges(previous, &delta, &mut context);
    if config.detect_strong.value && config.add.value && !delta.added.is_empty() {
        let found = discovery::discover(&mut context, &clauses, Some(&affected))?;
        detected_strong.extend(found);
    }
    detected_strong.sort_unstable();
    detected_strong.dedup();
    extend_with_detected(&mut clauses, &detected_strong);

    let (clauses, redundant) = match config.check_redundancy.value {
        true => {
            let known = match delta.changes.is_monotone() {
                true => previous
                    .redundant()
                    .iter()
                    .filter_map(|clause| {
                        let mapped = clause
                            .iter()
                            .map(|literal| delta.forward(*literal))
                            .collect::<Option<Vec<_>>>()?;
                        clean::clean_clause(&mapped, &context.status)
                    })
                    .collect::<Vec<_>>(),
                false => Vec::default(),
            };
            redundancy::filter(clauses, cnf.variable_count(), config, &known, &mut context.counters)?
        }
        false => (clauses, Vec::default()),
    };

    let mut counters = context.counters;
    counters.time = start.elapsed();

    let draft = Draft {
        cnf: cnf.clone(),
        status: context.status,
        clauses,
        detected_strong,
        redundant,
        counters,
        changes: Some(delta.changes),
    };
    Ok(draft.finish()?)
}

/// Queries the oracle if the most recent query did not find a model.
fn ensure_model(context: &mut BuildContext) {
    if context.oracle.model().is_none() {
        context.query();
    }
}

/// Propagates the core literals of the context through the previous graph, and fixes each literal found.
///
/// Only sound if the changes are monotone.
fn propagate_through(previous: &Graph, delta: &Delta, context: &mut BuildContext) -> Result<(), err::ErrorKind> {
    let core = context
        .core()
        .iter()
        .filter_map(|literal| delta.backward(*literal))
        .collect::<Vec<_>>();

    let mut engine = previous.engine();
    if engine.propagate(&core).is_err() {
        log::warn!(target: targets::INCREMENTAL, "Core literals contradict the previous graph");
        return Ok(());
    }

    let mut found = 0;
    for literal in engine.added_literals() {
        if let Some(literal) = delta.forward(literal) {
            if context.is_normal(literal) {
                context.fix_and_assume(literal)?;
                found += 1;
            }
        }
    }
    log::info!(target: targets::INCREMENTAL, "Propagated {found} core literals through the previous graph");
    Ok(())
}

/// The strong edges found by discovery for the previous graph which hold for the given formula, each as a binary clause.
///
/// Edges are carried without a query when the changes are monotone, and are checked otherwise.
fn carried_edges(previous: &Graph, delta: &Delta, context: &mut BuildContext) -> Vec<[CLiteral; 2]> {
    let mut carried = Vec::default();

    for [a, b] in previous.detected_strong() {
        let (Some(a), Some(b)) = (delta.forward(*a), delta.forward(*b)) else {
            continue;
        };
        let Some(clause) = clean::clean_clause(&[a, b], &context.status) else {
            continue;
        };
        if clause.len() != 2 {
            continue;
        }

        let holds = match delta.changes.is_monotone() {
            true => true,
            false => context.query_given(&[a.negate(), b.negate()]) == Report::Unsatisfiable,
        };
        if holds {
            carried.push([clause[0], clause[1]]);
        }
    }

    log::info!(
        target: targets::INCREMENTAL,
        "Carried {} of {} detected strong edges",
        carried.len(),
        previous.detected_strong().len()
    );
    carried
}

#[cfg(test)]
mod tests {
    use crate::structures::cnf::VariableMap;

    use super::*;

    #[test]
    fn classify_identical() {
        let cnf = Cnf::from_clauses([vec![1, 2], vec![-2, 3, 1]]);
        let reordered = Cnf::from_clauses([vec![3, 1, -2], vec![2, 1, 0]]);

        let delta = classify(&cnf, &reordered);
        assert_eq!(delta.changes, Changes::Unchanged);
        assert!(delta.is_identity());
    }

    #[test]
    fn classify_by_name() {
        let mut previous = Cnf::new(VariableMap::from_names(["a", "b", "c"]));
        previous.add_clause([1, 2]);
        previous.add_clause([-3, 2]);

        let mut given = Cnf::new(VariableMap::from_names(["c", "b", "a"]));
        given.add_clause([3, 2]);
        given.add_clause([-1, 2]);

        let delta = classify(&previous, &given);
        assert_eq!(delta.changes, Changes::Unchanged);
        assert!(!delta.is_identity());
        assert_eq!(delta.forward(-1), Some(-3));
        assert_eq!(delta.backward(2), Some(2));
    }

    #[test]
    fn classify_each_change() {
        let previous = Cnf::from_clauses([vec![1, 2], vec![2, 3]]);

        let added = Cnf::from_clauses([vec![1, 2], vec![2, 3], vec![-1, 4]]);
        let removed = Cnf::from_clauses([vec![1, 2], vec![3, 0]]);
        let replaced = Cnf::from_clauses([vec![1, 2], vec![-2, 3]]);

        let delta = classify(&previous, &added);
        assert_eq!(delta.changes, Changes::Added);
        assert_eq!(delta.added, vec![vec![-1, 4]]);
        assert_eq!(delta.affected(), vec![true, false, false, true]);

        assert_eq!(classify(&previous, &removed).changes, Changes::Replaced);
        assert_eq!(classify(&previous, &Cnf::from_clauses([vec![1, 2]])).changes, Changes::Removed);
        assert_eq!(classify(&previous, &replaced).changes, Changes::Replaced);
    }

    #[test]
    fn vanished_atom_is_removed() {
        let mut previous = Cnf::new(VariableMap::from_names(["a", "b"]));
        previous.add_clause([1, 2]);
        let mut given = Cnf::new(VariableMap::from_names(["a"]));
        given.add_clause([1]);

        let delta = classify(&previous, &given);
        assert_eq!(delta.changes, Changes::Replaced);
        assert_eq!(delta.removed, vec![vec![1, 2]]);
    }
}
