/*!
Detection of core and dead literals.

A literal is *core* if it is true on every model of a formula, and *dead* if it is false on every model.
So, a literal is core exactly when the negation of the literal is dead, and it is enough to search for core literals.

# Failed literals

A literal *c* is core if and only if the formula together with *-c* is unsatisfiable.
And, if the formula together with *-c* is satisfiable, then every literal false on the model found is not core.

So, the sweep starts from a model and takes each literal of the model as a *candidate*.
For each candidate *c* in turn, the oracle is queried with *-c* assumed:
- Unsatisfiable: *c* is core, and *c* is kept as an assumption for each later query.
- Satisfiable: each candidate false on the model found is cleared.
- Unknown: *c* is cleared, and the atom of *c* is left normal.

To clear as many candidates as possible with each satisfiable query, the oracle is set to prefer the negation of each remaining candidate when making decisions, and the order of decisions is shuffled.

```rust
# use otter_mig::builder::{BuildContext, core_dead};
# use otter_mig::config::Config;
# use otter_mig::structures::cnf::Cnf;
# use otter_mig::structures::vertex::Status;
let cnf = Cnf::from_clauses([vec![1, 2], vec![1, -2], vec![-1, 3, 4]]);
let mut context = BuildContext::open(&cnf, &Config::default()).unwrap();

context.query();
core_dead::detect(&mut context, None).unwrap();

assert_eq!(context.core(), vec![1]);
assert_eq!(context.status_of(-1), Status::Dead);
```
*/

use crate::{
    builder::BuildContext,
    misc::log::targets::{self},
    oracle::PhaseSelection,
    reports::Report,
    structures::literal::{CLiteral, Literal},
    types::err::{self},
};

/// Searches for core literals, from the model of the most recent query of the oracle.
///
/// If `scope` is given, only atoms whose entry (by atom - 1) is true are candidates.
/// An atom which is already core or dead is never a candidate, and neither is a literal false on some model in the history of the oracle.
///
/// If the most recent query of the oracle did not find a model, nothing is done.
pub fn detect(context: &mut BuildContext, scope: Option<&[bool]>) -> Result<(), err::ErrorKind> {
    let Some(model) = context.oracle.model() else {
        return Ok(());
    };

    let mut candidates = model.to_vec();
    for (index, candidate) in candidates.iter_mut().enumerate() {
        let in_scope = scope.map_or(true, |scope| scope[index]);
        if !in_scope || !context.is_normal(*candidate) {
            *candidate = 0;
        }
    }
    for model in context.oracle.history().iter() {
        clear_refuted(&mut candidates, model);
    }
    context.candidates = candidates;

    let found = sweep(context)?;
    log::info!(target: targets::CORE_DEAD, "Found {found} core literals");
    Ok(())
}

/// Checks whether each of `literals` is core, with the failed-literal test.
///
/// Used to check the core literals of a previous graph, each of which may no longer be core.
/// A literal false on the model of the most recent query of the oracle is refuted without a query.
pub fn reverify(context: &mut BuildContext, literals: &[CLiteral]) -> Result<(), err::ErrorKind> {
    let mut candidates = vec![0; context.atom_count()];
    for literal in literals.iter().filter(|l| **l != 0) {
        if context.is_normal(*literal) {
            candidates[literal.atom_index()] = *literal;
        }
    }

    if let Some(model) = context.oracle.model() {
        clear_refuted(&mut candidates, model);
    }
    context.candidates = candidates;

    let found = sweep(context)?;
    log::info!(
        target: targets::CORE_DEAD,
        "Verified {found} of {} previous core literals",
        literals.len()
    );
    Ok(())
}

/// The failed-literal test for each candidate of the context, returning a count of core literals found.
fn sweep(context: &mut BuildContext) -> Result<usize, err::ErrorKind> {
    let mut found = 0;
    context.oracle.set_phase(PhaseSelection::Inverse(context.candidates.clone()));

    for index in 0..context.candidates.len() {
        let candidate = context.candidates[index];
        if candidate == 0 {
            continue;
        }

        context.oracle.assumption_push(candidate.negate())?;
        match context.query() {
            Report::Unsatisfiable => {
                log::trace!(target: targets::CORE_DEAD, "Core {candidate}");
                context.oracle.assumption_replace_last(candidate)?;
                context.fix(candidate);
                context.candidates[index] = 0;
                found += 1;
            }

            Report::Satisfiable => {
                context.oracle.assumption_pop();
                if let Some(model) = context.oracle.model() {
                    clear_refuted(&mut context.candidates, model);
                }
                context.oracle.set_phase(PhaseSelection::Inverse(context.candidates.clone()));
                context.oracle.shuffle_order();
            }

            Report::Unknown => {
                log::warn!(target: targets::CORE_DEAD, "Timeout when testing {candidate}");
                context.oracle.assumption_pop();
                context.candidates[index] = 0;
            }
        }
    }

    context.oracle.set_phase(PhaseSelection::Original);
    Ok(found)
}

/// Clears each candidate which differs from the literal of the same atom on `model`.
fn clear_refuted(candidates: &mut [CLiteral], model: &[CLiteral]) {
    for (candidate, literal) in candidates.iter_mut().zip(model) {
        if *candidate != *literal {
            *candidate = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{config::Config, structures::cnf::Cnf};

    use super::*;

    #[test]
    fn chain_of_units() {
        let cnf = Cnf::from_clauses([vec![1], vec![-1, 2], vec![-2, -3], vec![3, 4, 5]]);
        let mut context = BuildContext::open(&cnf, &Config::default()).unwrap();
        assert_eq!(context.query(), Report::Satisfiable);

        detect(&mut context, None).unwrap();
        assert_eq!(context.core(), vec![1, 2, -3]);
        assert_eq!(context.counters.core, 3);
    }

    #[test]
    fn scope_limits_candidates() {
        let cnf = Cnf::from_clauses([vec![1], vec![2]]);
        let mut context = BuildContext::open(&cnf, &Config::default()).unwrap();
        context.query();

        detect(&mut context, Some(&[false, true])).unwrap();
        assert_eq!(context.core(), vec![2]);
    }

    #[test]
    fn reverify_refutes() {
        let cnf = Cnf::from_clauses([vec![1], vec![-2, 3]]);
        let mut context = BuildContext::open(&cnf, &Config::default()).unwrap();
        context.query();

        reverify(&mut context, &[1, 3, 0]).unwrap();
        assert_eq!(context.core(), vec![1]);
    }

    #[test]
    fn timeout_leaves_normal() {
        let mut config = Config::default();
        config.time_limit.value = std::time::Duration::ZERO;

        let cnf = Cnf::from_clauses([vec![1, 2], vec![1, -2]]);
        let mut context = BuildContext::open(&cnf, &config).unwrap();
        assert_eq!(context.query(), Report::Unknown);

        detect(&mut context, None).unwrap();
        assert!(context.core().is_empty());
    }
}
