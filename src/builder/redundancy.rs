/*!
Removal of redundant clauses.

A clause is *redundant* if it is entailed by the other clauses of a formula, and so a clause *C* is redundant given some clauses if the clauses together with the negation of *C* are unsatisfiable.

Clauses are checked in order of length, shortest first, against a scratch oracle which holds each clause kept so far:
- A clause of fewer than three literals is always kept.
- A clause of three or more literals is redundant if the scratch oracle is unsatisfiable given the negation of the clause, and is kept otherwise (including on a timeout).

As short clauses are less likely to be redundant, and simplify the queries made for longer clauses, a clause is only ever checked against clauses of at most the same length.
So, of two clauses which entail each other, the first in order is kept.

```rust
# use otter_mig::builder::{redundancy, Counters};
# use otter_mig::config::Config;
let clauses = vec![vec![1, 2, 3], vec![1, 2], vec![1, 2, 3, 4]];
let mut counters = Counters::default();

let (kept, redundant) = redundancy::filter(clauses, 4, &Config::default(), &[], &mut counters).unwrap();
assert_eq!(kept, vec![vec![1, 2]]);
assert_eq!(redundant, vec![vec![1, 2, 3], vec![1, 2, 3, 4]]);
```
*/

use std::collections::HashSet;

use crate::{
    builder::Counters,
    config::Config,
    misc::log::targets::{self},
    oracle::Oracle,
    reports::Report,
    structures::clause::{negation, CClause},
    types::err::{self},
};

/// Splits `clauses` into those kept and those found redundant, each sorted.
///
/// A clause in `known` is taken to be redundant without a query.
pub fn filter(
    mut clauses: Vec<CClause>,
    atom_count: usize,
    config: &Config,
    known: &[CClause],
    counters: &mut Counters,
) -> Result<(Vec<CClause>, Vec<CClause>), err::ErrorKind> {
    clauses.sort_by_key(|clause| clause.len());
    let known = known.iter().collect::<HashSet<_>>();

    let mut scratch = Oracle::new(atom_count, config);
    let mut kept = Vec::with_capacity(clauses.len());
    let mut redundant = Vec::default();

    for clause in clauses {
        if clause.len() > 2 {
            if known.contains(&clause) {
                redundant.push(clause);
                continue;
            }

            let report = scratch.solve_given(&negation(&clause));
            if counters.note(report) == Report::Unsatisfiable {
                log::trace!(target: targets::REDUNDANCY, "Redundant {clause:?}");
                redundant.push(clause);
                continue;
            }
        }

        if scratch.push_clause(&clause).is_err() {
            return Err(err::ErrorKind::from(err::BuildError::Unsatisfiable));
        }
        kept.push(clause);
    }

    kept.sort_unstable();
    redundant.sort_unstable();
    counters.redundant += redundant.len();

    log::info!(
        target: targets::REDUNDANCY,
        "Kept {} clauses, {} redundant",
        kept.len(),
        redundant.len()
    );
    Ok((kept, redundant))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolvent_is_redundant() {
        let clauses = vec![vec![-1, 2], vec![-2, 3, 4], vec![-1, 3, 4], vec![1, 3, 5]];
        let mut counters = Counters::default();

        let (kept, redundant) = filter(clauses, 5, &Config::default(), &[], &mut counters).unwrap();
        assert_eq!(redundant, vec![vec![-1, 3, 4]]);
        assert_eq!(kept.len(), 3);
        assert_eq!(counters.redundant, 1);
    }

    #[test]
    fn known_redundant_skips_query() {
        let clauses = vec![vec![1, 2, 3]];
        let mut counters = Counters::default();

        let (kept, redundant) =
            filter(clauses.clone(), 3, &Config::default(), &clauses, &mut counters).unwrap();
        assert!(kept.is_empty());
        assert_eq!(redundant.len(), 1);
        assert_eq!(counters.queries, 0);
    }

    #[test]
    fn timeout_keeps() {
        let mut config = Config::default();
        config.time_limit.value = std::time::Duration::ZERO;

        let clauses = vec![vec![1, 2], vec![1, 2, 3]];
        let mut counters = Counters::default();

        let (kept, redundant) = filter(clauses, 3, &config, &[], &mut counters).unwrap();
        assert_eq!(kept.len(), 2);
        assert!(redundant.is_empty());
        assert_eq!(counters.timeouts, 1);
    }
}
