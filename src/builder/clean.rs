/*!
Removal of core and dead literals from clauses.

For each clause:
- If some literal of the clause is core, the clause is true on every model, and is dropped.
- Each dead literal (and zero literal) is retired from a [LiveBuffer] of the clause.
- The remaining literals are [normalised](normalise), and the clause is dropped if it contains some literal together with its negation.

A clean clause of two literals gives a pair of strong edges, and a clean clause of three or more literals is weak.

A clean clause of a single literal *l* entails *l*, as every other literal of the clause is dead.
So, [clean_with_units] fixes *l* as core and cleans again, until no clause cleans to a single literal.
This happens whenever the search for core literals is partial, e.g. after a timeout or when an incremental build searches only some atoms.
The reasoning requires the formula to be satisfiable, so if the satisfiability of the formula is unknown [clean] is used, and a clause of a single literal is dropped with a warning.
A clause without any live literal is always dropped, with a warning.

```rust
# use otter_mig::builder::clean::clean;
# use otter_mig::structures::vertex::{vertex_index, Status};
let mut status = vec![Status::Normal; 8];
status[vertex_index(1)] = Status::Core;
status[vertex_index(-1)] = Status::Dead;

let clauses = vec![vec![1, 2, 3], vec![-1, 2, 3], vec![3, -1, 4, 2]];
assert_eq!(clean(&clauses, &status), vec![vec![2, 3], vec![2, 3, 4]]);
```
*/

use crate::{
    builder::BuildContext,
    generic::buffer::LiveBuffer,
    misc::log::targets::{self},
    structures::{
        clause::{normalise, CClause},
        literal::CLiteral,
        vertex::{vertex_index, Status},
    },
    types::err::{self},
};

/// The clean clauses of two or more literals, sorted and without duplicates.
pub fn clean(clauses: &[CClause], status: &[Status]) -> Vec<CClause> {
    let mut the_clean = Vec::with_capacity(clauses.len());
    let mut dropped = 0;

    for clause in clauses {
        match clean_clause(clause, status) {
            Some(clean) if clean.len() > 1 => the_clean.push(clean),
            Some(clean) => {
                log::warn!(target: targets::CLEAN, "Dropped {clause:?}, as {clean:?} after cleaning");
                dropped += 1;
            }
            None => dropped += 1,
        }
    }

    the_clean.sort_unstable();
    the_clean.dedup();

    log::info!(
        target: targets::CLEAN,
        "{} clean clauses, {dropped} dropped",
        the_clean.len()
    );
    the_clean
}

/// As [clean], after fixing the literal of each clause which cleans to a single literal as core.
///
/// Fixing a literal may leave some other clause with a single literal, so clauses are cleaned until none is.
pub fn clean_with_units(context: &mut BuildContext, clauses: &[CClause]) -> Result<Vec<CClause>, err::ErrorKind> {
    loop {
        let mut fixed = 0;
        for clause in clauses {
            if let Some([unit]) = clean_clause(clause, &context.status).as_deref() {
                if context.is_normal(*unit) {
                    context.fix_and_assume(*unit)?;
                    fixed += 1;
                }
            }
        }

        if fixed == 0 {
            break;
        }
        log::info!(target: targets::CLEAN, "Fixed {fixed} literals of clauses cleaned to a single literal");
    }

    Ok(clean(clauses, &context.status))
}

/// The clean form of `clause`, or `None` if the clause is true on every model.
pub fn clean_clause(clause: &[CLiteral], status: &[Status]) -> Option<CClause> {
    let mut buffer = LiveBuffer::from(clause.to_vec());

    let mut index = 0;
    while index < buffer.len() {
        let literal = buffer.live()[index];
        if literal == 0 {
            buffer.retire(index);
            continue;
        }
        match status[vertex_index(literal)] {
            Status::Core => return None,
            Status::Dead => buffer.retire(index),
            Status::Normal => index += 1,
        }
    }

    normalise(buffer.live())
}

#[cfg(test)]
mod tests {
    use crate::{
        config::Config,
        structures::{cnf::Cnf, literal::Literal},
    };

    use super::*;

    fn fixed(atom_count: usize, core: &[CLiteral]) -> Vec<Status> {
        let mut status = vec![Status::Normal; 2 * atom_count];
        for literal in core {
            status[vertex_index(*literal)] = Status::Core;
            status[vertex_index(literal.negate())] = Status::Dead;
        }
        status
    }

    #[test]
    fn dead_literals_retired() {
        let status = fixed(4, &[-4]);
        assert_eq!(clean_clause(&[4, 1, 0, 2], &status), Some(vec![1, 2]));
        assert_eq!(clean_clause(&[-4, 1, 2], &status), None);
    }

    #[test]
    fn tautology_dropped() {
        let status = fixed(3, &[]);
        assert_eq!(clean_clause(&[1, -1, 2], &status), None);
        assert!(clean(&[vec![1, -1, 2]], &status).is_empty());
    }

    #[test]
    fn degenerate_dropped() {
        let status = fixed(3, &[1, 2]);
        let clauses = vec![vec![-1, -2], vec![-1, 3], vec![-1, -2, 3, 3]];
        assert!(clean(&clauses, &status).is_empty());
    }

    #[test]
    fn units_become_core() {
        let cnf = Cnf::from_clauses([vec![1, 2], vec![-2, 3], vec![-2, -3], vec![-1, 4, 5]]);
        let mut context = BuildContext::open(&cnf, &Config::default()).unwrap();
        context.fix(-2);

        let clauses = clean_with_units(&mut context, cnf.clauses()).unwrap();
        assert_eq!(context.core(), vec![1, -2]);
        assert_eq!(context.oracle.assumptions(), &[1]);
        assert_eq!(clauses, vec![vec![4, 5]]);
    }

    #[test]
    fn units_chain() {
        let cnf = Cnf::from_clauses([vec![1, 2], vec![-1, 3], vec![-3, 4, 5]]);
        let mut context = BuildContext::open(&cnf, &Config::default()).unwrap();
        context.fix(-2);

        let clauses = clean_with_units(&mut context, cnf.clauses()).unwrap();
        assert_eq!(context.core(), vec![1, -2, 3]);
        assert_eq!(clauses, vec![vec![4, 5]]);
    }

    #[test]
    fn duplicates_merged() {
        let status = fixed(4, &[]);
        let clauses = vec![vec![3, 2, 1], vec![1, 2, 3, 2], vec![2, 4]];
        assert_eq!(clean(&clauses, &status), vec![vec![1, 2, 3], vec![2, 4]]);
    }
}
