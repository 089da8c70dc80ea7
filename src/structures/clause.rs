/*!
Clauses, as vectors of literals.

A clause is a disjunction of literals, and the empty clause is false.
In the context of a graph:
- A clause of two literals is *strong*, and gives a pair of edges.
- A clause of three or more literals is *weak*, and is registered with the vertex of the negation of each of its literals.

Clauses are compared as sets, and so [normalise] is used to fix a representation before a comparison is made.
*/

use crate::structures::literal::{CLiteral, Literal};

/// The canonical representation of a clause.
pub type CClause = Vec<CLiteral>;

/// The normal form of a clause: literals sorted by atom and then polarity, without duplicates or the zero literal.
///
/// Returns `None` if the clause contains some literal together with its negation.
///
/// ```rust
/// # use otter_mig::structures::clause::normalise;
/// assert_eq!(normalise(&[3, -1, 0, 3, 2]), Some(vec![-1, 2, 3]));
/// assert_eq!(normalise(&[3, -1, -3]), None);
/// ```
pub fn normalise(clause: &[CLiteral]) -> Option<CClause> {
    let mut the_clause: CClause = clause.iter().copied().filter(|l| *l != 0).collect();
    the_clause.sort_unstable_by_key(|l| (l.atom(), l.polarity()));
    the_clause.dedup();

    match the_clause.windows(2).any(|pair| pair[0] == -pair[1]) {
        true => None,
        false => Some(the_clause),
    }
}

/// The literals whose conjunction is the negation of the clause.
pub fn negation(clause: &[CLiteral]) -> CClause {
    clause.iter().map(|l| l.negate()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_order() {
        assert_eq!(normalise(&[-5, 4, -2]), Some(vec![-2, 4, -5]));
        assert_eq!(normalise(&[0, 0]), Some(vec![]));
    }

    #[test]
    fn tautology() {
        assert_eq!(normalise(&[1, 2, 3, -2]), None);
    }
}
