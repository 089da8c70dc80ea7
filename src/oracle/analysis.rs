/*!
Conflict analysis.

# Overview

From a conflicting clause, resolution against the reasons of literals valued at the current level derives a clause with exactly one literal valued at the current level: the first unique implication point.

The derived clause is *asserting*: after a backjump to the greatest level of the remaining literals the negation of the unique implication point is a consequence of the clause.

Each atom met during analysis has its activity bumped.
*/

use rand::SeedableRng;

use crate::{
    oracle::{db::ClauseKey, GenericOracle},
    structures::{clause::CClause, literal::Literal},
};

impl<R: rand::Rng + SeedableRng> GenericOracle<R> {
    /// Derives an asserting clause from a conflict at some level above the root.
    ///
    /// Returns the clause, with the asserted literal first and a literal of the greatest remaining level second, together with the level to backjump to.
    pub(super) fn analyse(&mut self, conflict: ClauseKey) -> (CClause, u32) {
        let current_level = self.trail.level();
        let mut learnt: CClause = vec![0];
        let mut unresolved = 0;
        let mut trail_index = self.trail.literals.len();
        let mut reason = Some(conflict);
        let mut pivot = None;

        loop {
            if let Some(stored) = reason.and_then(|key| self.clause_db.clauses.get(key)) {
                for literal in &stored.literals {
                    if Some(*literal) == pivot {
                        continue;
                    }
                    let index = literal.atom_index();
                    if self.seen[index] || self.levels[index] == 0 {
                        continue;
                    }

                    self.seen[index] = true;
                    self.heap.bump(index, self.bump);

                    match self.levels[index] == current_level {
                        true => unresolved += 1,
                        false => learnt.push(*literal),
                    }
                }
            }

            // The most recently valued literal yet to be resolved.
            let next = loop {
                trail_index -= 1;
                let candidate = self.trail.literals[trail_index];
                if self.seen[candidate.atom_index()] {
                    break candidate;
                }
            };

            self.seen[next.atom_index()] = false;
            unresolved -= 1;

            if unresolved == 0 {
                learnt[0] = next.negate();
                break;
            }

            reason = self.clause_db.reasons[next.atom_index()];
            pivot = Some(next);
        }

        for literal in &learnt[1..] {
            self.seen[literal.atom_index()] = false;
        }

        let mut backjump_level = 0;
        if learnt.len() > 1 {
            let mut max_position = 1;
            for position in 2..learnt.len() {
                if self.levels[learnt[position].atom_index()]
                    > self.levels[learnt[max_position].atom_index()]
                {
                    max_position = position;
                }
            }
            learnt.swap(1, max_position);
            backjump_level = self.levels[learnt[1].atom_index()];
        }

        (learnt, backjump_level)
    }
}
