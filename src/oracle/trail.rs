/*!
The trail of an oracle: literals in the order they were valued, split into decision levels.

Assigning and unassigning literals are methods of the oracle, as each updates the valuation together with the trail.
*/

use rand::SeedableRng;

use crate::{
    oracle::{db::ClauseKey, GenericOracle},
    structures::literal::{CLiteral, Literal},
};

#[derive(Clone, Debug, Default)]
pub struct Trail {
    /// Valued literals, in order.
    pub literals: Vec<CLiteral>,

    /// The index of the first literal of each decision level, above the root level.
    pub level_starts: Vec<usize>,

    /// The index of the next literal to propagate.
    pub q_head: usize,
}

impl Trail {
    /// The current decision level.
    pub fn level(&self) -> u32 {
        self.level_starts.len() as u32
    }
}

impl<R: rand::Rng + SeedableRng> GenericOracle<R> {
    /// Values the atom of `literal` so that `literal` is true, at the current level.
    ///
    /// The atom of the literal must not have a value.
    pub(super) fn assign(&mut self, literal: CLiteral, reason: Option<ClauseKey>) {
        let index = literal.atom_index();
        self.valuation[index] = Some(literal.polarity());
        self.levels[index] = self.trail.level();
        self.clause_db.reasons[index] = reason;
        self.trail.literals.push(literal);
    }

    /// Opens a fresh decision level.
    pub(super) fn new_level(&mut self) {
        self.trail.level_starts.push(self.trail.literals.len());
    }

    /// Removes every level above `level`, clearing the value of each atom valued above `level`.
    pub(super) fn backjump(&mut self, level: u32) {
        let Some(&start) = self.trail.level_starts.get(level as usize) else {
            return;
        };

        for literal in self.trail.literals.drain(start..) {
            let index = literal.atom_index();
            self.valuation[index] = None;
            self.clause_db.reasons[index] = None;
            self.saved_phase[index] = literal.polarity();
            self.heap.activate(index);
        }

        self.trail.level_starts.truncate(level as usize);
        self.trail.q_head = self.trail.q_head.min(self.trail.literals.len());
    }

    /// Clears the value of every atom, including those valued at the root level.
    pub(super) fn clear_valuation(&mut self) {
        self.backjump(0);
        for literal in self.trail.literals.drain(..) {
            let index = literal.atom_index();
            self.valuation[index] = None;
            self.clause_db.reasons[index] = None;
            self.heap.activate(index);
        }
        self.trail.q_head = 0;
    }
}
