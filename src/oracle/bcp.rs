/*!
Boolean constraint propagation.

# Overview
Each literal on the trail at or after `q_head` is propagated in turn.
When a literal *l* is propagated the clauses watching *-l* are examined:
- If the other watched literal is true, the clause is satisfied and the watch is kept.
- If some unwatched literal is not false, the watch moves to that literal.
- Otherwise, the other watched literal is asserted by the clause, or the clause conflicts with the valuation.

A watched literal is always at index 0 or 1 of a clause, and the literal being examined is moved to index 1, so an asserted literal is always at index 0.

Watches for clauses which have been removed from the database are dropped when examined.
*/

use rand::SeedableRng;

use crate::{
    misc::log::targets::{self},
    oracle::{db::ClauseKey, literal_value, GenericOracle},
    structures::{literal::CLiteral, vertex::vertex_index},
};

/// The result of examining a watched clause.
enum Watched {
    /// The watch should be kept.
    Keep,

    /// The watch moved to some other literal, or the clause is gone.
    Drop,

    /// The clause asserts the literal.
    Asserts(CLiteral),

    /// Every literal of the clause is false.
    Conflict,
}

impl<R: rand::Rng + SeedableRng> GenericOracle<R> {
    /// Propagates every literal on the trail at or after `q_head`.
    ///
    /// Returns the key of a conflicting clause, if one is found.
    pub(super) fn propagate(&mut self) -> Option<ClauseKey> {
        while self.trail.q_head < self.trail.literals.len() {
            let literal = self.trail.literals[self.trail.q_head];
            self.trail.q_head += 1;

            let falsified = -literal;
            let watch_index = vertex_index(falsified);
            // A watch never moves to a false literal, so the taken list is not extended while examined.
            let mut watch_list = std::mem::take(&mut self.clause_db.watches[watch_index]);

            let mut index = 0;
            let mut conflict = None;

            while index < watch_list.len() {
                let key = watch_list[index];

                let examined = match self.clause_db.clauses.get_mut(key) {
                    None => Watched::Drop,

                    Some(stored) => {
                        if stored.literals[0] == falsified {
                            stored.literals.swap(0, 1);
                        }

                        if stored.literals[1] != falsified {
                            Watched::Drop
                        } else if literal_value(&self.valuation, stored.literals[0]) == Some(true) {
                            Watched::Keep
                        } else {
                            let replacement = (2..stored.literals.len()).find(|position| {
                                literal_value(&self.valuation, stored.literals[*position])
                                    != Some(false)
                            });

                            match replacement {
                                Some(position) => {
                                    stored.literals.swap(1, position);
                                    let fresh = vertex_index(stored.literals[1]);
                                    self.clause_db.watches[fresh].push(key);
                                    Watched::Drop
                                }

                                None => match literal_value(&self.valuation, stored.literals[0]) {
                                    None => Watched::Asserts(stored.literals[0]),
                                    Some(_) => Watched::Conflict,
                                },
                            }
                        }
                    }
                };

                match examined {
                    Watched::Keep => index += 1,

                    Watched::Drop => {
                        watch_list.swap_remove(index);
                    }

                    Watched::Asserts(asserted) => {
                        self.assign(asserted, Some(key));
                        index += 1;
                    }

                    Watched::Conflict => {
                        log::trace!(target: targets::ORACLE, "Conflict on {literal}");
                        conflict = Some(key);
                        break;
                    }
                }
            }

            self.clause_db.watches[watch_index] = watch_list;

            if conflict.is_some() {
                return conflict;
            }
        }

        None
    }
}
