/*!
The clause database of an oracle.

- Unit clauses are kept as literals, and asserted at the root level.
- Every other clause is stored in a [SlotMap], with the first two literals of a stored clause being watched.

Clauses are either *added*, *pushed*, or *learnt*.
Pushed clauses are recorded on a stack, so the most recent may be [popped](GenericOracle::pop_clause), while added clauses are permanent.
As learnt clauses may depend on a popped clause, every learnt clause is removed on a pop and the valuation of the oracle is rebuilt from the remaining clauses.
*/

use rand::SeedableRng;
use slotmap::{new_key_type, SlotMap};

use crate::{
    misc::log::targets::{self},
    oracle::GenericOracle,
    structures::{
        clause::{self, CClause},
        literal::{CLiteral, Literal},
        vertex::vertex_index,
    },
    types::err::{self},
};

new_key_type! {
    /// The key of a stored clause.
    pub struct ClauseKey;
}

/// A stored clause of at least two literals.
#[derive(Clone, Debug)]
pub struct StoredClause {
    pub literals: CClause,
    pub learnt: bool,
}

/// A record of a pushed clause, to support popping.
#[derive(Clone, Copy, Debug)]
enum Pushed {
    /// A clause which is always true, and so was not stored.
    Tautology,
    Unit(CLiteral),
    Stored(ClauseKey),
}

pub struct ClauseDB {
    pub(super) clauses: SlotMap<ClauseKey, StoredClause>,

    /// For each vertex, the keys of clauses watching the literal of the vertex.
    pub(super) watches: Vec<Vec<ClauseKey>>,

    /// For each atom, the clause which asserted the value of the atom, if any.
    pub(super) reasons: Vec<Option<ClauseKey>>,

    units: Vec<CLiteral>,

    pushed: Vec<Pushed>,

    learnt_count: usize,
}

impl ClauseDB {
    pub fn with_atom_count(atom_count: usize) -> Self {
        ClauseDB {
            clauses: SlotMap::with_key(),
            watches: vec![Vec::default(); 2 * atom_count],
            reasons: vec![None; atom_count],
            units: Vec::default(),
            pushed: Vec::default(),
            learnt_count: 0,
        }
    }

    /// A count of pushed clauses, which may be popped.
    pub fn pushed_count(&self) -> usize {
        self.pushed.len()
    }

    pub fn learnt_count(&self) -> usize {
        self.learnt_count
    }

    fn watch(&mut self, key: ClauseKey) {
        if let Some(stored) = self.clauses.get(key) {
            let (a, b) = (stored.literals[0], stored.literals[1]);
            self.watches[vertex_index(a)].push(key);
            self.watches[vertex_index(b)].push(key);
        }
    }
}

impl<R: rand::Rng + SeedableRng> GenericOracle<R> {
    /// Pushes a clause to the oracle.
    ///
    /// Any zero literal is ignored, and duplicate literals are removed.
    ///
    /// Returns [Contradiction](err::OracleError::Contradiction) if the clause is empty, or is false given the clauses of the oracle by propagation alone.
    /// In this case the clause is not added.
    /// Likewise, if the clauses of the oracle are already known to be unsatisfiable.
    pub fn push_clause(&mut self, clause: &[CLiteral]) -> Result<(), err::OracleError> {
        for literal in clause.iter().filter(|l| **l != 0) {
            self.check_atom(literal.atom())?;
        }

        // Clauses are only pushed between queries, when at the root level.
        self.backjump(0);
        if self.unsatisfiable || self.propagate().is_some() {
            self.unsatisfiable = true;
            return Err(err::OracleError::Contradiction);
        }

        let mut the_clause = match clause::normalise(clause) {
            None => {
                self.clause_db.pushed.push(Pushed::Tautology);
                return Ok(());
            }
            Some(the_clause) => the_clause,
        };

        if the_clause.is_empty() {
            return Err(err::OracleError::Contradiction);
        }

        // Literals which are not false at the root level are placed first, those which are true before all others.
        the_clause.sort_by_key(|l| match self.value_of(*l) {
            Some(true) => 0,
            None => 1,
            Some(false) => 2,
        });

        let checkpoint = self.trail.literals.len();

        match (the_clause.len(), self.value_of(the_clause[0])) {
            (_, Some(false)) => return Err(err::OracleError::Contradiction),

            (1, value) => {
                if value.is_none() {
                    self.assign(the_clause[0], None);
                    if self.propagate().is_some() {
                        self.undo_root_to(checkpoint);
                        return Err(err::OracleError::Contradiction);
                    }
                }
                self.clause_db.units.push(the_clause[0]);
                self.clause_db.pushed.push(Pushed::Unit(the_clause[0]));
            }

            (_, value) => {
                let asserting = value.is_none() && self.value_of(the_clause[1]) == Some(false);
                let asserted = the_clause[0];

                let key = self.clause_db.clauses.insert(StoredClause {
                    literals: the_clause,
                    learnt: false,
                });
                self.clause_db.watch(key);

                if asserting {
                    self.assign(asserted, Some(key));
                    if self.propagate().is_some() {
                        self.undo_root_to(checkpoint);
                        self.remove_stored(key);
                        return Err(err::OracleError::Contradiction);
                    }
                }
                self.clause_db.pushed.push(Pushed::Stored(key));
            }
        }

        Ok(())
    }

    /// Adds a clause to the oracle, which is kept on any [pop](GenericOracle::pop_clause).
    ///
    /// As [push_clause](GenericOracle::push_clause), otherwise.
    pub fn add_clause(&mut self, clause: &[CLiteral]) -> Result<(), err::OracleError> {
        self.push_clause(clause)?;
        self.clause_db.pushed.pop();
        Ok(())
    }

    /// Removes the most recently pushed clause.
    pub fn pop_clause(&mut self) -> Result<(), err::OracleError> {
        let Some(pushed) = self.clause_db.pushed.pop() else {
            return Err(err::OracleError::NothingToPop);
        };

        match pushed {
            Pushed::Tautology => return Ok(()),
            Pushed::Unit(literal) => {
                if let Some(position) = self.clause_db.units.iter().rposition(|u| *u == literal) {
                    self.clause_db.units.remove(position);
                }
            }
            Pushed::Stored(key) => self.remove_stored(key),
        }

        self.refresh();
        Ok(())
    }

    /// Rebuilds the valuation of the oracle from scratch, after removing every learnt clause.
    fn refresh(&mut self) {
        self.clear_valuation();

        let learnt_keys = self
            .clause_db
            .clauses
            .iter()
            .filter(|(_, stored)| stored.learnt)
            .map(|(key, _)| key)
            .collect::<Vec<_>>();
        for key in learnt_keys {
            self.remove_stored(key);
        }

        for list in &mut self.clause_db.watches {
            list.clear();
        }
        let keys = self.clause_db.clauses.keys().collect::<Vec<_>>();
        for key in keys {
            self.clause_db.watch(key);
        }

        self.unsatisfiable = false;
        for index in 0..self.clause_db.units.len() {
            let unit = self.clause_db.units[index];
            match self.value_of(unit) {
                None => self.assign(unit, None),
                Some(true) => {}
                Some(false) => self.unsatisfiable = true,
            }
        }
        if !self.unsatisfiable && self.propagate().is_some() {
            self.unsatisfiable = true;
        }

        log::trace!(target: targets::ORACLE, "Refreshed, unsatisfiable: {}", self.unsatisfiable);
    }

    /// Stores a learnt clause, whose first literal is asserted and whose second literal has the greatest level of the remaining literals.
    pub(super) fn store_learnt(&mut self, literals: CClause) -> ClauseKey {
        let key = self.clause_db.clauses.insert(StoredClause {
            literals,
            learnt: true,
        });
        self.clause_db.watch(key);
        self.clause_db.learnt_count += 1;
        key
    }

    /// Removes a stored clause. Watches of the clause are dropped lazily, during propagation.
    fn remove_stored(&mut self, key: ClauseKey) {
        if let Some(stored) = self.clause_db.clauses.remove(key) {
            if stored.learnt {
                self.clause_db.learnt_count -= 1;
            }
        }
    }

    /// Removes (roughly) half of the learnt clauses, preferring to remove long clauses.
    ///
    /// A clause which is the reason for the value of some atom is kept.
    pub(super) fn reduce_learnt(&mut self) {
        let mut candidates = self
            .clause_db
            .clauses
            .iter()
            .filter(|(key, stored)| {
                let index = stored.literals[0].atom_index();
                stored.learnt && self.clause_db.reasons[index] != Some(*key)
            })
            .map(|(key, stored)| (stored.literals.len(), key))
            .collect::<Vec<_>>();

        candidates.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        let removals = candidates.len() / 2;
        for (_, key) in candidates.into_iter().take(removals) {
            self.remove_stored(key);
        }

        self.counters.reductions += 1;
        log::trace!(target: targets::ORACLE, "Reduced learnt clauses by {removals}");
    }

    /// Clears the value of each atom valued at the root level after `checkpoint`.
    fn undo_root_to(&mut self, checkpoint: usize) {
        for literal in self.trail.literals.drain(checkpoint..) {
            let index = literal.atom_index();
            self.valuation[index] = None;
            self.clause_db.reasons[index] = None;
            self.heap.activate(index);
        }
        self.trail.q_head = self.trail.q_head.min(checkpoint);
    }
}
