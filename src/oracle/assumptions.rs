//! The assumption stack of an oracle.
//!
//! Assumptions persist between queries, until popped or cleared.
//! So, for example, a literal found to be a consequence of the clauses of the oracle may be kept as an assumption to simplify later queries:
//!
//! ```rust
//! # use otter_mig::config::Config;
//! # use otter_mig::oracle::Oracle;
//! # use otter_mig::reports::Report;
//! let mut oracle = Oracle::new(2, &Config::default());
//! let _ = oracle.push_clause(&[1]);
//!
//! let _ = oracle.assumption_push(-1);
//! if oracle.solve() == Report::Unsatisfiable {
//!     let _ = oracle.assumption_replace_last(1);
//! }
//! assert_eq!(oracle.assumptions(), &[1]);
//! ```

use rand::SeedableRng;

use crate::{
    oracle::GenericOracle,
    structures::literal::{CLiteral, Literal},
    types::err::{self},
};

impl<R: rand::Rng + SeedableRng> GenericOracle<R> {
    /// Pushes an assumption.
    pub fn assumption_push(&mut self, literal: CLiteral) -> Result<(), err::OracleError> {
        self.check_atom(literal.atom())?;
        self.assumptions.push(literal);
        Ok(())
    }

    /// Pops the most recent assumption, if any.
    pub fn assumption_pop(&mut self) -> Option<CLiteral> {
        self.assumptions.pop()
    }

    /// Replaces the most recent assumption with `literal`, or pushes `literal` if there are no assumptions.
    pub fn assumption_replace_last(&mut self, literal: CLiteral) -> Result<(), err::OracleError> {
        self.check_atom(literal.atom())?;
        match self.assumptions.last_mut() {
            Some(last) => *last = literal,
            None => self.assumptions.push(literal),
        }
        Ok(())
    }

    /// Pops assumptions until at most `size` remain.
    pub fn assumption_clear_to(&mut self, size: usize) {
        self.assumptions.truncate(size);
    }

    /// A count of assumptions.
    pub fn assumption_count(&self) -> usize {
        self.assumptions.len()
    }

    pub fn assumptions(&self) -> &[CLiteral] {
        &self.assumptions
    }
}
