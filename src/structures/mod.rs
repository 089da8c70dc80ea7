//! Abstract elements of the library.
//!
//! - [atoms](atom) and [literals](literal), as integers.
//! - [vertices](vertex) of a graph, as dense indicies derived from literals.
//! - [clauses](clause) and [formulas](cnf).

pub mod atom;
pub mod clause;
pub mod cnf;
pub mod literal;
pub mod vertex;
