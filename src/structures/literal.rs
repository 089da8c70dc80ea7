//! Literals are atoms paired with a (boolean) polarity.
//!
//! Throughout the library literals are represented as signed integers, with the magnitude of the integer being the atom and the sign of the integer being the polarity.
//! The [Literal] trait gives names to the relevant methods.
//!
//! ```rust
//! # use otter_mig::structures::literal::{CLiteral, Literal};
//! let literal: CLiteral = -79;
//!
//! assert!(!literal.polarity());
//! assert_eq!(literal.atom(), 79);
//! assert_eq!(literal.negate(), 79);
//! assert_eq!(CLiteral::new(79, false), literal);
//! ```

use crate::structures::atom::Atom;

/// The canonical representation of a literal.
pub type CLiteral = i32;

/// Something which has methods for returning an atom and a polarity, etc.
pub trait Literal {
    /// A fresh literal, specified by pairing an atom with a boolean.
    fn new(atom: Atom, polarity: bool) -> Self;

    /// The negation of the literal.
    fn negate(&self) -> Self;

    /// The atom of the literal.
    fn atom(&self) -> Atom;

    /// The polarity of the literal.
    fn polarity(&self) -> bool;

    /// The index of the atom of the literal, for structures indexed from zero.
    fn atom_index(&self) -> usize;
}

impl Literal for CLiteral {
    fn new(atom: Atom, polarity: bool) -> Self {
        match polarity {
            true => atom as CLiteral,
            false => -(atom as CLiteral),
        }
    }

    fn negate(&self) -> Self {
        -*self
    }

    fn atom(&self) -> Atom {
        self.unsigned_abs()
    }

    fn polarity(&self) -> bool {
        self.is_positive()
    }

    fn atom_index(&self) -> usize {
        self.unsigned_abs() as usize - 1
    }
}
