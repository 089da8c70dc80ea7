/*!
An atom (aka. a 'variable').

Atoms are 1-based, so that the negation of the literal of an atom is given by integer negation.
The atom `0` is not an atom, and a literal with atom `0` is ignored wherever a sequence of literals is accepted.

Atoms may be used as indicies after subtracting one, e.g. `model[atom as usize - 1]`.
*/

/// An atom, aka. a 'variable'.
pub type Atom = u32;
