/*!
Vertices of a graph.

Each literal has a vertex, and the vertices of the literals of an atom are adjacent.
Specifically, for a literal *l*:

```none
index(l) = (-l - 1) * 2     if l < 0
index(l) = (l - 1) * 2 + 1  if l > 0
```

So, the vertices of a graph over *n* atoms are exactly [0..2n), the vertex of `-l` is `index(l) ^ 1`, and the vertices of the atom `a` are `2(a - 1)` (for `-a`) and `2(a - 1) + 1` (for `a`).

```rust
# use otter_mig::structures::vertex::{vertex_index, vertex_literal};
assert_eq!(vertex_index(-1), 0);
assert_eq!(vertex_index(1), 1);
assert_eq!(vertex_index(-2), 2);
assert_eq!(vertex_index(2), 3);

assert_eq!(vertex_literal(3), 2);
assert_eq!(vertex_index(7) ^ 1, vertex_index(-7));
```
*/

use crate::structures::literal::CLiteral;

/// The index of a vertex.
pub type VertexIndex = usize;

/// The vertex of a (nonzero) literal.
#[inline]
pub fn vertex_index(literal: CLiteral) -> VertexIndex {
    match literal < 0 {
        true => ((-literal - 1) as usize) << 1,
        false => (((literal - 1) as usize) << 1) + 1,
    }
}

/// The literal of a vertex.
#[inline]
pub fn vertex_literal(index: VertexIndex) -> CLiteral {
    let atom = ((index >> 1) + 1) as CLiteral;
    match index & 1 {
        0 => -atom,
        _ => atom,
    }
}

/// The status of a vertex.
///
/// The status of the vertices of an atom are always complementary:
/// - If the vertex of `l` is `Core`, the vertex of `-l` is `Dead`.
/// - If the vertex of `l` is `Normal`, so too is the vertex of `-l`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// The literal is true on some model of the formula, and false on some other.
    ///
    /// Also, the status of any literal whose status could not be determined before a time limit.
    #[default]
    Normal,

    /// The literal is true on every model of the formula.
    Core,

    /// The literal is false on every model of the formula.
    Dead,
}

impl Status {
    /// The status of the vertex of the negation of a literal with this status.
    pub fn complement(&self) -> Self {
        match self {
            Self::Normal => Self::Normal,
            Self::Core => Self::Dead,
            Self::Dead => Self::Core,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijection() {
        for literal in (-500..=500).filter(|l| *l != 0) {
            let index = vertex_index(literal);
            assert!(index < 1000);
            assert_eq!(vertex_literal(index), literal);
            assert_eq!(vertex_index(-literal), index ^ 1);
        }
    }

    #[test]
    fn dense() {
        let mut seen = [false; 20];
        for literal in (-10..=10).filter(|l| *l != 0) {
            seen[vertex_index(literal)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
