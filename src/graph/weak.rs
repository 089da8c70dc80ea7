/*!
The weak clause index of a graph.

Clauses of three or more literals are stored flat, one after another, in a single vector of literals.
Each clause has a *slot*, and the *template* of the slot is the length of the clause.

A clause is registered with the vertex of the negation of each of its literals, so that when the literal of a vertex is made true the clauses which lose a literal are exactly those registered with the vertex.
For each vertex the index records, in parallel:
- `clause_indices`: where each registered clause starts in the flat store.
- `clause_length_indices`: the slot of each registered clause.

The index is built in two passes.
The first counts the registrations of each vertex, and the second fills slices of exactly the counted size.

```rust
# use otter_mig::graph::weak::WeakIndex;
# use otter_mig::structures::vertex::vertex_index;
let clause = vec![-1, -2, 3];
let index = WeakIndex::build(3, [clause.as_slice()]);

assert_eq!(index.clause_lengths(), &[3]);
assert_eq!(index.registered(vertex_index(1)).collect::<Vec<_>>(), vec![(0, 0)]);
assert_eq!(index.registered(vertex_index(-3)).collect::<Vec<_>>(), vec![(0, 0)]);
assert!(index.registered(vertex_index(3)).next().is_none());
assert_eq!(index.clause(0), &[-1, -2, 3]);
```
*/

use crate::structures::{
    literal::{CLiteral, Literal},
    vertex::{vertex_index, VertexIndex},
};

/// The flat index of weak clauses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeakIndex {
    clauses: Vec<CLiteral>,
    clause_starts: Vec<u32>,
    clause_indices: Vec<Box<[u32]>>,
    clause_length_indices: Vec<Box<[u32]>>,
    clause_lengths: Vec<u32>,
}

impl WeakIndex {
    /// Builds an index over the given number of atoms.
    ///
    /// Clauses are given slots in order.
    pub fn build<'c>(atom_count: usize, clauses: impl IntoIterator<Item = &'c [CLiteral]> + Clone) -> Self {
        let vertex_count = 2 * atom_count;

        let mut registrations = vec![0_usize; vertex_count];
        let mut literal_count = 0;
        let mut clause_count = 0;
        for clause in clauses.clone() {
            clause_count += 1;
            literal_count += clause.len();
            for literal in clause {
                registrations[vertex_index(literal.negate())] += 1;
            }
        }

        let mut clause_indices = registrations
            .iter()
            .map(|count| vec![0_u32; *count].into_boxed_slice())
            .collect::<Vec<_>>();
        let mut clause_length_indices = clause_indices.clone();

        let mut index = WeakIndex {
            clauses: Vec::with_capacity(literal_count),
            clause_starts: Vec::with_capacity(clause_count),
            clause_indices: Vec::default(),
            clause_length_indices: Vec::default(),
            clause_lengths: Vec::with_capacity(clause_count),
        };

        let mut filled = vec![0_usize; vertex_count];
        for (slot, clause) in clauses.into_iter().enumerate() {
            let start = index.clauses.len() as u32;
            index.clause_starts.push(start);
            index.clause_lengths.push(clause.len() as u32);
            index.clauses.extend_from_slice(clause);

            for literal in clause {
                let vertex = vertex_index(literal.negate());
                clause_indices[vertex][filled[vertex]] = start;
                clause_length_indices[vertex][filled[vertex]] = slot as u32;
                filled[vertex] += 1;
            }
        }

        index.clause_indices = clause_indices;
        index.clause_length_indices = clause_length_indices;
        index
    }

    /// The start and slot of each clause registered with `vertex`.
    pub fn registered(&self, vertex: VertexIndex) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.clause_indices[vertex]
            .iter()
            .copied()
            .zip(self.clause_length_indices[vertex].iter().copied())
    }

    /// The slots of clauses registered with `vertex`.
    pub fn registered_slots(&self, vertex: VertexIndex) -> &[u32] {
        &self.clause_length_indices[vertex]
    }

    /// The clause in `slot`.
    pub fn clause(&self, slot: u32) -> &[CLiteral] {
        let start = self.clause_starts[slot as usize] as usize;
        &self.clauses[start..start + self.clause_lengths[slot as usize] as usize]
    }

    /// The clause starting at `start` in the flat store, with the length of the template in `slot`.
    #[inline]
    pub fn clause_at(&self, start: u32, slot: u32) -> &[CLiteral] {
        let start = start as usize;
        &self.clauses[start..start + self.clause_lengths[slot as usize] as usize]
    }

    /// The clauses of the index, in order of slot.
    pub fn clauses(&self) -> impl Iterator<Item = &[CLiteral]> {
        (0..self.clause_lengths.len() as u32).map(|slot| self.clause(slot))
    }

    /// The template of each slot.
    pub fn clause_lengths(&self) -> &[u32] {
        &self.clause_lengths
    }

    /// A count of clauses.
    pub fn len(&self) -> usize {
        self.clause_lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clause_lengths.is_empty()
    }

    /// A count of vertices of the index.
    pub fn vertex_count(&self) -> usize {
        self.clause_indices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_registration() {
        let clauses: Vec<Vec<CLiteral>> = vec![vec![1, 2, 3], vec![-1, 2, 4], vec![1, -3, -4]];
        let index = WeakIndex::build(4, clauses.iter().map(|c| c.as_slice()));

        // -1 is registered with clauses containing 1.
        assert_eq!(index.registered_slots(vertex_index(-1)), &[0, 2]);
        assert_eq!(index.registered_slots(vertex_index(1)), &[1]);
        assert_eq!(index.registered_slots(vertex_index(-2)), &[0, 1]);
        assert!(index.registered_slots(vertex_index(2)).is_empty());

        for vertex in 0..8 {
            for (start, slot) in index.registered(vertex) {
                assert_eq!(index.clause_at(start, slot), index.clause(slot));
            }
        }

        assert_eq!(index.len(), 3);
        assert_eq!(index.clauses().count(), 3);
    }

    #[test]
    fn empty() {
        let index = WeakIndex::build(2, std::iter::empty::<&[CLiteral]>());
        assert!(index.is_empty());
        assert_eq!(index.vertex_count(), 4);
    }
}
