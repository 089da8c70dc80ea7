/*!
Strong edges, from clauses of two literals.

A clause *l ∨ m* gives the edges *-l → m* and *-m → l*: if *l* is false then *m* is true, and if *m* is false then *l* is true.

# Closure

After all edges from clauses are added, adjacency is closed under transitivity.
Each normal vertex *a* is the root of a breadth-first search through the edges.
When some vertex *b* is found through an intermediate vertex the edge *a → b* is added, and by contraposition so is *-b → -a*.
As a result, the adjacency of the complement side is (partially) populated before the search from the complement vertex is made.

Vertices are marked as seen by atom, and so if both *b* and *-b* are reachable from *a* only one is found.
This is only possible if *a* is dead, in which case *a* should not be normal.

After closure, every list is sorted and deduplicated, and any self-loop removed.

```rust
# use otter_mig::graph::strong::StrongEdges;
# use otter_mig::structures::vertex::Status;
let mut edges = StrongEdges::with_atom_count(3);
edges.add_clause(-1, 2); // 1 → 2
edges.add_clause(-2, 3); // 2 → 3
edges.close(&[Status::Normal; 6]);

assert_eq!(edges.neighbours(1), &[2, 3]);
assert_eq!(edges.neighbours(-3), &[-2, -1]);
```
*/

use std::collections::VecDeque;

use crate::{
    misc::log::targets::{self},
    structures::{
        literal::{CLiteral, Literal},
        vertex::{vertex_index, vertex_literal, Status},
    },
};

/// Adjacency lists of strong edges, by vertex.
#[derive(Clone, Debug, Default)]
pub struct StrongEdges {
    adjacency: Vec<Vec<CLiteral>>,
}

impl StrongEdges {
    pub fn with_atom_count(atom_count: usize) -> Self {
        StrongEdges {
            adjacency: vec![Vec::default(); 2 * atom_count],
        }
    }

    /// Adds the edges of the clause `a ∨ b`.
    pub fn add_clause(&mut self, a: CLiteral, b: CLiteral) {
        self.add_edge(a.negate(), b);
        self.add_edge(b.negate(), a);
    }

    /// Adds the edge `from → to`, without the contrapositive edge.
    pub fn add_edge(&mut self, from: CLiteral, to: CLiteral) {
        self.adjacency[vertex_index(from)].push(to);
    }

    /// The literals reached by an edge from `literal`.
    ///
    /// Before [finish](StrongEdges::finish) the list may contain duplicates.
    pub fn neighbours(&self, literal: CLiteral) -> &[CLiteral] {
        &self.adjacency[vertex_index(literal)]
    }

    /// Closes adjacency under transitivity, from each vertex whose status is normal.
    ///
    /// The list of a vertex which is not normal is left as given.
    ///
    /// Lists are sorted and deduplicated, and self-loops removed.
    pub fn close(&mut self, status: &[Status]) {
        let atom_count = self.adjacency.len() / 2;
        let mut seen = vec![false; atom_count + 1];
        let mut queue: VecDeque<CLiteral> = VecDeque::default();
        let mut added = 0_usize;

        for root in 0..self.adjacency.len() {
            if status[root] != Status::Normal {
                continue;
            }
            let root_literal = vertex_literal(root);

            seen.fill(false);
            seen[root_literal.atom() as usize] = true;

            for position in 0..self.adjacency[root].len() {
                let neighbour = self.adjacency[root][position];
                if !seen[neighbour.atom() as usize] {
                    seen[neighbour.atom() as usize] = true;
                    queue.push_back(neighbour);
                }
            }

            while let Some(next) = queue.pop_front() {
                let next_vertex = vertex_index(next);
                // Indexed, as edges are pushed to other lists while reading.
                let mut position = 0;
                while position < self.adjacency[next_vertex].len() {
                    let reached = self.adjacency[next_vertex][position];
                    position += 1;

                    if !seen[reached.atom() as usize] {
                        seen[reached.atom() as usize] = true;
                        queue.push_back(reached);
                        self.adjacency[root].push(reached);
                        let contrapositive = vertex_index(reached.negate());
                        if status[contrapositive] == Status::Normal {
                            self.adjacency[contrapositive].push(root_literal.negate());
                        }
                        added += 1;
                    }
                }
            }
        }

        self.tidy();
        log::info!(target: targets::STRONG, "Closure added {added} edges");
    }

    /// Sorts and deduplicates every list, and removes any self-loop.
    pub fn tidy(&mut self) {
        for (vertex, list) in self.adjacency.iter_mut().enumerate() {
            let literal = vertex_literal(vertex);
            list.sort_unstable();
            list.dedup();
            list.retain(|l| *l != literal);
        }
    }

    /// A count of edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|list| list.len()).sum()
    }

    /// The adjacency lists, by vertex.
    pub fn finish(mut self) -> Vec<Box<[CLiteral]>> {
        self.tidy();
        self.adjacency
            .into_iter()
            .map(|list| list.into_boxed_slice())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contrapositive() {
        let mut edges = StrongEdges::with_atom_count(2);
        edges.add_clause(1, 2);
        edges.close(&[Status::Normal; 4]);

        assert_eq!(edges.neighbours(-1), &[2]);
        assert_eq!(edges.neighbours(-2), &[1]);
        assert!(edges.neighbours(1).is_empty());
    }

    #[test]
    fn chain() {
        let mut edges = StrongEdges::with_atom_count(5);
        for atom in 1..5 {
            edges.add_clause(-atom, atom + 1);
        }
        edges.close(&[Status::Normal; 10]);

        assert_eq!(edges.neighbours(1), &[2, 3, 4, 5]);
        assert_eq!(edges.neighbours(3), &[4, 5]);
        assert_eq!(edges.neighbours(-5), &[-4, -3, -2, -1]);
        assert!(edges.neighbours(5).is_empty());
    }

    #[test]
    fn cycle_without_self_loops() {
        let mut edges = StrongEdges::with_atom_count(3);
        edges.add_clause(-1, 2);
        edges.add_clause(-2, 3);
        edges.add_clause(-3, 1);
        edges.close(&[Status::Normal; 6]);

        for literal in [1, 2, 3, -1, -2, -3] {
            assert!(!edges.neighbours(literal).contains(&literal));
            assert_eq!(edges.neighbours(literal).len(), 2);
        }
    }

    #[test]
    fn fixed_roots_are_skipped() {
        let mut edges = StrongEdges::with_atom_count(3);
        edges.add_clause(-1, 2);
        edges.add_clause(-2, 3);
        let mut status = [Status::Normal; 6];
        status[vertex_index(1)] = Status::Dead;
        status[vertex_index(-1)] = Status::Core;
        edges.close(&status);

        assert_eq!(edges.neighbours(1), &[2]);
    }
}
