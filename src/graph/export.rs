/*!
Export of the strong edges of a graph to [petgraph].

Requires the `petgraph` feature.

The node of each vertex has the same index as the vertex, and is weighted with the literal of the vertex.

As strong edges are closed under transitivity, a strongly connected component is a set of literals which imply each other, and so have the same value on every model.
Such a set is called *atomic*, and each atomic set appears together with the set of negated literals.

```rust
# use otter_mig::config::Config;
# use otter_mig::graph::Graph;
# use otter_mig::structures::cnf::Cnf;
let cnf = Cnf::from_clauses([vec![-1, 2], vec![-2, 1], vec![3, 4, 1]]);
let graph = Graph::build_regular(&cnf, &Config::default()).unwrap();

assert_eq!(graph.atomic_sets(), vec![vec![-2, -1], vec![1, 2]]);
```
*/

use petgraph::{algo::tarjan_scc, graph::DiGraph, prelude::NodeIndex};

use crate::{
    graph::Graph,
    structures::{
        literal::CLiteral,
        vertex::{vertex_index, vertex_literal},
    },
};

impl Graph {
    /// The strong edges of the graph, as a directed graph over all vertices.
    pub fn strong_digraph(&self) -> DiGraph<CLiteral, ()> {
        let vertex_count = 2 * self.size();
        let mut digraph = DiGraph::with_capacity(vertex_count, self.strong_edge_count());

        for vertex in 0..vertex_count {
            digraph.add_node(vertex_literal(vertex));
        }

        for vertex in 0..vertex_count {
            let from = vertex_literal(vertex);
            for to in self.strong(from) {
                digraph.add_edge(NodeIndex::new(vertex), NodeIndex::new(vertex_index(*to)), ());
            }
        }

        digraph
    }

    /// The atomic sets of two or more literals, each sorted, in order of least literal.
    pub fn atomic_sets(&self) -> Vec<Vec<CLiteral>> {
        let digraph = self.strong_digraph();

        let mut sets = tarjan_scc(&digraph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|component| {
                let mut set = component.into_iter().map(|node| digraph[node]).collect::<Vec<_>>();
                set.sort_unstable();
                set
            })
            .collect::<Vec<_>>();

        sets.sort_unstable();
        sets
    }
}

#[cfg(test)]
mod tests {
    use crate::{config::Config, structures::cnf::Cnf};

    use super::*;

    #[test]
    fn digraph_matches_strong_edges() {
        let cnf = Cnf::from_clauses([vec![-1, 2], vec![-2, 3]]);
        let graph = Graph::build_regular(&cnf, &Config::default()).unwrap();
        let digraph = graph.strong_digraph();

        assert_eq!(digraph.node_count(), 6);
        assert_eq!(digraph.edge_count(), graph.strong_edge_count());
        assert!(digraph.contains_edge(NodeIndex::new(vertex_index(1)), NodeIndex::new(vertex_index(3))));
    }

    #[test]
    fn no_atomic_sets_without_cycles() {
        let cnf = Cnf::from_clauses([vec![-1, 2], vec![-2, 3]]);
        let graph = Graph::build_regular(&cnf, &Config::default()).unwrap();

        assert!(graph.atomic_sets().is_empty());
    }
}
