/*!
Propagation over the strong edges of a graph alone.

A light engine has the interface of an [Engine](crate::engine::Engine), though makes no use of weak clauses.
So, a light engine is cheaper to create and to reset, as there are no clause counts to maintain, though finds fewer consequences and fewer contradictions.

In particular, any literal added or contradiction found by a light engine is also added or found by an engine, though not the reverse.

```rust
# use otter_mig::config::Config;
# use otter_mig::graph::Graph;
# use otter_mig::structures::cnf::Cnf;
let mut config = Config::default();
config.detect_strong.value = false;

let cnf = Cnf::from_clauses([vec![-1, 2], vec![-1, -2, 3]]);
let graph = Graph::build_regular(&cnf, &config).unwrap();

let mut light = graph.light_engine();
assert_eq!(light.propagate(&[1]), Ok(2));
assert_eq!(light.value_of(3), None);

let mut engine = graph.engine();
assert_eq!(engine.propagate(&[1]), Ok(3));
assert_eq!(engine.value_of(3), Some(3));
```
*/

use crate::{
    graph::Graph,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
    types::err::Contradiction,
};

/// Propagation over the strong edges of a graph.
#[derive(Clone, Debug)]
pub struct LightEngine<'g> {
    graph: &'g Graph,
    model: Vec<CLiteral>,
    added: Vec<CLiteral>,
}

impl<'g> LightEngine<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        LightEngine {
            graph,
            model: vec![0; graph.size()],
            added: Vec::default(),
        }
    }

    /// The model of the engine, by atom - 1, with zero for an atom without a value.
    pub fn model(&self) -> &[CLiteral] {
        &self.model
    }

    pub fn value_of(&self, atom: Atom) -> Option<CLiteral> {
        match atom {
            0 => None,
            _ => match self.model.get(atom as usize - 1) {
                Some(literal) if *literal != 0 => Some(*literal),
                _ => None,
            },
        }
    }

    /// Literals made true since creation or the last reset, in order.
    pub fn added_literals(&self) -> &[CLiteral] {
        &self.added
    }

    /// Makes each literal of `literals` true, together with each literal reached by a strong edge.
    ///
    /// Zero literals are ignored.
    pub fn propagate(&mut self, literals: &[CLiteral]) -> Result<usize, Contradiction> {
        let before = self.added.len();
        let graph = self.graph;

        for literal in literals.iter().copied().filter(|l| *l != 0) {
            match self.model[literal.atom_index()] {
                0 => self.make_true(literal),
                value if value == literal => continue,
                _ => return Err(Contradiction),
            }

            for neighbour in graph.strong(literal) {
                match self.model[neighbour.atom_index()] {
                    0 => self.make_true(*neighbour),
                    value if value == *neighbour => {}
                    _ => return Err(Contradiction),
                }
            }
        }

        Ok(self.added.len() - before)
    }

    /// Makes each literal of `literals` true, without propagation.
    pub fn set_literals(&mut self, literals: &[CLiteral]) {
        for literal in literals.iter().copied().filter(|l| *l != 0) {
            if self.model[literal.atom_index()] == 0 {
                self.make_true(literal);
            }
        }
    }

    /// Whether propagating `literals` leads to a contradiction, always resetting to the state before the call.
    pub fn is_contradiction(&mut self, literals: &[CLiteral]) -> bool {
        let checkpoint = self.added.len();
        let result = self.propagate(literals);
        self.reset_to(checkpoint);
        result.is_err()
    }

    pub fn reset(&mut self) {
        self.reset_to(0);
    }

    /// Clears each added literal after the first `keep`.
    pub fn reset_to(&mut self, keep: usize) {
        for literal in self.added.drain(keep.min(self.added.len())..) {
            self.model[literal.atom_index()] = 0;
        }
    }

    fn make_true(&mut self, literal: CLiteral) {
        self.model[literal.atom_index()] = literal;
        self.added.push(literal);
    }
}

#[cfg(test)]
mod tests {
    use crate::{config::Config, structures::cnf::Cnf};

    #[test]
    fn strong_only() {
        let cnf = Cnf::from_clauses([vec![-1, 2], vec![-2, 3], vec![-3, -4]]);
        let graph = crate::graph::Graph::build_regular(&cnf, &Config::default()).unwrap();
        let mut light = graph.light_engine();

        assert_eq!(light.propagate(&[0, 1]), Ok(4));
        assert_eq!(light.added_literals(), &[1, -4, 2, 3]);
        assert!(light.propagate(&[4]).is_err());

        light.reset();
        assert_eq!(light.model(), &[0; 4]);
        assert!(light.is_contradiction(&[1, 4]));
        assert!(light.added_literals().is_empty());
    }
}
