/*!
Propagation over a graph.

An [Engine] extends a partial model by the strong edges and weak clauses of a [graph](crate::graph::Graph), in the manner of unit propagation.
An engine borrows a graph, and many engines may borrow the same graph at once, though each engine is owned by a single caller.

# Propagation

When a literal *l* is made true:
- Each literal reached by a strong edge from *l* is made true.
  As strong edges are closed under transitivity, this requires no search.
- Each weak clause registered with the vertex of *l* contains *-l*, and so loses a literal.
  The *count* of each such clause is decremented.

After a literal is made true the literal is queued, and when taken from the queue each weak clause registered with the literal is inspected:
- If the count of the clause is one, the clause has a single literal which is not false.
  If the atom of that literal has no value, the literal is made true.
- If the count of the clause is zero, or no literal of the clause is true or without a value, the model is contradictory.

Literals are queued and taken in order, and so for a given graph and given literals propagation always adds the same literals, in the same order.

# Contradictions and resets

Each literal made true is logged, and an engine may be reset to any length of the log.
On a reset, the value of each logged literal is cleared, and the count of each weak clause registered with the literal is restored.
So, the cost of a reset is proportional to the number of literals undone, rather than the size of the graph.

A [Contradiction] from [propagate](Engine::propagate) leaves the model partially extended.
[is_contradiction](Engine::is_contradiction) propagates and then always resets to the length of the log before propagation, and is the usual way to test whether some literals are consistent with the graph.

```rust
# use otter_mig::config::Config;
# use otter_mig::graph::Graph;
# use otter_mig::structures::cnf::Cnf;
let mut config = Config::default();
config.detect_strong.value = false;

let cnf = Cnf::from_clauses([vec![-1, 2], vec![-1, -2, 3], vec![-3, -4]]);
let graph = Graph::build_regular(&cnf, &config).unwrap();
let mut engine = graph.engine();

assert!(engine.is_contradiction(&[1, 4]));
assert!(engine.added_literals().is_empty());

assert_eq!(engine.propagate(&[1]), Ok(4));
assert_eq!(engine.added_literals(), &[1, 2, 3, -4]);

engine.reset();
assert_eq!(engine.model(), &[0, 0, 0, 0]);
```

# Light engines

A [LightEngine](light::LightEngine) propagates through strong edges only, and so is cheaper though weaker.
*/

pub mod light;

use std::collections::VecDeque;

use crate::{
    graph::Graph,
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
        vertex::vertex_index,
    },
    types::err::Contradiction,
};

/// A literal in the log of an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entry {
    literal: CLiteral,

    /// Whether the counts of the clauses registered with the literal were decremented.
    counted: bool,
}

/// Propagation over the strong edges and weak clauses of a graph.
#[derive(Clone, Debug)]
pub struct Engine<'g> {
    graph: &'g Graph,

    /// The value of each atom, by atom - 1, as the true literal of the atom or zero.
    model: Vec<CLiteral>,

    log: Vec<Entry>,

    /// The length of the log set on creation, which is kept on any reset.
    floor: usize,

    /// The count of literals of each weak clause which are not false.
    counts: Vec<u32>,

    queue: VecDeque<CLiteral>,
}

impl<'g> Engine<'g> {
    /// An engine over `graph`, with an empty model.
    pub fn new(graph: &'g Graph) -> Self {
        Engine {
            graph,
            model: vec![0; graph.size()],
            log: Vec::default(),
            floor: 0,
            counts: graph.weak().clause_lengths().to_vec(),
            queue: VecDeque::default(),
        }
    }

    /// An engine over `graph`, with each literal of `preset` true.
    ///
    /// The literals of `preset` are [set](Engine::set_literals), and so are not propagated.
    /// A reset keeps the literals of `preset`, and the literals of `preset` are not among the [added literals](Engine::added_literals).
    pub fn with_preset(graph: &'g Graph, preset: &[CLiteral]) -> Self {
        let mut engine = Engine::new(graph);
        engine.set_literals(preset);
        engine.floor = engine.log.len();
        engine
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// The model of the engine, by atom - 1, with zero for an atom without a value.
    pub fn model(&self) -> &[CLiteral] {
        &self.model
    }

    /// The value of `atom`, as the true literal of `atom`, if `atom` has a value.
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
    pub fn added_literals(&self) -> Vec<CLiteral> {
        self.log[self.floor..].iter().map(|entry| entry.literal).collect()
    }

    /// A count of literals made true since creation or the last reset.
    pub fn added_count(&self) -> usize {
        self.log.len() - self.floor
    }

    /// The count of literals of each weak clause which are not false, by slot.
    pub fn clause_counts(&self) -> &[u32] {
        &self.counts
    }

    /// Makes each literal of `literals` true, and propagates.
    ///
    /// Zero literals are ignored.
    /// Returns a count of the literals made true, or a [Contradiction].
    /// On a contradiction the model is left partially extended, and the engine should be [reset](Engine::reset_to).
    ///
    /// # Panics
    /// If the atom of some literal is not an atom of the graph.
    pub fn propagate(&mut self, literals: &[CLiteral]) -> Result<usize, Contradiction> {
        let before = self.log.len();
        match self.propagate_all(literals) {
            Ok(()) => Ok(self.log.len() - before),
            Err(e) => {
                self.queue.clear();
                log::trace!(target: targets::ENGINE, "Contradiction from {literals:?}");
                Err(e)
            }
        }
    }

    fn propagate_all(&mut self, literals: &[CLiteral]) -> Result<(), Contradiction> {
        for literal in literals.iter().copied().filter(|l| *l != 0) {
            self.assign(literal)?;
            self.drain()?;
        }
        Ok(())
    }

    /// Makes each literal of `literals` true, without propagation or updates to the count of any clause.
    ///
    /// Zero literals are ignored, as is any literal whose atom already has a value.
    pub fn set_literals(&mut self, literals: &[CLiteral]) {
        for literal in literals.iter().copied().filter(|l| *l != 0) {
            let index = literal.atom_index();
            if self.model[index] == 0 {
                self.model[index] = literal;
                self.log.push(Entry {
                    literal,
                    counted: false,
                });
            }
        }
    }

    /// Whether propagating `literals` leads to a contradiction.
    ///
    /// The engine is always reset to its state before the call.
    pub fn is_contradiction(&mut self, literals: &[CLiteral]) -> bool {
        let checkpoint = self.added_count();
        let result = self.propagate(literals);
        self.reset_to(checkpoint);
        result.is_err()
    }

    /// Clears every added literal.
    pub fn reset(&mut self) {
        self.reset_to(0);
    }

    /// Clears each added literal after the first `keep`.
    pub fn reset_to(&mut self, keep: usize) {
        let graph = self.graph;
        let keep = self.floor + keep;
        while self.log.len() > keep {
            let Some(entry) = self.log.pop() else {
                break;
            };
            self.model[entry.literal.atom_index()] = 0;
            if entry.counted {
                for slot in graph.weak().registered_slots(vertex_index(entry.literal)) {
                    self.counts[*slot as usize] += 1;
                }
            }
        }
        self.queue.clear();
    }

    /// Makes `literal` true, together with each literal reached by a strong edge.
    fn assign(&mut self, literal: CLiteral) -> Result<(), Contradiction> {
        match self.model[literal.atom_index()] {
            0 => {}
            value if value == literal => return Ok(()),
            _ => return Err(Contradiction),
        }
        self.make_true(literal);

        let graph = self.graph;
        for neighbour in graph.strong(literal) {
            match self.model[neighbour.atom_index()] {
                0 => self.make_true(*neighbour),
                value if value == *neighbour => {}
                _ => return Err(Contradiction),
            }
        }
        Ok(())
    }

    /// Values the atom of `literal`, decrements the count of each clause registered with `literal`, and queues `literal`.
    fn make_true(&mut self, literal: CLiteral) {
        let graph = self.graph;
        self.model[literal.atom_index()] = literal;
        self.log.push(Entry {
            literal,
            counted: true,
        });
        for slot in graph.weak().registered_slots(vertex_index(literal)) {
            self.counts[*slot as usize] -= 1;
        }
        self.queue.push_back(literal);
    }

    fn drain(&mut self) -> Result<(), Contradiction> {
        let graph = self.graph;
        let weak = graph.weak();

        while let Some(literal) = self.queue.pop_front() {
            for (start, slot) in weak.registered(vertex_index(literal)) {
                match self.counts[slot as usize] {
                    0 => return Err(Contradiction),
                    1 => {
                        let open = weak.clause_at(start, slot).iter().copied().find(|l| {
                            let value = self.model[l.atom_index()];
                            value == 0 || value == *l
                        });
                        match open {
                            None => return Err(Contradiction),
                            Some(l) if self.model[l.atom_index()] == 0 => self.assign(l)?,
                            Some(_) => {}
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{config::Config, structures::cnf::Cnf};

    fn graph_of(clauses: &[&[i32]]) -> crate::graph::Graph {
        let mut config = Config::default();
        config.detect_strong.value = false;
        config.check_redundancy.value = false;
        let cnf = Cnf::from_clauses(clauses.iter().map(|clause| clause.to_vec()));
        crate::graph::Graph::build_regular(&cnf, &config).unwrap()
    }

    #[test]
    fn weak_clause_deduction() {
        let graph = graph_of(&[&[-1, -2, 3]]);
        let mut engine = graph.engine();

        assert_eq!(engine.propagate(&[1]), Ok(1));
        assert_eq!(engine.clause_counts(), &[2]);
        assert_eq!(engine.propagate(&[2]), Ok(2));
        assert_eq!(engine.value_of(3), Some(3));
        assert_eq!(engine.clause_counts(), &[1]);
    }

    #[test]
    fn reset_restores_counts() {
        let graph = graph_of(&[&[-1, -2, 3, 4], &[-1, 2, 5]]);
        let mut engine = graph.engine();

        assert!(engine.propagate(&[1, -3]).is_ok());
        engine.reset_to(1);
        assert_eq!(engine.added_literals(), vec![1]);
        assert_eq!(engine.clause_counts(), &[3, 2]);

        engine.reset();
        assert_eq!(engine.clause_counts(), graph.weak().clause_lengths());
        assert_eq!(engine.model(), &[0; 5]);
    }

    #[test]
    fn set_literals_does_not_count() {
        let graph = graph_of(&[&[-1, -2, 3]]);
        let mut engine = graph.engine();

        engine.set_literals(&[1, 0, 2]);
        assert_eq!(engine.clause_counts(), &[3]);
        assert_eq!(engine.value_of(3), None);
        assert_eq!(engine.added_literals(), vec![1, 2]);
    }

    #[test]
    fn preset_survives_reset() {
        let graph = graph_of(&[&[-1, 2], &[3, 4, 5]]);
        let mut engine = graph.engine_with(&[-3]);

        assert_eq!(engine.propagate(&[1]), Ok(2));
        engine.reset();
        assert_eq!(engine.model(), &[0, 0, -3, 0, 0]);
        assert!(engine.added_literals().is_empty());
        assert!(engine.is_contradiction(&[3]));
    }

    #[test]
    fn conflicting_strong_neighbours() {
        let graph = graph_of(&[&[-1, 2], &[-3, -2]]);
        let mut engine = graph.engine();

        assert!(engine.is_contradiction(&[1, 3]));
        assert!(engine.is_contradiction(&[3, 1]));
        assert!(!engine.is_contradiction(&[1, -3]));
        assert_eq!(engine.added_count(), 0);
    }
}
