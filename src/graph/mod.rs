/*!
A modal implication graph.

A graph has a vertex for each literal of a formula, and records:
- The [status](Status) of each vertex, so the *core* literals true on every model and the *dead* literals false on every model.
- For each vertex, the [strong](strong) edges from the vertex, closed under transitivity.
  An edge *l → m* is a proof that *m* is true on every model on which *l* is true.
- The [weak](weak) clauses of three or more literals, indexed by vertex.

A graph is built once, either from [scratch](Graph::build_regular) or [incrementally](Graph::build_incremental) from some previous graph, and is immutable afterwards.
Reasoning with a graph is done with an [engine](crate::engine), and any number of engines may borrow a graph at the same time.

```rust
# use otter_mig::config::Config;
# use otter_mig::graph::Graph;
# use otter_mig::structures::cnf::Cnf;
# use otter_mig::structures::vertex::Status;
// 1 is core, and 2 and 3 are equivalent.
let cnf = Cnf::from_clauses([vec![1], vec![-2, 3], vec![2, -3], vec![-1, 2, 4]]);
let graph = Graph::build_regular(&cnf, &Config::default()).unwrap();

assert_eq!(graph.core(), &[1]);
assert_eq!(graph.dead(), vec![-1]);
assert_eq!(graph.vertex(2).map(|v| v.status()), Some(Status::Normal));
assert!(graph.has_strong_edge(2, 3));
assert!(graph.has_strong_edge(-3, -2));
```

# Invariants

A graph is checked when finished, and a graph which fails a check is never returned.
In particular:
- The status of the vertices of an atom are complementary.
- No vertex has an edge to itself.
- No literal of a weak clause is core or dead.

# Completeness

Each query of the oracle made while building a graph is subject to a [time limit](crate::config::Config::time_limit).
A query which exceeds the limit leaves the literals involved [normal](Status::Normal), and any edge involved undetected.
So, a graph is *sound* though may be incomplete, and [is_complete](Graph::is_complete) notes whether any query timed out.
*/

#[cfg(feature = "petgraph")]
pub mod export;
pub mod strong;
pub mod weak;

use crate::{
    builder::{incremental::Changes, Counters},
    engine::{light::LightEngine, Engine},
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        clause::CClause,
        cnf::Cnf,
        literal::{CLiteral, Literal},
        vertex::{vertex_index, vertex_literal, Status},
    },
    types::err::{self},
};

use strong::StrongEdges;
use weak::WeakIndex;

/// A modal implication graph.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    /// The formula the graph was built from.
    cnf: Cnf,

    /// A count of atoms.
    size: usize,

    /// The core literals, ordered by atom.
    core: Vec<CLiteral>,

    /// The status of each vertex.
    status: Vec<Status>,

    /// The strong edges from each vertex.
    strong: Vec<Box<[CLiteral]>>,

    weak: WeakIndex,

    /// Strong edges found by discovery, as binary clauses.
    detected_strong: Vec<[CLiteral; 2]>,

    /// Clauses found to be redundant, and so absent from the weak index.
    redundant: Vec<CClause>,

    counters: Counters,

    changes: Option<Changes>,
}

/// The parts of a graph, before the strong edges are closed and the graph is checked.
pub(crate) struct Draft {
    pub cnf: Cnf,
    pub status: Vec<Status>,

    /// Clean clauses of two or more literals.
    pub clauses: Vec<CClause>,

    pub detected_strong: Vec<[CLiteral; 2]>,
    pub redundant: Vec<CClause>,
    pub counters: Counters,
    pub changes: Option<Changes>,
}

impl Draft {
    /// Closes the strong edges of the draft, indexes the weak clauses, and checks the result.
    pub fn finish(self) -> Result<Graph, err::InvariantError> {
        let size = self.cnf.variable_count();

        let mut strong = StrongEdges::with_atom_count(size);
        for clause in self.clauses.iter().filter(|clause| clause.len() == 2) {
            strong.add_clause(clause[0], clause[1]);
        }
        strong.close(&self.status);

        let weak = WeakIndex::build(
            size,
            self.clauses
                .iter()
                .filter(|clause| clause.len() > 2)
                .map(|clause| clause.as_slice()),
        );
        log::info!(target: targets::WEAK, "Indexed {} weak clauses", weak.len());

        let core = (0..2 * size)
            .filter(|vertex| self.status[*vertex] == Status::Core)
            .map(vertex_literal)
            .collect::<Vec<_>>();

        let graph = Graph {
            cnf: self.cnf,
            size,
            core,
            status: self.status,
            strong: strong.finish(),
            weak,
            detected_strong: self.detected_strong,
            redundant: self.redundant,
            counters: self.counters,
            changes: self.changes,
        };

        match graph.check() {
            Ok(()) => Ok(graph),
            Err(e) => {
                log::error!(target: targets::BUILD, "Finished graph failed a check: {e:?}");
                Err(e)
            }
        }
    }
}

impl Graph {
    /// Checks the structural invariants of the graph.
    pub fn check(&self) -> Result<(), err::InvariantError> {
        for atom in 1..=self.size as Atom {
            let literal = CLiteral::new(atom, true);
            let positive = self.status[vertex_index(literal)];
            let negative = self.status[vertex_index(literal.negate())];
            match (positive, negative) {
                (Status::Core, Status::Core) => return Err(err::InvariantError::ComplementaryCore(atom)),
                (p, n) if p.complement() != n => return Err(err::InvariantError::StatusMismatch(atom)),
                _ => {}
            }
        }

        for (vertex, list) in self.strong.iter().enumerate() {
            let literal = vertex_literal(vertex);
            if list.contains(&literal) {
                return Err(err::InvariantError::SelfLoop(literal));
            }
        }

        for clause in self.weak.clauses() {
            if let Some(fixed) = clause.iter().find(|l| self.status[vertex_index(**l)] != Status::Normal) {
                return Err(err::InvariantError::FixedInClause(*fixed));
            }
        }

        Ok(())
    }

    /// A copy of the graph for a formula with exactly the same clauses and atoms.
    pub(crate) fn with_formula(&self, cnf: Cnf, counters: Counters, changes: Changes) -> Graph {
        Graph {
            cnf,
            counters,
            changes: Some(changes),
            ..self.clone()
        }
    }
}

/// The vertex of a literal in a graph.
#[derive(Clone, Copy, Debug)]
pub struct Vertex<'g> {
    graph: &'g Graph,
    literal: CLiteral,
}

impl<'g> Vertex<'g> {
    pub fn literal(&self) -> CLiteral {
        self.literal
    }

    pub fn index(&self) -> usize {
        vertex_index(self.literal)
    }

    pub fn status(&self) -> Status {
        self.graph.status[self.index()]
    }

    pub fn is_core(&self) -> bool {
        self.status() == Status::Core
    }

    pub fn is_dead(&self) -> bool {
        self.status() == Status::Dead
    }

    pub fn is_normal(&self) -> bool {
        self.status() == Status::Normal
    }

    /// The literals reached by a strong edge from the vertex, sorted.
    pub fn strong(&self) -> &'g [CLiteral] {
        &self.graph.strong[self.index()]
    }

    /// The weak clauses which lose a literal when the literal of the vertex is true.
    pub fn weak_clauses(&self) -> impl Iterator<Item = &'g [CLiteral]> + 'g {
        let weak = &self.graph.weak;
        weak.registered(self.index())
            .map(move |(start, slot)| weak.clause_at(start, slot))
    }

    /// The vertex of the negation of the literal.
    pub fn complement(&self) -> Vertex<'g> {
        Vertex {
            graph: self.graph,
            literal: self.literal.negate(),
        }
    }
}

impl Graph {
    /// A count of atoms.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The formula the graph was built from.
    pub fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    /// The core literals, ordered by atom.
    pub fn core(&self) -> &[CLiteral] {
        &self.core
    }

    /// The dead literals, ordered by atom.
    pub fn dead(&self) -> Vec<CLiteral> {
        self.core.iter().map(|l| l.negate()).collect()
    }

    /// The vertex of `literal`, if `literal` is a (nonzero) literal of an atom of the graph.
    pub fn vertex(&self, literal: CLiteral) -> Option<Vertex<'_>> {
        match literal != 0 && literal.atom() as usize <= self.size {
            true => Some(Vertex { graph: self, literal }),
            false => None,
        }
    }

    /// The status of each vertex, in order of vertex index.
    pub fn statuses(&self) -> &[Status] {
        &self.status
    }

    /// The literals reached by a strong edge from the vertex of `literal`, sorted.
    ///
    /// # Panics
    /// If `literal` is zero, or of an atom outside the graph.
    pub fn strong(&self, literal: CLiteral) -> &[CLiteral] {
        &self.strong[vertex_index(literal)]
    }

    /// Whether there is a strong edge `from → to`.
    pub fn has_strong_edge(&self, from: CLiteral, to: CLiteral) -> bool {
        match self.vertex(from) {
            Some(vertex) => vertex.strong().binary_search(&to).is_ok(),
            None => false,
        }
    }

    /// A count of strong edges.
    pub fn strong_edge_count(&self) -> usize {
        self.strong.iter().map(|list| list.len()).sum()
    }

    pub fn weak(&self) -> &WeakIndex {
        &self.weak
    }

    /// Strong edges found by discovery, each as a binary clause.
    pub fn detected_strong(&self) -> &[[CLiteral; 2]] {
        &self.detected_strong
    }

    /// Clauses found to be redundant, which are absent from the graph.
    pub fn redundant(&self) -> &[CClause] {
        &self.redundant
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Whether every query made while building the graph was answered before the time limit.
    pub fn is_complete(&self) -> bool {
        self.counters.timeouts == 0
    }

    /// The changes from the previous graph, if the graph was built incrementally.
    pub fn changes(&self) -> Option<Changes> {
        self.changes
    }

    /// An engine over the graph.
    pub fn engine(&self) -> Engine<'_> {
        Engine::new(self)
    }

    /// An engine over the graph, with the literals of `preset` set.
    ///
    /// See [Engine::with_preset].
    pub fn engine_with(&self, preset: &[CLiteral]) -> Engine<'_> {
        Engine::with_preset(self, preset)
    }

    /// An engine over the strong edges of the graph.
    pub fn light_engine(&self) -> LightEngine<'_> {
        LightEngine::new(self)
    }
}
