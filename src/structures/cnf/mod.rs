/*!
Formulas in conjunctive normal form.

A [Cnf] is a collection of clauses over the atoms of a [VariableMap].

Clauses are stored as given, with the exception of the zero literal, which is dropped.
So, for example, duplicate literals and tautologies are kept, and left to the [cleaner](crate::builder::clean) of a build.

```rust
# use otter_mig::structures::cnf::Cnf;
let mut cnf = Cnf::default();
cnf.add_clause([1, -2, 0]);
cnf.add_clause([3]);

assert_eq!(cnf.variable_count(), 3);
assert_eq!(cnf.clauses(), &[vec![1, -2], vec![3]]);
```

Formulas may also be read from DIMACS, see [read_dimacs](Cnf::read_dimacs).
*/

pub mod dimacs;
mod variables;
pub use variables::VariableMap;

use crate::structures::{
    atom::Atom,
    clause::CClause,
    literal::{CLiteral, Literal},
};

/// A formula in conjunctive normal form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cnf {
    variables: VariableMap,
    clauses: Vec<CClause>,
}

impl Cnf {
    /// An empty formula over the given atoms.
    pub fn new(variables: VariableMap) -> Self {
        Cnf {
            variables,
            clauses: Vec::default(),
        }
    }

    /// An empty formula over the atoms `1..=count`.
    pub fn with_variable_count(count: usize) -> Self {
        Cnf::new(VariableMap::with_count(count))
    }

    /// A formula from a collection of clauses, with the atoms of the formula being `1..=m` for the maximum atom `m` of any clause.
    pub fn from_clauses<C, L>(clauses: C) -> Self
    where
        C: IntoIterator<Item = L>,
        L: IntoIterator<Item = CLiteral>,
    {
        let mut cnf = Cnf::default();
        for clause in clauses {
            cnf.add_clause(clause);
        }
        cnf
    }

    /// Adds a clause to the formula, growing the atoms of the formula to cover each literal.
    ///
    /// Any zero literal is ignored, and a (non-empty) clause of only zero literals is ignored entirely.
    /// An empty clause is kept, making the formula unsatisfiable.
    pub fn add_clause(&mut self, clause: impl IntoIterator<Item = CLiteral>) {
        let mut given = 0;
        let mut the_clause = CClause::default();

        for literal in clause {
            given += 1;
            if literal != 0 {
                the_clause.push(literal);
            }
        }

        if the_clause.is_empty() && given > 0 {
            return;
        }

        if let Some(max) = the_clause.iter().map(|l| l.atom()).max() {
            self.variables.grow_to(max as usize);
        }

        self.clauses.push(the_clause);
    }

    /// The atom of `name`, after adding `name` with a fresh atom if required.
    pub fn atom(&mut self, name: impl Into<String>) -> Atom {
        self.variables.add(name)
    }

    /// The literal of `name` with `polarity`, if `name` is the name of an atom.
    pub fn literal(&self, name: &str, polarity: bool) -> Option<CLiteral> {
        self.variables
            .atom(name)
            .map(|atom| CLiteral::new(atom, polarity))
    }

    pub fn variables(&self) -> &VariableMap {
        &self.variables
    }

    /// A count of atoms of the formula.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn clauses(&self) -> &[CClause] {
        &self.clauses
    }

    /// The formula in DIMACS form, with the name of each atom given in a comment.
    pub fn as_dimacs(&self) -> String {
        let mut dimacs = String::default();

        for (atom, name) in self.variables.iter() {
            dimacs.push_str(&format!("c {atom} {name}\n"));
        }

        dimacs.push_str(&format!(
            "p cnf {} {}\n",
            self.variable_count(),
            self.clauses.len()
        ));

        for clause in &self.clauses {
            for literal in clause {
                dimacs.push_str(&format!("{literal} "));
            }
            dimacs.push_str("0\n");
        }

        dimacs
    }
}
