/*!
Reading formulas in DIMACS form.

The usual DIMACS form is supported, together with two common extensions:
- A comment of the form `c <atom> <name>` names an atom, as written by many tools for feature models.
- A line beginning with `%` ends the formula, as in the SATLIB benchmarks.

```rust
# use otter_mig::structures::cnf::Cnf;
let dimacs = "
c 1 Root
c 2 Engine
p cnf 3 2
1 0
-2 1 3 0
";
let cnf = Cnf::read_dimacs(dimacs.as_bytes()).unwrap();

assert_eq!(cnf.variable_count(), 3);
assert_eq!(cnf.literal("Engine", false), Some(-2));
assert_eq!(cnf.variables().name(3), Some("3"));
```
*/

use std::{
    collections::{HashMap, HashSet},
    io::BufRead,
};

use crate::{
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        clause::CClause,
        cnf::{Cnf, VariableMap},
        literal::{CLiteral, Literal},
    },
    types::err::{self, ErrorKind},
};

impl Cnf {
    /// Reads a formula in DIMACS form.
    ///
    /// ```rust,ignore
    /// let cnf = Cnf::read_dimacs(BufReader::new(&file))?;
    /// ```
    pub fn read_dimacs(mut reader: impl BufRead) -> Result<Cnf, ErrorKind> {
        let mut buffer = String::with_capacity(1024);
        let mut line_counter = 0;

        let mut expected: Option<(usize, usize)> = None;
        let mut names: HashMap<Atom, String> = HashMap::default();
        let mut clauses: Vec<CClause> = Vec::default();
        let mut clause_buffer = CClause::default();
        let mut max_atom: usize = 0;

        'line_loop: loop {
            buffer.clear();
            match reader.read_line(&mut buffer) {
                Ok(0) => break,
                Ok(_) => line_counter += 1,
                Err(_) => return Err(ErrorKind::from(err::ParseError::Line(line_counter))),
            }

            let line = buffer.trim();
            match line.chars().next() {
                None => continue 'line_loop,

                Some('%') => break 'line_loop,

                Some('c') => {
                    let mut comment = line[1..].trim().splitn(2, char::is_whitespace);
                    if let (Some(atom), Some(name)) = (comment.next(), comment.next()) {
                        if let Ok(atom) = atom.parse::<Atom>() {
                            if atom > 0 && !name.trim().is_empty() {
                                names.insert(atom, name.trim().to_string());
                            }
                        }
                    }
                }

                Some('p') => {
                    let mut details = line.split_whitespace().skip(2);
                    let counts = details
                        .next()
                        .and_then(|atoms| atoms.parse().ok())
                        .zip(details.next().and_then(|clauses| clauses.parse().ok()));
                    match counts {
                        None => {
                            return Err(ErrorKind::from(err::ParseError::ProblemSpecification))
                        }
                        Some(counts) => expected = Some(counts),
                    }
                }

                _ => {
                    for item in line.split_whitespace() {
                        let literal: CLiteral = match item.parse() {
                            Ok(literal) => literal,
                            Err(_) => {
                                return Err(ErrorKind::from(err::ParseError::Literal(line_counter)))
                            }
                        };

                        match literal {
                            0 => clauses.push(std::mem::take(&mut clause_buffer)),
                            _ => {
                                max_atom = max_atom.max(literal.atom() as usize);
                                clause_buffer.push(literal);
                            }
                        }
                    }
                }
            }
        }

        if !clause_buffer.is_empty() {
            return Err(ErrorKind::from(err::ParseError::Unterminated));
        }

        let mut count = max_atom;
        if let Some((atoms, clause_count)) = expected {
            count = count.max(atoms);
            if clause_count != clauses.len() {
                log::warn!(target: targets::PARSE, "Expected {clause_count} clauses, read {}", clauses.len());
            }
        }
        if let Some(named_max) = names.keys().max() {
            count = count.max(*named_max as usize);
        }

        let reserved: HashSet<String> = names.values().cloned().collect();
        let mut variables = VariableMap::default();
        for atom in 1..=count as Atom {
            let mut name = match names.remove(&atom) {
                Some(name) => name,
                None => {
                    let mut decimal = atom.to_string();
                    while reserved.contains(&decimal) {
                        decimal.push('\'');
                    }
                    decimal
                }
            };
            // Explicit names may repeat.
            while variables.atom(&name).is_some() {
                name.push('\'');
            }
            variables.add(name);
        }

        log::info!(target: targets::PARSE, "Read {} clauses over {count} atoms", clauses.len());

        let mut cnf = Cnf::new(variables);
        for clause in clauses {
            cnf.add_clause(clause);
        }
        Ok(cnf)
    }
}
