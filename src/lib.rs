//! A library for building and reasoning with modal implication graphs of formulas written in conjunctive normal form.
//!
//! Many questions asked of a (large, satisfiable) formula are structural and repeated:
//! - Which literals are true on every model, and which false?
//! - Which literals imply which others?
//! - Is some partial assignment consistent with the formula?
//!
//! A query to a SAT solver for each question is expensive.
//! A modal implication graph is built once, with the help of a SAT solver, and afterwards answers many such questions by propagation alone.
//!
//! # Orientation
//!
//! The library is designed around a [graph](crate::graph::Graph).
//!
//! - A graph is built from a [formula](crate::structures::cnf::Cnf), either from scratch or [incrementally](crate::builder::incremental) from a previous graph.
//!   The [builder] documents the phases of a build.
//! - Queries made while building a graph are made to a small incremental [oracle](crate::oracle), with a [time limit](crate::config::Config::time_limit) for each query.
//! - Reasoning with a graph is done with an [engine](crate::engine), and any number of engines may borrow a graph at once.
//! - The [structures] give the representation of literals, clauses, formulas, and the vertices of a graph.
//! - The [configuration](crate::config) lists the options of a build.
//!
//! # Examples
//!
//! + Build a graph, and test some assignments.
//!
//! ```rust
//! # use otter_mig::config::Config;
//! # use otter_mig::graph::Graph;
//! # use otter_mig::structures::cnf::Cnf;
//! // A root feature 1, with a choice of exactly one of 2 and 3, and 4 requiring 3.
//! let cnf = Cnf::from_clauses([
//!     vec![1],
//!     vec![-2, 1],
//!     vec![-3, 1],
//!     vec![2, 3],
//!     vec![-2, -3],
//!     vec![-4, 3],
//! ]);
//!
//! let graph = Graph::build_regular(&cnf, &Config::default()).unwrap();
//! assert_eq!(graph.core(), &[1]);
//! assert!(graph.has_strong_edge(4, -2));
//!
//! let mut engine = graph.engine();
//! assert!(engine.is_contradiction(&[2, 4]));
//! assert!(!engine.is_contradiction(&[3, 4]));
//!
//! assert!(engine.propagate(&[-3]).is_ok());
//! assert_eq!(engine.value_of(2), Some(2));
//! assert_eq!(engine.value_of(4), Some(-4));
//! ```
//!
//! + Read a formula in DIMACS form, with names for atoms.
//!
//! ```rust
//! # use otter_mig::config::Config;
//! # use otter_mig::graph::Graph;
//! # use otter_mig::structures::cnf::Cnf;
//! let dimacs = "
//! c 1 root
//! c 2 engine
//! p cnf 2 2
//!  1 0
//! -1 2 0
//! ";
//!
//! let cnf = Cnf::read_dimacs(dimacs.as_bytes()).unwrap();
//! let graph = Graph::build_regular(&cnf, &Config::default()).unwrap();
//!
//! let engine = cnf.literal("engine", true).unwrap();
//! assert!(graph.core().contains(&engine));
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout the library, with targets listed in [misc::log].
//! No log implementation is provided.
//!
//! # Features
//!
//! - `petgraph`: export the strong edges of a graph to [petgraph](https://docs.rs/petgraph), and find sets of equivalent literals.
//! - `serde`: (de)serialisation of formulas and graphs.

pub mod builder;
pub mod config;
pub mod engine;
pub mod generic;
pub mod graph;
pub mod misc;
pub mod oracle;
pub mod reports;
pub mod structures;
pub mod types;
