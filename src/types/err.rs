//! Error types used in the library.
//!
//! - Some of these are internally expected --- e.g. a [Contradiction] is the usual answer to a probe of an [engine](crate::engine).
//! - Some are external --- e.g. [BuildError::Unsatisfiable] is returned when asked to build a graph for an unsatisfiable formula.
//! - Some indicate a bug --- e.g. an [InvariantError] is returned when a finished graph fails a structural check.
//!
//! Note, a timeout is not an error.
//! The [oracle](crate::oracle) reports [Unknown](crate::reports::Report::Unknown) and each procedure which queries the oracle handles the report explicitly.
//!
//! Names of the error enums --- for the most part --- overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::structures::{atom::Atom, literal::CLiteral};

/// The error type of the library.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Build(BuildError),
    Invariant(InvariantError),
    Oracle(OracleError),
    Parse(ParseError),
}

/// Noted errors when building a graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// The formula is unsatisfiable, and so every literal is both core and dead.
    ///
    /// Returned before any structure is built.
    Unsatisfiable,
}

impl From<BuildError> for ErrorKind {
    fn from(e: BuildError) -> Self {
        ErrorKind::Build(e)
    }
}

/// A finished graph failed a structural check.
///
/// Each of these indicates a bug in the construction of a graph, rather than an issue with the formula.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvariantError {
    /// Both literals of an atom are core.
    ComplementaryCore(Atom),

    /// A literal is core without the negation being dead, or the reverse.
    StatusMismatch(Atom),

    /// A vertex has an edge to itself.
    SelfLoop(CLiteral),

    /// A literal of a clause in the weak index has a core or dead atom.
    FixedInClause(CLiteral),
}

impl From<InvariantError> for ErrorKind {
    fn from(e: InvariantError) -> Self {
        ErrorKind::Invariant(e)
    }
}

/// Noted errors from the oracle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OracleError {
    /// Adding the clause would make the formula trivially unsatisfiable.
    ///
    /// The clause is not added.
    Contradiction,

    /// An atom outside the range of the oracle.
    UnknownAtom(Atom),

    /// A request to pop a clause, though no clause has been pushed.
    NothingToPop,
}

impl From<OracleError> for ErrorKind {
    fn from(e: OracleError) -> Self {
        ErrorKind::Oracle(e)
    }
}

/// Noted errors when reading a formula.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The problem line could not be read.
    ProblemSpecification,

    /// Some line could not be read.
    Line(usize),

    /// Some token on a line was not a literal.
    Literal(usize),

    /// A clause was not terminated before the end of the input.
    Unterminated,
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Propagation found an assignment which conflicts with the model of an engine.
///
/// Expected, and the usual answer to a probe.
/// The model of the engine is left partially extended, and should be reset before further use.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Contradiction;

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Build(BuildError::Unsatisfiable) => write!(f, "formula unsatisfiable"),

            Self::Invariant(e) => match e {
                InvariantError::ComplementaryCore(atom) => {
                    write!(f, "invariant violation: both literals of {atom} are core")
                }
                InvariantError::StatusMismatch(atom) => {
                    write!(f, "invariant violation: status of {atom} is not complementary")
                }
                InvariantError::SelfLoop(literal) => {
                    write!(f, "invariant violation: self-loop at {literal}")
                }
                InvariantError::FixedInClause(literal) => {
                    write!(f, "invariant violation: fixed literal {literal} in a clause")
                }
            },

            Self::Oracle(e) => match e {
                OracleError::Contradiction => write!(f, "clause contradicts the formula"),
                OracleError::UnknownAtom(atom) => write!(f, "unknown atom {atom}"),
                OracleError::NothingToPop => write!(f, "no clause to pop"),
            },

            Self::Parse(e) => match e {
                ParseError::ProblemSpecification => write!(f, "malformed problem line"),
                ParseError::Line(line) => write!(f, "unreadable line {line}"),
                ParseError::Literal(line) => write!(f, "malformed literal on line {line}"),
                ParseError::Unterminated => write!(f, "unterminated clause"),
            },
        }
    }
}

impl std::error::Error for ErrorKind {}

impl std::fmt::Display for Contradiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "contradiction")
    }
}
