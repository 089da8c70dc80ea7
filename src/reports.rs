/*!
Reports from the oracle.
*/

/// The answer to a query of the [oracle](crate::oracle).
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Report {
    /// The formula is satisfiable, together with any assumptions.
    ///
    /// A model is available from [model](crate::oracle::Oracle::model).
    Satisfiable,

    /// The formula is unsatisfiable, together with any assumptions.
    Unsatisfiable,

    /// Satisfiability is unknown, as the time limit of the query was exceeded.
    Unknown,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}
