use std::time::Duration;

/// Counts for various things which count, roughly.
#[derive(Clone, Debug, Default)]
pub struct Counters {
    /// A count of every query.
    pub queries: usize,

    /// A count of queries answered satisfiable.
    pub satisfiable: usize,

    /// A count of queries answered unsatisfiable.
    pub unsatisfiable: usize,

    /// A count of queries whose answer is unknown, as the time limit was exceeded.
    pub unknown: usize,

    /// A count of every conflict seen.
    pub conflicts: usize,

    /// A count of all decisions made, excluding assumptions.
    pub decisions: usize,

    /// The number of restarts.
    pub restarts: usize,

    /// The number of reductions of learnt clauses.
    pub reductions: usize,

    /// The total time taken by queries.
    pub time: Duration,
}
