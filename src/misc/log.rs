/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library, each with one of the [targets] below.
Building a graph logs the outcome of each phase at `info`, individual oracle queries at `trace`, and anything which degrades the completeness of a graph (timeouts, clauses dropped defensively) at `warn`.

Note, no log implementation is provided.
For more details, see [log].
The tests of the library use [env_logger](https://docs.rs/env_logger), e.g. `RUST_LOG=discovery=trace cargo test`.
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [building](crate::builder) a graph as a whole
    pub const BUILD: &str = "build";

    /// Logs related to the [oracle](crate::oracle)
    pub const ORACLE: &str = "oracle";

    /// Logs related to [core and dead detection](crate::builder::core_dead)
    pub const CORE_DEAD: &str = "core_dead";

    /// Logs related to [cleaning clauses](crate::builder::clean)
    pub const CLEAN: &str = "clean";

    /// Logs related to [strong edges](crate::graph::strong)
    pub const STRONG: &str = "strong";

    /// Logs related to the [weak clause index](crate::graph::weak)
    pub const WEAK: &str = "weak";

    /// Logs related to [discovery of strong edges](crate::builder::discovery)
    pub const DISCOVERY: &str = "discovery";

    /// Logs related to [redundancy filtering](crate::builder::redundancy)
    pub const REDUNDANCY: &str = "redundancy";

    /// Logs related to [incremental builds](crate::builder::incremental)
    pub const INCREMENTAL: &str = "incremental";

    /// Logs related to [propagation engines](crate::engine)
    pub const ENGINE: &str = "engine";

    /// Logs related to [reading formulas](crate::structures::cnf::dimacs)
    pub const PARSE: &str = "parse";
}
