/*!
Configuration of builds and of the oracle.

A single [Config] is given to each build, and the oracle(s) of the build are configured from a (partial) copy.

```rust
# use otter_mig::config::Config;
# use std::time::Duration;
let mut config = Config::default();
config.time_limit.value = Duration::from_millis(500);
config.detect_strong.value = false;

assert!(config.time_limit.within_bounds());
```

# Build options

- [check_redundancy](Config::check_redundancy) removes clauses of three or more literals entailed by other clauses, at the cost of a query for each such clause.
- [detect_strong](Config::detect_strong) searches for implications hidden in clauses of three or more literals, at the cost of (many) queries for each atom.
- [add](Config::add) permits the search for hidden implications during an [incremental](crate::builder::incremental) build, restricted to the atoms of added clauses.

Each trades the time taken to build a graph against the strength of propagation through the graph.
Neither affects the correctness of a graph.
*/

mod config_option;
pub use config_option::ConfigOption;

use std::time::Duration;

use crate::generic::luby::LubyRepresentation;

/// Decay applied to atom activity after each conflict.
pub type ActivityDecay = f64;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The time limit for a single query of an oracle.
    ///
    /// A query which exceeds the limit is answered [Unknown](crate::reports::Report::Unknown).
    /// [Duration::MAX] removes the limit.
    pub time_limit: ConfigOption<Duration>,

    /// A count of the most recent models kept by an oracle.
    pub solution_history: ConfigOption<usize>,

    /// Seed for the source of (pseudo)randomness of an oracle.
    pub random_seed: ConfigOption<u64>,

    /// The `u` value to multiply the luby sequence by when determining whether to perform a restart.
    pub luby_u: ConfigOption<LubyRepresentation>,

    /// Permit (scheduled) restarts.
    pub restart: ConfigOption<bool>,

    /// Default to the last set value of an atom when choosing a value for the atom, unless overridden by a phase selection.
    pub phase_saving: ConfigOption<bool>,

    /// The factor by which the activity of atoms decays after each conflict.
    pub activity_decay: ConfigOption<ActivityDecay>,

    /// Remove clauses entailed by other clauses.
    pub check_redundancy: ConfigOption<bool>,

    /// Search for strong edges hidden in weak clauses.
    pub detect_strong: ConfigOption<bool>,

    /// During an incremental build, search for strong edges around the atoms of added clauses.
    pub add: ConfigOption<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            time_limit: ConfigOption {
                name: "time_limit",
                min: Duration::ZERO,
                max: Duration::MAX,
                value: Duration::from_secs(30),
            },

            solution_history: ConfigOption {
                name: "solution_history",
                min: 0,
                max: usize::MAX,
                value: 256,
            },

            random_seed: ConfigOption {
                name: "random_seed",
                min: u64::MIN,
                max: u64::MAX,
                value: 0,
            },

            luby_u: ConfigOption {
                name: "luby",
                min: LubyRepresentation::MIN,
                max: LubyRepresentation::MAX,
                value: 128,
            },

            restart: ConfigOption {
                name: "restart",
                min: false,
                max: true,
                value: true,
            },

            phase_saving: ConfigOption {
                name: "phase_saving",
                min: false,
                max: true,
                value: true,
            },

            activity_decay: ConfigOption {
                name: "activity_decay",
                min: 0.0,
                max: 1.0,
                value: 0.95,
            },

            check_redundancy: ConfigOption {
                name: "check_redundancy",
                min: false,
                max: true,
                value: true,
            },

            detect_strong: ConfigOption {
                name: "detect_strong",
                min: false,
                max: true,
                value: true,
            },

            add: ConfigOption {
                name: "add",
                min: false,
                max: true,
                value: true,
            },
        }
    }
}
