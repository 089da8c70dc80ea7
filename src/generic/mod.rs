//! Generic structures, not specific to implication graphs.

pub mod activity_heap;
pub mod buffer;
pub mod luby;
pub mod random;
