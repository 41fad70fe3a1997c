use thiserror::Error;

/// Rejected generator configurations. All checks run before any generation
/// work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("population must contain at least one user")]
    EmptyPopulation,

    #[error(
        "min_connections {min_connections} cannot be satisfied by a population of {population} \
         (at most {} distinct neighbours per user)",
        .population.saturating_sub(1)
    )]
    UnsatisfiableMinimum {
        min_connections: usize,
        population: usize,
    },

    #[error("extra edge range {start}..={end} is empty")]
    EmptyExtraEdgeRange { start: usize, end: usize },

    #[error("{0} pool is empty")]
    EmptyPool(&'static str),

    #[error("interest pool needs at least 2 entries, got {0}")]
    InsufficientInterests(usize),

    #[error("location weights sum to zero")]
    ZeroLocationWeight,

    #[error("reference time precedes history start")]
    InvertedTimeline,
}
