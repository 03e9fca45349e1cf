use thiserror::Error;

/// Reasons a command line is rejected before anything runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("too many arguments (limit is {limit})")]
    TooManyArguments { limit: usize },

    #[error("command line too long (limit is {limit} bytes)")]
    LineTooLong { limit: usize },

    #[error("nul byte at position {position}")]
    InteriorNul { position: usize },
}
