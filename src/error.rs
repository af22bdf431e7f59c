use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// The solver finished without an optimal solution. Fatal: the run is
    /// aborted, never retried.
    #[error("solver returned no optimal solution: {0}")]
    InfeasibleOrUnbounded(#[from] microlp::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
