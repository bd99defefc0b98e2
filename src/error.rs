use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core.
///
/// Degenerate pair geometry (coincident centers) is deliberately absent: the
/// collision resolver skips such pairs instead of failing the step.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Random placement could not find a non-overlapping spot within its attempt budget.
    #[error(
        "failed to place particle {index} without overlap after {attempts} attempts; \
         try fewer particles or a larger box"
    )]
    Placement { index: usize, attempts: usize },

    /// The ensemble no longer accepts new particles.
    #[error("ensemble is sealed: {0}")]
    Sealed(String),
}
