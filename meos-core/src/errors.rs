use crate::parameter::ParameterError;
use thiserror::Error;

/// Error type for invalid fluid definitions, improperly defined states
/// and convergence problems.
#[derive(Error, Debug)]
pub enum MeosError {
    #[error("Invalid fluid definition: {0}")]
    Configuration(String),
    #[error("Invalid argument in {0}: {1} = {2}.")]
    Domain(String, String, f64),
    #[error("{0} = {1} is outside of the range of validity [{2}, {3}].")]
    OutOfRange(String, f64, f64, f64),
    #[error("`{0}` did not converge within the maximum number of iterations.")]
    NotConverged(String),
    #[error("`{0}` encountered illegal values during the iteration.")]
    IterationFailed(String),
    #[error("Iteration resulted in trivial solution.")]
    TrivialSolution,
    #[error("Invalid state in {0}: {1} = {2}.")]
    InvalidState(String, String, f64),
    #[error("Undetermined state: {0}.")]
    UndeterminedState(String),
    #[error("System is supercritical.")]
    SuperCritical,
    #[error("Isobaric heat capacity is singular at the critical point (denominator {0}).")]
    CriticalSingularity(f64),
    #[error("Speed of sound is undefined for a negative squared value of {0} m²/s².")]
    NegativeRadicand(f64),
    #[error("Unsupported {0} form: {1}.")]
    UnsupportedForm(String, i64),
    #[error(transparent)]
    ParameterError(#[from] ParameterError),
}

/// Convenience type for `Result<T, MeosError>`.
pub type MeosResult<T> = Result<T, MeosError>;
