//! Records that describe a fluid and the equations available for it.

use std::io;
use thiserror::Error;

mod identifier;
mod record;
mod term_group;

pub use identifier::Identifier;
pub use record::{CriticalPointRecord, FluidRecord, TriplePointRecord};
pub use term_group::TermGroup;

/// Error type for incomplete or erroneous fluid records.
#[derive(Error, Debug)]
pub enum ParameterError {
    #[error(transparent)]
    FileIO(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("The substance '{0}' was not found.")]
    SubstanceNotFound(String),
    #[error("Incompatible parameters: {0}")]
    IncompatibleParameters(String),
}
