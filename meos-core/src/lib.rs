#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]
//! Multiparameter Helmholtz energy equations of state for pure fluids.
//!
//! The crate evaluates reduced Helmholtz energies $\phi(\delta,\tau)$ given
//! as declarative term lists, derives all thermodynamic properties from
//! their exact derivatives, solves states from pairs of state variables
//! and evaluates transport properties.

/// Print messages with level `Verbosity::Iter` or higher.
#[macro_export]
macro_rules! log_iter {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::Verbosity::Iter {
            log::debug!($($arg)*);
        }
    }
}

/// Print messages with level `Verbosity::Result` or higher.
#[macro_export]
macro_rules! log_result {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::Verbosity::Result {
            log::info!($($arg)*);
        }
    }
}

pub mod ancillary;
pub mod blend;
mod density_iteration;
pub mod equation_of_state;
mod errors;
mod fluid;
pub mod parameter;
mod phase_equilibria;
pub mod si;
mod state;
pub mod transport;

pub use ancillary::{Ancillaries, Ancillary, AncillaryForm};
pub use blend::Blend;
pub use equation_of_state::{Derivatives, HelmholtzEquation, HelmholtzFunction};
pub use errors::{MeosError, MeosResult};
pub use fluid::{EquationSelector, Fluid, ReferenceState};
pub use phase_equilibria::{PhaseEquilibrium, SolverOptions, Verbosity};
pub use state::{
    DensityInitialization, FluidState, PropertyBag, State, StateBuilder, StateSpec, StateSweep,
    StateVec, TPSpec,
};
pub use transport::{TransportProperty, TransportRegistry};

#[cfg(test)]
pub(crate) mod test_fluids {
    use crate::parameter::FluidRecord;
    use crate::transport::TransportRegistry;
    use crate::Fluid;
    use std::sync::Arc;

    fn load(json: &str) -> Arc<Fluid> {
        let record = FluidRecord::from_json_str(json).unwrap();
        Arc::new(Fluid::new(&record, &TransportRegistry::new()).unwrap())
    }

    /// Water without its custom transport methods.
    pub fn water() -> Arc<Fluid> {
        let mut record =
            FluidRecord::from_json_str(include_str!("../../parameters/water.json")).unwrap();
        record.viscosity.clear();
        record.thermal_conductivity.clear();
        Arc::new(Fluid::new(&record, &TransportRegistry::new()).unwrap())
    }

    pub fn air() -> Arc<Fluid> {
        load(include_str!("../../parameters/air.json"))
    }

    pub fn hydrogen() -> Arc<Fluid> {
        load(include_str!("../../parameters/hydrogen.json"))
    }
}
