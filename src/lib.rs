#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]
//! MEoS - Multiparameter Helmholtz energy equations of state.
//!
//! Thermodynamic and transport properties of pure fluids and pseudo-pure
//! blends from reference equations of state in the form of the reduced
//! Helmholtz energy.
//!
//! # Example
//! ```
//! # use meos::{fluids, MeosResult, StateBuilder};
//! # use meos::si::*;
//! # use approx::assert_relative_eq;
//! # fn main() -> MeosResult<()> {
//! let water = fluids::water()?;
//! let state = StateBuilder::new(&water)
//!     .temperature(300.0 * KELVIN)
//!     .pressure(BAR)
//!     .build()?;
//! assert_relative_eq!(state.mass_density().kg_m3(), 996.56, max_relative = 1e-4);
//! # Ok(())
//! # }
//! ```
pub mod fluids;

pub use meos_core::*;
