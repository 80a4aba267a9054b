use meos::si::*;
use meos::{fluids, Fluid, MeosResult, State};
use std::sync::Arc;
use typenum::P3;

mod properties;
mod saturation;
mod transport;

fn state(fluid: &Arc<Fluid>, temperature: f64, mass_density: f64) -> MeosResult<State> {
    let density = mass_density * KILOGRAM / METER.powi::<P3>() / fluid.molar_weight();
    State::new_pure(fluid, temperature * KELVIN, density)
}

fn water() -> Arc<Fluid> {
    fluids::water().unwrap()
}
