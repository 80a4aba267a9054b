use approx::assert_relative_eq;
use meos::si::*;
use meos::{fluids, MeosResult, PhaseEquilibrium, SolverOptions, State, StateBuilder};
use typenum::P3;

#[test]
fn test_dilute_gas_conductivity() -> MeosResult<()> {
    let helium = fluids::helium()?;
    let state = StateBuilder::new(&helium)
        .temperature(800.0 * KELVIN)
        .pressure(1e5 * PASCAL)
        .build()?;
    let state = state.state().unwrap();
    assert_relative_eq!(state.thermal_conductivity()?.w_mk(), 0.3085, max_relative = 2e-4);
    assert!(state.viscosity().is_err());
    Ok(())
}

#[test]
fn test_second_virial_coefficient() -> MeosResult<()> {
    let helium = fluids::helium()?;
    for (t, b) in [(20.0, -4.910973), (300.0, 11.949605), (800.0, 9.648835)] {
        let state = State::new_pure(&helium, t * KELVIN, 1e-6 * MOL / METER.powi::<P3>())?;
        assert_relative_eq!(state.second_virial_coefficient()?.cm3_mol(), b, max_relative = 1e-5);
    }
    Ok(())
}

#[test]
fn test_normal_boiling_point() -> MeosResult<()> {
    let helium = fluids::helium()?;
    let vle = PhaseEquilibrium::pure(&helium, 4.222 * KELVIN, SolverOptions::default())?;
    assert_relative_eq!(vle.pressure().pa(), 101127.11, max_relative = 1e-6);
    assert_relative_eq!(vle.liquid().density.mol_m3(), 31022.59, max_relative = 1e-6);
    Ok(())
}
