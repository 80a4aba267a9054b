use approx::assert_relative_eq;
use meos::si::*;
use meos::{
    fluids, DensityInitialization, MeosResult, PhaseEquilibrium, SolverOptions, State, StateBuilder,
};

#[test]
fn test_saturation_at_20_k() -> MeosResult<()> {
    let hydrogen = fluids::hydrogen()?;
    let vle = PhaseEquilibrium::pure(&hydrogen, 20.0 * KELVIN, SolverOptions::default())?;
    assert_relative_eq!(vle.pressure().pa(), 90717.32, max_relative = 1e-6);
    assert_relative_eq!(vle.liquid().mass_density().kg_m3(), 71.2647, max_relative = 1e-5);
    assert_relative_eq!(vle.vapor().mass_density().kg_m3(), 1.20585, max_relative = 1e-5);
    Ok(())
}

#[test]
fn test_mixture_at_20_k() -> MeosResult<()> {
    let hydrogen = fluids::hydrogen()?;
    let state = StateBuilder::new(&hydrogen)
        .temperature(20.0 * KELVIN)
        .quality(0.5)
        .build()?;
    let liquid = state.liquid().unwrap();
    let vapor = state.vapor().unwrap();
    assert_relative_eq!(liquid.speed_of_sound()?.m_s(), 1129.13, max_relative = 1e-5);
    assert_relative_eq!(
        liquid.specific_isobaric_heat_capacity()?.j_kgk(),
        9569.68,
        max_relative = 1e-5
    );
    assert_relative_eq!(vapor.speed_of_sound()?.m_s(), 354.306, max_relative = 1e-5);
    Ok(())
}

#[test]
fn test_pressure_round_trip() -> MeosResult<()> {
    let hydrogen = fluids::hydrogen()?;
    let options = SolverOptions::default();
    for (t, p) in [(15.0, 1e6), (25.0, 2e5), (40.0, 1.3e6), (300.0, 1e7), (900.0, 1e8)] {
        let init = DensityInitialization::None;
        let state = State::new_npt(&hydrogen, t * KELVIN, p * PASCAL, init, options)?;
        assert_relative_eq!(state.pressure().pa(), p, max_relative = 1e-8);
    }
    Ok(())
}

#[test]
fn test_no_transport_models() -> MeosResult<()> {
    let hydrogen = fluids::hydrogen()?;
    let state = StateBuilder::new(&hydrogen)
        .temperature(300.0 * KELVIN)
        .pressure(BAR)
        .build()?;
    assert!(state.state().unwrap().viscosity().is_err());
    Ok(())
}
