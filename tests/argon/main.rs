use approx::assert_relative_eq;
use meos::si::*;
use meos::{fluids, Fluid, MeosResult, PhaseEquilibrium, SolverOptions, State, StateBuilder};
use std::sync::Arc;
use typenum::P3;

fn state(argon: &Arc<Fluid>, temperature: f64, density: f64) -> MeosResult<State> {
    State::new_pure(argon, temperature * KELVIN, density * MOL / METER.powi::<P3>())
}

#[test]
fn test_mixture_at_150_k() -> MeosResult<()> {
    let argon = fluids::argon()?;
    let state = StateBuilder::new(&argon)
        .temperature(150.0 * KELVIN)
        .quality(0.5)
        .build()?;
    assert_relative_eq!(state.pressure().mpa(), 4.7346, max_relative = 1e-5);
    let liquid = state.liquid().unwrap();
    assert_relative_eq!(liquid.mass_density().kg_m3(), 680.43, max_relative = 1e-5);
    assert_relative_eq!(
        liquid.specific_isobaric_heat_capacity()?.kj_kgk(),
        23.582,
        max_relative = 1e-4
    );
    Ok(())
}

#[test]
fn test_saturation_curve() -> MeosResult<()> {
    let argon = fluids::argon()?;
    for (t, p) in [(100.0, 323764.0), (120.0, 1213032.0), (140.0, 3168223.0)] {
        let vle = PhaseEquilibrium::pure(&argon, t * KELVIN, SolverOptions::default())?;
        assert_relative_eq!(vle.pressure().pa(), p, max_relative = 1e-5);
        assert_relative_eq!(argon.vapor_pressure(t * KELVIN)?.pa(), p, max_relative = 1e-3);
    }
    Ok(())
}

#[test]
fn test_solid_boundaries() -> MeosResult<()> {
    let argon = fluids::argon()?;
    assert_relative_eq!(
        argon.melting_pressure(100.0 * KELVIN)?.mpa(),
        68.423234,
        max_relative = 1e-7
    );
    assert_relative_eq!(
        argon.sublimation_pressure(70.0 * KELVIN)?.pa(),
        7284.9335,
        max_relative = 1e-7
    );
    assert!(argon.sublimation_pressure(100.0 * KELVIN).is_err());
    assert_relative_eq!(
        argon.surface_tension(120.0 * KELVIN)?.mn_m(),
        5.061742,
        max_relative = 1e-5
    );
    Ok(())
}

#[test]
fn test_transport_in_dense_liquid() -> MeosResult<()> {
    let argon = fluids::argon()?;
    let dilute = state(&argon, 100.0, 1e-6)?;
    assert_relative_eq!(dilute.dilute_viscosity()?.micro_pas(), 8.1894, max_relative = 1e-4);
    let liquid = state(&argon, 100.0, 33000.0)?;
    assert_relative_eq!(liquid.viscosity()?.micro_pas(), 184.232, max_relative = 1e-5);
    assert_relative_eq!(liquid.thermal_conductivity()?.mw_mk(), 111.266, max_relative = 1e-4);
    Ok(())
}
