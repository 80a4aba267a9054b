use approx::assert_relative_eq;
use meos::si::*;
use meos::{fluids, Fluid, MeosResult, SolverOptions, State, StateBuilder};
use std::error::Error;
use std::sync::Arc;
use typenum::P3;

fn state(air: &Arc<Fluid>, temperature: f64, density: f64) -> MeosResult<State> {
    State::new_pure(air, temperature * KELVIN, density * MOL / METER.powi::<P3>())
}

#[test]
fn test_virial_coefficient_and_ideal_gas() -> MeosResult<()> {
    let air = fluids::air()?;
    let dilute = state(&air, 300.0, 1e-6)?;
    assert_relative_eq!(
        dilute.second_virial_coefficient()?.cm3_mol(),
        -7.7621,
        max_relative = 1e-4
    );
    assert_relative_eq!(
        dilute.specific_isobaric_heat_capacity()?.kj_kgk(),
        1.005014,
        max_relative = 1e-6
    );
    Ok(())
}

#[test]
fn test_compressed_gas() -> MeosResult<()> {
    let air = fluids::air()?;
    let state = StateBuilder::new(&air)
        .temperature(300.0 * KELVIN)
        .pressure(MEGA * PASCAL)
        .build()?;
    let state = state.state().unwrap();
    assert_relative_eq!(state.mass_density().kg_m3(), 11.6427, max_relative = 1e-5);
    assert_relative_eq!(
        state.specific_isobaric_heat_capacity()?.j_kgk(),
        1020.85,
        max_relative = 1e-5
    );
    assert_relative_eq!(state.speed_of_sound()?.m_s(), 348.447, max_relative = 1e-5);
    Ok(())
}

#[test]
fn test_normal_bubble_and_dew_point() -> MeosResult<()> {
    let air = fluids::air()?;
    let blend = air.blend().unwrap();
    assert_relative_eq!(blend.bubble_pressure(78.9)?, 101290.8, max_relative = 1e-5);
    assert_relative_eq!(blend.dew_pressure(81.7)?, 101085.9, max_relative = 1e-5);

    // the temperature glide at atmospheric pressure
    let options = SolverOptions::default();
    let bubble = StateBuilder::new(&air)
        .pressure(101325.0 * PASCAL)
        .quality(0.0)
        .options(options)
        .build()?;
    let dew = StateBuilder::new(&air)
        .pressure(101325.0 * PASCAL)
        .quality(1.0)
        .options(options)
        .build()?;
    assert!(bubble.temperature() < dew.temperature());
    assert_relative_eq!(bubble.temperature().kelvin(), 78.9, epsilon = 0.05);
    assert_relative_eq!(dew.temperature().kelvin(), 81.7, epsilon = 0.05);
    Ok(())
}

#[test]
fn test_two_phase_from_enthalpy() -> MeosResult<()> {
    let air = fluids::air()?;
    let mixture = StateBuilder::new(&air)
        .pressure(2.0 * BAR)
        .quality(0.4)
        .build()?;
    let state = StateBuilder::new(&air)
        .pressure(2.0 * BAR)
        .molar_enthalpy(mixture.molar_enthalpy())
        .build()?;
    assert_relative_eq!(state.quality().unwrap(), 0.4, max_relative = 1e-8);
    assert_relative_eq!(
        state.temperature().kelvin(),
        mixture.temperature().kelvin(),
        max_relative = 1e-8
    );
    Ok(())
}

#[test]
fn test_transport() -> Result<(), Box<dyn Error>> {
    let air = fluids::air()?;
    let dilute = state(&air, 300.0, 1e-8)?;
    assert_relative_eq!(dilute.dilute_viscosity()?.micro_pas(), 18.522999, max_relative = 1e-7);
    assert_relative_eq!(dilute.thermal_conductivity()?.mw_mk(), 26.352904, max_relative = 1e-6);

    for (t, rho, eta, lambda) in [
        (100.0, 28000.0, 107.922595, 119.220758),
        (300.0, 5000.0, 21.324098, 32.606231),
    ] {
        let state = state(&air, t, rho)?;
        assert_relative_eq!(state.viscosity()?.micro_pas(), eta, max_relative = 1e-7);
        assert_relative_eq!(state.thermal_conductivity()?.mw_mk(), lambda, max_relative = 1e-7);
    }
    let near_critical = state(&air, 132.64, 10400.0)?;
    assert_relative_eq!(near_critical.viscosity()?.micro_pas(), 17.762253, max_relative = 1e-3);
    assert_relative_eq!(
        near_critical.thermal_conductivity()?.mw_mk(),
        75.62307,
        max_relative = 1e-3
    );
    Ok(())
}

#[test]
fn test_transport_selection() -> MeosResult<()> {
    let air = fluids::air()?;
    let selected = Arc::new(air.with_viscosity(0)?.with_thermal_conductivity(0)?);
    let state = state(&selected, 300.0, 5000.0)?;
    assert_relative_eq!(state.viscosity()?.micro_pas(), 21.324098, max_relative = 1e-7);
    assert!(air.with_viscosity(1).is_err());
    assert!(air.with_thermal_conductivity(1).is_err());
    Ok(())
}
