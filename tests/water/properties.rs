use super::{state, water};
use approx::assert_relative_eq;
use meos::si::*;
use meos::{DensityInitialization, MeosResult, SolverOptions, State, StateBuilder};
use std::error::Error;

#[test]
fn test_single_phase_table() -> Result<(), Box<dyn Error>> {
    let water = water();
    // T, rho, p, cv, w, s
    let table = [
        (300.0, 996.556, 0.0992418350, 4.13018112, 1501.51914, 0.393062642),
        (300.0, 1005.308, 20.0022515, 4.06798347, 1534.92501, 0.38740540),
        (500.0, 0.435, 0.0999679423, 1.50817541, 548.314253, 7.94488271),
        (647.0, 358.0, 22.0384756, 6.18315728, 252.145078, 4.32092307),
        (900.0, 0.241, 0.100062559, 1.75890657, 724.027147, 9.16653194),
    ];
    for (t, rho, p, cv, w, s) in table {
        let state = state(&water, t, rho)?;
        assert_relative_eq!(state.pressure().mpa(), p, max_relative = 1e-8);
        assert_relative_eq!(
            state.specific_isochoric_heat_capacity().kj_kgk(),
            cv,
            max_relative = 1e-8
        );
        assert_relative_eq!(state.speed_of_sound()?.m_s(), w, max_relative = 1e-8);
        assert_relative_eq!(state.specific_entropy().kj_kgk(), s, max_relative = 1e-7);
    }
    Ok(())
}

#[test]
fn test_pressure_round_trip() -> MeosResult<()> {
    let water = water();
    let options = SolverOptions::default();
    for (t, p) in [(300.0, 1e5), (300.0, 1e8), (500.0, 1e5), (700.0, 3e7), (1000.0, 1e6)] {
        let init = DensityInitialization::None;
        let state = State::new_npt(&water, t * KELVIN, p * PASCAL, init, options)?;
        assert_relative_eq!(state.pressure().pa(), p, max_relative = 1e-8);
    }
    Ok(())
}

#[test]
fn test_state_pairs() -> MeosResult<()> {
    let water = water();
    let reference = StateBuilder::new(&water)
        .temperature(550.0 * KELVIN)
        .pressure(20.0 * MEGA * PASCAL)
        .build()?;
    let from_ph = StateBuilder::new(&water)
        .pressure(20.0 * MEGA * PASCAL)
        .specific_enthalpy(reference.specific_enthalpy())
        .build()?;
    assert_relative_eq!(from_ph.temperature().kelvin(), 550.0, max_relative = 1e-8);
    let from_ts = StateBuilder::new(&water)
        .temperature(550.0 * KELVIN)
        .specific_entropy(reference.specific_entropy())
        .build()?;
    assert_relative_eq!(from_ts.pressure().mpa(), 20.0, max_relative = 1e-6);
    Ok(())
}

#[test]
fn test_extrapolation_is_opt_in() {
    let water = water();
    let cold = StateBuilder::new(&water)
        .temperature(260.0 * KELVIN)
        .pressure(BAR);
    assert!(cold.clone().build().is_err());
    assert!(cold.extrapolate(true).build().is_ok());
}
