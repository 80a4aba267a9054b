use super::water;
use approx::assert_relative_eq;
use meos::si::*;
use meos::{FluidState, MeosError, MeosResult, PhaseEquilibrium, SolverOptions, StateBuilder};

#[test]
fn test_saturation_table() -> MeosResult<()> {
    let water = water();
    let options = SolverOptions::default();
    // T, p, rho_l, rho_v, h_l, h_v, s_l, s_v
    let table = [
        (500.0, 2.63919587, 831.313450, 13.1989065, 975.430555, 2802.47840, 2.58104498, 6.23514067),
    ];
    for (t, p, rho_l, rho_v, h_l, h_v, s_l, s_v) in table {
        let vle = PhaseEquilibrium::pure(&water, t * KELVIN, options)?;
        assert_relative_eq!(vle.pressure().mpa(), p, max_relative = 1e-8);
        assert_relative_eq!(vle.liquid().mass_density().kg_m3(), rho_l, max_relative = 1e-8);
        assert_relative_eq!(vle.vapor().mass_density().kg_m3(), rho_v, max_relative = 1e-8);
        assert_relative_eq!(vle.liquid().specific_enthalpy().kj_kg(), h_l, max_relative = 1e-8);
        assert_relative_eq!(vle.vapor().specific_enthalpy().kj_kg(), h_v, max_relative = 1e-8);
        assert_relative_eq!(vle.liquid().specific_entropy().kj_kgk(), s_l, max_relative = 1e-8);
        assert_relative_eq!(vle.vapor().specific_entropy().kj_kgk(), s_v, max_relative = 1e-8);
    }
    Ok(())
}

#[test]
fn test_mixture_at_500_k() -> MeosResult<()> {
    let water = water();
    let state = StateBuilder::new(&water)
        .temperature(500.0 * KELVIN)
        .quality(0.5)
        .build()?;
    assert!(state.is_two_phase());
    assert_relative_eq!(state.pressure().mpa(), 2.63919587, max_relative = 1e-8);
    assert_relative_eq!(
        state.specific_enthalpy().kj_kg(),
        0.5 * (975.430555 + 2802.47840),
        max_relative = 1e-8
    );
    let from_px = StateBuilder::new(&water)
        .pressure(state.pressure())
        .quality(0.5)
        .build()?;
    assert_relative_eq!(from_px.temperature().kelvin(), 500.0, max_relative = 1e-9);
    Ok(())
}

#[test]
fn test_normal_boiling_point() -> MeosResult<()> {
    let water = water();
    let t = PhaseEquilibrium::boiling_temperature(&water, 101325.0 * PASCAL)?;
    assert_relative_eq!(t.kelvin(), 373.1243, max_relative = 1e-6);
    Ok(())
}

#[test]
fn test_supercritical() {
    let water = water();
    let options = SolverOptions::default();
    assert!(matches!(
        FluidState::new_tx(&water, 650.0 * KELVIN, 0.5, options),
        Err(MeosError::SuperCritical)
    ));
    assert!(matches!(
        FluidState::new_px(&water, 25.0 * MEGA * PASCAL, 0.5, options),
        Err(MeosError::SuperCritical)
    ));
}

#[test]
fn test_phase_boundaries() -> MeosResult<()> {
    let water = water();
    assert_relative_eq!(
        water.melting_pressure(251.165 * KELVIN)?.pa(),
        208566566.0,
        max_relative = 1e-6
    );
    assert_relative_eq!(
        water.sublimation_pressure(230.0 * KELVIN)?.pa(),
        8.94735,
        max_relative = 1e-5
    );
    assert_relative_eq!(water.surface_tension(300.0 * KELVIN)?.mn_m(), 71.69, max_relative = 1e-3);
    Ok(())
}
