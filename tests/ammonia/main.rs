use approx::assert_relative_eq;
use meos::si::*;
use meos::{fluids, MeosResult, PhaseEquilibrium, SolverOptions, State};
use typenum::P3;

#[test]
fn test_compressed_liquid_at_320_k() -> MeosResult<()> {
    let ammonia = fluids::ammonia()?;
    let density = 35000.0 * MOL / METER.powi::<P3>();
    let state = State::new_pure(&ammonia, 320.0 * KELVIN, density)?;
    assert_relative_eq!(state.pressure().mpa(), 27.63275, max_relative = 1e-6);
    assert_relative_eq!(
        state.molar_isobaric_heat_capacity()?.j_molk(),
        78.92022,
        max_relative = 1e-6
    );
    assert_relative_eq!(state.speed_of_sound()?.m_s(), 1370.446, max_relative = 1e-6);
    Ok(())
}

#[test]
fn test_saturated_liquid_reference_state() -> MeosResult<()> {
    let ammonia = fluids::ammonia()?;
    let vle = PhaseEquilibrium::pure(&ammonia, 273.15 * KELVIN, SolverOptions::default())?;
    assert_relative_eq!(vle.pressure().kpa(), 429.2479, max_relative = 1e-6);
    assert_relative_eq!(vle.liquid().mass_density().kg_m3(), 638.6382, max_relative = 1e-6);
    assert_relative_eq!(vle.liquid().specific_enthalpy().kj_kg(), 200.0, max_relative = 1e-6);
    assert_relative_eq!(vle.liquid().specific_entropy().kj_kgk(), 1.0, max_relative = 1e-6);
    Ok(())
}

#[test]
fn test_critical_pressure() -> MeosResult<()> {
    let ammonia = fluids::ammonia()?;
    let critical = State::new_pure(&ammonia, 405.56 * KELVIN, 13696.0 * MOL / METER.powi::<P3>())?;
    assert_relative_eq!(critical.pressure().mpa(), 11.363, max_relative = 1e-4);
    Ok(())
}
