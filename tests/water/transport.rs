use super::{state, water};
use approx::assert_relative_eq;
use std::error::Error;

#[test]
fn test_viscosity() -> Result<(), Box<dyn Error>> {
    let water = water();
    let table = [
        (298.15, 998.0, 889.7351),
        (298.15, 1200.0, 1437.64947),
        (373.15, 1000.0, 307.883622),
        (433.15, 1.0, 14.538324),
        (873.15, 600.0, 77.430195),
        (1173.15, 400.0, 64.154608),
    ];
    for (t, rho, eta) in table {
        let state = state(&water, t, rho)?;
        assert_relative_eq!(state.viscosity()?.micro_pas(), eta, max_relative = 1e-7);
    }
    Ok(())
}

#[test]
fn test_viscosity_critical_region() -> Result<(), Box<dyn Error>> {
    let water = water();
    let table = [
        (122.0, 25.520677),
        (222.0, 31.337589),
        (272.0, 36.228143),
        (322.0, 42.961579),
        (372.0, 45.688204),
        (422.0, 49.436256),
    ];
    for (rho, eta) in table {
        let state = state(&water, 647.35, rho)?;
        assert_relative_eq!(state.viscosity()?.micro_pas(), eta, max_relative = 1e-7);
    }
    Ok(())
}

#[test]
fn test_thermal_conductivity() -> Result<(), Box<dyn Error>> {
    let water = water();
    for (t, rho, lambda) in [(298.15, 998.0, 607.712868), (298.15, 1200.0, 799.038144)] {
        let state = state(&water, t, rho)?;
        assert_relative_eq!(state.thermal_conductivity()?.mw_mk(), lambda, max_relative = 1e-8);
    }
    Ok(())
}

#[test]
fn test_thermal_conductivity_critical_region() -> Result<(), Box<dyn Error>> {
    let water = water();
    let table = [
        (1.0, 51.9298924),
        (122.0, 130.922885),
        (222.0, 367.787459),
        (272.0, 757.959776),
        (322.0, 1443.75556),
        (372.0, 650.319402),
        (422.0, 448.883487),
        (750.0, 600.961346),
    ];
    for (rho, lambda) in table {
        let state = state(&water, 647.35, rho)?;
        assert_relative_eq!(state.thermal_conductivity()?.mw_mk(), lambda, max_relative = 1e-8);
    }
    Ok(())
}

#[test]
fn test_derived_transport_properties() -> Result<(), Box<dyn Error>> {
    let water = water();
    let state = state(&water, 298.15, 998.0)?;
    let nu = state.kinematic_viscosity()?.m2_s();
    assert_relative_eq!(nu, 889.7351e-6 / 998.0, max_relative = 1e-7);
    let pr = state.prandtl_number()?;
    let cp = state.specific_isobaric_heat_capacity()?.j_kgk();
    assert_relative_eq!(pr, cp * 889.7351e-6 / 0.607712868, max_relative = 1e-7);
    Ok(())
}
