//! Transport properties of helium-4.
//!
//! + Thermal conductivity: dilute gas contribution of
//!   Hands and Arp (1981), Cryogenics 21, 697-703,
//!   [doi:10.1016/0011-2275(81)90093-7](https://doi.org/10.1016/0011-2275(81)90093-7)
//!
//! The excess and critical contributions are not included, so the
//! result is only accurate for the low density gas.
use meos_core::{MeosResult, State, TransportProperty, TransportRegistry};

/// Reduced densities above which the dilute gas limit is questionable.
const DENSE: f64 = 0.05;
const RHO_C: f64 = 17399.0;

const A: f64 = 2.7870034e-3;
const B: f64 = 0.7034007057;
const C: [f64; 4] = [3.739232544, -26.20316969, 59.82252246, -49.26397634];

/// Registers the custom transport methods of helium.
pub(crate) fn register(registry: &mut TransportRegistry) {
    registry.register(
        "helium",
        TransportProperty::ThermalConductivity,
        "hands1981",
        thermal_conductivity,
    );
}

/// Dilute gas thermal conductivity in W/(m K).
fn dilute_conductivity(t: f64) -> f64 {
    let sum: f64 = C.iter().enumerate().map(|(i, c)| c / t.powi(i as i32 + 1)).sum();
    A * t.powf(B) * sum.exp()
}

/// Thermal conductivity in W/(m K).
pub fn thermal_conductivity(state: &State) -> MeosResult<f64> {
    let delta = state.density.mol_m3() / RHO_C;
    if delta > DENSE {
        log::warn!("helium conductivity at reduced density {delta:.3} is a dilute gas value");
    }
    Ok(dilute_conductivity(state.temperature.kelvin()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn dilute_gas() {
        assert_relative_eq!(dilute_conductivity(300.0), 0.155896, max_relative = 1e-5);
        assert_relative_eq!(dilute_conductivity(800.0), 0.308450, max_relative = 1e-5);
    }
}
