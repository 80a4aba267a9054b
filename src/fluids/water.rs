//! Transport properties of ordinary water.
//!
//! + Viscosity: IAPWS R12-08 (2008),
//!   [Huber et al. (2009)](https://doi.org/10.1063/1.3088050)
//! + Thermal conductivity: IAPWS R15-11 (2011),
//!   [Huber et al. (2012)](https://doi.org/10.1063/1.4738955)
//!
//! Both formulations include their own critical enhancement, which needs
//! the isothermal compressibility at the reference temperature $1.5T_c$.
use meos_core::si::*;
use meos_core::{MeosResult, State, TransportProperty, TransportRegistry};
use std::f64::consts::PI;

const T_C: f64 = 647.096;
const RHO_C: f64 = 322.0;
const P_C: f64 = 22.064e6;
/// Specific gas constant in kJ/(kg K).
const R: f64 = 0.46151805;

const H0: [f64; 4] = [1.67752, 2.20462, 0.6366564, -0.241605];

#[rustfmt::skip]
const H1: [(i32, i32, f64); 21] = [
    (0, 0, 0.520094), (1, 0, 0.0850895), (2, 0, -1.08374), (3, 0, -0.289555),
    (0, 1, 0.222531), (1, 1, 0.999115), (2, 1, 1.88797), (3, 1, 1.26613), (5, 1, 0.120573),
    (0, 2, -0.281378), (1, 2, -0.906851), (2, 2, -0.772479), (3, 2, -0.489837), (4, 2, -0.25704),
    (0, 3, 0.161913), (1, 3, 0.257399),
    (0, 4, -0.0325372), (3, 4, 0.0698452),
    (4, 5, 0.00872102),
    (3, 6, -0.00435673), (5, 6, -0.000593264),
];

const L0: [f64; 5] = [2.443221e-3, 1.323095e-2, 6.770357e-3, -3.454586e-3, 4.096266e-4];

#[rustfmt::skip]
const L1: [[f64; 6]; 5] = [
    [1.60397357, -0.646013523, 0.111443906, 0.102997357, -0.0504123634, 0.00609859258],
    [2.33771842, -2.78843778, 1.53616167, -0.463045512, 0.0832827019, -0.00719201245],
    [2.19650529, -4.54580785, 3.55777244, -1.40944978, 0.275418278, -0.0205938816],
    [-1.21051378, 1.60812989, -0.621178141, 0.0716373224, 0.0, 0.0],
    [-2.7203370, 4.57586331, -3.18369245, 1.1168348, -0.19268305, 0.012913842],
];

// critical region
const XI0: f64 = 0.13;
const GAMMA0: f64 = 0.06;
const NU: f64 = 0.630;
const GAMMA: f64 = 1.239;
const Q_C: f64 = 1.0 / 1.9;
const Q_D: f64 = 1.0 / 1.1;
const X_MU: f64 = 0.068;
const LAMBDA: f64 = 177.8514;

/// Registers the custom transport methods of water.
pub(crate) fn register(registry: &mut TransportRegistry) {
    registry.register("water", TransportProperty::Viscosity, "iapws2008", viscosity);
    registry.register(
        "water",
        TransportProperty::ThermalConductivity,
        "iapws2011",
        thermal_conductivity,
    );
}

/// Reduced symmetrized compressibility $\bar\zeta=\frac{p_c}{\rho_c}\left(\frac{\partial\rho}{\partial p}\right)_T$.
fn zeta(state: &State) -> f64 {
    let molar_weight = state.fluid.molar_weight().kg_mol();
    P_C / RHO_C * molar_weight / state.dp_drho().j_mol()
}

/// Correlation length in nm.
fn correlation_length(state: &State) -> MeosResult<f64> {
    let t = state.temperature.kelvin() / T_C;
    let rho = state.mass_density().kg_m3() / RHO_C;
    let reference = state.update_temperature(1.5 * T_C * KELVIN)?;
    let chi = rho * (zeta(state) - zeta(&reference) * 1.5 / t);
    if chi <= 0.0 {
        return Ok(0.0);
    }
    Ok(XI0 * (chi / GAMMA0).powf(NU / GAMMA))
}

fn dilute_viscosity(t: f64) -> f64 {
    100.0 * t.sqrt() / H0.iter().enumerate().map(|(i, h)| h / t.powi(i as i32)).sum::<f64>()
}

fn dilute_conductivity(t: f64) -> f64 {
    t.sqrt() / L0.iter().enumerate().map(|(k, l)| l / t.powi(k as i32)).sum::<f64>()
}

/// Dilute gas and finite density contributions $\bar\mu_0\bar\mu_1$.
fn background_viscosity(t: f64, rho: f64) -> f64 {
    let mu1 = (rho
        * H1
            .iter()
            .map(|&(i, j, h)| h * (1.0 / t - 1.0).powi(i) * (rho - 1.0).powi(j))
            .sum::<f64>())
    .exp();
    dilute_viscosity(t) * mu1
}

/// Critical enhancement $\bar\mu_2$ of the viscosity.
fn critical_viscosity(xi: f64) -> f64 {
    let y = if xi <= 0.3817016416 {
        0.2 * Q_C * xi
            * (Q_D * xi).powi(5)
            * (1.0 - Q_C * xi + (Q_C * xi).powi(2) - 765.0 / 504.0 * (Q_D * xi).powi(2))
    } else {
        let qc = Q_C * xi;
        let psi = (1.0 + (Q_D * xi).powi(2)).powf(-0.5).acos();
        let w = ((qc - 1.0) / (qc + 1.0)).abs().sqrt() * (0.5 * psi).tan();
        let l = if qc > 1.0 {
            ((1.0 + w) / (1.0 - w)).ln()
        } else {
            2.0 * w.abs().atan()
        };
        (3.0 * psi).sin() / 12.0 - (2.0 * psi).sin() / (4.0 * qc)
            + (1.0 - 1.25 * qc * qc) * psi.sin() / (qc * qc)
            - ((1.0 - 1.5 * qc * qc) * psi - (qc * qc - 1.0).abs().powf(1.5) * l) / qc.powi(3)
    };
    (X_MU * y).exp()
}

/// Reduced viscosity $\bar\mu=\mu/(1\,\mathrm{\mu Pa\,s})$.
fn reduced_viscosity(state: &State) -> MeosResult<f64> {
    let t = state.temperature.kelvin() / T_C;
    let rho = state.mass_density().kg_m3() / RHO_C;
    let xi = correlation_length(state)?;
    Ok(background_viscosity(t, rho) * critical_viscosity(xi))
}

/// Viscosity in Pa s.
pub fn viscosity(state: &State) -> MeosResult<f64> {
    Ok(reduced_viscosity(state)? * MICRO)
}

/// Thermal conductivity in W/(m K).
pub fn thermal_conductivity(state: &State) -> MeosResult<f64> {
    let t = state.temperature.kelvin() / T_C;
    let rho = state.mass_density().kg_m3() / RHO_C;

    let lambda0 = dilute_conductivity(t);
    let mut sum = 0.0;
    for (i, row) in L1.iter().enumerate() {
        for (j, l) in row.iter().enumerate() {
            sum += l * (1.0 / t - 1.0).powi(i as i32) * (rho - 1.0).powi(j as i32);
        }
    }
    let lambda1 = (rho * sum).exp();

    let cp = state.specific_isobaric_heat_capacity()?.kj_kgk();
    let cv = state.specific_isochoric_heat_capacity().kj_kgk();
    let kappa = cv / cp;
    let y = correlation_length(state)? / 0.4;
    let z = if y < 1.2e-7 {
        0.0
    } else {
        2.0 / (PI * y)
            * (((1.0 - kappa) * y.atan() + kappa * y)
                - (1.0 - (-1.0 / (1.0 / y + y * y / (3.0 * rho * rho))).exp()))
    };
    let lambda2 = LAMBDA * rho * cp / R * t / reduced_viscosity(state)? * z;
    Ok((lambda0 * lambda1 + lambda2) * MILLI)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn dilute_limits() {
        let t = 298.15 / T_C;
        assert_relative_eq!(dilute_viscosity(t), 9.70904522, max_relative = 1e-8);
        assert_relative_eq!(dilute_conductivity(t), 18.4341883, max_relative = 1e-8);
    }

    #[test]
    fn critical_enhancement_vanishes_for_small_correlation_lengths() {
        assert_relative_eq!(critical_viscosity(0.0), 1.0);
        assert!(critical_viscosity(0.5) > 1.0);
        assert!(critical_viscosity(5.0) > critical_viscosity(0.5));
    }
}
