use crate::errors::{MeosError, MeosResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Boltzmann constant as used in the fits of the enhancement parameters.
const BOLTZMANN: f64 = 1.380658e-23;

/// Simplified Olchowy-Sengers critical enhancement of the thermal conductivity.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OlchowySengers {
    /// Amplitude of the correlation length in m
    pub xi0: f64,
    /// Amplitude of the susceptibility
    pub gamma0: f64,
    /// Effective cutoff wavelength $q_D^{-1}$ in m
    pub qd: f64,
    /// Reference temperature in K, usually $1.5T_c$ or $2T_c$
    pub t_ref: f64,
    #[serde(default = "default_nu")]
    pub nu: f64,
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    #[serde(default = "default_r0")]
    pub r0: f64,
    /// Critical pressure in Pa
    pub pc: f64,
    /// Critical density in mol/m³
    pub rhoc: f64,
}

fn default_nu() -> f64 {
    0.63
}

fn default_gamma() -> f64 {
    1.2415
}

fn default_r0() -> f64 {
    1.03
}

/// Inputs of the enhancement term at a given state, all in SI units with
/// molar heat capacities.
#[derive(Clone, Copy, Debug)]
pub struct CriticalInput {
    pub temperature: f64,
    pub density: f64,
    pub cp: f64,
    pub cv: f64,
    /// $(\partial\rho/\partial P)_T$ at the state
    pub drho_dp: f64,
    /// $(\partial\rho/\partial P)_T$ at the reference temperature and the same density
    pub drho_dp_ref: f64,
    /// Viscosity in Pa s
    pub viscosity: f64,
}

impl OlchowySengers {
    pub(crate) fn validate(&self) -> MeosResult<()> {
        let values = [self.xi0, self.gamma0, self.qd, self.t_ref, self.pc, self.rhoc];
        if values.iter().any(|v| *v <= 0.0) {
            return Err(MeosError::Configuration(
                "critical enhancement parameters must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Correlation length $\xi$ in m; zero outside the critical region.
    pub fn correlation_length(&self, input: &CriticalInput) -> f64 {
        let prefactor = self.pc * input.density / (self.rhoc * self.rhoc);
        let chi = prefactor * input.drho_dp;
        let chi_ref = prefactor * input.drho_dp_ref * self.t_ref / input.temperature;
        let delta_chi = chi - chi_ref;
        if delta_chi <= 0.0 {
            return 0.0;
        }
        self.xi0 * (delta_chi / self.gamma0).powf(self.nu / self.gamma)
    }

    /// Enhancement contribution in W/(m K).
    pub fn evaluate(&self, input: &CriticalInput) -> f64 {
        let xi = self.correlation_length(input);
        if xi == 0.0 {
            return 0.0;
        }
        let y = xi / self.qd;
        let kappa = input.cv / input.cp;
        let omega = 2.0 / PI * ((1.0 - kappa) * y.atan() + kappa * y);
        let ratio = self.rhoc / input.density;
        let omega0 = 2.0 / PI * (1.0 - (-1.0 / (1.0 / y + y * y / 3.0 * ratio * ratio)).exp());
        input.density * input.cp * self.r0 * BOLTZMANN * input.temperature
            / (6.0 * PI * xi * input.viscosity)
            * (omega - omega0)
    }
}
