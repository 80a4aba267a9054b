use crate::errors::{MeosError, MeosResult};
use itertools::izip;
use serde::{Deserialize, Serialize};

/// Chapman-Enskog viscosity of the dilute gas with an empirical
/// collision integral $\ln\Omega = \sum_i b_i(\ln T^*)^i$.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChapmanEnskog {
    /// Lennard-Jones size parameter in nm
    pub sigma: f64,
    /// Lennard-Jones energy parameter in K
    pub epsilon_k: f64,
    /// Coefficients $b_i$ of the collision integral
    pub collision: Vec<f64>,
}

impl ChapmanEnskog {
    pub(crate) fn validate(&self) -> MeosResult<()> {
        if self.sigma <= 0.0 || self.epsilon_k <= 0.0 || self.collision.is_empty() {
            return Err(MeosError::Configuration(
                "Chapman-Enskog term needs positive sigma, epsilon_k and collision coefficients"
                    .into(),
            ));
        }
        Ok(())
    }

    /// Reduced collision integral $\Omega(T^*)$.
    pub fn collision_integral(&self, temperature: f64) -> f64 {
        let ln_t = (temperature / self.epsilon_k).ln();
        self.collision
            .iter()
            .rev()
            .fold(0.0, |acc, b| acc * ln_t + b)
            .exp()
    }

    /// Dilute gas viscosity in µPa s for a molar weight in g/mol.
    pub fn viscosity(&self, temperature: f64, molar_weight: f64) -> f64 {
        0.0266958 * (molar_weight * temperature).sqrt()
            / (self.sigma.powi(2) * self.collision_integral(temperature))
    }
}

/// Dilute gas thermal conductivity $N_1\eta_0 + \sum_i N_i\tau^{t_i}$
/// with $\eta_0$ in µPa s.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DiluteConductivity {
    /// Coefficient of the dilute gas viscosity
    #[serde(default)]
    pub eta0: f64,
    #[serde(default)]
    pub n: Vec<f64>,
    #[serde(default)]
    pub t: Vec<f64>,
}

impl DiluteConductivity {
    pub(crate) fn validate(&self) -> MeosResult<()> {
        if self.n.len() != self.t.len() {
            return Err(MeosError::Configuration(format!(
                "dilute conductivity with {} coefficients and {} exponents",
                self.n.len(),
                self.t.len()
            )));
        }
        Ok(())
    }

    pub fn evaluate(&self, tau: f64, dilute_viscosity: f64) -> f64 {
        self.eta0 * dilute_viscosity
            + self
                .n
                .iter()
                .zip(&self.t)
                .map(|(n, t)| n * tau.powf(*t))
                .sum::<f64>()
    }
}

/// Residual contribution $\sum_i N_i\tau^{t_i}\delta^{d_i}\exp(-\gamma_i\delta^{l_i})$,
/// where the exponential is only present for $l_i\neq 0$.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ResidualPolynomial {
    pub n: Vec<f64>,
    pub t: Vec<f64>,
    pub d: Vec<f64>,
    #[serde(default)]
    pub l: Vec<f64>,
    /// Defaults to 1 for every term with $l_i\neq 0$.
    #[serde(default)]
    pub gamma: Vec<f64>,
}

impl ResidualPolynomial {
    pub(crate) fn validate(&self) -> MeosResult<()> {
        let len = self.n.len();
        let optional_ok = |v: &Vec<f64>| v.is_empty() || v.len() == len;
        if self.t.len() != len
            || self.d.len() != len
            || !optional_ok(&self.l)
            || !optional_ok(&self.gamma)
        {
            return Err(MeosError::Configuration(
                "residual transport term with inconsistent coefficient lengths".into(),
            ));
        }
        Ok(())
    }

    pub fn evaluate(&self, tau: f64, delta: f64) -> f64 {
        izip!(&self.n, &self.t, &self.d)
            .enumerate()
            .map(|(i, (n, t, d))| {
                let l = self.l.get(i).copied().unwrap_or(0.0);
                let exponential = if l == 0.0 {
                    1.0
                } else {
                    let gamma = self.gamma.get(i).copied().unwrap_or(1.0);
                    (-gamma * delta.powf(l)).exp()
                };
                n * tau.powf(*t) * delta.powf(*d) * exponential
            })
            .sum()
    }
}

/// Residual contribution of the modified Benedict-Webb-Rubin type
/// (Younglove and Ely, 1987), with $T$ in K and $\rho$ in mol/dm³:
///
/// $\eta_1 = \rho\left[F_1 + F_2\left(F_3 - \ln(T/F_4)\right)^2\right]$
///
/// $\Delta\eta = \exp(E_1 + E_2/T)
/// \left[\exp\left(G\rho^{0.1} + H\theta\rho^{0.5}\right) - 1\right]$
///
/// where $G=E_3+E_4/T^{1.5}$, $H=E_5+E_6/T+E_7/T^2$ and $\theta=(\rho-\rho_c)/\rho_c$.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ResidualMbwr {
    /// Initial density coefficients $F_1\dots F_4$, all zero if absent.
    #[serde(default)]
    pub f: Vec<f64>,
    /// Coefficients $E_1\dots E_7$
    pub e: Vec<f64>,
    /// Critical density in mol/dm³
    pub rhoc: f64,
}

impl ResidualMbwr {
    pub(crate) fn validate(&self) -> MeosResult<()> {
        if !(self.f.is_empty() || self.f.len() == 4) || self.e.len() != 7 || self.rhoc <= 0.0 {
            return Err(MeosError::Configuration(format!(
                "MBWR transport term needs 4 or no F and 7 E coefficients, got {} and {}",
                self.f.len(),
                self.e.len()
            )));
        }
        Ok(())
    }

    fn initial_density(&self, temperature: f64, density: f64) -> f64 {
        match self.f[..] {
            [f1, f2, f3, f4] => density * (f1 + f2 * (f3 - (temperature / f4).ln()).powi(2)),
            _ => 0.0,
        }
    }

    /// Residual contribution at `temperature` (K) and `density` (mol/dm³).
    pub fn evaluate(&self, temperature: f64, density: f64) -> f64 {
        let e = &self.e;
        let g = e[2] + e[3] / temperature.powf(1.5);
        let h = e[4] + e[5] / temperature + e[6] / temperature.powi(2);
        let theta = (density - self.rhoc) / self.rhoc;
        let dense = (e[0] + e[1] / temperature).exp()
            * ((g * density.powf(0.1) + h * theta * density.sqrt()).exp() - 1.0);
        self.initial_density(temperature, density) + dense
    }
}

/// Residual part of a transport correlation.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum ResidualTransport {
    Polynomial(ResidualPolynomial),
    Mbwr(ResidualMbwr),
}

impl ResidualTransport {
    pub(crate) fn validate(&self) -> MeosResult<()> {
        match self {
            Self::Polynomial(r) => r.validate(),
            Self::Mbwr(r) => r.validate(),
        }
    }

    /// Residual contribution at `temperature` (K) and `density` (mol/m³)
    /// with the reducing values of the correlation.
    pub fn evaluate(&self, temperature: f64, density: f64, tref: f64, rhoref: f64) -> f64 {
        match self {
            Self::Polynomial(r) => r.evaluate(tref / temperature, density / rhoref),
            Self::Mbwr(r) => r.evaluate(temperature, density * 1e-3),
        }
    }
}
