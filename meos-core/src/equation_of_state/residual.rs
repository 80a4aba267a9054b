use super::{pow, HelmholtzFunction};
use crate::errors::{MeosError, MeosResult};
use crate::parameter::TermGroup;
use num_dual::DualNum;
use serde::{Deserialize, Serialize};

/// Number of coefficients of the modified Benedict-Webb-Rubin equation.
const MBWR_COEFFICIENTS: usize = 32;

/// Term families of the residual part $\phi^r$.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub enum HelmholtzTerm {
    /// $n\delta^d\tau^t$
    Polynomial { n: f64, d: f64, t: f64 },
    /// $n\delta^d\tau^t\exp(-\gamma\delta^c)$
    Exponential {
        n: f64,
        d: f64,
        t: f64,
        c: f64,
        #[serde(default = "one")]
        gamma: f64,
    },
    /// $n\delta^d\tau^t\exp\left(-\alpha(\delta-\varepsilon)^2-\beta(\tau-\gamma)^2\right)$
    GaussianBell {
        n: f64,
        d: f64,
        t: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
        epsilon: f64,
    },
    /// Non-analytic critical term $n\Delta^b\delta\psi$.
    NonAnalytic {
        n: f64,
        a: f64,
        b: f64,
        beta: f64,
        #[serde(rename = "A")]
        big_a: f64,
        #[serde(rename = "B")]
        big_b: f64,
        #[serde(rename = "C")]
        big_c: f64,
        #[serde(rename = "D")]
        big_d: f64,
    },
    /// $n\delta^d\tau^t\exp\left(\eta(\delta-\varepsilon)^2+\frac{1}{\beta(\tau-\gamma)^2+b}\right)$
    Associating {
        n: f64,
        d: f64,
        t: f64,
        b: f64,
        beta: f64,
        gamma: f64,
        epsilon: f64,
        eta: f64,
    },
    /// Modified Benedict-Webb-Rubin equation.
    Mbwr(Mbwr),
}

fn one() -> f64 {
    1.0
}

impl HelmholtzTerm {
    pub fn evaluate<D: DualNum<f64> + Copy>(&self, delta: D, tau: D) -> D {
        match self {
            Self::Polynomial { n, d, t } => pow(delta, *d) * pow(tau, *t) * *n,
            Self::Exponential { n, d, t, c, gamma } => {
                pow(delta, *d) * pow(tau, *t) * (-pow(delta, *c) * *gamma).exp() * *n
            }
            Self::GaussianBell {
                n,
                d,
                t,
                alpha,
                beta,
                gamma,
                epsilon,
            } => {
                let dd = delta - *epsilon;
                let dt = tau - *gamma;
                pow(delta, *d) * pow(tau, *t) * (-dd * dd * *alpha - dt * dt * *beta).exp() * *n
            }
            Self::NonAnalytic {
                n,
                a,
                b,
                beta,
                big_a,
                big_b,
                big_c,
                big_d,
            } => non_analytic(delta, tau, *n, *a, *b, *beta, *big_a, *big_b, *big_c, *big_d),
            Self::Associating {
                n,
                d,
                t,
                b,
                beta,
                gamma,
                epsilon,
                eta,
            } => {
                let dd = delta - *epsilon;
                let dt = tau - *gamma;
                pow(delta, *d)
                    * pow(tau, *t)
                    * (dd * dd * *eta + (dt * dt * *beta + *b).recip()).exp()
                    * *n
            }
            Self::Mbwr(mbwr) => mbwr.evaluate(delta, tau),
        }
    }
}

/// Non-analytic term of the IAPWS-95 type:
///
/// $\theta = (1-\tau) + A\left((\delta-1)^2\right)^{\frac{1}{2\beta}}$,
/// $\Delta = \theta^2 + B\left((\delta-1)^2\right)^a$,
/// $\psi = \exp\left(-C(\delta-1)^2 - D(\tau-1)^2\right)$,
/// $\phi = n\Delta^b\delta\psi$.
///
/// The derivatives of $(\delta-1)^2$ raised to fractional powers do not
/// exist at $\delta=1$, therefore $\delta$ is shifted by $10^{-12}$ there.
#[allow(clippy::too_many_arguments)]
pub(crate) fn non_analytic<D: DualNum<f64> + Copy>(
    delta: D,
    tau: D,
    n: f64,
    a: f64,
    b: f64,
    beta: f64,
    big_a: f64,
    big_b: f64,
    big_c: f64,
    big_d: f64,
) -> D {
    let delta = if delta.re() == 1.0 {
        delta + 1e-12
    } else {
        delta
    };
    let dm1 = delta - 1.0;
    let dm1_2 = dm1 * dm1;
    let tm1 = tau - 1.0;
    let theta = -tm1 + dm1_2.powf(0.5 / beta) * big_a;
    let big_delta = theta * theta + dm1_2.powf(a) * big_b;
    let psi = (-dm1_2 * big_c - tm1 * tm1 * big_d).exp();
    big_delta.powf(b) * delta * psi * n
}

/// Modified Benedict-Webb-Rubin equation of state.
///
/// The pressure form
/// $P=\sum_{n=1}^9a_n\rho^n+e^{-\gamma\rho^2}\sum_{n=10}^{15}a_n\rho^{2n-17}$
/// is integrated analytically to the residual Helmholtz energy. All
/// parameters (`r`, `tc`, `rhoc`, `gamma` and the coefficients `b`) are
/// given in the unit system of the original fit, typically bar, K and mol/l.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Mbwr {
    pub b: Vec<f64>,
    pub gamma: f64,
    pub r: f64,
    pub tc: f64,
    pub rhoc: f64,
}

impl Mbwr {
    /// Temperature functions $a_2,\ldots,a_{15}$.
    fn coefficients<D: DualNum<f64> + Copy>(&self, temperature: D) -> [D; 14] {
        let b = &self.b;
        let t = temperature;
        let ti = t.recip();
        let ti2 = ti * ti;
        let ti3 = ti2 * ti;
        let ti4 = ti2 * ti2;
        [
            t * b[0] + t.sqrt() * b[1] + b[2] + ti * b[3] + ti2 * b[4],
            t * b[5] + b[6] + ti * b[7] + ti2 * b[8],
            t * b[9] + b[10] + ti * b[11],
            D::from(b[12]),
            ti * b[13] + ti2 * b[14],
            ti * b[15],
            ti * b[16] + ti2 * b[17],
            ti2 * b[18],
            ti2 * b[19] + ti3 * b[20],
            ti2 * b[21] + ti4 * b[22],
            ti2 * b[23] + ti3 * b[24],
            ti2 * b[25] + ti4 * b[26],
            ti2 * b[27] + ti3 * b[28],
            ti2 * b[29] + ti3 * b[30] + ti4 * b[31],
        ]
    }

    pub fn evaluate<D: DualNum<f64> + Copy>(&self, delta: D, tau: D) -> D {
        let temperature = tau.recip() * self.tc;
        let rho = delta * self.rhoc;
        let a = self.coefficients(temperature);

        // virial part
        let mut helmholtz = D::zero();
        let mut rho_n = D::one();
        for (i, &an) in a[..8].iter().enumerate() {
            rho_n *= rho;
            helmholtz += an * rho_n / (i + 1) as f64;
        }

        // exponential part
        let gamma = self.gamma;
        let rho2 = rho * rho;
        let f = (-rho2 * gamma).exp();
        let mut integral = (-f + 1.0) / (2.0 * gamma);
        let mut rho_2k = D::one();
        helmholtz += a[8] * integral;
        for (k, &an) in a[9..].iter().enumerate() {
            let k = (k + 1) as f64;
            rho_2k *= rho2;
            integral = -rho_2k * f / (2.0 * gamma) + integral * (k / gamma);
            helmholtz += an * integral;
        }
        helmholtz / (temperature * self.r)
    }

    /// Pressure from the original virial form.
    pub fn pressure(&self, temperature: f64, density: f64) -> f64 {
        let a = self.coefficients(temperature);
        let mut p = self.r * temperature * density;
        let mut rho_n = density;
        for &an in a[..8].iter() {
            rho_n *= density;
            p += an * rho_n;
        }
        let f = (-density * density * self.gamma).exp();
        for (i, &an) in a[8..].iter().enumerate() {
            let n = (i + 10) as i32;
            p += f * an * density.powi(2 * n - 17);
        }
        p
    }
}

/// Residual part of a multiparameter equation of state.
#[derive(Clone, Debug, Default)]
pub struct Residual {
    terms: Vec<HelmholtzTerm>,
}

impl Residual {
    pub fn new(terms: Vec<HelmholtzTerm>) -> Self {
        Self { terms }
    }

    /// Expand json term groups into individual terms.
    pub fn from_groups(groups: &[TermGroup]) -> MeosResult<Self> {
        let mut terms = Vec::new();
        for group in groups {
            // The coefficient vector of an MBWR term belongs to a single term.
            let vector_parameters: &[&str] = if group.family == "Mbwr" { &["b"] } else { &[] };
            for term in group.expand::<HelmholtzTerm>(vector_parameters)? {
                if let HelmholtzTerm::Mbwr(mbwr) = &term {
                    if mbwr.b.len() != MBWR_COEFFICIENTS {
                        return Err(MeosError::Configuration(format!(
                            "MBWR term requires {MBWR_COEFFICIENTS} coefficients, got {}",
                            mbwr.b.len()
                        )));
                    }
                    if mbwr.gamma <= 0.0 {
                        return Err(MeosError::Configuration(format!(
                            "MBWR term requires a positive gamma, got {}",
                            mbwr.gamma
                        )));
                    }
                }
                terms.push(term);
            }
        }
        Ok(Self { terms })
    }

    pub fn terms(&self) -> &[HelmholtzTerm] {
        &self.terms
    }
}

impl HelmholtzFunction for Residual {
    fn evaluate<D: DualNum<f64> + Copy>(&self, delta: D, tau: D) -> D {
        self.terms.iter().map(|term| term.evaluate(delta, tau)).sum()
    }
}
