use super::{pow, HelmholtzFunction};
use crate::errors::MeosResult;
use crate::parameter::TermGroup;
use num_dual::DualNum;
use serde::{Deserialize, Serialize};

/// Term families of the ideal gas part $\phi^0$.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub enum IdealGasTerm {
    /// $\ln\delta + a_1 + a_2\tau$
    Lead { a1: f64, a2: f64 },
    /// $a\ln\tau$
    LogTau { a: f64 },
    /// $n\tau^t$
    Power { n: f64, t: f64 },
    /// $n\ln\left(1-e^{-t\tau}\right)$
    PlanckEinstein { n: f64, t: f64 },
    /// $n\ln\left(c+de^{t\tau}\right)$
    PlanckEinsteinGeneralized { n: f64, t: f64, c: f64, d: f64 },
    /// $n\ln\left|\sinh(t\tau)\right|$
    Sinh { n: f64, t: f64 },
    /// $n\ln\cosh(t\tau)$
    Cosh { n: f64, t: f64 },
    /// Contribution of an ideal gas heat capacity term $c\,T^t$,
    /// integrated from the reference temperature `t0`.
    Cp0PolyT { c: f64, t: f64, t0: f64, tc: f64 },
    /// $a_1 + a_2\tau$, used for reference state shifts.
    Offset { a1: f64, a2: f64 },
}

impl IdealGasTerm {
    pub fn evaluate<D: DualNum<f64> + Copy>(&self, delta: D, tau: D) -> D {
        match *self {
            Self::Lead { a1, a2 } => delta.ln() + a1 + tau * a2,
            Self::LogTau { a } => tau.ln() * a,
            Self::Power { n, t } => pow(tau, t) * n,
            Self::PlanckEinstein { n, t } => (-(-tau * t).exp()).ln_1p() * n,
            Self::PlanckEinsteinGeneralized { n, t, c, d } => ((tau * t).exp() * d + c).ln() * n,
            Self::Sinh { n, t } => (tau * t).sinh().abs().ln() * n,
            Self::Cosh { n, t } => (tau * t).cosh().ln() * n,
            Self::Cp0PolyT { c, t, t0, tc } => {
                let tau0 = tc / t0;
                if t.abs() < 10.0 * f64::EPSILON {
                    // constant heat capacity
                    (-tau / tau0 + 1.0 + (tau / tau0).ln()) * c
                } else if (t + 1.0).abs() < 10.0 * f64::EPSILON {
                    (-tau / tc * (tau / tau0).ln() + (tau - tau0) / tc) * c
                } else {
                    (-pow(tau, -t) * tc.powf(t) / (t * (t + 1.0))
                        - tau * t0.powf(t + 1.0) / (tc * (t + 1.0))
                        + t0.powf(t) / t)
                        * c
                }
            }
            Self::Offset { a1, a2 } => tau * a2 + a1,
        }
    }
}

/// Ideal gas part of a multiparameter equation of state.
#[derive(Clone, Debug, Default)]
pub struct IdealGas {
    terms: Vec<IdealGasTerm>,
}

impl IdealGas {
    pub fn new(terms: Vec<IdealGasTerm>) -> Self {
        Self { terms }
    }

    /// Expand json term groups into individual terms.
    pub fn from_groups(groups: &[TermGroup]) -> MeosResult<Self> {
        let mut terms = Vec::new();
        for group in groups {
            terms.extend(group.expand::<IdealGasTerm>(&[])?);
        }
        Ok(Self { terms })
    }

    pub fn terms(&self) -> &[IdealGasTerm] {
        &self.terms
    }

    pub(crate) fn push(&mut self, term: IdealGasTerm) {
        self.terms.push(term)
    }
}

impl HelmholtzFunction for IdealGas {
    fn evaluate<D: DualNum<f64> + Copy>(&self, delta: D, tau: D) -> D {
        self.terms.iter().map(|term| term.evaluate(delta, tau)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::assert_derivatives;
    use super::*;
    use crate::errors::MeosError;
    use approx::assert_relative_eq;

    /// Ideal gas part of IAPWS-95.
    fn iapws95() -> IdealGas {
        let json = r#"[
            {"type": "Lead", "a1": -8.32044648201, "a2": 6.6832105268},
            {"type": "LogTau", "a": 3.00632},
            {"type": "PlanckEinstein",
             "n": [0.012436, 0.97315, 1.2795, 0.96956, 0.24873],
             "t": [1.28728967, 3.53734222, 7.74073708, 9.24437796, 27.5075105]}
        ]"#;
        let groups: Vec<TermGroup> = serde_json::from_str(json).unwrap();
        IdealGas::from_groups(&groups).unwrap()
    }

    #[test]
    fn iapws95_reference_values() {
        // Table 6.6 of the IAPWS-95 release, T = 500 K, rho = 838.025 kg/m³
        let delta = 838.025 / 322.0;
        let tau = 647.096 / 500.0;
        let d = iapws95().derivatives(delta, tau).unwrap();
        assert_relative_eq!(d.phi, 0.204797733e1, max_relative = 1e-8);
        assert_relative_eq!(d.phi_d, 0.384236747, max_relative = 1e-8);
        assert_relative_eq!(d.phi_dd, -0.147637878, max_relative = 1e-8);
        assert_relative_eq!(d.phi_t, 0.904611106e1, max_relative = 1e-8);
        assert_relative_eq!(d.phi_tt, -0.193249185e1, max_relative = 1e-8);
        assert_relative_eq!(d.phi_dt, 0.0, epsilon = 1e-14);
    }

    #[test]
    fn near_critical_values() {
        let delta = 358.0 / 322.0;
        let tau = 647.096 / 647.0;
        let d = iapws95().derivatives(delta, tau).unwrap();
        assert_relative_eq!(d.phi, -1.56319605, max_relative = 1e-8);
        assert_relative_eq!(d.phi_d, 0.89944134, max_relative = 1e-8);
        assert_relative_eq!(d.phi_dd, -0.80899473, max_relative = 1e-8);
        assert_relative_eq!(d.phi_t, 9.80343918, max_relative = 1e-8);
        assert_relative_eq!(d.phi_tt, -3.43316334, max_relative = 1e-8);
    }

    #[test]
    fn derivatives_of_all_families() {
        let terms = [
            IdealGasTerm::Lead { a1: -1.4, a2: 1.9 },
            IdealGasTerm::LogTau { a: 1.5 },
            IdealGasTerm::Power { n: -2.1e-5, t: -2.0 },
            IdealGasTerm::Power { n: 0.3, t: 1.5 },
            IdealGasTerm::PlanckEinstein { n: 0.79, t: 2.5 },
            IdealGasTerm::PlanckEinsteinGeneralized { n: -0.2, t: 8.7, c: 2.0 / 3.0, d: 1.0 },
            IdealGasTerm::Sinh { n: 2.3, t: 1.2 },
            IdealGasTerm::Cosh { n: -0.7, t: 0.8 },
            IdealGasTerm::Cp0PolyT { c: 3.5, t: 0.0, t0: 298.15, tc: 400.0 },
            IdealGasTerm::Cp0PolyT { c: 120.0, t: -1.0, t0: 298.15, tc: 400.0 },
            IdealGasTerm::Cp0PolyT { c: 1e-3, t: 1.3, t0: 298.15, tc: 400.0 },
            IdealGasTerm::Offset { a1: 0.5, a2: -0.25 },
        ];
        for term in terms {
            assert_derivatives(&IdealGas::new(vec![term]), 0.8, 1.3);
        }
    }

    #[test]
    fn cp0_poly_t_heat_capacity() {
        // -tau^2 phi_tt must reproduce cp0/R - 1 contributions: c T^t / R
        let (c, t, t0, tc) = (1e-3, 1.3, 298.15, 400.0);
        let term = IdealGas::new(vec![IdealGasTerm::Cp0PolyT { c, t, t0, tc }]);
        let temperature: f64 = 350.0;
        let tau = tc / temperature;
        let d = term.derivatives(1.0, tau).unwrap();
        assert_relative_eq!(
            -tau * tau * d.phi_tt,
            c * temperature.powf(t),
            max_relative = 1e-10
        );
    }

    #[test]
    fn unknown_parameters_are_rejected() {
        let json = r#"[{"type": "LogTau", "a": 1.5, "b": 2.0}]"#;
        let groups: Vec<TermGroup> = serde_json::from_str(json).unwrap();
        assert!(matches!(
            IdealGas::from_groups(&groups),
            Err(MeosError::Configuration(_))
        ));

        let json = r#"[{"type": "Einstein", "n": 1.5, "t": 2.0}]"#;
        let groups: Vec<TermGroup> = serde_json::from_str(json).unwrap();
        assert!(matches!(
            IdealGas::from_groups(&groups),
            Err(MeosError::Configuration(_))
        ));
    }
}
