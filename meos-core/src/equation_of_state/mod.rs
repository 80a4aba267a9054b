//! Reduced Helmholtz energy functions and their derivatives.
//!
//! A multiparameter equation of state is written in terms of the reduced
//! Helmholtz energy $\phi = \frac{a}{RT} = \phi^0(\delta,\tau) + \phi^r(\delta,\tau)$
//! with the reduced density $\delta=\rho/\rho_c$ and the inverse reduced
//! temperature $\tau=T_c/T$. Every term family only implements a generic
//! [HelmholtzFunction::evaluate]; all partial derivatives needed for
//! thermodynamic properties are obtained exactly from dual numbers.
use crate::errors::{MeosError, MeosResult};
use crate::parameter::TermGroup;
use num_dual::{Dual3_64, DualNum, HyperDual64};
use serde::{Deserialize, Serialize};

mod ideal_gas;
mod residual;
pub use ideal_gas::{IdealGas, IdealGasTerm};
pub use residual::{HelmholtzTerm, Mbwr, Residual};

/// Value and partial derivatives of a reduced Helmholtz energy function.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Derivatives {
    /// $\phi$
    pub phi: f64,
    /// $\phi_\delta$
    pub phi_d: f64,
    /// $\phi_{\delta\delta}$
    pub phi_dd: f64,
    /// $\phi_{\delta\delta\delta}$
    pub phi_ddd: f64,
    /// $\phi_\tau$
    pub phi_t: f64,
    /// $\phi_{\tau\tau}$
    pub phi_tt: f64,
    /// $\phi_{\delta\tau}$
    pub phi_dt: f64,
}

/// A reduced Helmholtz energy $\phi(\delta, \tau)$.
pub trait HelmholtzFunction {
    /// Evaluate the function for (hyper-) dual arguments.
    fn evaluate<D: DualNum<f64> + Copy>(&self, delta: D, tau: D) -> D;

    /// Value and all partial derivatives up to the orders used in
    /// property calculations.
    fn derivatives(&self, delta: f64, tau: f64) -> MeosResult<Derivatives> {
        check_argument("delta", delta)?;
        check_argument("tau", tau)?;

        let d3 = self.evaluate(Dual3_64::from(delta).derivative(), Dual3_64::from(tau));

        let mut tau_hd = HyperDual64::from(tau);
        tau_hd.eps1 = 1.0;
        tau_hd.eps2 = 1.0;
        let tt = self.evaluate(HyperDual64::from(delta), tau_hd);

        let dt = self.evaluate(
            HyperDual64::from(delta).derivative1(),
            HyperDual64::from(tau).derivative2(),
        );

        Ok(Derivatives {
            phi: d3.re,
            phi_d: d3.v1,
            phi_dd: d3.v2,
            phi_ddd: d3.v3,
            phi_t: tt.eps1,
            phi_tt: tt.eps1eps2,
            phi_dt: dt.eps1eps2,
        })
    }
}

fn check_argument(name: &str, value: f64) -> MeosResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MeosError::Domain(
            "reduced Helmholtz energy".into(),
            name.into(),
            value,
        ));
    }
    Ok(())
}

/// Power with an integer fast path, so that integer exponents of small
/// or vanishing bases keep finite derivatives.
pub(crate) fn pow<D: DualNum<f64> + Copy>(x: D, e: f64) -> D {
    if e.fract() == 0.0 && e.abs() < i32::MAX as f64 {
        x.powi(e as i32)
    } else {
        x.powf(e)
    }
}

/// Parameters of a single multiparameter equation as stored in json files.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct EquationRecord {
    /// Short name used to select the equation (e.g. "iapws").
    pub name: String,
    /// Citation of the equation.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Reducing temperature in K.
    pub tc: f64,
    /// Reducing density in mol/m³.
    pub rhoc: f64,
    /// Gas constant used in the fit in J/(mol K).
    pub r: f64,
    pub t_min: f64,
    pub t_max: f64,
    pub p_max: f64,
    pub rho_max: f64,
    pub ideal_gas: Vec<TermGroup>,
    pub residual: Vec<TermGroup>,
}

/// A fully resolved multiparameter equation of state.
#[derive(Clone, Debug)]
pub struct HelmholtzEquation {
    pub name: String,
    pub reference: Option<String>,
    /// Reducing temperature in K.
    pub tc: f64,
    /// Reducing density in mol/m³.
    pub rhoc: f64,
    /// Gas constant in J/(mol K).
    pub r: f64,
    pub t_min: f64,
    pub t_max: f64,
    pub p_max: f64,
    pub rho_max: f64,
    pub ideal_gas: IdealGas,
    pub residual: Residual,
}

impl HelmholtzEquation {
    /// Build the term lists of an equation. Malformed term groups are
    /// reported as configuration errors.
    pub fn new(record: &EquationRecord) -> MeosResult<Self> {
        for (name, value) in [
            ("tc", record.tc),
            ("rhoc", record.rhoc),
            ("r", record.r),
            ("rho_max", record.rho_max),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MeosError::Configuration(format!(
                    "equation `{}`: `{name}` must be positive, got {value}",
                    record.name
                )));
            }
        }
        if record.t_min >= record.t_max {
            return Err(MeosError::Configuration(format!(
                "equation `{}`: empty temperature range [{}, {}]",
                record.name, record.t_min, record.t_max
            )));
        }
        Ok(Self {
            name: record.name.clone(),
            reference: record.reference.clone(),
            tc: record.tc,
            rhoc: record.rhoc,
            r: record.r,
            t_min: record.t_min,
            t_max: record.t_max,
            p_max: record.p_max,
            rho_max: record.rho_max,
            ideal_gas: IdealGas::from_groups(&record.ideal_gas)?,
            residual: Residual::from_groups(&record.residual)?,
        })
    }

    /// Reduced density and inverse reduced temperature.
    pub fn reduce(&self, temperature: f64, density: f64) -> (f64, f64) {
        (density / self.rhoc, self.tc / temperature)
    }

    /// Ideal gas part $\phi^0$ and its derivatives.
    pub fn phi0(&self, delta: f64, tau: f64) -> MeosResult<Derivatives> {
        self.ideal_gas.derivatives(delta, tau)
    }

    /// Residual part $\phi^r$ and its derivatives.
    pub fn phir(&self, delta: f64, tau: f64) -> MeosResult<Derivatives> {
        self.residual.derivatives(delta, tau)
    }

    /// Copy of the equation with an additional enthalpy/entropy offset
    /// $a_1 + a_2\tau$ in the ideal gas part.
    pub fn with_offset(&self, a1: f64, a2: f64) -> Self {
        let mut equation = self.clone();
        equation.ideal_gas.push(IdealGasTerm::Offset { a1, a2 });
        equation
    }

    /// Limits of the residual derivatives for $\delta\to 0$ at fixed
    /// $\tau$, i.e. $\phi^r_\delta$ and $\phi^r_{\delta\delta}$ at zero density.
    pub(crate) fn zero_density_limit(&self, tau: f64) -> MeosResult<(f64, f64)> {
        check_argument("tau", tau)?;
        let phi = self
            .residual
            .evaluate(Dual3_64::from(0.0).derivative(), Dual3_64::from(tau));
        Ok((phi.v1, phi.v2))
    }
}
