//! Description of a thermodynamic state.
//!
//! A single phase state of a pure fluid is fully defined by its temperature
//! and density. All other variables are derived from the reduced Helmholtz
//! energy, which is evaluated once when the state is created.
//!
//! Inputs other than $(T, \rho)$ are inverted iteratively. The phase aware
//! variants of these solvers that also detect two-phase states are found in
//! [FluidState].
use crate::density_iteration::density_iteration;
use crate::equation_of_state::Derivatives;
use crate::errors::{MeosError, MeosResult};
use crate::fluid::Fluid;
use crate::phase_equilibria::SolverOptions;
use crate::si::*;
use std::fmt;
use std::sync::Arc;
use typenum::{N1, N2, P1, P3, Z0};

mod builder;
mod fluid_state;
mod properties;
mod statevec;
pub use builder::StateBuilder;
pub use fluid_state::FluidState;
pub use properties::PropertyBag;
pub use statevec::{StateSpec, StateSweep, StateVec};

/// Initial values in a density iteration.
#[derive(Clone, Copy, Debug)]
pub enum DensityInitialization {
    /// Calculate a vapor phase by initializing using the ideal gas.
    Vapor,
    /// Calculate a liquid phase by using the saturated liquid density.
    Liquid,
    /// Use the given density as initial value.
    InitialDensity(Density),
    /// Calculate the most stable phase by calculating both a vapor and a liquid
    /// and return the one with the lower molar Gibbs energy.
    None,
}

/// Thermodynamic state of a pure fluid.
///
/// `State` objects are immutable. The reduced Helmholtz energy and its
/// derivatives are evaluated once during construction and all properties
/// are calculated from them.
///
/// ## Contents
///
/// + [State constructors](#state-constructors)
/// + [State properties](#state-properties)
/// + [Mass specific state properties](#mass-specific-state-properties)
/// + [Transport properties](#transport-properties)
#[derive(Clone, Debug)]
pub struct State {
    /// Fluid and equation of state
    pub fluid: Arc<Fluid>,
    /// Temperature $T$
    pub temperature: Temperature,
    /// Molar density $\rho$
    pub density: Density,
    /// Reduced density $\delta=\rho/\rho_c$
    delta: f64,
    /// Inverse reduced temperature $\tau=T_c/T$
    tau: f64,
    ideal_gas: Derivatives,
    residual: Derivatives,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T = {:.5}, ρ = {:.5}", self.temperature, self.density)
    }
}

/// # State constructors
impl State {
    /// Return a new `State` given a temperature and a density.
    ///
    /// This function will perform a validation of the given properties, i.e. test for signs
    /// and if values are finite. It will **not** check the range of validity
    /// of the equation of state.
    pub fn new_pure(
        fluid: &Arc<Fluid>,
        temperature: Temperature,
        density: Density,
    ) -> MeosResult<Self> {
        validate(temperature, density)?;
        let equation = fluid.equation();
        let (delta, tau) = equation.reduce(temperature.kelvin(), density.mol_m3());
        Ok(Self {
            fluid: fluid.clone(),
            temperature,
            density,
            delta,
            tau,
            ideal_gas: equation.phi0(delta, tau)?,
            residual: equation.phir(delta, tau)?,
        })
    }

    /// Return a new `State` using a density iteration. [DensityInitialization] is used to
    /// influence the calculation with respect to the possible solutions.
    pub fn new_npt(
        fluid: &Arc<Fluid>,
        temperature: Temperature,
        pressure: Pressure,
        density_initialization: DensityInitialization,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let t = temperature.kelvin();
        let p = pressure.pa();
        let r = fluid.equation().r;
        let vapor_density = p / (r * t);

        // calculate state from initial density or given phase
        match density_initialization {
            DensityInitialization::InitialDensity(rho0) => {
                return density_iteration(fluid, t, p, rho0.mol_m3(), options)
            }
            DensityInitialization::Vapor => {
                return density_iteration(fluid, t, p, vapor_density, options)
            }
            DensityInitialization::Liquid => {
                return density_iteration(fluid, t, p, fluid.liquid_density_guess(t), options)
            }
            DensityInitialization::None => (),
        }

        // calculate stable phase
        let liquid_density = fluid.liquid_density_guess(t);
        let liquid = density_iteration(fluid, t, p, liquid_density, options);
        if vapor_density >= liquid_density {
            return liquid;
        }
        let vapor = density_iteration(fluid, t, p, vapor_density, options);
        match (liquid, vapor) {
            (Ok(l), Err(_)) => Ok(l),
            (Err(_), Ok(v)) => Ok(v),
            (Ok(l), Ok(v)) => {
                let (g_l, g_v) = (l.reduced_gibbs_energy(), v.reduced_gibbs_energy());
                if (g_l - g_v).abs() < 1e-10 {
                    // degenerate roots: take the one closer to the ancillary density
                    let guess = if p > fluid.vapor_pressure_guess(t) {
                        liquid_density
                    } else {
                        fluid.vapor_density_guess(t)
                    };
                    let distance = |s: &State| (s.density.mol_m3() - guess).abs();
                    if distance(&l) <= distance(&v) {
                        Ok(l)
                    } else {
                        Ok(v)
                    }
                } else if g_l > g_v {
                    Ok(v)
                } else {
                    Ok(l)
                }
            }
            _ => Err(MeosError::UndeterminedState(String::from(
                "Density iteration did not find a solution.",
            ))),
        }
    }

    /// Return a new single phase `State` for given pressure $p$ and molar enthalpy $h$.
    pub fn new_nph(
        fluid: &Arc<Fluid>,
        pressure: Pressure,
        molar_enthalpy: MolarEnergy,
        density_initialization: DensityInitialization,
        initial_temperature: Option<Temperature>,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let t0 = initial_temperature.unwrap_or(298.15 * KELVIN).kelvin();
        Self::solve_ph(
            fluid,
            pressure.pa(),
            molar_enthalpy.j_mol(),
            t0,
            fluid.temperature_bounds(),
            density_initialization,
            options,
        )
    }

    /// Return a new single phase `State` for given pressure $p$ and molar entropy $s$.
    pub fn new_nps(
        fluid: &Arc<Fluid>,
        pressure: Pressure,
        molar_entropy: MolarEntropy,
        density_initialization: DensityInitialization,
        initial_temperature: Option<Temperature>,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let t0 = initial_temperature.unwrap_or(298.15 * KELVIN).kelvin();
        Self::solve_ps(
            fluid,
            pressure.pa(),
            molar_entropy.j_molk(),
            t0,
            fluid.temperature_bounds(),
            density_initialization,
            options,
        )
    }

    /// Return a new single phase `State` for given temperature $T$ and molar enthalpy $h$.
    pub fn new_nth(
        fluid: &Arc<Fluid>,
        temperature: Temperature,
        molar_enthalpy: MolarEnergy,
        density_initialization: DensityInitialization,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let t = temperature.kelvin();
        let rho0 = fluid.initial_density(t, density_initialization);
        Self::solve_th(
            fluid,
            t,
            molar_enthalpy.j_mol(),
            rho0,
            fluid.density_bounds(),
            options,
        )
    }

    /// Return a new single phase `State` for given temperature $T$ and molar entropy $s$.
    pub fn new_nts(
        fluid: &Arc<Fluid>,
        temperature: Temperature,
        molar_entropy: MolarEntropy,
        density_initialization: DensityInitialization,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let t = temperature.kelvin();
        let rho0 = fluid.initial_density(t, density_initialization);
        Self::solve_ts(
            fluid,
            t,
            molar_entropy.j_molk(),
            rho0,
            fluid.density_bounds(),
            options,
        )
    }

    /// Return a new single phase `State` for given density $\rho$ and molar entropy $s$.
    pub fn new_nrs(
        fluid: &Arc<Fluid>,
        density: Density,
        molar_entropy: MolarEntropy,
        initial_temperature: Option<Temperature>,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let t0 = initial_temperature.unwrap_or_else(|| fluid.critical_temperature());
        Self::solve_rs(
            fluid,
            density,
            molar_entropy.j_molk(),
            t0.kelvin(),
            fluid.temperature_bounds(),
            options,
        )
    }

    pub(crate) fn solve_rs(
        fluid: &Arc<Fluid>,
        density: Density,
        molar_entropy: f64,
        t0: f64,
        bounds: (f64, f64),
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let max_iter = options.max_iter.unwrap_or(MAX_ITER_NEWTON);
        let f = |t: f64| {
            let state = State::new_pure(fluid, t * KELVIN, density)?;
            let fx = state.molar_entropy().j_molk() - molar_entropy;
            let dfx = state.molar_isochoric_heat_capacity().j_molk() / t;
            Ok((fx, dfx, state))
        };
        newton(t0, bounds, f, 1e-8, max_iter)
    }

    pub(crate) fn solve_ph(
        fluid: &Arc<Fluid>,
        pressure: f64,
        molar_enthalpy: f64,
        t0: f64,
        bounds: (f64, f64),
        density_initialization: DensityInitialization,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let mut density = density_initialization;
        let max_iter = options.max_iter.unwrap_or(MAX_ITER_NEWTON);
        let f = |t: f64| {
            let s = State::new_npt(fluid, t * KELVIN, pressure * PASCAL, density, options)?;
            let dfx = s.molar_isobaric_heat_capacity()?.j_molk();
            let fx = s.molar_enthalpy().j_mol() - molar_enthalpy;
            density = DensityInitialization::InitialDensity(s.density);
            Ok((fx, dfx, s))
        };
        newton(t0, bounds, f, 1e-8, max_iter)
    }

    pub(crate) fn solve_ps(
        fluid: &Arc<Fluid>,
        pressure: f64,
        molar_entropy: f64,
        t0: f64,
        bounds: (f64, f64),
        density_initialization: DensityInitialization,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let mut density = density_initialization;
        let max_iter = options.max_iter.unwrap_or(MAX_ITER_NEWTON);
        let f = |t: f64| {
            let s = State::new_npt(fluid, t * KELVIN, pressure * PASCAL, density, options)?;
            let dfx = s.molar_isobaric_heat_capacity()?.j_molk() / t;
            let fx = s.molar_entropy().j_molk() - molar_entropy;
            density = DensityInitialization::InitialDensity(s.density);
            Ok((fx, dfx, s))
        };
        newton(t0, bounds, f, 1e-8, max_iter)
    }

    /// Newton iteration in $\ln\rho$ at constant temperature.
    pub(crate) fn solve_th(
        fluid: &Arc<Fluid>,
        temperature: f64,
        molar_enthalpy: f64,
        rho0: f64,
        (rho_min, rho_max): (f64, f64),
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let max_iter = options.max_iter.unwrap_or(MAX_ITER_NEWTON);
        let f = |ln_rho: f64| {
            let density = ln_rho.exp() * MOL / METER.powi::<P3>();
            let s = State::new_pure(fluid, temperature * KELVIN, density)?;
            let rho = s.density.mol_m3();
            let (_, dp_drho) = s.p_dpdrho();
            let dp_dt = s.dp_dt().pa_k();
            let dfx = (rho * dp_drho - temperature * dp_dt) / rho;
            let fx = s.molar_enthalpy().j_mol() - molar_enthalpy;
            Ok((fx, dfx, s))
        };
        newton(rho0.ln(), (rho_min.ln(), rho_max.ln()), f, 1e-12, max_iter)
    }

    /// Newton iteration in $\ln\rho$ at constant temperature.
    pub(crate) fn solve_ts(
        fluid: &Arc<Fluid>,
        temperature: f64,
        molar_entropy: f64,
        rho0: f64,
        (rho_min, rho_max): (f64, f64),
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let max_iter = options.max_iter.unwrap_or(MAX_ITER_NEWTON);
        let f = |ln_rho: f64| {
            let density = ln_rho.exp() * MOL / METER.powi::<P3>();
            let s = State::new_pure(fluid, temperature * KELVIN, density)?;
            let dfx = -s.dp_dt().pa_k() / s.density.mol_m3();
            let fx = s.molar_entropy().j_molk() - molar_entropy;
            Ok((fx, dfx, s))
        };
        newton(rho0.ln(), (rho_min.ln(), rho_max.ln()), f, 1e-12, max_iter)
    }

    /// Update the state with the given temperature
    pub fn update_temperature(&self, temperature: Temperature) -> MeosResult<Self> {
        Self::new_pure(&self.fluid, temperature, self.density)
    }

    /// Reduced density $\delta$ and inverse reduced temperature $\tau$.
    pub fn reduced_variables(&self) -> (f64, f64) {
        (self.delta, self.tau)
    }

    /// Derivatives of the ideal gas part $\phi^0$.
    pub fn ideal_gas_derivatives(&self) -> &Derivatives {
        &self.ideal_gas
    }

    /// Derivatives of the residual part $\phi^r$.
    pub fn residual_derivatives(&self) -> &Derivatives {
        &self.residual
    }
}

const MAX_ITER_NEWTON: usize = 50;

/// Newton iteration for a scalar variable. Steps leaving the interval
/// `bounds` are replaced by bisection towards the violated bound.
fn newton<F>(
    mut x0: f64,
    (lo, hi): (f64, f64),
    mut f: F,
    atol: f64,
    max_iter: usize,
) -> MeosResult<State>
where
    F: FnMut(f64) -> MeosResult<(f64, f64, State)>,
{
    let rtol = 1e-10;
    for _ in 0..max_iter {
        let (fx, dfx, state) = f(x0)?;
        if !fx.is_finite() || !dfx.is_finite() || dfx == 0.0 {
            return Err(MeosError::IterationFailed("newton".to_owned()));
        }
        let mut x = x0 - fx / dfx;
        if x <= lo {
            x = 0.5 * (x0 + lo);
        } else if x >= hi {
            x = 0.5 * (x0 + hi);
        }
        if (x - x0).abs() <= atol + rtol * x.abs() {
            return Ok(state);
        }
        x0 = x;
    }
    Err(MeosError::NotConverged("newton".to_owned()))
}

/// Validate the given temperature and density.
///
/// Properties are valid if
/// * they are finite
/// * they have a positive sign
///
/// The range of validity of the equation of state is not checked.
fn validate(temperature: Temperature, density: Density) -> MeosResult<()> {
    let t = temperature.kelvin();
    let rho = density.mol_m3();
    if !t.is_finite() || t <= 0.0 {
        return Err(MeosError::InvalidState(
            String::from("validate"),
            String::from("temperature"),
            t,
        ));
    }
    if !rho.is_finite() || rho <= 0.0 {
        return Err(MeosError::InvalidState(
            String::from("validate"),
            String::from("density"),
            rho,
        ));
    }
    Ok(())
}

/// Either a temperature or a pressure.
#[derive(Clone, Copy, Debug)]
pub enum TPSpec {
    Temperature(Temperature),
    Pressure(Pressure),
}

impl From<Temperature> for TPSpec {
    fn from(temperature: Temperature) -> Self {
        Self::Temperature(temperature)
    }
}

// The explicit unit avoids an overlap of both `From` implementations
// that cannot be resolved with the alias of the pressure.
impl From<Quantity<f64, SIUnit<N2, N1, P1, Z0, Z0, Z0, Z0>>> for TPSpec {
    fn from(pressure: Pressure) -> Self {
        Self::Pressure(pressure)
    }
}
