use crate::errors::{MeosError, MeosResult};
use crate::fluid::Fluid;
use crate::si::{Pressure, Temperature};
use crate::state::{DensityInitialization, State};
use std::fmt;
use std::sync::Arc;

mod vle_pure;

/// Level of detail in the iteration output.
#[derive(Copy, Clone, Debug, PartialOrd, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Do not print output.
    #[default]
    None,
    /// Print information about the success of failure of the iteration.
    Result,
    /// Print a detailed outpur for every iteration.
    Iter,
}

/// Options for the various solvers.
///
/// If the values are [None], solver specific default
/// values are used.
#[derive(Copy, Clone, Debug, Default)]
pub struct SolverOptions {
    /// Maximum number of iterations.
    pub max_iter: Option<usize>,
    /// Tolerance.
    pub tol: Option<f64>,
    /// Iteration output indicated by the [Verbosity] enum.
    pub verbosity: Verbosity,
    /// Accept states outside of the range of validity of the equation of
    /// state and only log a warning.
    pub extrapolate: bool,
}

impl From<(Option<usize>, Option<f64>, Option<Verbosity>)> for SolverOptions {
    fn from(options: (Option<usize>, Option<f64>, Option<Verbosity>)) -> Self {
        Self {
            max_iter: options.0,
            tol: options.1,
            verbosity: options.2.unwrap_or(Verbosity::None),
            extrapolate: false,
        }
    }
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    pub fn tol(mut self, tol: f64) -> Self {
        self.tol = Some(tol);
        self
    }

    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn extrapolate(mut self, extrapolate: bool) -> Self {
        self.extrapolate = extrapolate;
        self
    }

    pub fn unwrap_or(self, max_iter: usize, tol: f64) -> (usize, f64, Verbosity) {
        (
            self.max_iter.unwrap_or(max_iter),
            self.tol.unwrap_or(tol),
            self.verbosity,
        )
    }
}

/// Coexisting vapor and liquid of a pure fluid.
#[derive(Clone, Debug)]
pub struct PhaseEquilibrium(pub(crate) [State; 2]);

impl fmt::Display for PhaseEquilibrium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vapor:  {}", self.vapor())?;
        write!(f, "liquid: {}", self.liquid())
    }
}

const TRIVIAL_REL_DEVIATION: f64 = 1e-5;

impl PhaseEquilibrium {
    pub fn vapor(&self) -> &State {
        &self.0[0]
    }

    pub fn liquid(&self) -> &State {
        &self.0[1]
    }

    pub fn temperature(&self) -> Temperature {
        self.vapor().temperature
    }

    /// Saturation pressure, evaluated in the vapor phase.
    pub fn pressure(&self) -> Pressure {
        self.vapor().pressure()
    }

    pub(crate) fn from_states(state1: State, state2: State) -> Self {
        let (vapor, liquid) = if state1.density < state2.density {
            (state1, state2)
        } else {
            (state2, state1)
        };
        Self([vapor, liquid])
    }

    /// Creates a new PhaseEquilibrium that contains two states at the
    /// specified temperature and pressure.
    ///
    /// In general, the two states generated are NOT in an equilibrium.
    pub fn new_npt(
        fluid: &Arc<Fluid>,
        temperature: Temperature,
        pressure: Pressure,
    ) -> MeosResult<Self> {
        let options = SolverOptions::default();
        let liquid = State::new_npt(
            fluid,
            temperature,
            pressure,
            DensityInitialization::Liquid,
            options,
        )?;
        let vapor = State::new_npt(
            fluid,
            temperature,
            pressure,
            DensityInitialization::Vapor,
            options,
        )?;
        Ok(Self([vapor, liquid]))
    }

    pub(crate) fn update_pressure(
        self,
        temperature: Temperature,
        pressure: Pressure,
    ) -> MeosResult<Self> {
        let [vapor, liquid] = self.0;
        let update = |s: State| {
            State::new_npt(
                &s.fluid,
                temperature,
                pressure,
                DensityInitialization::InitialDensity(s.density),
                SolverOptions::default(),
            )
        };
        Ok(Self([update(vapor)?, update(liquid)?]))
    }

    pub(crate) fn check_trivial_solution(self) -> MeosResult<Self> {
        if Self::is_trivial_solution(self.vapor(), self.liquid()) {
            Err(MeosError::TrivialSolution)
        } else {
            Ok(self)
        }
    }

    /// Check if the two states form a trivial solution
    pub fn is_trivial_solution(state1: &State, state2: &State) -> bool {
        ((state2.density / state1.density).into_value() - 1.0).abs() < TRIVIAL_REL_DEVIATION
    }
}
