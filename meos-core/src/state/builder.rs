use super::{DensityInitialization, FluidState, StateSpec};
use crate::errors::{MeosError, MeosResult};
use crate::fluid::Fluid;
use crate::phase_equilibria::SolverOptions;
use crate::si::*;
use std::sync::Arc;

/// A simple tool to construct [FluidState]s from any supported pair of
/// input variables.
///
/// Supported pairs are $(T,p)$, $(T,\rho)$, $(T,x)$, $(p,x)$, $(p,h)$,
/// $(p,s)$, $(T,h)$, $(T,s)$ and $(\rho,s)$. Mass specific inputs are
/// converted with the molar weight of the fluid.
///
/// # Examples
/// ```
/// # use meos_core::parameter::FluidRecord;
/// # use meos_core::{Fluid, MeosResult, StateBuilder, TransportRegistry};
/// # use meos_core::si::*;
/// # use std::sync::Arc;
/// # use approx::assert_relative_eq;
/// # fn main() -> MeosResult<()> {
/// # let json = std::fs::read_to_string("../parameters/water.json").unwrap();
/// # let record = FluidRecord::from_json_str(&json)?;
/// let water = Arc::new(Fluid::new(&record, &TransportRegistry::new())?);
///
/// // saturated mixture at 450 K
/// let state = StateBuilder::new(&water)
///     .temperature(450.0 * KELVIN)
///     .quality(0.5)
///     .build()?;
/// assert_relative_eq!(state.pressure().mpa(), 0.932203564, max_relative = 1e-8);
///
/// // compressed liquid from pressure and enthalpy
/// let state = StateBuilder::new(&water)
///     .pressure(10.0 * MEGA * PASCAL)
///     .specific_enthalpy(500.0 * KILO * JOULE / KILOGRAM)
///     .build()?;
/// assert!(!state.is_two_phase());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct StateBuilder {
    fluid: Arc<Fluid>,
    temperature: Option<Temperature>,
    pressure: Option<Pressure>,
    density: Option<Density>,
    quality: Option<f64>,
    molar_enthalpy: Option<MolarEnergy>,
    molar_entropy: Option<MolarEntropy>,
    density_initialization: DensityInitialization,
    initial_temperature: Option<Temperature>,
    options: SolverOptions,
    repeated: Vec<&'static str>,
}

fn set<T>(field: &mut Option<T>, value: T, name: &'static str, repeated: &mut Vec<&'static str>) {
    if field.replace(value).is_some() {
        repeated.push(name);
    }
}

impl StateBuilder {
    /// Create a new `StateBuilder` for the given fluid.
    pub fn new(fluid: &Arc<Fluid>) -> Self {
        StateBuilder {
            fluid: fluid.clone(),
            temperature: None,
            pressure: None,
            density: None,
            quality: None,
            molar_enthalpy: None,
            molar_entropy: None,
            density_initialization: DensityInitialization::None,
            initial_temperature: None,
            options: SolverOptions::default(),
            repeated: Vec::new(),
        }
    }

    /// Provide the temperature for the new state.
    pub fn temperature(mut self, temperature: Temperature) -> Self {
        set(&mut self.temperature, temperature, "temperature", &mut self.repeated);
        self
    }

    /// Provide the pressure for the new state.
    pub fn pressure(mut self, pressure: Pressure) -> Self {
        set(&mut self.pressure, pressure, "pressure", &mut self.repeated);
        self
    }

    /// Provide the molar density for the new state.
    pub fn density(mut self, density: Density) -> Self {
        set(&mut self.density, density, "density", &mut self.repeated);
        self
    }

    /// Provide the mass density for the new state.
    pub fn mass_density(self, mass_density: MassDensity) -> Self {
        let density = mass_density / self.fluid.molar_weight();
        self.density(density)
    }

    /// Provide the vapor mass fraction of a saturated mixture.
    pub fn quality(mut self, quality: f64) -> Self {
        set(&mut self.quality, quality, "quality", &mut self.repeated);
        self
    }

    /// Provide the molar enthalpy for the new state.
    pub fn molar_enthalpy(mut self, molar_enthalpy: MolarEnergy) -> Self {
        set(&mut self.molar_enthalpy, molar_enthalpy, "enthalpy", &mut self.repeated);
        self
    }

    /// Provide the specific enthalpy for the new state.
    pub fn specific_enthalpy(self, specific_enthalpy: SpecificEnergy) -> Self {
        let molar_enthalpy = specific_enthalpy * self.fluid.molar_weight();
        self.molar_enthalpy(molar_enthalpy)
    }

    /// Provide the molar entropy for the new state.
    pub fn molar_entropy(mut self, molar_entropy: MolarEntropy) -> Self {
        set(&mut self.molar_entropy, molar_entropy, "entropy", &mut self.repeated);
        self
    }

    /// Provide the specific entropy for the new state.
    pub fn specific_entropy(self, specific_entropy: SpecificEntropy) -> Self {
        let molar_entropy = specific_entropy * self.fluid.molar_weight();
        self.molar_entropy(molar_entropy)
    }

    /// Provide one input variable.
    pub fn spec(self, spec: StateSpec) -> Self {
        match spec {
            StateSpec::Temperature(t) => self.temperature(t),
            StateSpec::Pressure(p) => self.pressure(p),
            StateSpec::Density(rho) => self.density(rho),
            StateSpec::MassDensity(rho) => self.mass_density(rho),
            StateSpec::Quality(x) => self.quality(x),
            StateSpec::MolarEnthalpy(h) => self.molar_enthalpy(h),
            StateSpec::SpecificEnthalpy(h) => self.specific_enthalpy(h),
            StateSpec::MolarEntropy(s) => self.molar_entropy(s),
            StateSpec::SpecificEntropy(s) => self.specific_entropy(s),
        }
    }

    /// Specify a vapor state.
    pub fn vapor(mut self) -> Self {
        self.density_initialization = DensityInitialization::Vapor;
        self
    }

    /// Specify a liquid state.
    pub fn liquid(mut self) -> Self {
        self.density_initialization = DensityInitialization::Liquid;
        self
    }

    /// Provide an initial density used in density iterations.
    pub fn initial_density(mut self, initial_density: Density) -> Self {
        self.density_initialization = DensityInitialization::InitialDensity(initial_density);
        self
    }

    /// Provide an initial temperature used in the Newton solver.
    pub fn initial_temperature(mut self, initial_temperature: Temperature) -> Self {
        self.initial_temperature = Some(initial_temperature);
        self
    }

    /// Options of the iterative solvers.
    pub fn options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Allow states outside of the range of validity of the equation.
    pub fn extrapolate(mut self, extrapolate: bool) -> Self {
        self.options = self.options.extrapolate(extrapolate);
        self
    }

    fn inputs(&self) -> Vec<&'static str> {
        [
            ("temperature", self.temperature.is_some()),
            ("pressure", self.pressure.is_some()),
            ("density", self.density.is_some()),
            ("quality", self.quality.is_some()),
            ("enthalpy", self.molar_enthalpy.is_some()),
            ("entropy", self.molar_entropy.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, given)| given.then_some(name))
        .collect()
    }

    /// Try to build the state with the given inputs.
    pub fn build(self) -> MeosResult<FluidState> {
        if !self.repeated.is_empty() {
            return Err(MeosError::UndeterminedState(format!(
                "{} given more than once",
                self.repeated.join(", ")
            )));
        }
        let fluid = &self.fluid;
        let options = self.options;
        let init = self.density_initialization;
        let t0 = self.initial_temperature;
        match (
            self.temperature,
            self.pressure,
            self.density,
            self.quality,
            self.molar_enthalpy,
            self.molar_entropy,
        ) {
            (Some(t), Some(p), None, None, None, None) => {
                FluidState::new_tp(fluid, t, p, init, options)
            }
            (Some(t), None, Some(rho), None, None, None) => {
                FluidState::new_tr(fluid, t, rho, options)
            }
            (Some(t), None, None, Some(x), None, None) => FluidState::new_tx(fluid, t, x, options),
            (None, Some(p), None, Some(x), None, None) => FluidState::new_px(fluid, p, x, options),
            (None, Some(p), None, None, Some(h), None) => {
                FluidState::new_ph(fluid, p, h, t0, options)
            }
            (None, Some(p), None, None, None, Some(s)) => {
                FluidState::new_ps(fluid, p, s, t0, options)
            }
            (Some(t), None, None, None, Some(h), None) => FluidState::new_th(fluid, t, h, options),
            (Some(t), None, None, None, None, Some(s)) => FluidState::new_ts(fluid, t, s, options),
            (None, None, Some(rho), None, None, Some(s)) => {
                FluidState::new_rs(fluid, rho, s, t0, options)
            }
            _ => Err(MeosError::UndeterminedState(format!(
                "unsupported combination of inputs [{}]",
                self.inputs().join(", ")
            ))),
        }
    }
}
