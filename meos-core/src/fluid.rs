//! Resolved description of a substance.
use crate::ancillary::{corresponding_states, Ancillaries};
use crate::blend::Blend;
use crate::equation_of_state::HelmholtzEquation;
use crate::errors::{MeosError, MeosResult};
use crate::parameter::{CriticalPointRecord, FluidRecord, Identifier, TriplePointRecord};
use crate::phase_equilibria::{PhaseEquilibrium, SolverOptions};
use crate::si::*;
use crate::state::{DensityInitialization, State, StateSpec, StateSweep};
use crate::transport::{
    ThermalConductivityRecord, TransportModel, TransportProperty, TransportRegistry,
    ViscosityRecord,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use typenum::P3;

/// Reference state for enthalpy and entropy.
///
/// Enthalpy and entropy values are shifted by an additional ideal gas
/// term $a_1+a_2\tau$ such that they take the given values at the
/// reference point.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceState {
    /// As published with the equation of state.
    #[default]
    Native,
    /// $h=0$, $s=0$ at 298.15 K and 101325 Pa.
    Oto,
    /// $h=0$, $s=0$ for the saturated liquid at 101325 Pa.
    Nbp,
    /// $h=200$ kJ/kg, $s=1$ kJ/(kg K) for the saturated liquid at 273.15 K.
    Iir,
    /// $h=0$, $s=0$ for the saturated liquid at 233.15 K.
    Ashrae,
    /// Specific enthalpy `h0` (J/kg) and entropy `s0` (J/(kg K)) of the
    /// single phase state at `temperature` (K) and `pressure` (Pa).
    Custom {
        temperature: f64,
        pressure: f64,
        h0: f64,
        s0: f64,
    },
}

impl fmt::Display for ReferenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Oto => write!(f, "OTO"),
            Self::Nbp => write!(f, "NBP"),
            Self::Iir => write!(f, "IIR"),
            Self::Ashrae => write!(f, "ASHRAE"),
            Self::Custom {
                temperature,
                pressure,
                h0,
                s0,
            } => write!(
                f,
                "custom (T = {temperature} K, p = {pressure} Pa, h = {h0} J/kg, s = {s0} J/(kg K))"
            ),
        }
    }
}

/// Selection of one of the equations of state of a fluid.
#[derive(Clone, Debug, PartialEq)]
pub enum EquationSelector {
    Index(usize),
    Name(String),
}

impl From<usize> for EquationSelector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for EquationSelector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

/// A substance with one active equation of state and transport models.
///
/// A `Fluid` is immutable and shared between states through an [Arc].
/// Alternative equations or transport models are selected by building
/// a modified copy.
#[derive(Clone, Debug)]
pub struct Fluid {
    identifier: Identifier,
    molar_weight: f64,
    critical_point: CriticalPointRecord,
    triple_point: TriplePointRecord,
    normal_boiling_point: Option<f64>,
    acentric_factor: Option<f64>,
    equations: Vec<HelmholtzEquation>,
    equation_index: usize,
    equation: HelmholtzEquation,
    ancillaries: Ancillaries,
    blend: Option<Blend>,
    viscosity: Vec<TransportModel<ViscosityRecord>>,
    viscosity_index: usize,
    thermal_conductivity: Vec<TransportModel<ThermalConductivityRecord>>,
    thermal_conductivity_index: usize,
    reference_state: ReferenceState,
}

impl fmt::Display for Fluid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fluid({}, equation={}, reference state={})",
            self.name(),
            self.equation.name,
            self.reference_state
        )
    }
}

impl Fluid {
    /// Resolve a fluid record. Custom transport methods are looked up in
    /// `registry` under the name of the substance.
    pub fn new(record: &FluidRecord, registry: &TransportRegistry) -> MeosResult<Self> {
        let name = record
            .identifier
            .name
            .as_deref()
            .or(record.identifier.cas.as_deref())
            .ok_or_else(|| MeosError::Configuration("the fluid has no name".into()))?;
        if record.equations.is_empty() {
            return Err(MeosError::Configuration(format!(
                "no equation of state given for {name}"
            )));
        }
        if !(record.molar_weight > 0.0) {
            return Err(MeosError::Configuration(format!(
                "molar weight of {name} must be positive"
            )));
        }
        let equations = record
            .equations
            .iter()
            .map(HelmholtzEquation::new)
            .collect::<MeosResult<Vec<_>>>()?;
        let viscosity = record
            .viscosity
            .iter()
            .map(|r| TransportModel::new(r, name, TransportProperty::Viscosity, registry))
            .collect::<MeosResult<Vec<_>>>()?;
        let thermal_conductivity = record
            .thermal_conductivity
            .iter()
            .map(|r| TransportModel::new(r, name, TransportProperty::ThermalConductivity, registry))
            .collect::<MeosResult<Vec<_>>>()?;
        let fluid = Self {
            identifier: record.identifier.clone(),
            molar_weight: record.molar_weight,
            critical_point: record.critical_point,
            triple_point: record.triple_point,
            normal_boiling_point: record.normal_boiling_point,
            acentric_factor: record.acentric_factor,
            equation: equations[0].clone(),
            equations,
            equation_index: 0,
            ancillaries: Ancillaries::new(&record.ancillaries)?,
            blend: record.blend.as_ref().map(Blend::new).transpose()?,
            viscosity,
            viscosity_index: 0,
            thermal_conductivity,
            thermal_conductivity_index: 0,
            reference_state: ReferenceState::Native,
        };
        fluid.with_reference_state(record.reference_state)
    }

    /// Copy of the fluid using a different equation of state.
    pub fn with_equation<S: Into<EquationSelector>>(&self, selector: S) -> MeosResult<Self> {
        let index = match selector.into() {
            EquationSelector::Index(i) if i < self.equations.len() => i,
            EquationSelector::Index(i) => {
                return Err(MeosError::Configuration(format!(
                    "{} has {} equations of state, index {i} is out of bounds",
                    self.name(),
                    self.equations.len()
                )))
            }
            EquationSelector::Name(name) => self
                .equations
                .iter()
                .position(|e| e.name.eq_ignore_ascii_case(&name))
                .ok_or_else(|| {
                    MeosError::Configuration(format!(
                        "{} has no equation of state `{name}`",
                        self.name()
                    ))
                })?,
        };
        let mut fluid = self.clone();
        fluid.equation_index = index;
        fluid.with_reference_state(self.reference_state)
    }

    /// Copy of the fluid using another viscosity model.
    pub fn with_viscosity(&self, index: usize) -> MeosResult<Self> {
        check_index("viscosity", index, self.viscosity.len())?;
        let mut fluid = self.clone();
        fluid.viscosity_index = index;
        Ok(fluid)
    }

    /// Copy of the fluid using another thermal conductivity model.
    pub fn with_thermal_conductivity(&self, index: usize) -> MeosResult<Self> {
        check_index("thermal conductivity", index, self.thermal_conductivity.len())?;
        let mut fluid = self.clone();
        fluid.thermal_conductivity_index = index;
        Ok(fluid)
    }

    /// Copy of the fluid with enthalpy and entropy shifted to the given
    /// reference state.
    pub fn with_reference_state(&self, reference_state: ReferenceState) -> MeosResult<Self> {
        let mut fluid = self.clone();
        fluid.equation = self.equations[self.equation_index].clone();
        fluid.reference_state = reference_state;
        if reference_state == ReferenceState::Native {
            return Ok(fluid);
        }
        let native = Arc::new(fluid.clone());
        let (a1, a2) = reference_offset(&native, reference_state)?;
        fluid.equation = fluid.equation.with_offset(a1, a2);
        Ok(fluid)
    }

    /// Batch of states with one fixed and one varying input, see [StateSweep].
    pub fn from_list(
        self: &Arc<Self>,
        fixed: StateSpec,
        sweep: Vec<StateSpec>,
        options: SolverOptions,
    ) -> StateSweep {
        StateSweep::new(self, fixed, sweep, options)
    }
}

fn check_index(property: &str, index: usize, len: usize) -> MeosResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(MeosError::Configuration(format!(
            "{len} {property} models available, index {index} is out of bounds"
        )))
    }
}

/// Coefficients $(a_1, a_2)$ of the offset term that shifts enthalpy
/// and entropy of `fluid` to the reference state.
fn reference_offset(fluid: &Arc<Fluid>, reference_state: ReferenceState) -> MeosResult<(f64, f64)> {
    let atmosphere = 101325.0 * PASCAL;
    let (state, h0, s0) = match reference_state {
        ReferenceState::Native => return Ok((0.0, 0.0)),
        ReferenceState::Oto => {
            let state = State::new_npt(
                fluid,
                298.15 * KELVIN,
                atmosphere,
                DensityInitialization::None,
                SolverOptions::default(),
            )?;
            (state, 0.0, 0.0)
        }
        ReferenceState::Nbp => (saturated_liquid(fluid, atmosphere.into())?, 0.0, 0.0),
        ReferenceState::Iir => (
            saturated_liquid(fluid, (273.15 * KELVIN).into())?,
            200e3,
            1e3,
        ),
        ReferenceState::Ashrae => (saturated_liquid(fluid, (233.15 * KELVIN).into())?, 0.0, 0.0),
        ReferenceState::Custom {
            temperature,
            pressure,
            h0,
            s0,
        } => {
            let state = State::new_npt(
                fluid,
                temperature * KELVIN,
                pressure * PASCAL,
                DensityInitialization::None,
                SolverOptions::default(),
            )?;
            (state, h0, s0)
        }
    };
    let mw = fluid.molar_weight().kg_mol();
    let equation = fluid.equation();
    let dh = h0 * mw - state.molar_enthalpy().j_mol();
    let ds = s0 * mw - state.molar_entropy().j_molk();
    Ok((-ds / equation.r, dh / (equation.r * equation.tc)))
}

fn saturated_liquid(fluid: &Arc<Fluid>, spec: crate::state::TPSpec) -> MeosResult<State> {
    let options = SolverOptions::default();
    let vle = match (fluid.blend(), spec) {
        (Some(blend), crate::state::TPSpec::Pressure(p)) => {
            let t = blend.temperature(p.pa(), 0.0)?;
            PhaseEquilibrium::blend(fluid, t * KELVIN, options)?
        }
        (Some(_), crate::state::TPSpec::Temperature(t)) => {
            PhaseEquilibrium::blend(fluid, t, options)?
        }
        (None, spec) => PhaseEquilibrium::pure(fluid, spec, options)?,
    };
    Ok(vle.liquid().clone())
}

/// # Constants and correlations
impl Fluid {
    /// Primary name of the substance.
    pub fn name(&self) -> &str {
        self.identifier
            .name
            .as_deref()
            .or(self.identifier.cas.as_deref())
            .unwrap_or_default()
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn molar_weight(&self) -> MolarWeight {
        self.molar_weight * GRAM / MOL
    }

    pub fn critical_temperature(&self) -> Temperature {
        self.critical_point.temperature * KELVIN
    }

    pub fn critical_pressure(&self) -> Pressure {
        self.critical_point.pressure * PASCAL
    }

    pub fn critical_density(&self) -> Density {
        self.critical_point.density * MOL / METER.powi::<P3>()
    }

    pub fn triple_point_temperature(&self) -> Temperature {
        self.triple_point.temperature * KELVIN
    }

    pub fn triple_point_pressure(&self) -> Pressure {
        self.triple_point.pressure * PASCAL
    }

    pub fn normal_boiling_point(&self) -> Option<Temperature> {
        self.normal_boiling_point.map(|t| t * KELVIN)
    }

    pub fn acentric_factor(&self) -> Option<f64> {
        self.acentric_factor
    }

    /// The active equation of state, including the reference state offset.
    pub fn equation(&self) -> &HelmholtzEquation {
        &self.equation
    }

    /// Names of all available equations of state.
    pub fn equation_names(&self) -> Vec<&str> {
        self.equations.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn ancillaries(&self) -> &Ancillaries {
        &self.ancillaries
    }

    /// Bubble and dew lines of a pseudo-pure fluid.
    pub fn blend(&self) -> Option<&Blend> {
        self.blend.as_ref()
    }

    pub fn reference_state(&self) -> ReferenceState {
        self.reference_state
    }

    pub fn viscosity_model(&self) -> Option<&TransportModel<ViscosityRecord>> {
        self.viscosity.get(self.viscosity_index)
    }

    pub fn thermal_conductivity_model(
        &self,
    ) -> Option<&TransportModel<ThermalConductivityRecord>> {
        self.thermal_conductivity
            .get(self.thermal_conductivity_index)
    }

    /// Vapor pressure from the ancillary equation.
    pub fn vapor_pressure(&self, temperature: Temperature) -> MeosResult<Pressure> {
        let ancillary = self.ancillaries.vapor_pressure.as_ref();
        let ancillary = ancillary.ok_or_else(|| self.missing("vapor pressure"))?;
        Ok(ancillary.evaluate(temperature.kelvin())? * PASCAL)
    }

    /// Saturated liquid density from the ancillary equation.
    pub fn saturated_liquid_density(&self, temperature: Temperature) -> MeosResult<Density> {
        let ancillary = self.ancillaries.liquid_density.as_ref();
        let ancillary = ancillary.ok_or_else(|| self.missing("saturated liquid density"))?;
        Ok(ancillary.evaluate(temperature.kelvin())? * MOL / METER.powi::<P3>())
    }

    /// Saturated vapor density from the ancillary equation.
    pub fn saturated_vapor_density(&self, temperature: Temperature) -> MeosResult<Density> {
        let ancillary = self.ancillaries.vapor_density.as_ref();
        let ancillary = ancillary.ok_or_else(|| self.missing("saturated vapor density"))?;
        Ok(ancillary.evaluate(temperature.kelvin())? * MOL / METER.powi::<P3>())
    }

    pub fn melting_pressure(&self, temperature: Temperature) -> MeosResult<Pressure> {
        let curve = self.ancillaries.melting.as_ref();
        let curve = curve.ok_or_else(|| self.missing("melting curve"))?;
        Ok(curve.evaluate(temperature.kelvin())? * PASCAL)
    }

    pub fn sublimation_pressure(&self, temperature: Temperature) -> MeosResult<Pressure> {
        let curve = self.ancillaries.sublimation.as_ref();
        let curve = curve.ok_or_else(|| self.missing("sublimation curve"))?;
        Ok(curve.evaluate(temperature.kelvin())? * PASCAL)
    }

    pub fn surface_tension(&self, temperature: Temperature) -> MeosResult<SurfaceTension> {
        let correlation = self.ancillaries.surface_tension.as_ref();
        let correlation = correlation.ok_or_else(|| self.missing("surface tension"))?;
        Ok(correlation.evaluate(temperature.kelvin())? * NEWTON / METER)
    }

    fn missing(&self, correlation: &str) -> MeosError {
        MeosError::Configuration(format!("no {correlation} correlation for {}", self.name()))
    }
}

/// # Initial guesses and ranges
impl Fluid {
    /// Vapor pressure in Pa from the ancillary or, outside of its range,
    /// from corresponding states.
    pub(crate) fn vapor_pressure_guess(&self, t: f64) -> f64 {
        if let Some(blend) = &self.blend {
            if let Ok(p) = blend.pressure(t, 0.5) {
                return p;
            }
        }
        self.ancillaries
            .vapor_pressure
            .as_ref()
            .and_then(|a| a.evaluate(t).ok())
            .unwrap_or_else(|| {
                corresponding_states::vapor_pressure(
                    t,
                    self.critical_point.temperature,
                    self.critical_point.pressure,
                    self.triple_point.temperature,
                    self.triple_point.pressure,
                )
            })
    }

    /// Saturation temperature in K at pressure `p` in Pa.
    pub(crate) fn saturation_temperature_guess(&self, p: f64) -> f64 {
        self.ancillaries
            .vapor_pressure
            .as_ref()
            .and_then(|a| a.invert(p).ok())
            .unwrap_or_else(|| {
                corresponding_states::saturation_temperature(
                    p,
                    self.critical_point.temperature,
                    self.critical_point.pressure,
                    self.triple_point.temperature,
                    self.triple_point.pressure,
                )
            })
    }

    /// Saturated liquid density in mol/m³ below the critical temperature,
    /// the maximum density of the equation above.
    pub(crate) fn liquid_density_guess(&self, t: f64) -> f64 {
        let tc = self.critical_point.temperature;
        if t >= tc {
            return self.equation.rho_max;
        }
        self.ancillaries
            .liquid_density
            .as_ref()
            .and_then(|a| a.evaluate(t).ok())
            .unwrap_or_else(|| {
                corresponding_states::liquid_density(t, tc, self.critical_point.density)
            })
    }

    /// Saturated vapor density in mol/m³ below the critical temperature,
    /// the critical density above.
    pub(crate) fn vapor_density_guess(&self, t: f64) -> f64 {
        if t >= self.critical_point.temperature {
            return self.critical_point.density;
        }
        self.ancillaries
            .vapor_density
            .as_ref()
            .and_then(|a| a.evaluate(t).ok())
            .unwrap_or_else(|| self.vapor_pressure_guess(t) / (self.equation.r * t))
    }

    pub(crate) fn initial_density(&self, t: f64, initialization: DensityInitialization) -> f64 {
        match initialization {
            DensityInitialization::InitialDensity(rho) => rho.mol_m3(),
            DensityInitialization::Liquid => self.liquid_density_guess(t),
            DensityInitialization::Vapor => self.vapor_density_guess(t),
            DensityInitialization::None => self.critical_point.density,
        }
    }

    /// Bounds of temperature iterations in K.
    pub(crate) fn temperature_bounds(&self) -> (f64, f64) {
        (0.5 * self.equation.t_min, 2.0 * self.equation.t_max)
    }

    /// Bounds of density iterations in mol/m³.
    pub(crate) fn density_bounds(&self) -> (f64, f64) {
        (1e-12 * self.equation.rhoc, 1.5 * self.equation.rho_max)
    }

    /// Check a temperature against the range of validity of the equation.
    pub fn check_temperature(
        &self,
        temperature: Temperature,
        options: SolverOptions,
    ) -> MeosResult<()> {
        let t = temperature.kelvin();
        let (t_min, t_max) = (self.equation.t_min, self.equation.t_max);
        if (t_min..=t_max).contains(&t) {
            return Ok(());
        }
        if options.extrapolate {
            log::warn!(
                "{}: T = {t} K is outside of the range of validity [{t_min}, {t_max}] K of `{}`",
                self.name(),
                self.equation.name
            );
            Ok(())
        } else {
            Err(MeosError::OutOfRange("temperature".into(), t, t_min, t_max))
        }
    }

    /// Check a pressure against the range of validity of the equation.
    pub fn check_pressure(&self, pressure: Pressure, options: SolverOptions) -> MeosResult<()> {
        let p = pressure.pa();
        let p_max = self.equation.p_max;
        if p <= p_max {
            return Ok(());
        }
        if options.extrapolate {
            log::warn!(
                "{}: p = {p} Pa exceeds the maximum pressure {p_max} Pa of `{}`",
                self.name(),
                self.equation.name
            );
            Ok(())
        } else {
            Err(MeosError::OutOfRange("pressure".into(), p, 0.0, p_max))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fluids::{air, hydrogen, water};
    use approx::assert_relative_eq;

    #[test]
    fn constants() {
        let water = water();
        assert_eq!(water.name(), "water");
        assert_relative_eq!(water.molar_weight().g_mol(), 18.015268);
        assert_relative_eq!(water.critical_temperature().kelvin(), 647.096);
        assert_relative_eq!(water.critical_pressure().mpa(), 22.064);
        assert_eq!(water.equation_names(), vec!["iapws"]);
        assert!(water.blend().is_none());
        assert!(air().blend().is_some());
    }

    #[test]
    fn equation_selection() {
        let water = water();
        assert!(water.with_equation(0).is_ok());
        assert!(water.with_equation("IAPWS").is_ok());
        assert!(matches!(
            water.with_equation(1),
            Err(MeosError::Configuration(_))
        ));
        assert!(matches!(
            water.with_equation("unknown"),
            Err(MeosError::Configuration(_))
        ));
        assert!(water.with_viscosity(0).is_err());
    }

    #[test]
    fn ancillary_wrappers() -> MeosResult<()> {
        let water = water();
        assert_relative_eq!(
            water.melting_pressure(251.165 * KELVIN)?.pa(),
            208566566.0,
            max_relative = 1e-6
        );
        assert_relative_eq!(
            water.sublimation_pressure(230.0 * KELVIN)?.pa(),
            8.94735,
            max_relative = 1e-5
        );
        assert_relative_eq!(
            water.surface_tension(300.0 * KELVIN)?.mn_m(),
            71.69,
            max_relative = 1e-3
        );
        assert_relative_eq!(
            water.vapor_pressure(450.0 * KELVIN)?.mpa(),
            0.932203564,
            max_relative = 1e-3
        );
        assert!(matches!(
            water.vapor_pressure(700.0 * KELVIN),
            Err(MeosError::OutOfRange(..))
        ));
        assert!(matches!(
            hydrogen().surface_tension(20.0 * KELVIN),
            Err(MeosError::Configuration(_))
        ));
        Ok(())
    }

    #[test]
    fn guesses_fall_back_to_corresponding_states() {
        let hydrogen = hydrogen();
        // no liquid density ancillary available
        let rho = hydrogen.liquid_density_guess(20.0);
        assert!(rho > hydrogen.critical_density().mol_m3());
        // the corresponding states vapor pressure passes through both end points
        let p = corresponding_states::vapor_pressure(33.145, 33.145, 1296400.0, 13.957, 7360.0);
        assert_relative_eq!(p, 1296400.0);
        let water = water();
        assert_relative_eq!(water.liquid_density_guess(700.0), water.equation().rho_max);
    }

    #[test]
    fn range_checks() {
        let water = water();
        let strict = SolverOptions::default();
        let lenient = strict.extrapolate(true);
        assert!(water.check_temperature(300.0 * KELVIN, strict).is_ok());
        assert!(matches!(
            water.check_temperature(250.0 * KELVIN, strict),
            Err(MeosError::OutOfRange(..))
        ));
        assert!(water.check_temperature(250.0 * KELVIN, lenient).is_ok());
        assert!(water.check_pressure(2e9 * PASCAL, strict).is_err());
        assert!(water.check_pressure(2e9 * PASCAL, lenient).is_ok());
    }

    #[test]
    fn reference_states() -> MeosResult<()> {
        let water = water();
        let options = SolverOptions::default();

        let oto = Arc::new(water.with_reference_state(ReferenceState::Oto)?);
        let state = State::new_npt(
            &oto,
            298.15 * KELVIN,
            101325.0 * PASCAL,
            DensityInitialization::None,
            options,
        )?;
        assert_relative_eq!(state.specific_enthalpy().j_kg(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(state.specific_entropy().j_kgk(), 0.0, epsilon = 1e-8);

        let iir = Arc::new(water.with_reference_state(ReferenceState::Iir)?);
        let vle = PhaseEquilibrium::pure(&iir, 273.15 * KELVIN, options)?;
        assert_relative_eq!(vle.liquid().specific_enthalpy().kj_kg(), 200.0, max_relative = 1e-9);
        assert_relative_eq!(vle.liquid().specific_entropy().kj_kgk(), 1.0, max_relative = 1e-9);

        // offsets do not change any other property
        let native = State::new_pure(&water, 400.0 * KELVIN, 40.0 * MOL / METER.powi::<P3>())?;
        let shifted = State::new_pure(&iir, 400.0 * KELVIN, 40.0 * MOL / METER.powi::<P3>())?;
        assert_relative_eq!(native.pressure(), shifted.pressure(), max_relative = 1e-14);
        assert_relative_eq!(
            native.molar_isobaric_heat_capacity()?,
            shifted.molar_isobaric_heat_capacity()?,
            max_relative = 1e-12
        );

        let custom = ReferenceState::Custom {
            temperature: 500.0,
            pressure: 1e5,
            h0: 1000.0,
            s0: 10.0,
        };
        let custom = Arc::new(water.with_reference_state(custom)?);
        let state = State::new_npt(
            &custom,
            500.0 * KELVIN,
            1e5 * PASCAL,
            DensityInitialization::Vapor,
            options,
        )?;
        assert_relative_eq!(state.specific_enthalpy().j_kg(), 1000.0, max_relative = 1e-9);
        assert_relative_eq!(state.specific_entropy().j_kgk(), 10.0, max_relative = 1e-9);
        Ok(())
    }

    #[test]
    fn reference_state_of_a_blend() -> MeosResult<()> {
        let air = Arc::new(air().with_reference_state(ReferenceState::Nbp)?);
        let t = air.blend().unwrap().temperature(101325.0, 0.0)?;
        let vle = PhaseEquilibrium::blend(&air, t * KELVIN, SolverOptions::default())?;
        assert_relative_eq!(vle.liquid().molar_enthalpy().j_mol(), 0.0, epsilon = 1e-6);
        Ok(())
    }
}
