use super::{DensityInitialization, State};
use crate::errors::{MeosError, MeosResult};
use crate::fluid::Fluid;
use crate::phase_equilibria::{PhaseEquilibrium, SolverOptions};
use crate::si::*;
use std::fmt;
use std::sync::Arc;
use typenum::P3;

const MAX_ITER_BISECTION: usize = 100;
const TOL_BISECTION: f64 = 1e-12;

/// Result of a state calculation: either a single phase or a
/// vapor-liquid mixture.
///
/// The vapor fraction `quality` of a mixture is a mass fraction. Bulk
/// properties of mixtures follow from the lever rule.
#[derive(Clone, Debug)]
pub enum FluidState {
    Single(State),
    TwoPhase {
        equilibrium: PhaseEquilibrium,
        quality: f64,
        pressure: Pressure,
    },
}

impl fmt::Display for FluidState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(state) => write!(f, "{state}"),
            Self::TwoPhase {
                equilibrium,
                quality,
                pressure,
            } => write!(
                f,
                "T = {:.5}, p = {:.5}, x = {quality:.5}\n{equilibrium}",
                equilibrium.temperature(),
                pressure
            ),
        }
    }
}

/// Variable that is matched in a single phase Newton iteration.
#[derive(Clone, Copy)]
enum Caloric {
    Enthalpy(f64),
    Entropy(f64),
}

impl Caloric {
    fn target(self) -> f64 {
        match self {
            Self::Enthalpy(h) => h,
            Self::Entropy(s) => s,
        }
    }

    fn of(self, state: &State) -> f64 {
        match self {
            Self::Enthalpy(_) => state.molar_enthalpy().j_mol(),
            Self::Entropy(_) => state.molar_entropy().j_molk(),
        }
    }

    fn solve_at_pressure(
        self,
        fluid: &Arc<Fluid>,
        pressure: f64,
        t0: f64,
        bounds: (f64, f64),
        init: DensityInitialization,
        options: SolverOptions,
    ) -> MeosResult<State> {
        match self {
            Self::Enthalpy(h) => State::solve_ph(fluid, pressure, h, t0, bounds, init, options),
            Self::Entropy(s) => State::solve_ps(fluid, pressure, s, t0, bounds, init, options),
        }
    }

    fn solve_at_temperature(
        self,
        fluid: &Arc<Fluid>,
        temperature: f64,
        rho0: f64,
        bounds: (f64, f64),
        options: SolverOptions,
    ) -> MeosResult<State> {
        match self {
            Self::Enthalpy(h) => State::solve_th(fluid, temperature, h, rho0, bounds, options),
            Self::Entropy(s) => State::solve_ts(fluid, temperature, s, rho0, bounds, options),
        }
    }
}

/// # Phase aware state constructors
impl FluidState {
    /// State at given temperature and pressure. Between the dew and
    /// bubble line of a pseudo-pure fluid, the result is a mixture.
    pub fn new_tp(
        fluid: &Arc<Fluid>,
        temperature: Temperature,
        pressure: Pressure,
        density_initialization: DensityInitialization,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        fluid.check_temperature(temperature, options)?;
        fluid.check_pressure(pressure, options)?;
        if let Some(blend) = fluid.blend() {
            let t = temperature.kelvin();
            if t < blend.maximum_temperature() {
                if let Some(x) = blend.quality(t, pressure.pa())? {
                    let equilibrium = PhaseEquilibrium::blend(fluid, temperature, options)?;
                    return Self::two_phase(fluid, equilibrium, x);
                }
            }
        }
        let state = State::new_npt(fluid, temperature, pressure, density_initialization, options)?;
        Ok(Self::Single(state))
    }

    /// State at given temperature and density.
    pub fn new_tr(
        fluid: &Arc<Fluid>,
        temperature: Temperature,
        density: Density,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        fluid.check_temperature(temperature, options)?;
        if temperature < two_phase_limit(fluid) {
            if let Ok(equilibrium) = saturation(fluid, temperature, options) {
                if let Some(x) = volume_quality(&equilibrium, density) {
                    return Self::two_phase(fluid, equilibrium, x);
                }
            }
        }
        let state = Self::Single(State::new_pure(fluid, temperature, density)?);
        state.check_pressure(options)
    }

    /// Saturated mixture at given temperature and vapor fraction.
    pub fn new_tx(
        fluid: &Arc<Fluid>,
        temperature: Temperature,
        quality: f64,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        check_quality(quality)?;
        fluid.check_temperature(temperature, options)?;
        if temperature >= two_phase_limit(fluid) {
            return Err(MeosError::SuperCritical);
        }
        let equilibrium = saturation(fluid, temperature, options)?;
        Self::two_phase(fluid, equilibrium, quality)
    }

    /// Saturated mixture at given pressure and vapor fraction.
    pub fn new_px(
        fluid: &Arc<Fluid>,
        pressure: Pressure,
        quality: f64,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        check_quality(quality)?;
        fluid.check_pressure(pressure, options)?;
        let state = match fluid.blend() {
            Some(blend) => {
                let t = blend.temperature(pressure.pa(), quality)? * KELVIN;
                let equilibrium = PhaseEquilibrium::blend(fluid, t, options)?;
                Self::two_phase(fluid, equilibrium, quality)?
            }
            None => {
                let equilibrium = PhaseEquilibrium::pure(fluid, pressure, options)?;
                Self::two_phase(fluid, equilibrium, quality)?
            }
        };
        state.check_temperature(options)
    }

    /// State at given pressure and molar enthalpy.
    pub fn new_ph(
        fluid: &Arc<Fluid>,
        pressure: Pressure,
        molar_enthalpy: MolarEnergy,
        initial_temperature: Option<Temperature>,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let target = Caloric::Enthalpy(molar_enthalpy.j_mol());
        Self::new_p_caloric(fluid, pressure, target, initial_temperature, options)
    }

    /// State at given pressure and molar entropy.
    pub fn new_ps(
        fluid: &Arc<Fluid>,
        pressure: Pressure,
        molar_entropy: MolarEntropy,
        initial_temperature: Option<Temperature>,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let target = Caloric::Entropy(molar_entropy.j_molk());
        Self::new_p_caloric(fluid, pressure, target, initial_temperature, options)
    }

    /// State at given temperature and molar enthalpy.
    ///
    /// At constant temperature the enthalpy of a compressed liquid can
    /// coincide with that of a saturated mixture. The mixture is returned
    /// in that case.
    pub fn new_th(
        fluid: &Arc<Fluid>,
        temperature: Temperature,
        molar_enthalpy: MolarEnergy,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let target = Caloric::Enthalpy(molar_enthalpy.j_mol());
        Self::new_t_caloric(fluid, temperature, target, options)
    }

    /// State at given temperature and molar entropy.
    pub fn new_ts(
        fluid: &Arc<Fluid>,
        temperature: Temperature,
        molar_entropy: MolarEntropy,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let target = Caloric::Entropy(molar_entropy.j_molk());
        Self::new_t_caloric(fluid, temperature, target, options)
    }

    /// State at given density and molar entropy.
    ///
    /// Along an isochore, the saturation dome is left at a single
    /// temperature. Below that temperature the state is a mixture whose
    /// entropy increases monotonically with temperature.
    pub fn new_rs(
        fluid: &Arc<Fluid>,
        density: Density,
        molar_entropy: MolarEntropy,
        initial_temperature: Option<Temperature>,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let s = molar_entropy.j_molk();
        let (t_min, t_max) = fluid.temperature_bounds();
        let limit = two_phase_limit(fluid).kelvin();
        let inside = |t: f64| {
            saturation(fluid, t * KELVIN, options)
                .ok()
                .and_then(|vle| volume_quality(&vle, density).map(|x| (vle, x)))
        };
        let single = |bounds: (f64, f64)| -> MeosResult<Self> {
            let t0 = initial_temperature
                .map(|t| t.kelvin())
                .unwrap_or(limit)
                .clamp(bounds.0, bounds.1);
            let state = State::solve_rs(fluid, density, s, t0, bounds, options)?;
            Self::Single(state).checked(options)
        };

        let t_lo = fluid
            .triple_point_temperature()
            .kelvin()
            .max(fluid.equation().t_min);
        if inside(t_lo).is_none() {
            return single((t_min, t_max));
        }

        // temperature at which the isochore leaves the saturation dome
        let (mut t_in, mut t_out) = (t_lo, limit);
        while t_out - t_in > TOL_BISECTION * t_out {
            let t = 0.5 * (t_in + t_out);
            if inside(t).is_some() {
                t_in = t;
            } else {
                t_out = t;
            }
        }

        let entropy = |t: f64| {
            inside(t).map(|(vle, x)| {
                let s_l = vle.liquid().molar_entropy().j_molk();
                let s_v = vle.vapor().molar_entropy().j_molk();
                (s_l + x * (s_v - s_l) - s, vle, x)
            })
        };
        match (entropy(t_lo), entropy(t_in)) {
            (Some((f_lo, ..)), _) if f_lo > 0.0 => {
                return Err(MeosError::OutOfRange(
                    "temperature".into(),
                    t_lo,
                    fluid.equation().t_min,
                    fluid.equation().t_max,
                ))
            }
            (_, Some((f_in, ..))) if f_in < 0.0 => return single((t_out, t_max)),
            _ => (),
        }

        let (mut a, mut b) = (t_lo, t_in);
        for _ in 0..MAX_ITER_BISECTION {
            let t = 0.5 * (a + b);
            let (f, vle, x) =
                entropy(t).ok_or_else(|| MeosError::IterationFailed("new_rs".into()))?;
            if b - a < TOL_BISECTION * t || f == 0.0 {
                return Self::two_phase(fluid, vle, x)?.checked(options);
            }
            if f > 0.0 {
                b = t
            } else {
                a = t
            }
        }
        Err(MeosError::NotConverged("new_rs".into()))
    }

    fn new_p_caloric(
        fluid: &Arc<Fluid>,
        pressure: Pressure,
        target: Caloric,
        initial_temperature: Option<Temperature>,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        fluid.check_pressure(pressure, options)?;
        let p = pressure.pa();
        let (t_min, t_max) = fluid.temperature_bounds();
        let value = target.target();

        // saturation temperatures of liquid and vapor
        let saturation = match fluid.blend() {
            Some(blend) => {
                let t_bubble = blend.temperature(p, 0.0);
                let t_dew = blend.temperature(p, 1.0);
                match (t_bubble, t_dew) {
                    (Ok(t_b), Ok(t_d)) => {
                        let liquid = State::new_npt(
                            fluid,
                            t_b * KELVIN,
                            pressure,
                            DensityInitialization::Liquid,
                            options,
                        )?;
                        let vapor = State::new_npt(
                            fluid,
                            t_d * KELVIN,
                            pressure,
                            DensityInitialization::Vapor,
                            options,
                        )?;
                        Some((liquid, vapor))
                    }
                    (Err(MeosError::SuperCritical), _) | (_, Err(MeosError::SuperCritical)) => None,
                    (Err(e), _) | (_, Err(e)) => return Err(e),
                }
            }
            None if pressure < fluid.critical_pressure() => {
                let vle = PhaseEquilibrium::pure(fluid, pressure, options)?;
                let [vapor, liquid] = vle.0;
                Some((liquid, vapor))
            }
            None => None,
        };

        let state = match saturation {
            Some((liquid, vapor)) => {
                let (y_l, y_v) = (target.of(&liquid), target.of(&vapor));
                if value < y_l {
                    // compressed liquid
                    let t_sat = liquid.temperature.kelvin();
                    let slope = liquid.molar_isobaric_heat_capacity()?.j_molk();
                    let slope = match target {
                        Caloric::Enthalpy(_) => slope,
                        Caloric::Entropy(_) => slope / t_sat,
                    };
                    let t0 = initial_temperature
                        .map(|t| t.kelvin())
                        .unwrap_or(t_sat + (value - y_l) / slope)
                        .clamp(0.5 * (t_min + t_sat), t_sat);
                    let state = target.solve_at_pressure(
                        fluid,
                        p,
                        t0,
                        (t_min, t_sat),
                        DensityInitialization::Liquid,
                        options,
                    )?;
                    Self::Single(state)
                } else if value > y_v {
                    // superheated vapor
                    let t_sat = vapor.temperature.kelvin();
                    let slope = vapor.molar_isobaric_heat_capacity()?.j_molk();
                    let slope = match target {
                        Caloric::Enthalpy(_) => slope,
                        Caloric::Entropy(_) => slope / t_sat,
                    };
                    let t0 = initial_temperature
                        .map(|t| t.kelvin())
                        .unwrap_or(t_sat + (value - y_v) / slope)
                        .clamp(t_sat, 0.5 * (t_sat + t_max));
                    let state = target.solve_at_pressure(
                        fluid,
                        p,
                        t0,
                        (t_sat, t_max),
                        DensityInitialization::Vapor,
                        options,
                    )?;
                    Self::Single(state)
                } else if let Some(blend) = fluid.blend() {
                    Self::blend_quality_at_pressure(fluid, blend, p, target, options)?
                } else {
                    let x = (value - y_l) / (y_v - y_l);
                    let equilibrium = PhaseEquilibrium::from_states(vapor, liquid);
                    Self::two_phase(fluid, equilibrium, x)?
                }
            }
            None => {
                let t0 = initial_temperature
                    .unwrap_or_else(|| fluid.critical_temperature())
                    .kelvin();
                let state = target.solve_at_pressure(
                    fluid,
                    p,
                    t0,
                    (t_min, t_max),
                    DensityInitialization::None,
                    options,
                )?;
                Self::Single(state)
            }
        };
        state.check_temperature(options)
    }

    /// Bisection on the vapor fraction of a pseudo-pure mixture at
    /// constant pressure.
    fn blend_quality_at_pressure(
        fluid: &Arc<Fluid>,
        blend: &crate::blend::Blend,
        pressure: f64,
        target: Caloric,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let mixture = |x: f64| -> MeosResult<(f64, PhaseEquilibrium)> {
            let t = blend.temperature(pressure, x)? * KELVIN;
            let vle = PhaseEquilibrium::blend(fluid, t, options)?;
            let (y_l, y_v) = (target.of(vle.liquid()), target.of(vle.vapor()));
            Ok((y_l + x * (y_v - y_l) - target.target(), vle))
        };
        let (mut a, mut b) = (0.0, 1.0);
        for _ in 0..MAX_ITER_BISECTION {
            let x = 0.5 * (a + b);
            let (f, vle) = mixture(x)?;
            if b - a < TOL_BISECTION {
                return Self::two_phase(fluid, vle, x);
            }
            if f > 0.0 {
                b = x
            } else {
                a = x
            }
        }
        Err(MeosError::NotConverged("blend quality".into()))
    }

    fn new_t_caloric(
        fluid: &Arc<Fluid>,
        temperature: Temperature,
        target: Caloric,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        fluid.check_temperature(temperature, options)?;
        let t = temperature.kelvin();
        let (rho_min, rho_max) = fluid.density_bounds();
        let value = target.target();

        let state = if temperature < two_phase_limit(fluid) {
            let vle = saturation(fluid, temperature, options)?;
            let (y_l, y_v) = (target.of(vle.liquid()), target.of(vle.vapor()));
            let (rho_l, rho_v) = (vle.liquid().density.mol_m3(), vle.vapor().density.mol_m3());
            if (y_l..=y_v).contains(&value) {
                let x = (value - y_l) / (y_v - y_l);
                Self::two_phase(fluid, vle, x)?
            } else if value > y_v {
                let rho0 = 0.5 * rho_v;
                let state = target.solve_at_temperature(fluid, t, rho0, (rho_min, rho_v), options)?;
                Self::Single(state)
            } else {
                let rho0 = (1.05 * rho_l).min(fluid.equation().rho_max);
                let state = target.solve_at_temperature(fluid, t, rho0, (rho_l, rho_max), options)?;
                Self::Single(state)
            }
        } else {
            let rho0 = fluid.initial_density(t, DensityInitialization::None);
            let state = target.solve_at_temperature(fluid, t, rho0, (rho_min, rho_max), options)?;
            Self::Single(state)
        };
        state.check_pressure(options)
    }

    /// Mixture of the phases in `equilibrium` with vapor fraction `quality`.
    fn two_phase(
        fluid: &Arc<Fluid>,
        equilibrium: PhaseEquilibrium,
        quality: f64,
    ) -> MeosResult<Self> {
        let pressure = match fluid.blend() {
            Some(blend) => blend.pressure(equilibrium.temperature().kelvin(), quality)? * PASCAL,
            None => equilibrium.pressure(),
        };
        Ok(Self::TwoPhase {
            equilibrium,
            quality,
            pressure,
        })
    }

    fn check_temperature(self, options: SolverOptions) -> MeosResult<Self> {
        self.fluid().check_temperature(self.temperature(), options)?;
        Ok(self)
    }

    fn check_pressure(self, options: SolverOptions) -> MeosResult<Self> {
        self.fluid().check_pressure(self.pressure(), options)?;
        Ok(self)
    }

    fn checked(self, options: SolverOptions) -> MeosResult<Self> {
        self.check_temperature(options)?.check_pressure(options)
    }
}

fn check_quality(quality: f64) -> MeosResult<()> {
    if (0.0..=1.0).contains(&quality) {
        Ok(())
    } else {
        Err(MeosError::InvalidState(
            "two-phase state".into(),
            "quality".into(),
            quality,
        ))
    }
}

/// Highest temperature at which a two-phase state can exist.
fn two_phase_limit(fluid: &Fluid) -> Temperature {
    match fluid.blend() {
        Some(blend) => blend.maximum_temperature() * KELVIN,
        None => fluid.critical_temperature(),
    }
}

/// Saturated liquid and vapor at the given temperature.
fn saturation(
    fluid: &Arc<Fluid>,
    temperature: Temperature,
    options: SolverOptions,
) -> MeosResult<PhaseEquilibrium> {
    if fluid.blend().is_some() {
        PhaseEquilibrium::blend(fluid, temperature, options)
    } else {
        PhaseEquilibrium::pure(fluid, temperature, options)
    }
}

/// Vapor fraction of a state with the given density, if it lies
/// between the saturated densities.
fn volume_quality(equilibrium: &PhaseEquilibrium, density: Density) -> Option<f64> {
    let v = 1.0 / density.mol_m3();
    let v_l = 1.0 / equilibrium.liquid().density.mol_m3();
    let v_v = 1.0 / equilibrium.vapor().density.mol_m3();
    (v > v_l && v < v_v).then(|| (v - v_l) / (v_v - v_l))
}

/// # Properties
impl FluidState {
    pub fn fluid(&self) -> &Arc<Fluid> {
        match self {
            Self::Single(state) => &state.fluid,
            Self::TwoPhase { equilibrium, .. } => &equilibrium.vapor().fluid,
        }
    }

    pub fn is_two_phase(&self) -> bool {
        matches!(self, Self::TwoPhase { .. })
    }

    /// The single phase state.
    pub fn state(&self) -> Option<&State> {
        match self {
            Self::Single(state) => Some(state),
            Self::TwoPhase { .. } => None,
        }
    }

    /// The saturated liquid of a mixture.
    pub fn liquid(&self) -> Option<&State> {
        match self {
            Self::Single(_) => None,
            Self::TwoPhase { equilibrium, .. } => Some(equilibrium.liquid()),
        }
    }

    /// The saturated vapor of a mixture.
    pub fn vapor(&self) -> Option<&State> {
        match self {
            Self::Single(_) => None,
            Self::TwoPhase { equilibrium, .. } => Some(equilibrium.vapor()),
        }
    }

    /// Vapor mass fraction of a mixture.
    pub fn quality(&self) -> Option<f64> {
        match self {
            Self::Single(_) => None,
            Self::TwoPhase { quality, .. } => Some(*quality),
        }
    }

    pub fn temperature(&self) -> Temperature {
        match self {
            Self::Single(state) => state.temperature,
            Self::TwoPhase { equilibrium, .. } => equilibrium.temperature(),
        }
    }

    pub fn pressure(&self) -> Pressure {
        match self {
            Self::Single(state) => state.pressure(),
            Self::TwoPhase { pressure, .. } => *pressure,
        }
    }

    /// Molar density, for mixtures from $\frac{1}{\rho}=\frac{x}{\rho_V}+\frac{1-x}{\rho_L}$.
    pub fn density(&self) -> Density {
        match self {
            Self::Single(state) => state.density,
            Self::TwoPhase {
                equilibrium,
                quality,
                ..
            } => {
                let v = quality / equilibrium.vapor().density.mol_m3()
                    + (1.0 - quality) / equilibrium.liquid().density.mol_m3();
                MOL / METER.powi::<P3>() / v
            }
        }
    }

    pub fn mass_density(&self) -> MassDensity {
        self.density() * self.fluid().molar_weight()
    }

    fn lever<U, F: Fn(&State) -> Quantity<f64, U>>(&self, property: F) -> Quantity<f64, U> {
        match self {
            Self::Single(state) => property(state),
            Self::TwoPhase {
                equilibrium,
                quality,
                ..
            } => {
                property(equilibrium.liquid()) * (1.0 - quality)
                    + property(equilibrium.vapor()) * *quality
            }
        }
    }

    pub fn molar_internal_energy(&self) -> MolarEnergy {
        self.lever(State::molar_internal_energy)
    }

    pub fn molar_enthalpy(&self) -> MolarEnergy {
        self.lever(State::molar_enthalpy)
    }

    pub fn molar_entropy(&self) -> MolarEntropy {
        self.lever(State::molar_entropy)
    }

    pub fn molar_gibbs_energy(&self) -> MolarEnergy {
        self.lever(State::molar_gibbs_energy)
    }

    pub fn specific_internal_energy(&self) -> SpecificEnergy {
        self.lever(State::specific_internal_energy)
    }

    pub fn specific_enthalpy(&self) -> SpecificEnergy {
        self.lever(State::specific_enthalpy)
    }

    pub fn specific_entropy(&self) -> SpecificEntropy {
        self.lever(State::specific_entropy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fluids::{air, hydrogen, water};
    use approx::assert_relative_eq;

    fn kg_m3(rho: f64) -> Density {
        rho / 18.015268e-3 * MOL / METER.powi::<P3>()
    }

    #[test]
    fn two_phase_from_temperature_and_density() -> MeosResult<()> {
        let water = water();
        let options = SolverOptions::default();
        let state = FluidState::new_tr(&water, 450.0 * KELVIN, kg_m3(100.0), options)?;
        assert!(state.is_two_phase());
        assert_relative_eq!(state.pressure().mpa(), 0.932203564, max_relative = 1e-8);
        assert_relative_eq!(state.mass_density().kg_m3(), 100.0, max_relative = 1e-10);
        let x = state.quality().unwrap();
        let mixture = FluidState::new_tx(&water, 450.0 * KELVIN, x, options)?;
        assert_relative_eq!(
            mixture.specific_enthalpy(),
            state.specific_enthalpy(),
            max_relative = 1e-10
        );

        let single = FluidState::new_tr(&water, 450.0 * KELVIN, kg_m3(900.0), options)?;
        assert!(!single.is_two_phase());
        Ok(())
    }

    #[test]
    fn lever_rule() -> MeosResult<()> {
        let water = water();
        let options = SolverOptions::default();
        let state = FluidState::new_tx(&water, 500.0 * KELVIN, 0.5, options)?;
        assert_relative_eq!(state.pressure().mpa(), 2.63919587, max_relative = 1e-8);
        assert_relative_eq!(
            state.specific_enthalpy().kj_kg(),
            0.5 * (975.430555 + 2802.47840),
            max_relative = 1e-8
        );
        assert_relative_eq!(
            state.specific_entropy().kj_kgk(),
            0.5 * (2.58104498 + 6.23514067),
            max_relative = 1e-8
        );
        let v = 0.5 / 13.1989065 + 0.5 / 831.313450;
        assert_relative_eq!(state.mass_density().kg_m3(), 1.0 / v, max_relative = 1e-8);

        let from_p = FluidState::new_px(&water, state.pressure(), 0.5, options)?;
        assert_relative_eq!(from_p.temperature().kelvin(), 500.0, max_relative = 1e-9);
        assert!(matches!(
            FluidState::new_tx(&water, 500.0 * KELVIN, 1.5, options),
            Err(MeosError::InvalidState(..))
        ));
        Ok(())
    }

    #[test]
    fn caloric_inputs_at_constant_pressure() -> MeosResult<()> {
        let water = water();
        let options = SolverOptions::default();
        let p = 1e6 * PASCAL;
        for t in [350.0, 600.0] {
            let reference =
                State::new_npt(&water, t * KELVIN, p, DensityInitialization::None, options)?;
            let ph = FluidState::new_ph(&water, p, reference.molar_enthalpy(), None, options)?;
            assert_relative_eq!(ph.temperature().kelvin(), t, max_relative = 1e-8);
            let ps = FluidState::new_ps(&water, p, reference.molar_entropy(), None, options)?;
            assert_relative_eq!(ps.temperature().kelvin(), t, max_relative = 1e-8);
        }
        let mixture = FluidState::new_px(&water, p, 0.3, options)?;
        let ph = FluidState::new_ph(&water, p, mixture.molar_enthalpy(), None, options)?;
        assert_relative_eq!(ph.quality().unwrap(), 0.3, max_relative = 1e-8);
        // supercritical pressure
        let p = 30e6 * PASCAL;
        let reference =
            State::new_npt(&water, 700.0 * KELVIN, p, DensityInitialization::None, options)?;
        let ph = FluidState::new_ph(&water, p, reference.molar_enthalpy(), None, options)?;
        assert_relative_eq!(ph.temperature().kelvin(), 700.0, max_relative = 1e-8);
        Ok(())
    }

    #[test]
    fn caloric_inputs_at_constant_temperature() -> MeosResult<()> {
        let water = water();
        let options = SolverOptions::default();
        let t = 450.0 * KELVIN;
        let vapor = State::new_npt(&water, t, 5e5 * PASCAL, DensityInitialization::Vapor, options)?;
        let th = FluidState::new_th(&water, t, vapor.molar_enthalpy(), options)?;
        assert_relative_eq!(th.density(), vapor.density, max_relative = 1e-8);
        let ts = FluidState::new_ts(&water, t, vapor.molar_entropy(), options)?;
        assert_relative_eq!(ts.density(), vapor.density, max_relative = 1e-8);
        let liquid =
            State::new_npt(&water, t, 5e7 * PASCAL, DensityInitialization::Liquid, options)?;
        let ts = FluidState::new_ts(&water, t, liquid.molar_entropy(), options)?;
        assert_relative_eq!(ts.density(), liquid.density, max_relative = 1e-8);
        let mixture = FluidState::new_tx(&water, t, 0.7, options)?;
        let ts = FluidState::new_ts(&water, t, mixture.molar_entropy(), options)?;
        assert_relative_eq!(ts.quality().unwrap(), 0.7, max_relative = 1e-8);
        Ok(())
    }

    #[test]
    fn density_and_entropy() -> MeosResult<()> {
        let water = water();
        let options = SolverOptions::default();
        let single = State::new_pure(&water, 600.0 * KELVIN, kg_m3(700.0))?;
        let rs = FluidState::new_rs(&water, single.density, single.molar_entropy(), None, options)?;
        assert_relative_eq!(rs.temperature().kelvin(), 600.0, max_relative = 1e-8);

        let mixture = FluidState::new_tx(&water, 450.0 * KELVIN, 0.1, options)?;
        let rs = FluidState::new_rs(
            &water,
            mixture.density(),
            mixture.molar_entropy(),
            None,
            options,
        )?;
        assert!(rs.is_two_phase());
        assert_relative_eq!(rs.temperature().kelvin(), 450.0, max_relative = 1e-8);
        assert_relative_eq!(rs.quality().unwrap(), 0.1, max_relative = 1e-6);
        Ok(())
    }

    #[test]
    fn boundaries() {
        let water = water();
        let options = SolverOptions::default();
        assert!(matches!(
            FluidState::new_tx(&water, 700.0 * KELVIN, 0.5, options),
            Err(MeosError::SuperCritical)
        ));
        assert!(matches!(
            FluidState::new_px(&water, 30e6 * PASCAL, 0.5, options),
            Err(MeosError::SuperCritical)
        ));
        assert!(matches!(
            FluidState::new_tp(
                &water,
                250.0 * KELVIN,
                1e5 * PASCAL,
                DensityInitialization::None,
                options
            ),
            Err(MeosError::OutOfRange(..))
        ));
        assert!(FluidState::new_tp(
            &water,
            1300.0 * KELVIN,
            1e5 * PASCAL,
            DensityInitialization::None,
            options.extrapolate(true)
        )
        .is_ok());
    }

    #[test]
    fn hydrogen_saturation() -> MeosResult<()> {
        let hydrogen = hydrogen();
        let state = FluidState::new_tx(&hydrogen, 20.0 * KELVIN, 0.5, SolverOptions::default())?;
        assert_relative_eq!(state.pressure().pa(), 90717.32, max_relative = 1e-6);
        let liquid = state.liquid().unwrap();
        assert_relative_eq!(liquid.speed_of_sound()?.m_s(), 1129.13, max_relative = 1e-5);
        assert_relative_eq!(
            liquid.specific_isobaric_heat_capacity()?.j_kgk(),
            9569.68,
            max_relative = 1e-5
        );
        assert_relative_eq!(
            state.vapor().unwrap().speed_of_sound()?.m_s(),
            354.306,
            max_relative = 1e-5
        );
        Ok(())
    }

    #[test]
    fn blend_between_dew_and_bubble_line() -> MeosResult<()> {
        let air = air();
        let options = SolverOptions::default();
        let blend = air.blend().unwrap();
        let (pb, pd) = (blend.bubble_pressure(80.0)?, blend.dew_pressure(80.0)?);
        let p = 0.5 * (pb + pd);
        let init = DensityInitialization::None;
        let state = FluidState::new_tp(&air, 80.0 * KELVIN, p * PASCAL, init, options)?;
        assert_relative_eq!(state.quality().unwrap(), 0.5, max_relative = 1e-12);
        assert_relative_eq!(state.pressure().pa(), p, max_relative = 1e-12);

        let mixture = FluidState::new_tx(&air, 80.0 * KELVIN, 0.25, options)?;
        assert_relative_eq!(mixture.pressure().pa(), 0.75 * pb + 0.25 * pd, max_relative = 1e-12);
        let from_p = FluidState::new_px(&air, mixture.pressure(), 0.25, options)?;
        assert_relative_eq!(from_p.temperature().kelvin(), 80.0, max_relative = 1e-9);

        let gas = FluidState::new_tp(&air, 300.0 * KELVIN, 1e6 * PASCAL, init, options)?;
        assert_relative_eq!(gas.mass_density().kg_m3(), 11.6427, max_relative = 1e-5);
        Ok(())
    }
}
