use super::{PhaseEquilibrium, SolverOptions, Verbosity};
use crate::ancillary::corresponding_states;
use crate::errors::{MeosError, MeosResult};
use crate::fluid::Fluid;
use crate::si::*;
use crate::state::{DensityInitialization, State, TPSpec};
use crate::{log_iter, log_result};
use std::sync::Arc;
use typenum::P3;

const MAX_ITER_PURE: usize = 100;
const TOL_PURE: f64 = 1e-12;

fn density(rho: f64) -> Density {
    rho * MOL / METER.powi::<P3>()
}

/// # Pure fluid phase equilibria
impl PhaseEquilibrium {
    /// Saturated vapor and liquid of a pure fluid at given temperature
    /// or pressure.
    pub fn pure<TP: Into<TPSpec>>(
        fluid: &Arc<Fluid>,
        temperature_or_pressure: TP,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        match temperature_or_pressure.into() {
            TPSpec::Temperature(t) => Self::pure_t(fluid, t, options),
            TPSpec::Pressure(p) => Self::pure_p(fluid, p, options),
        }
    }

    /// Vapor pressure of a pure fluid.
    pub fn vapor_pressure(fluid: &Arc<Fluid>, temperature: Temperature) -> MeosResult<Pressure> {
        Ok(Self::pure_t(fluid, temperature, SolverOptions::default())?.pressure())
    }

    /// Boiling temperature of a pure fluid.
    pub fn boiling_temperature(fluid: &Arc<Fluid>, pressure: Pressure) -> MeosResult<Temperature> {
        Ok(Self::pure_p(fluid, pressure, SolverOptions::default())?.temperature())
    }

    fn pure_t(
        fluid: &Arc<Fluid>,
        temperature: Temperature,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let t = temperature.kelvin();
        if temperature >= fluid.critical_temperature() {
            return Err(MeosError::SuperCritical);
        }
        let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_PURE, TOL_PURE);

        // First use the saturated density ancillaries
        let mut vle = Self::init_density_ancillaries(fluid, temperature)
            .and_then(|vle| vle.iterate_pure_t(max_iter, tol, verbosity))
            .ok();

        // Next use the vapor pressure ancillary
        vle = vle.or_else(|| {
            let p = fluid.vapor_pressure(temperature).ok()?;
            Self::new_npt(fluid, temperature, p)
                .and_then(|vle| vle.check_trivial_solution())
                .and_then(|vle| vle.iterate_pure_t(max_iter, tol, verbosity))
                .ok()
        });

        // Finally estimate the vapor pressure from corresponding states
        vle.map_or_else(
            || {
                let p = corresponding_states::vapor_pressure(
                    t,
                    fluid.critical_temperature().kelvin(),
                    fluid.critical_pressure().pa(),
                    fluid.triple_point_temperature().kelvin(),
                    fluid.triple_point_pressure().pa(),
                );
                Self::new_npt(fluid, temperature, p * PASCAL)?
                    .check_trivial_solution()?
                    .iterate_pure_t(max_iter, tol, verbosity)
            },
            Ok,
        )
    }

    fn init_density_ancillaries(fluid: &Arc<Fluid>, temperature: Temperature) -> MeosResult<Self> {
        let rho_l = fluid.saturated_liquid_density(temperature)?;
        let rho_v = fluid.saturated_vapor_density(temperature)?;
        let liquid = State::new_pure(fluid, temperature, rho_l)?;
        let vapor = State::new_pure(fluid, temperature, rho_v)?;
        Ok(Self([vapor, liquid]))
    }

    /// Successive substitution of the pressure with Newton steps for both
    /// densities.
    fn iterate_pure_t(self, max_iter: usize, tol: f64, verbosity: Verbosity) -> MeosResult<Self> {
        let [mut vapor, mut liquid] = self.0;
        let mut p_old = vapor.pressure().pa();
        if !(p_old > 0.0) {
            // vapor densities from ancillaries can be slightly unstable
            p_old = liquid.pressure().pa().max(f64::EPSILON);
        }
        let rt = vapor.fluid.equation().r * vapor.temperature.kelvin();

        log_iter!(
            verbosity,
            " iter |    residual    |     pressure     |  liquid density  |  vapor density   |{}",
            " Newton steps"
        );
        log_iter!(verbosity, "{:-<96}", "");
        log_iter!(
            verbosity,
            " {:4} |                | {:16.8e} | {:16.8e} | {:16.8e} |",
            0,
            p_old,
            liquid.density.mol_m3(),
            vapor.density.mol_m3()
        );

        for i in 1..=max_iter {
            // calculate the pressures and derivatives
            let (p_l, p_rho_l) = liquid.p_dpdrho();
            let (p_v, p_rho_v) = vapor.p_dpdrho();
            let a_l_res = liquid.residual_molar_helmholtz_energy();
            let a_v_res = vapor.residual_molar_helmholtz_energy();
            let (rho_l, rho_v) = (liquid.density.mol_m3(), vapor.density.mol_m3());

            // Estimate the new pressure
            let delta_v = 1.0 / rho_v - 1.0 / rho_l;
            let delta_a = a_v_res - a_l_res + rt * (rho_v / rho_l).ln();
            let mut p_new = -delta_a / delta_v;

            // If the pressure becomes negative, assume the gas phase is ideal. The
            // resulting pressure is always positive.
            if p_new.is_sign_negative() {
                p_new = p_v * ((-delta_a - p_v / rho_v) / rt).exp();
            }

            // Improve the estimate by exploiting the almost ideal behavior of the gas phase
            let mut newton_iter = 0;
            let newton_tol = p_old * delta_v * tol;
            for _ in 0..20 {
                let p_frac = p_new / p_old;
                let f = p_new * delta_v + delta_a + (p_frac.ln() + 1.0 - p_frac) * rt;
                let df_dp = delta_v + (1.0 / p_new - 1.0 / p_old) * rt;
                p_new -= f / df_dp;
                newton_iter += 1;
                if f.abs() < newton_tol {
                    break;
                }
            }

            if !p_new.is_finite() || p_new <= 0.0 {
                return Err(MeosError::IterationFailed("pure_t".to_owned()));
            }

            // Calculate Newton steps for the densities and update state.
            let rho_l = rho_l + (p_new - p_l) / p_rho_l;
            let rho_v = rho_v + (p_new - p_v) / p_rho_v;
            if !(rho_l > 0.0 && rho_v > 0.0) {
                return Err(MeosError::IterationFailed("pure_t".to_owned()));
            }
            liquid = State::new_pure(&liquid.fluid, liquid.temperature, density(rho_l))?;
            vapor = State::new_pure(&vapor.fluid, vapor.temperature, density(rho_v))?;
            if Self::is_trivial_solution(&vapor, &liquid) {
                return Err(MeosError::TrivialSolution);
            }

            // Check for convergence
            let res = (p_new - p_old).abs();
            log_iter!(
                verbosity,
                " {:4} | {:14.8e} | {:16.8e} | {:16.8e} | {:16.8e} | {}",
                i,
                res,
                p_new,
                rho_l,
                rho_v,
                newton_iter
            );
            if res < p_old * tol {
                log_result!(
                    verbosity,
                    "PhaseEquilibrium::pure_t: calculation converged in {} step(s)\n",
                    i
                );
                return Ok(Self([vapor, liquid]));
            }
            p_old = p_new;
        }
        Err(MeosError::NotConverged("pure_t".to_owned()))
    }

    fn pure_p(fluid: &Arc<Fluid>, pressure: Pressure, options: SolverOptions) -> MeosResult<Self> {
        if pressure >= fluid.critical_pressure() {
            return Err(MeosError::SuperCritical);
        }
        let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_PURE, TOL_PURE);
        let p = pressure.pa();

        // Initialize from the inverted vapor pressure correlation
        let t0 = fluid
            .saturation_temperature_guess(p)
            .min(0.999 * fluid.critical_temperature().kelvin())
            * KELVIN;
        let mut vle = match Self::pure_t(fluid, t0, SolverOptions::default()) {
            Ok(vle) => vle,
            Err(_) => Self::new_npt(fluid, t0, pressure)?.check_trivial_solution()?,
        };

        log_iter!(
            verbosity,
            " iter |    residual    |   temperature   |  liquid density  |  vapor density   "
        );
        log_iter!(verbosity, "{:-<82}", "");
        log_iter!(
            verbosity,
            " {:4} |                | {:15.8} | {:16.8e} | {:16.8e}",
            0,
            vle.temperature().kelvin(),
            vle.liquid().density.mol_m3(),
            vle.vapor().density.mol_m3()
        );
        let r = fluid.equation().r;
        for i in 1..=max_iter {
            let t = vle.temperature().kelvin();
            // calculate the pressures and derivatives
            let (p_l, p_rho_l) = vle.liquid().p_dpdrho();
            let (p_v, p_rho_v) = vle.vapor().p_dpdrho();
            let p_t_l = vle.liquid().dp_dt().pa_k();
            let p_t_v = vle.vapor().dp_dt().pa_k();

            let s_l_res = vle.liquid().residual_molar_entropy();
            let s_v_res = vle.vapor().residual_molar_entropy();
            let a_l_res = vle.liquid().residual_molar_helmholtz_energy();
            let a_v_res = vle.vapor().residual_molar_helmholtz_energy();

            let rho_l = vle.liquid().density.mol_m3();
            let rho_v = vle.vapor().density.mol_m3();
            let (v_l, v_v) = (1.0 / rho_l, 1.0 / rho_v);

            // estimate the temperature steps
            let ln_rho = (v_l / v_v).ln();
            let delta_t = (p * (v_v - v_l) + (a_v_res - a_l_res + r * t * ln_rho))
                / (s_v_res - s_l_res - r * ln_rho);
            let t_new = t + delta_t;
            if !t_new.is_finite() || t_new <= 0.0 {
                return Err(MeosError::IterationFailed("pure_p".to_owned()));
            }

            // calculate Newton steps for the densities and update state.
            let rho_l = rho_l + (p - p_l - p_t_l * delta_t) / p_rho_l;
            let rho_v = rho_v + (p - p_v - p_t_v * delta_t) / p_rho_v;

            if rho_l.is_sign_negative() || rho_v.is_sign_negative() || delta_t.abs() > 1.0 {
                // negative densities or a large temperature step: use density iteration
                vle = vle
                    .update_pressure(t_new * KELVIN, pressure)?
                    .check_trivial_solution()?;
            } else {
                vle = Self([
                    State::new_pure(fluid, t_new * KELVIN, density(rho_v))?,
                    State::new_pure(fluid, t_new * KELVIN, density(rho_l))?,
                ]);
            }

            // check for convergence
            let res = delta_t.abs();
            log_iter!(
                verbosity,
                " {:4} | {:14.8e} | {:15.8} | {:16.8e} | {:16.8e}",
                i,
                res,
                t_new,
                rho_l,
                rho_v
            );
            if res < t_new * tol {
                log_result!(
                    verbosity,
                    "PhaseEquilibrium::pure_p: calculation converged in {} step(s)\n",
                    i
                );
                return Ok(vle);
            }
        }
        Err(MeosError::NotConverged("pure_p".to_owned()))
    }
}

/// # Pseudo-pure phase equilibria
impl PhaseEquilibrium {
    /// Bubble point liquid and dew point vapor of a pseudo-pure fluid at
    /// the same temperature.
    ///
    /// Both states are in general at different pressures.
    pub fn blend(
        fluid: &Arc<Fluid>,
        temperature: Temperature,
        options: SolverOptions,
    ) -> MeosResult<Self> {
        let blend = fluid.blend().ok_or_else(|| {
            MeosError::Configuration(format!("{} is not a pseudo-pure fluid", fluid.name()))
        })?;
        let t = temperature.kelvin();
        if t >= blend.maximum_temperature() {
            return Err(MeosError::SuperCritical);
        }
        let liquid = State::new_npt(
            fluid,
            temperature,
            blend.bubble_pressure(t)? * PASCAL,
            DensityInitialization::Liquid,
            options,
        )?;
        let vapor = State::new_npt(
            fluid,
            temperature,
            blend.dew_pressure(t)? * PASCAL,
            DensityInitialization::Vapor,
            options,
        )?;
        Self([vapor, liquid]).check_trivial_solution()
    }
}
