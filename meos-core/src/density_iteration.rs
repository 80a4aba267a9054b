use crate::errors::{MeosError, MeosResult};
use crate::fluid::Fluid;
use crate::phase_equilibria::SolverOptions;
use crate::si::*;
use crate::state::State;
use crate::{log_iter, log_result};
use std::sync::Arc;
use typenum::P3;

const MAX_ITER_DENSITY: usize = 100;
const TOL_DENSITY: f64 = 1e-8;

fn state(fluid: &Arc<Fluid>, temperature: f64, density: f64) -> MeosResult<State> {
    State::new_pure(fluid, temperature * KELVIN, density * MOL / METER.powi::<P3>())
}

/// Density at given temperature (K) and pressure (Pa) by a Newton
/// iteration starting from `initial_density` (mol/m³).
///
/// Steps are limited to a fraction of the maximum density of the
/// equation. Iterates that enter the mechanically unstable region are
/// moved out of it with the help of the spinodal on the side of the
/// initial density.
pub(crate) fn density_iteration(
    fluid: &Arc<Fluid>,
    temperature: f64,
    pressure: f64,
    initial_density: f64,
    options: SolverOptions,
) -> MeosResult<State> {
    let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_DENSITY, TOL_DENSITY);
    let maxdensity = fluid.equation().rho_max;
    if !(initial_density > 0.0) || !initial_density.is_finite() {
        return Err(MeosError::InvalidState(
            String::from("density iteration"),
            String::from("density"),
            initial_density,
        ));
    }
    if !(pressure > 0.0) || !pressure.is_finite() {
        return Err(MeosError::InvalidState(
            String::from("density iteration"),
            String::from("pressure"),
            pressure,
        ));
    }

    log_iter!(
        verbosity,
        " iter |    residual    |     density     "
    );
    log_iter!(verbosity, "{:-<42}", "");

    let mut rho = initial_density.min(maxdensity);
    for k in 0..max_iter {
        let (mut p, mut dp_drho) = state(fluid, temperature, rho)?.p_dpdrho();

        // attempt to correct for poor initial density
        if dp_drho.is_sign_negative() && k == 0 {
            rho = if initial_density <= 0.15 * maxdensity {
                0.05 * initial_density
            } else {
                (1.1 * initial_density).min(maxdensity)
            };
            (p, dp_drho) = state(fluid, temperature, rho)?.p_dpdrho();
        }

        let error = p - pressure;
        log_iter!(verbosity, " {:4} | {:14.8e} | {:15.8e}", k, error / pressure, rho);
        if error.abs() < tol * pressure {
            log_result!(
                verbosity,
                "Density iteration: calculation converged in {} step(s)\n",
                k
            );
            return state(fluid, temperature, rho);
        }

        if dp_drho.is_sign_negative() {
            rho = unstable_correction(fluid, temperature, pressure, rho, initial_density, error)?;
            continue;
        }

        // Newton step
        let mut delta_rho = -error / dp_drho;
        if delta_rho.abs() > 0.075 * maxdensity {
            delta_rho = 0.075 * maxdensity * delta_rho.signum();
        }
        // prevent stepping to rho < 0.0
        delta_rho = delta_rho.max(-0.95 * rho);
        rho += delta_rho;
    }
    Err(MeosError::NotConverged("density_iteration".to_owned()))
}

/// New iterate for a density with $\left(\frac{\partial p}{\partial\rho}\right)_T<0$.
fn unstable_correction(
    fluid: &Arc<Fluid>,
    temperature: f64,
    pressure: f64,
    rho: f64,
    initial_density: f64,
    error: f64,
) -> MeosResult<f64> {
    let maxdensity = fluid.equation().rho_max;
    let (_, _, d2p_drho2) = state(fluid, temperature, rho)?.p_dpdrho_d2pdrho2();
    let rho = if rho > 0.85 * maxdensity {
        let (sp_p, sp_rho) = pressure_spinodal(fluid, temperature, initial_density)?;
        let error = sp_p - pressure;
        if sp_rho > 0.85 * maxdensity {
            if error.is_sign_negative() {
                return Err(MeosError::IterationFailed(String::from(
                    "density_iteration",
                )));
            }
            0.98 * sp_rho
        } else if error.is_sign_positive() {
            0.001 * maxdensity
        } else {
            (1.1 * sp_rho).min(maxdensity)
        }
    } else if error.is_sign_positive() && d2p_drho2.is_sign_positive() {
        let (sp_p, sp_rho) = pressure_spinodal(fluid, temperature, initial_density)?;
        if sp_p > pressure {
            0.001 * maxdensity
        } else {
            (1.1 * sp_rho).min(maxdensity)
        }
    } else if error.is_sign_negative() && d2p_drho2.is_sign_negative() {
        let (sp_p, sp_rho) = pressure_spinodal(fluid, temperature, initial_density)?;
        if sp_p < pressure {
            0.8 * maxdensity
        } else {
            0.8 * sp_rho
        }
    } else {
        // between the spinodals: decide for the branch that is closer to
        // the initial density
        let (_, rho_l) = pressure_spinodal(fluid, temperature, 0.8 * maxdensity)?;
        let (sp_v_p, rho_v) = pressure_spinodal(fluid, temperature, 0.001 * maxdensity)?;
        let closer_to_vapor = (initial_density - rho_v).abs() < (initial_density - rho_l).abs();
        if sp_v_p > pressure && closer_to_vapor {
            0.8 * rho_v
        } else {
            (1.1 * rho_l).min(maxdensity)
        }
    };
    Ok(rho)
}

/// Pressure and density (SI) of the spinodal closest to `rho_init`.
fn pressure_spinodal(
    fluid: &Arc<Fluid>,
    temperature: f64,
    rho_init: f64,
) -> MeosResult<(f64, f64)> {
    let maxiter = 30;
    let abstol = 1e-8;
    let maxdensity = fluid.equation().rho_max;
    let rt = fluid.equation().r * temperature;

    let mut rho = rho_init;
    for _ in 0..maxiter {
        let (p, dp_drho, d2p_drho2) = state(fluid, temperature, rho)?.p_dpdrho_d2pdrho2();

        let mut delta_rho = -dp_drho / d2p_drho2;
        if delta_rho.abs() > 0.05 * maxdensity {
            delta_rho = 0.05 * maxdensity * delta_rho.signum()
        }
        // stay within (0, maxdensity]
        delta_rho = delta_rho.max(-rho * 0.95);
        delta_rho = delta_rho.min(maxdensity - rho);
        rho += delta_rho;

        if (dp_drho / rt).abs() < abstol {
            return Ok((p, rho));
        }
    }
    Err(MeosError::NotConverged("pressure_spinodal".to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fluids::{hydrogen, water};
    use approx::assert_relative_eq;

    #[test]
    fn liquid_and_vapor_roots() -> MeosResult<()> {
        let water = water();
        let options = SolverOptions::default();
        // 450 K, 1 MPa: compressed liquid
        let liquid = density_iteration(&water, 450.0, 1e6, 50000.0, options)?;
        assert_relative_eq!(liquid.pressure().pa(), 1e6, max_relative = 1e-8);
        // 450 K, 0.5 MPa: superheated vapor
        let vapor = density_iteration(&water, 450.0, 5e5, 100.0, options)?;
        assert_relative_eq!(vapor.pressure().pa(), 5e5, max_relative = 1e-8);
        assert!(vapor.density < liquid.density);
        Ok(())
    }

    #[test]
    fn start_inside_the_unstable_region() -> MeosResult<()> {
        let hydrogen = hydrogen();
        let options = SolverOptions::default();
        // metastable and unstable initial values converge to a stable root
        let state = density_iteration(&hydrogen, 25.0, 2e5, 8000.0, options)?;
        assert_relative_eq!(state.pressure().pa(), 2e5, max_relative = 1e-8);
        assert!(state.dp_drho().j_mol() > 0.0);
        Ok(())
    }

    #[test]
    fn iteration_limit() {
        let water = water();
        let options = SolverOptions::default().max_iter(1);
        assert!(matches!(
            density_iteration(&water, 450.0, 1e6, 100.0, options),
            Err(MeosError::NotConverged(_))
        ));
        assert!(matches!(
            density_iteration(&water, 450.0, 1e6, -1.0, SolverOptions::default()),
            Err(MeosError::InvalidState(..))
        ));
    }

    #[test]
    fn spinodal_has_zero_slope() -> MeosResult<()> {
        let water = water();
        let (_, rho) = pressure_spinodal(&water, 500.0, 0.8 * water.equation().rho_max)?;
        let (_, dp_drho) = state(&water, 500.0, rho)?.p_dpdrho();
        assert!((dp_drho / (water.equation().r * 500.0)).abs() < 1e-6);
        Ok(())
    }
}
