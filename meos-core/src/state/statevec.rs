use super::{FluidState, StateBuilder};
use crate::errors::MeosResult;
use crate::fluid::Fluid;
use crate::phase_equilibria::SolverOptions;
use crate::si::*;
use std::iter::FromIterator;
use std::ops::Deref;
use std::sync::Arc;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// A single input variable of a state calculation.
#[derive(Clone, Copy, Debug)]
pub enum StateSpec {
    Temperature(Temperature),
    Pressure(Pressure),
    Density(Density),
    MassDensity(MassDensity),
    Quality(f64),
    MolarEnthalpy(MolarEnergy),
    SpecificEnthalpy(SpecificEnergy),
    MolarEntropy(MolarEntropy),
    SpecificEntropy(SpecificEntropy),
}

/// States along a line in which one input variable is fixed and the
/// other one is swept.
///
/// Every point is solved independently when it is requested, so the
/// sweep can be iterated any number of times.
#[derive(Clone)]
pub struct StateSweep {
    fluid: Arc<Fluid>,
    fixed: StateSpec,
    sweep: Vec<StateSpec>,
    options: SolverOptions,
}

impl StateSweep {
    pub fn new(
        fluid: &Arc<Fluid>,
        fixed: StateSpec,
        sweep: Vec<StateSpec>,
        options: SolverOptions,
    ) -> Self {
        Self {
            fluid: fluid.clone(),
            fixed,
            sweep,
            options,
        }
    }

    pub fn len(&self) -> usize {
        self.sweep.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sweep.is_empty()
    }

    fn solve(&self, spec: StateSpec) -> MeosResult<FluidState> {
        StateBuilder::new(&self.fluid)
            .options(self.options)
            .spec(self.fixed)
            .spec(spec)
            .build()
    }

    /// Lazily solve the states of the sweep.
    pub fn iter(&self) -> impl Iterator<Item = MeosResult<FluidState>> + '_ {
        self.sweep.iter().map(|&spec| self.solve(spec))
    }

    /// Solve the states of the sweep in parallel.
    #[cfg(feature = "rayon")]
    pub fn par_iter(&self) -> impl IndexedParallelIterator<Item = MeosResult<FluidState>> + '_ {
        self.sweep.par_iter().map(|&spec| self.solve(spec))
    }

    /// Solve all states. Fails at the first point that can not be solved.
    pub fn collect(&self) -> MeosResult<StateVec> {
        self.iter().collect()
    }
}

/// A list of states for a simple access to properties
/// of multiple states.
#[derive(Clone, Debug)]
pub struct StateVec(pub Vec<FluidState>);

impl FromIterator<FluidState> for StateVec {
    fn from_iter<I: IntoIterator<Item = FluidState>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for StateVec {
    type Item = FluidState;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Deref for StateVec {
    type Target = Vec<FluidState>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl StateVec {
    fn map<T, F: Fn(&FluidState) -> T>(&self, f: F) -> Vec<T> {
        self.0.iter().map(f).collect()
    }

    pub fn temperature(&self) -> Vec<Temperature> {
        self.map(FluidState::temperature)
    }

    pub fn pressure(&self) -> Vec<Pressure> {
        self.map(FluidState::pressure)
    }

    pub fn density(&self) -> Vec<Density> {
        self.map(FluidState::density)
    }

    pub fn quality(&self) -> Vec<Option<f64>> {
        self.map(FluidState::quality)
    }

    pub fn molar_enthalpy(&self) -> Vec<MolarEnergy> {
        self.map(FluidState::molar_enthalpy)
    }

    pub fn molar_entropy(&self) -> Vec<MolarEntropy> {
        self.map(FluidState::molar_entropy)
    }

    pub fn mass_density(&self) -> Vec<MassDensity> {
        self.map(FluidState::mass_density)
    }

    pub fn specific_enthalpy(&self) -> Vec<SpecificEnergy> {
        self.map(FluidState::specific_enthalpy)
    }

    pub fn specific_entropy(&self) -> Vec<SpecificEntropy> {
        self.map(FluidState::specific_entropy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MeosError;
    use crate::test_fluids::water;
    use approx::assert_relative_eq;

    #[test]
    fn isobar() -> MeosResult<()> {
        let water = water();
        let temperatures = [300.0, 350.0, 400.0, 450.0, 500.0];
        let sweep = water.from_list(
            StateSpec::Pressure(101325.0 * PASCAL),
            temperatures.iter().map(|&t| StateSpec::Temperature(t * KELVIN)).collect(),
            SolverOptions::default(),
        );
        assert_eq!(sweep.len(), 5);
        let states = sweep.collect()?;
        for (t, state) in temperatures.iter().zip(states.temperature()) {
            assert_relative_eq!(state.kelvin(), *t);
        }
        // liquid below, vapor above the normal boiling point
        let rho = states.mass_density();
        assert!(rho[1].kg_m3() > 900.0);
        assert!(rho[2].kg_m3() < 1.0);
        // restartable
        assert_eq!(sweep.iter().count(), 5);
        Ok(())
    }

    #[test]
    fn quality_sweep_reports_failures() -> MeosResult<()> {
        let water = water();
        let sweep = water.from_list(
            StateSpec::Temperature(400.0 * KELVIN),
            vec![StateSpec::Quality(0.0), StateSpec::Quality(0.5), StateSpec::Quality(2.0)],
            SolverOptions::default(),
        );
        let results: Vec<_> = sweep.iter().collect();
        assert!(results[0].is_ok() && results[1].is_ok());
        assert!(matches!(results[2], Err(MeosError::InvalidState(..))));
        if let Ok(saturated) = &results[0] {
            assert_relative_eq!(saturated.pressure().mpa(), 0.24576934556, max_relative = 1e-8);
        }
        assert!(sweep.collect().is_err());
        Ok(())
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel_sweep() -> MeosResult<()> {
        let water = water();
        let sweep = water.from_list(
            StateSpec::Temperature(450.0 * KELVIN),
            (1..10).map(|i| StateSpec::Pressure(i as f64 * 1e5 * PASCAL)).collect(),
            SolverOptions::default(),
        );
        let serial: Vec<_> = sweep.iter().collect::<MeosResult<_>>()?;
        let parallel: Vec<_> = sweep.par_iter().collect::<MeosResult<_>>()?;
        for (a, b) in serial.iter().zip(&parallel) {
            assert_relative_eq!(a.density(), b.density());
        }
        Ok(())
    }
}
