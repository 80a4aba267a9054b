//! Viscosity and thermal conductivity.
//!
//! A fluid carries a list of transport models per property. Each model is
//! either a declarative correlation (dilute gas + residual + optional
//! critical enhancement) or a custom method registered under a name in a
//! [TransportRegistry] and resolved when the fluid is built.
use crate::errors::{MeosError, MeosResult};
use crate::si::{KELVIN, MICRO, MILLI};
use crate::state::State;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

mod critical;
mod dilute;
pub use critical::{CriticalInput, OlchowySengers};
pub use dilute::{
    ChapmanEnskog, DiluteConductivity, ResidualMbwr, ResidualPolynomial, ResidualTransport,
};

/// Signature of custom transport methods. The result is in SI units.
pub type CustomMethod = fn(&State) -> MeosResult<f64>;

/// The transport property a model describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransportProperty {
    Viscosity,
    ThermalConductivity,
}

impl fmt::Display for TransportProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Viscosity => write!(f, "viscosity"),
            Self::ThermalConductivity => write!(f, "thermal conductivity"),
        }
    }
}

/// Transport model as stored in json files.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum TransportRecord<C> {
    Correlation(C),
    Custom {
        method: String,
        #[serde(default)]
        #[serde(skip_serializing_if = "Option::is_none")]
        reference: Option<String>,
    },
}

/// Custom transport methods by substance, property and method name.
#[derive(Clone, Default)]
pub struct TransportRegistry {
    methods: IndexMap<(String, TransportProperty, String), CustomMethod>,
}

impl TransportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        substance: &str,
        property: TransportProperty,
        id: &str,
        method: CustomMethod,
    ) {
        self.methods.insert(
            (substance.to_lowercase(), property, id.to_lowercase()),
            method,
        );
    }

    pub fn get(
        &self,
        substance: &str,
        property: TransportProperty,
        id: &str,
    ) -> Option<CustomMethod> {
        self.methods
            .get(&(substance.to_lowercase(), property, id.to_lowercase()))
            .copied()
    }

    /// Registered (substance, property, method) triples in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = (&str, TransportProperty, &str)> {
        self.methods
            .keys()
            .map(|(s, p, id)| (s.as_str(), *p, id.as_str()))
    }
}

impl fmt::Debug for TransportRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

/// Correlation parameters that can be checked when a fluid is built.
pub trait Correlation {
    fn validate(&self) -> MeosResult<()>;
}

/// A resolved transport model.
#[derive(Clone)]
pub enum TransportModel<C> {
    Correlation(C),
    Custom { id: String, method: CustomMethod },
}

impl<C: fmt::Debug> fmt::Debug for TransportModel<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Correlation(c) => f.debug_tuple("Correlation").field(c).finish(),
            Self::Custom { id, .. } => f.debug_struct("Custom").field("id", id).finish(),
        }
    }
}

impl<C: Correlation + Clone> TransportModel<C> {
    pub fn new(
        record: &TransportRecord<C>,
        substance: &str,
        property: TransportProperty,
        registry: &TransportRegistry,
    ) -> MeosResult<Self> {
        match record {
            TransportRecord::Correlation(c) => {
                c.validate()?;
                Ok(Self::Correlation(c.clone()))
            }
            TransportRecord::Custom { method, .. } => registry
                .get(substance, property, method)
                .map(|m| Self::Custom {
                    id: method.clone(),
                    method: m,
                })
                .ok_or_else(|| {
                    MeosError::Configuration(format!(
                        "no {property} method `{method}` registered for {substance}"
                    ))
                }),
        }
    }
}

fn micro() -> f64 {
    MICRO
}

fn milli() -> f64 {
    MILLI
}

fn check_validity(property: &str, state: &State, t_min: f64, t_max: f64, rho_max: f64) {
    let t = state.temperature.kelvin();
    let rho = state.density.mol_m3();
    if t < t_min || t > t_max || rho > rho_max {
        log::warn!("{property} correlation outside of its range at T = {t} K, rho = {rho} mol/m³");
    }
}

/// Viscosity correlation: Chapman-Enskog dilute gas plus a residual
/// polynomial or MBWR-type term.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ViscosityRecord {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Factor converting the correlation into Pa s. The Chapman-Enskog
    /// term is in µPa s, so this is usually 1e-6.
    #[serde(default = "micro")]
    pub unit: f64,
    pub dilute: ChapmanEnskog,
    /// Reducing temperature of the residual part in K
    pub tref: f64,
    /// Reducing density of the residual part in mol/m³
    pub rhoref: f64,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residual: Option<ResidualTransport>,
    pub t_min: f64,
    pub t_max: f64,
    pub rho_max: f64,
}

impl Correlation for ViscosityRecord {
    fn validate(&self) -> MeosResult<()> {
        self.dilute.validate()?;
        if let Some(r) = &self.residual {
            r.validate()?;
        }
        if self.tref <= 0.0 || self.rhoref <= 0.0 {
            return Err(MeosError::Configuration(
                "viscosity correlation with non-positive reducing values".into(),
            ));
        }
        Ok(())
    }
}

impl ViscosityRecord {
    /// Dilute gas viscosity in Pa s.
    pub fn dilute_gas(&self, temperature: f64, molar_weight: f64) -> f64 {
        self.dilute.viscosity(temperature, molar_weight) * self.unit
    }

    /// Viscosity in Pa s.
    pub fn evaluate(&self, state: &State) -> f64 {
        check_validity("viscosity", state, self.t_min, self.t_max, self.rho_max);
        let t = state.temperature.kelvin();
        let eta0 = self.dilute.viscosity(t, state.fluid.molar_weight().g_mol());
        let rho = state.density.mol_m3();
        let eta_r = self
            .residual
            .as_ref()
            .map_or(0.0, |r| r.evaluate(t, rho, self.tref, self.rhoref));
        (eta0 + eta_r) * self.unit
    }
}

/// Thermal conductivity correlation: dilute gas, residual polynomial and an
/// optional Olchowy-Sengers critical enhancement.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ThermalConductivityRecord {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Factor converting the background terms into W/(m K)
    #[serde(default = "milli")]
    pub unit: f64,
    pub dilute: DiluteConductivity,
    pub tref: f64,
    pub rhoref: f64,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residual: Option<ResidualTransport>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical: Option<OlchowySengers>,
    pub t_min: f64,
    pub t_max: f64,
    pub rho_max: f64,
}

impl Correlation for ThermalConductivityRecord {
    fn validate(&self) -> MeosResult<()> {
        self.dilute.validate()?;
        if let Some(r) = &self.residual {
            r.validate()?;
        }
        if let Some(c) = &self.critical {
            c.validate()?;
        }
        if self.tref <= 0.0 || self.rhoref <= 0.0 {
            return Err(MeosError::Configuration(
                "thermal conductivity correlation with non-positive reducing values".into(),
            ));
        }
        Ok(())
    }
}

impl ThermalConductivityRecord {
    /// Thermal conductivity in W/(m K).
    pub fn evaluate(&self, state: &State) -> MeosResult<f64> {
        check_validity(
            "thermal conductivity",
            state,
            self.t_min,
            self.t_max,
            self.rho_max,
        );
        let t = state.temperature.kelvin();
        let tau = self.tref / t;

        let eta0 = if self.dilute.eta0 != 0.0 {
            state.dilute_viscosity()?.micro_pas()
        } else {
            0.0
        };
        let lambda0 = self.dilute.evaluate(tau, eta0);
        let rho = state.density.mol_m3();
        let lambda_r = self
            .residual
            .as_ref()
            .map_or(0.0, |r| r.evaluate(t, rho, self.tref, self.rhoref));
        let lambda_c = match &self.critical {
            Some(critical) => critical.evaluate(&Self::critical_input(critical, state)?),
            None => 0.0,
        };
        Ok((lambda0 + lambda_r) * self.unit + lambda_c)
    }

    fn critical_input(critical: &OlchowySengers, state: &State) -> MeosResult<CriticalInput> {
        let reference = State::new_pure(&state.fluid, critical.t_ref * KELVIN, state.density)?;
        Ok(CriticalInput {
            temperature: state.temperature.kelvin(),
            density: state.density.mol_m3(),
            cp: state.molar_isobaric_heat_capacity()?.j_molk(),
            cv: state.molar_isochoric_heat_capacity().j_molk(),
            drho_dp: 1.0 / state.dp_drho().j_mol(),
            drho_dp_ref: 1.0 / reference.dp_drho().j_mol(),
            viscosity: state.viscosity()?.pas(),
        })
    }
}

impl TransportModel<ViscosityRecord> {
    /// Viscosity in Pa s.
    pub fn evaluate(&self, state: &State) -> MeosResult<f64> {
        match self {
            Self::Correlation(c) => Ok(c.evaluate(state)),
            Self::Custom { method, .. } => method(state),
        }
    }
}

impl TransportModel<ThermalConductivityRecord> {
    /// Thermal conductivity in W/(m K).
    pub fn evaluate(&self, state: &State) -> MeosResult<f64> {
        match self {
            Self::Correlation(c) => c.evaluate(state),
            Self::Custom { method, .. } => method(state),
        }
    }
}
