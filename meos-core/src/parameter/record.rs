use super::{Identifier, ParameterError};
use crate::ancillary::AncillariesRecord;
use crate::blend::BlendRecord;
use crate::equation_of_state::EquationRecord;
use crate::fluid::ReferenceState;
use crate::transport::{ThermalConductivityRecord, TransportRecord, ViscosityRecord};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Critical point of a fluid.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct CriticalPointRecord {
    /// Critical temperature in K
    pub temperature: f64,
    /// Critical pressure in Pa
    pub pressure: f64,
    /// Critical density in mol/m³
    pub density: f64,
}

/// Triple point of a fluid.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct TriplePointRecord {
    /// Triple point temperature in K
    pub temperature: f64,
    /// Triple point pressure in Pa
    pub pressure: f64,
}

/// Everything that is known about a single fluid.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FluidRecord {
    pub identifier: Identifier,
    /// Molar weight in g/mol
    pub molar_weight: f64,
    pub critical_point: CriticalPointRecord,
    pub triple_point: TriplePointRecord,
    /// Normal boiling point temperature in K
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_boiling_point: Option<f64>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acentric_factor: Option<f64>,
    /// Available equations of state. The first one is used by default.
    pub equations: Vec<EquationRecord>,
    #[serde(default)]
    pub ancillaries: AncillariesRecord,
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub viscosity: Vec<TransportRecord<ViscosityRecord>>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub thermal_conductivity: Vec<TransportRecord<ThermalConductivityRecord>>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blend: Option<BlendRecord>,
    #[serde(default)]
    pub reference_state: ReferenceState,
}

impl FluidRecord {
    /// Parse a single record from a json string.
    pub fn from_json_str(json: &str) -> Result<Self, ParameterError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read the record of `substance` from a json file containing a
    /// list of records. The substance is matched against all identifiers.
    pub fn from_json<P: AsRef<Path>>(substance: &str, file: P) -> Result<Self, ParameterError> {
        let reader = BufReader::new(File::open(file)?);
        let records: Vec<Self> = serde_json::from_reader(reader)?;
        records
            .into_iter()
            .find(|r| r.identifier.matches(substance))
            .ok_or_else(|| ParameterError::SubstanceNotFound(substance.to_string()))
    }
}

impl std::fmt::Display for FluidRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FluidRecord(")?;
        write!(f, "\n\tidentifier={},", self.identifier)?;
        write!(f, "\n\tmolar_weight={},", self.molar_weight)?;
        write!(f, "\n\tequations=[")?;
        let names: Vec<_> = self.equations.iter().map(|e| e.name.as_str()).collect();
        write!(f, "{}]\n)", names.join(", "))
    }
}
