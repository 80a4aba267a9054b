//! Fluids with embedded parameter records.
//!
//! The records are compiled into the library. Custom transport methods
//! referenced by the records are collected in [registry].
use meos_core::parameter::{FluidRecord, ParameterError};
use meos_core::{Fluid, MeosResult, TransportRegistry};
use std::sync::Arc;

pub mod helium;
pub mod water;

const RECORDS: [&str; 6] = [
    include_str!("../../parameters/water.json"),
    include_str!("../../parameters/hydrogen.json"),
    include_str!("../../parameters/air.json"),
    include_str!("../../parameters/argon.json"),
    include_str!("../../parameters/ammonia.json"),
    include_str!("../../parameters/helium.json"),
];

/// All custom transport methods of the catalogue.
pub fn registry() -> TransportRegistry {
    let mut registry = TransportRegistry::new();
    water::register(&mut registry);
    helium::register(&mut registry);
    registry
}

/// Records of all fluids in the catalogue.
pub fn records() -> MeosResult<Vec<FluidRecord>> {
    RECORDS
        .iter()
        .map(|json| Ok(FluidRecord::from_json_str(json)?))
        .collect()
}

/// Names of all fluids in the catalogue.
pub fn available_fluids() -> MeosResult<Vec<String>> {
    Ok(records()?
        .into_iter()
        .filter_map(|r| r.identifier.name)
        .collect())
}

/// The record of a fluid, matched against all of its identifiers.
pub fn record(substance: &str) -> MeosResult<FluidRecord> {
    records()?
        .into_iter()
        .find(|r| r.identifier.matches(substance))
        .ok_or_else(|| ParameterError::SubstanceNotFound(substance.to_string()).into())
}

/// A fluid from the catalogue with its reference equation and default
/// transport models.
pub fn fluid(substance: &str) -> MeosResult<Arc<Fluid>> {
    Ok(Arc::new(Fluid::new(&record(substance)?, &registry())?))
}

/// Water, IAPWS-95.
pub fn water() -> MeosResult<Arc<Fluid>> {
    fluid("water")
}

/// Normal hydrogen, Leachman et al. (2009).
pub fn hydrogen() -> MeosResult<Arc<Fluid>> {
    fluid("hydrogen")
}

/// Dry air as pseudo-pure fluid, Lemmon et al. (2000).
pub fn air() -> MeosResult<Arc<Fluid>> {
    fluid("air")
}

/// Argon, Tegeler et al. (1999).
pub fn argon() -> MeosResult<Arc<Fluid>> {
    fluid("argon")
}

/// Ammonia, Gao et al. (2020).
pub fn ammonia() -> MeosResult<Arc<Fluid>> {
    fluid("ammonia")
}

/// Helium-4, GERG-2008 pure fluid equation.
pub fn helium() -> MeosResult<Arc<Fluid>> {
    fluid("helium")
}
