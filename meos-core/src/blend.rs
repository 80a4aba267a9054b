//! Pseudo-pure fluids.
//!
//! Mixtures like air are described by a single Helmholtz energy equation,
//! but evaporate over a temperature glide between bubble and dew line.
//! Saturation states are therefore taken from bubble and dew pressure
//! ancillaries instead of the equal chemical potential condition.
use crate::ancillary::{Ancillary, AncillaryRecord};
use crate::errors::{MeosError, MeosResult};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BlendRecord {
    pub bubble_pressure: AncillaryRecord,
    pub dew_pressure: AncillaryRecord,
}

/// Bubble and dew lines of a pseudo-pure fluid.
#[derive(Clone, Debug)]
pub struct Blend {
    bubble: Ancillary,
    dew: Ancillary,
}

impl Blend {
    pub fn new(record: &BlendRecord) -> MeosResult<Self> {
        Ok(Self {
            bubble: Ancillary::new(&record.bubble_pressure)?,
            dew: Ancillary::new(&record.dew_pressure)?,
        })
    }

    /// Bubble point pressure in Pa.
    pub fn bubble_pressure(&self, temperature: f64) -> MeosResult<f64> {
        self.bubble.evaluate(temperature)
    }

    /// Dew point pressure in Pa.
    pub fn dew_pressure(&self, temperature: f64) -> MeosResult<f64> {
        self.dew.evaluate(temperature)
    }

    /// Upper end of the two-phase region.
    pub fn maximum_temperature(&self) -> f64 {
        self.bubble.range().1.min(self.dew.range().1)
    }

    /// Pressure of a two-phase state with vapor fraction `quality`.
    pub fn pressure(&self, temperature: f64, quality: f64) -> MeosResult<f64> {
        let pb = self.bubble_pressure(temperature)?;
        let pd = self.dew_pressure(temperature)?;
        Ok((1.0 - quality) * pb + quality * pd)
    }

    /// Vapor fraction at the given temperature and pressure, if the point
    /// lies between dew and bubble line.
    pub fn quality(&self, temperature: f64, pressure: f64) -> MeosResult<Option<f64>> {
        let pb = self.bubble_pressure(temperature)?;
        let pd = self.dew_pressure(temperature)?;
        if pressure > pd && pressure < pb {
            Ok(Some((pb - pressure) / (pb - pd)))
        } else {
            Ok(None)
        }
    }

    /// Temperature of a two-phase state with the given pressure and
    /// vapor fraction, found by bisection.
    pub fn temperature(&self, pressure: f64, quality: f64) -> MeosResult<f64> {
        let (t_lo, _) = self.bubble.range();
        let (t_lo, t_hi) = (t_lo.max(self.dew.range().0), self.maximum_temperature());
        let f = |t: f64| self.pressure(t, quality).map(|p| p - pressure);
        let (f_lo, f_hi) = (f(t_lo)?, f(t_hi)?);
        if f_hi < 0.0 {
            return Err(MeosError::SuperCritical);
        }
        if f_lo > 0.0 {
            return Err(MeosError::OutOfRange(
                "pressure".into(),
                pressure,
                pressure - f_lo,
                pressure - f_hi,
            ));
        }
        let (mut a, mut b) = (t_lo, t_hi);
        for _ in 0..200 {
            let m = 0.5 * (a + b);
            if f(m)? > 0.0 {
                b = m;
            } else {
                a = m;
            }
            if b - a < 1e-12 * m {
                return Ok(0.5 * (a + b));
            }
        }
        Err(MeosError::NotConverged("blend temperature".into()))
    }
}
