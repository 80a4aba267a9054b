//! Ancillary correlations for saturation properties, melting and
//! sublimation lines, and surface tension.
//!
//! The saturation ancillaries are not thermodynamically consistent with the
//! equation of state; they are used as initial values for the phase
//! equilibrium iterations and as an independent estimate of the saturation
//! curve.
use crate::errors::{MeosError, MeosResult};
use serde::{Deserialize, Serialize};

/// Saturation ancillary in json format.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct AncillaryRecord {
    /// Functional form, see [AncillaryForm].
    pub eq: i64,
    pub n: Vec<f64>,
    pub t: Vec<f64>,
    /// Reducing temperature in K
    pub tc: f64,
    /// Reducing pressure (Pa) or density (mol/m³)
    pub reducing_value: f64,
    pub t_min: f64,
    pub t_max: f64,
}

/// Functional forms of saturation ancillaries with $\theta=1-T/T_c$.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AncillaryForm {
    /// $y/y_r = 1 + \sum_i n_i\theta^{t_i}$
    Linear,
    /// $y/y_r = 1 + \sum_i n_i\theta^{t_i/3}$
    LinearCubic,
    /// $\ln(y/y_r) = \sum_i n_i\theta^{t_i}$
    Exponential,
    /// $\ln(y/y_r) = \sum_i n_i\theta^{t_i/3}$
    ExponentialCubic,
    /// $\ln(y/y_r) = \frac{T_c}{T}\sum_i n_i\theta^{t_i}$
    ExponentialReduced,
    /// $\ln(y/y_r) = \frac{T_c}{T}\sum_i n_i\theta^{t_i/2}$
    ExponentialReducedHalf,
}

impl TryFrom<i64> for AncillaryForm {
    type Error = MeosError;

    fn try_from(eq: i64) -> MeosResult<Self> {
        match eq {
            1 => Ok(Self::Linear),
            2 => Ok(Self::LinearCubic),
            3 => Ok(Self::Exponential),
            4 => Ok(Self::ExponentialCubic),
            5 => Ok(Self::ExponentialReduced),
            6 => Ok(Self::ExponentialReducedHalf),
            _ => Err(MeosError::UnsupportedForm("ancillary".into(), eq)),
        }
    }
}

/// A saturation ancillary (vapor pressure, saturated liquid or vapor density).
#[derive(Clone, Debug)]
pub struct Ancillary {
    form: AncillaryForm,
    n: Vec<f64>,
    t: Vec<f64>,
    tc: f64,
    reducing_value: f64,
    t_min: f64,
    t_max: f64,
}

impl Ancillary {
    pub fn new(record: &AncillaryRecord) -> MeosResult<Self> {
        let form = AncillaryForm::try_from(record.eq)?;
        if record.n.len() != record.t.len() {
            return Err(MeosError::Configuration(format!(
                "ancillary with {} coefficients and {} exponents",
                record.n.len(),
                record.t.len()
            )));
        }
        Ok(Self {
            form,
            n: record.n.clone(),
            t: record.t.clone(),
            tc: record.tc,
            reducing_value: record.reducing_value,
            t_min: record.t_min,
            t_max: record.t_max,
        })
    }

    pub fn form(&self) -> AncillaryForm {
        self.form
    }

    /// Range of validity in K.
    pub fn range(&self) -> (f64, f64) {
        (self.t_min, self.t_max)
    }

    /// Evaluate the correlation at `temperature` (K).
    pub fn evaluate(&self, temperature: f64) -> MeosResult<f64> {
        if !(self.t_min..=self.t_max).contains(&temperature) {
            return Err(MeosError::OutOfRange(
                "temperature".into(),
                temperature,
                self.t_min,
                self.t_max,
            ));
        }
        Ok(self.evaluate_unchecked(temperature))
    }

    fn evaluate_unchecked(&self, temperature: f64) -> f64 {
        let theta = 1.0 - temperature / self.tc;
        let sum = |scale: f64| -> f64 {
            self.n
                .iter()
                .zip(&self.t)
                .map(|(n, t)| n * theta.powf(t * scale))
                .sum()
        };
        let f = match self.form {
            AncillaryForm::Linear => 1.0 + sum(1.0),
            AncillaryForm::LinearCubic => 1.0 + sum(1.0 / 3.0),
            AncillaryForm::Exponential => sum(1.0).exp(),
            AncillaryForm::ExponentialCubic => sum(1.0 / 3.0).exp(),
            AncillaryForm::ExponentialReduced => (self.tc / temperature * sum(1.0)).exp(),
            AncillaryForm::ExponentialReducedHalf => (self.tc / temperature * sum(0.5)).exp(),
        };
        self.reducing_value * f
    }

    /// Temperature at which a monotonically increasing correlation (i.e.
    /// a vapor pressure) takes the given value.
    pub fn invert(&self, value: f64) -> MeosResult<f64> {
        let (y_min, y_max) = (
            self.evaluate_unchecked(self.t_min),
            self.evaluate_unchecked(self.t_max),
        );
        if !(y_min..=y_max).contains(&value) {
            return Err(MeosError::OutOfRange("value".into(), value, y_min, y_max));
        }
        let ln_value = value.ln();
        let (mut t_lo, mut t_hi) = (self.t_min, self.t_max);
        for _ in 0..200 {
            let t = 0.5 * (t_lo + t_hi);
            if self.evaluate_unchecked(t).ln() < ln_value {
                t_lo = t;
            } else {
                t_hi = t;
            }
            if t_hi - t_lo < 1e-12 * t_hi {
                break;
            }
        }
        Ok(0.5 * (t_lo + t_hi))
    }
}

/// Melting or sublimation line in json format.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct MeltingRecord {
    /// 1: linear, 2: logarithmic
    pub eq: i64,
    pub t_ref: f64,
    pub p_ref: f64,
    #[serde(default)]
    pub a1: Vec<f64>,
    #[serde(default)]
    pub e1: Vec<f64>,
    #[serde(default)]
    pub a2: Vec<f64>,
    #[serde(default)]
    pub e2: Vec<f64>,
    #[serde(default)]
    pub a3: Vec<f64>,
    #[serde(default)]
    pub e3: Vec<f64>,
    pub t_min: f64,
    pub t_max: f64,
}

/// Melting or sublimation pressure as function of $\theta = T/T_\mathrm{ref}$:
///
/// $\Sigma = \sum a_{1,i}\theta^{e_{1,i}} + \sum a_{2,i}(\theta-1)^{e_{2,i}}
/// + \sum a_{3,i}\ln(\theta)^{e_{3,i}}$
///
/// with either $P/P_\mathrm{ref}=\Sigma$ or $\ln(P/P_\mathrm{ref})=\Sigma$.
#[derive(Clone, Debug)]
pub struct MeltingCurve {
    logarithmic: bool,
    record: MeltingRecord,
}

impl MeltingCurve {
    pub fn new(record: &MeltingRecord) -> MeosResult<Self> {
        let logarithmic = match record.eq {
            1 => false,
            2 => true,
            eq => return Err(MeosError::UnsupportedForm("melting line".into(), eq)),
        };
        for (a, e) in [
            (&record.a1, &record.e1),
            (&record.a2, &record.e2),
            (&record.a3, &record.e3),
        ] {
            if a.len() != e.len() {
                return Err(MeosError::Configuration(format!(
                    "melting line with {} coefficients and {} exponents",
                    a.len(),
                    e.len()
                )));
            }
        }
        Ok(Self {
            logarithmic,
            record: record.clone(),
        })
    }

    pub fn range(&self) -> (f64, f64) {
        (self.record.t_min, self.record.t_max)
    }

    /// Pressure in Pa at `temperature` (K).
    pub fn evaluate(&self, temperature: f64) -> MeosResult<f64> {
        let r = &self.record;
        if !(r.t_min..=r.t_max).contains(&temperature) {
            return Err(MeosError::OutOfRange(
                "temperature".into(),
                temperature,
                r.t_min,
                r.t_max,
            ));
        }
        let theta = temperature / r.t_ref;
        let series = |a: &[f64], e: &[f64], x: f64| -> f64 {
            a.iter().zip(e).map(|(a, e)| a * x.powf(*e)).sum::<f64>()
        };
        let sum = series(&r.a1, &r.e1, theta)
            + series(&r.a2, &r.e2, theta - 1.0)
            + series(&r.a3, &r.e3, theta.ln());
        Ok(if self.logarithmic {
            r.p_ref * sum.exp()
        } else {
            r.p_ref * sum
        })
    }
}

/// Surface tension correlation in json format.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SurfaceTensionRecord {
    pub sigma: Vec<f64>,
    pub n: Vec<f64>,
    pub tc: f64,
}

impl SurfaceTensionRecord {
    /// $\sigma=\sum_i\sigma_i\left(1-T/T_c\right)^{n_i}$ in N/m.
    pub fn evaluate(&self, temperature: f64) -> MeosResult<f64> {
        if temperature > self.tc {
            return Err(MeosError::SuperCritical);
        }
        let theta = 1.0 - temperature / self.tc;
        Ok(self
            .sigma
            .iter()
            .zip(&self.n)
            .map(|(s, n)| s * theta.powf(*n))
            .sum())
    }
}

/// All ancillary correlations of a fluid in json format.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct AncillariesRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vapor_pressure: Option<AncillaryRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquid_density: Option<AncillaryRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vapor_density: Option<AncillaryRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub melting: Option<MeltingRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sublimation: Option<MeltingRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_tension: Option<SurfaceTensionRecord>,
}

/// Resolved ancillary correlations of a fluid.
#[derive(Clone, Debug, Default)]
pub struct Ancillaries {
    pub vapor_pressure: Option<Ancillary>,
    pub liquid_density: Option<Ancillary>,
    pub vapor_density: Option<Ancillary>,
    pub melting: Option<MeltingCurve>,
    pub sublimation: Option<MeltingCurve>,
    pub surface_tension: Option<SurfaceTensionRecord>,
}

impl Ancillaries {
    pub fn new(record: &AncillariesRecord) -> MeosResult<Self> {
        Ok(Self {
            vapor_pressure: record.vapor_pressure.as_ref().map(Ancillary::new).transpose()?,
            liquid_density: record.liquid_density.as_ref().map(Ancillary::new).transpose()?,
            vapor_density: record.vapor_density.as_ref().map(Ancillary::new).transpose()?,
            melting: record.melting.as_ref().map(MeltingCurve::new).transpose()?,
            sublimation: record.sublimation.as_ref().map(MeltingCurve::new).transpose()?,
            surface_tension: record.surface_tension.clone(),
        })
    }
}

/// Corresponding states estimates used when no (valid) ancillary is available.
pub(crate) mod corresponding_states {
    /// Vapor pressure from a straight line in $\ln P$ over $1/T$ through
    /// the triple and critical points.
    pub fn vapor_pressure(t: f64, tc: f64, pc: f64, tt: f64, pt: f64) -> f64 {
        pc * ((pt / pc).ln() * (tc / t - 1.0) / (tc / tt - 1.0)).exp()
    }

    /// Inverse of [vapor_pressure].
    pub fn saturation_temperature(p: f64, tc: f64, pc: f64, tt: f64, pt: f64) -> f64 {
        tc / (1.0 + (p / pc).ln() / (pt / pc).ln() * (tc / tt - 1.0))
    }

    /// Saturated liquid density after Guggenheim.
    pub fn liquid_density(t: f64, tc: f64, rhoc: f64) -> f64 {
        let theta = (1.0 - t / tc).max(0.0);
        rhoc * (1.0 + 0.75 * theta + 1.75 * theta.cbrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(eq: i64) -> AncillaryRecord {
        AncillaryRecord {
            eq,
            n: vec![-0.5, 0.2],
            t: vec![1.0, 1.5],
            tc: 500.0,
            reducing_value: 2.0,
            t_min: 200.0,
            t_max: 500.0,
        }
    }

    #[test]
    fn ancillary_forms() {
        let t = 400.0;
        let theta: f64 = 1.0 - t / 500.0;
        let s = |scale: f64| -0.5 * theta.powf(scale) + 0.2 * theta.powf(1.5 * scale);
        let expected = [
            2.0 * (1.0 + s(1.0)),
            2.0 * (1.0 + s(1.0 / 3.0)),
            2.0 * s(1.0).exp(),
            2.0 * s(1.0 / 3.0).exp(),
            2.0 * (500.0 / t * s(1.0)).exp(),
            2.0 * (500.0 / t * s(0.5)).exp(),
        ];
        for (eq, y) in (1..=6).zip(expected) {
            let ancillary = Ancillary::new(&record(eq)).unwrap();
            assert_relative_eq!(ancillary.evaluate(t).unwrap(), y, max_relative = 1e-14);
        }
    }

    #[test]
    fn unsupported_form() {
        assert!(matches!(
            Ancillary::new(&record(7)),
            Err(MeosError::UnsupportedForm(_, 7))
        ));
    }

    #[test]
    fn out_of_range() {
        let ancillary = Ancillary::new(&record(5)).unwrap();
        assert!(matches!(
            ancillary.evaluate(150.0),
            Err(MeosError::OutOfRange(..))
        ));
        assert!(ancillary.evaluate(500.0).is_ok());
    }

    #[test]
    fn invert_vapor_pressure() {
        let ancillary = Ancillary::new(&record(5)).unwrap();
        let p = ancillary.evaluate(321.0).unwrap();
        assert_relative_eq!(ancillary.invert(p).unwrap(), 321.0, max_relative = 1e-10);
    }

    #[test]
    fn corresponding_states_roundtrip() {
        use corresponding_states::*;
        let (tc, pc, tt, pt) = (647.096, 22.064e6, 273.16, 611.655);
        assert_relative_eq!(vapor_pressure(tt, tc, pc, tt, pt), pt, max_relative = 1e-12);
        assert_relative_eq!(vapor_pressure(tc, tc, pc, tt, pt), pc, max_relative = 1e-12);
        let p = vapor_pressure(450.0, tc, pc, tt, pt);
        assert_relative_eq!(
            saturation_temperature(p, tc, pc, tt, pt),
            450.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(liquid_density(tc, tc, 1.0), 1.0);
    }

    #[test]
    fn melting_line() {
        let record = MeltingRecord {
            eq: 1,
            t_ref: 100.0,
            p_ref: 1e5,
            a1: vec![1.0, 2.0],
            e1: vec![0.0, 1.5],
            a2: vec![3.0],
            e2: vec![1.0],
            a3: vec![],
            e3: vec![],
            t_min: 100.0,
            t_max: 300.0,
        };
        let curve = MeltingCurve::new(&record).unwrap();
        let theta: f64 = 2.0;
        let expected = 1e5 * (1.0 + 2.0 * theta.powf(1.5) + 3.0 * (theta - 1.0));
        assert_relative_eq!(curve.evaluate(200.0).unwrap(), expected, max_relative = 1e-14);

        let curve = MeltingCurve::new(&MeltingRecord { eq: 2, ..record.clone() }).unwrap();
        assert_relative_eq!(
            curve.evaluate(200.0).unwrap(),
            1e5 * (expected / 1e5).exp(),
            max_relative = 1e-14
        );
        assert!(matches!(
            MeltingCurve::new(&MeltingRecord { eq: 3, ..record }),
            Err(MeosError::UnsupportedForm(..))
        ));
    }

    #[test]
    fn surface_tension() {
        let record = SurfaceTensionRecord {
            sigma: vec![0.2358, -0.147375],
            n: vec![1.256, 2.256],
            tc: 647.096,
        };
        assert_relative_eq!(record.evaluate(647.096).unwrap(), 0.0);
        // IAPWS release on surface tension, 300 K: 71.69 mN/m
        assert_relative_eq!(record.evaluate(300.0).unwrap(), 71.69e-3, max_relative = 1e-3);
    }
}
