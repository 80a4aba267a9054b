//! Physical quantities with compile-time checked units.
//!
//! Every property returned by a [State](crate::State) or a
//! [Fluid](crate::Fluid) is wrapped in a [Quantity] whose unit is encoded
//! in the type. Values are stored internally in SI base units and can be
//! extracted either via division by a unit or with one of the named
//! conversions (e.g. [Pressure::mpa]).

#![allow(clippy::type_complexity)]
use num_traits::Zero;
use std::marker::PhantomData;
use std::ops::{Div, Mul, Sub};
use typenum::{ATerm, Diff, Negate, Quot, Sum, TArr, N1, N2, N3, P1, P2, P3, P6, Z0};

mod fmt;
mod ops;

pub type SIUnit<T, L, M, I, THETA, N, J> =
    TArr<T, TArr<L, TArr<M, TArr<I, TArr<THETA, TArr<N, TArr<J, ATerm>>>>>>>;

/// Physical quantity with compile-time checked unit.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Quantity<T, U>(T, PhantomData<U>);

pub type _Dimensionless = SIUnit<Z0, Z0, Z0, Z0, Z0, Z0, Z0>;
pub type _Time = SIUnit<P1, Z0, Z0, Z0, Z0, Z0, Z0>;
pub type _Length = SIUnit<Z0, P1, Z0, Z0, Z0, Z0, Z0>;
pub type _Mass = SIUnit<Z0, Z0, P1, Z0, Z0, Z0, Z0>;
pub type _Temperature = SIUnit<Z0, Z0, Z0, Z0, P1, Z0, Z0>;
pub type _Moles = SIUnit<Z0, Z0, Z0, Z0, Z0, P1, Z0>;

pub type Dimensionless<T = f64> = Quantity<T, _Dimensionless>;
pub type Time<T = f64> = Quantity<T, _Time>;
pub type Length<T = f64> = Quantity<T, _Length>;
pub type Mass<T = f64> = Quantity<T, _Mass>;
pub type Temperature<T = f64> = Quantity<T, _Temperature>;
pub type Moles<T = f64> = Quantity<T, _Moles>;

pub type _Velocity = Diff<_Length, _Time>;
pub type Velocity<T = f64> = Quantity<T, _Velocity>;
pub type _Acceleration = Diff<_Velocity, _Time>;
pub type _Force = Sum<_Mass, _Acceleration>;
pub type Force<T = f64> = Quantity<T, _Force>;
pub type _Area = Sum<_Length, _Length>;
pub type Area<T = f64> = Quantity<T, _Area>;
pub type _Volume = Sum<_Area, _Length>;
pub type Volume<T = f64> = Quantity<T, _Volume>;
pub type _Energy = Sum<_Force, _Length>;
pub type Energy<T = f64> = Quantity<T, _Energy>;
pub type _Pressure = Diff<_Energy, _Volume>;
pub type Pressure<T = f64> = Quantity<T, _Pressure>;
pub type _Power = Diff<_Energy, _Time>;
pub type Power<T = f64> = Quantity<T, _Power>;

pub type _Entropy = Diff<_Energy, _Temperature>;
pub type Entropy<T = f64> = Quantity<T, _Entropy>;
pub type _MolarEntropy = Diff<_Entropy, _Moles>;
pub type MolarEntropy<T = f64> = Quantity<T, _MolarEntropy>;
pub type _MolarEnergy = Diff<_Energy, _Moles>;
pub type MolarEnergy<T = f64> = Quantity<T, _MolarEnergy>;
pub type _SpecificEntropy = Diff<_Entropy, _Mass>;
pub type SpecificEntropy<T = f64> = Quantity<T, _SpecificEntropy>;
pub type _SpecificEnergy = Diff<_Energy, _Mass>;
pub type SpecificEnergy<T = f64> = Quantity<T, _SpecificEnergy>;
pub type _MolarWeight = Diff<_Mass, _Moles>;
pub type MolarWeight<T = f64> = Quantity<T, _MolarWeight>;
pub type _Density = Diff<_Moles, _Volume>;
pub type Density<T = f64> = Quantity<T, _Density>;
pub type _MassDensity = Diff<_Mass, _Volume>;
pub type MassDensity<T = f64> = Quantity<T, _MassDensity>;
pub type _PressurePerDensity = Diff<_Pressure, _Density>;
pub type PressurePerDensity<T = f64> = Quantity<T, _PressurePerDensity>;
pub type _PressurePerTemperature = Diff<_Pressure, _Temperature>;
pub type PressurePerTemperature<T = f64> = Quantity<T, _PressurePerTemperature>;
pub type _TemperaturePerPressure = Negate<_PressurePerTemperature>;
pub type TemperaturePerPressure<T = f64> = Quantity<T, _TemperaturePerPressure>;
pub type _ThermalExpansivity = Negate<_Temperature>;
pub type ThermalExpansivity<T = f64> = Quantity<T, _ThermalExpansivity>;
pub type _Compressibility = Negate<_Pressure>;
pub type Compressibility<T = f64> = Quantity<T, _Compressibility>;
pub type _MolarVolume = Diff<_Volume, _Moles>;
pub type MolarVolume<T = f64> = Quantity<T, _MolarVolume>;
pub type _SquaredMolarVolume = Sum<_MolarVolume, _MolarVolume>;
pub type SquaredMolarVolume<T = f64> = Quantity<T, _SquaredMolarVolume>;

pub type _Viscosity = Sum<_Pressure, _Time>;
pub type Viscosity<T = f64> = Quantity<T, _Viscosity>;
pub type _Diffusivity = Sum<_Velocity, _Length>;
pub type Diffusivity<T = f64> = Quantity<T, _Diffusivity>;
pub type _ThermalConductivity = Diff<_Power, Sum<_Length, _Temperature>>;
pub type ThermalConductivity<T = f64> = Quantity<T, _ThermalConductivity>;
pub type _SurfaceTension = Diff<_Force, _Length>;
pub type SurfaceTension<T = f64> = Quantity<T, _SurfaceTension>;

/// SI base unit second $\\left(\text{s}\\right)$
pub const SECOND: Time = Quantity(1.0, PhantomData);
/// SI base unit meter $\\left(\text{m}\\right)$
pub const METER: Length = Quantity(1.0, PhantomData);
/// SI base unit kilogram $\\left(\text{kg}\\right)$
pub const KILOGRAM: Mass = Quantity(1.0, PhantomData);
/// SI base unit Kelvin $\\left(\text{K}\\right)$
pub const KELVIN: Temperature = Quantity(1.0, PhantomData);
/// SI base unit mol $\\left(\text{mol}\\right)$
pub const MOL: Moles = Quantity(1.0, PhantomData);

/// Derived unit Newton $\\left(1\\,\text{N}=1\\,\text{kg}\\frac{\text{m}}{\text{s}^2}\\right)$
pub const NEWTON: Force = Quantity(1.0, PhantomData);
/// Derived unit Pascal $\\left(1\\,\text{Pa}=1\\,\\frac{\text{kg}}{\text{m}\\cdot\text{s}^2}\\right)$
pub const PASCAL: Pressure = Quantity(1.0, PhantomData);
/// Derived unit Joule $\\left(1\\,\text{J}=1\\,\text{kg}\\frac{\text{m}^2}{\text{s}^2}\\right)$
pub const JOULE: Energy = Quantity(1.0, PhantomData);
/// Derived unit Watt $\\left(1\\,\text{J}=1\\,\text{kg}\\frac{\text{m}^2}{\text{s}^3}\\right)$
pub const WATT: Power = Quantity(1.0, PhantomData);

/// Additional unit bar $\\left(1\\,\text{bar}=10^5\\,\text{Pa}\\right)$
pub const BAR: Pressure = Quantity(1e5, PhantomData);
/// Additional unit gram $\\left(1\\,\text{g}=10^{-3}\\,\text{kg}\\right)$
pub const GRAM: Mass = Quantity(1e-3, PhantomData);
/// Additional unit liter $\\left(1\\,\text{l}=10^{-3}\\,\text{m}^3\\right)$
pub const LITER: Volume = Quantity(1e-3, PhantomData);

/// Boltzmann constant $\\left(k_\text{B}=1.380649\times 10^{-23}\\,\\frac{\text{J}}{\text{K}}\\right)$
pub const KB: Entropy = Quantity(1.380649e-23, PhantomData);
/// Avogadro constant $\\left(N_\text{A}=6.02214076\times 10^{23}\\,\text{mol}^{-1}\\right)$
pub const NAV: Quantity<f64, Negate<_Moles>> = Quantity(6.02214076e23, PhantomData);
/// Ideal gas constant $\\left(R=8.31446261815324\\,\\frac{\text{J}}{\text{molK}}\\right)$
pub const RGAS: MolarEntropy = Quantity(8.31446261815324, PhantomData);

/// Prefix pico $\\left(\text{p}=10^{-12}\\right)$
pub const PICO: f64 = 1e-12;
/// Prefix nano $\\left(\text{n}=10^{-9}\\right)$
pub const NANO: f64 = 1e-9;
/// Prefix micro $\\left(\text{µ}=10^{-6}\\right)$
pub const MICRO: f64 = 1e-6;
/// Prefix milli $\\left(\text{m}=10^{-3}\\right)$
pub const MILLI: f64 = 1e-3;
/// Prefix kilo $\\left(\text{k}=10^{3}\\right)$
pub const KILO: f64 = 1e3;
/// Prefix mega $\\left(\text{M}=10^{6}\\right)$
pub const MEGA: f64 = 1e6;
/// Prefix giga $\\left(\text{G}=10^{9}\\right)$
pub const GIGA: f64 = 1e9;

/// Additional unit degrees Celsius
pub struct CELSIUS;

impl Mul<CELSIUS> for f64 {
    type Output = Temperature<f64>;
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn mul(self, _: CELSIUS) -> Temperature<f64> {
        Quantity(self + 273.15, PhantomData)
    }
}

impl Div<CELSIUS> for Temperature<f64> {
    type Output = f64;
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, _: CELSIUS) -> Self::Output {
        self.0 - 273.15
    }
}

impl<T> Dimensionless<T> {
    /// Return the value of a dimensionless quantity.
    pub fn into_value(self) -> T {
        self.0
    }
}

impl<T, U> Quantity<T, U> {
    /// Convert a quantity into the given unit and return it
    /// as a float.
    pub fn convert_into<T2>(self, unit: Quantity<T2, U>) -> Quot<T, T2>
    where
        T: Div<T2>,
        U: Sub<U, Output = _Dimensionless>,
    {
        (self / unit).into_value()
    }
}

impl<T> From<T> for Dimensionless<T> {
    fn from(value: T) -> Self {
        Quantity(value, PhantomData)
    }
}

impl<U> Zero for Quantity<f64, U> {
    fn zero() -> Self {
        Quantity(0.0, PhantomData)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

/// Named conversions into the engineering units commonly used to
/// report fluid properties.
macro_rules! impl_conversions {
    ($t:ident, $l:ident, $m:ident, $i:ident, $theta:ident, $n:ident; $($name:ident: $factor:expr, $doc:expr;)+) => {
        impl Quantity<f64, SIUnit<$t, $l, $m, $i, $theta, $n, Z0>> {
            $(
                #[doc = concat!("Value in ", $doc, ".")]
                pub fn $name(self) -> f64 {
                    self.0 / $factor
                }
            )+
        }
    };
}

impl_conversions!(N2, N1, P1, Z0, Z0, Z0;
    pa: 1.0, "Pa";
    kpa: KILO, "kPa";
    mpa: MEGA, "MPa";
    bar: 1e5, "bar";
);
impl_conversions!(Z0, Z0, Z0, Z0, P1, Z0;
    kelvin: 1.0, "K";
);
impl_conversions!(Z0, N3, P1, Z0, Z0, Z0;
    kg_m3: 1.0, "kg/m³";
);
impl_conversions!(Z0, N3, Z0, Z0, Z0, P1;
    mol_m3: 1.0, "mol/m³";
    mol_dm3: KILO, "mol/dm³";
);
impl_conversions!(N2, P2, Z0, Z0, Z0, Z0;
    j_kg: 1.0, "J/kg";
    kj_kg: KILO, "kJ/kg";
);
impl_conversions!(N2, P2, Z0, Z0, N1, Z0;
    j_kgk: 1.0, "J/(kg K)";
    kj_kgk: KILO, "kJ/(kg K)";
);
impl_conversions!(N2, P2, P1, Z0, Z0, N1;
    j_mol: 1.0, "J/mol";
    kj_mol: KILO, "kJ/mol";
);
impl_conversions!(N2, P2, P1, Z0, N1, N1;
    j_molk: 1.0, "J/(mol K)";
);
impl_conversions!(N1, N1, P1, Z0, Z0, Z0;
    pas: 1.0, "Pa s";
    micro_pas: MICRO, "µPa s";
);
impl_conversions!(N3, P1, P1, Z0, N1, Z0;
    w_mk: 1.0, "W/(m K)";
    mw_mk: MILLI, "mW/(m K)";
);
impl_conversions!(N1, P1, Z0, Z0, Z0, Z0;
    m_s: 1.0, "m/s";
);
impl_conversions!(N2, Z0, P1, Z0, Z0, Z0;
    n_m: 1.0, "N/m";
    mn_m: MILLI, "mN/m";
);
impl_conversions!(Z0, Z0, P1, Z0, Z0, N1;
    kg_mol: 1.0, "kg/mol";
    g_mol: 1e-3, "g/mol";
);
impl_conversions!(Z0, P3, Z0, Z0, Z0, N1;
    m3_mol: 1.0, "m³/mol";
    cm3_mol: 1e-6, "cm³/mol";
);
impl_conversions!(Z0, P6, Z0, Z0, Z0, N2;
    m6_mol2: 1.0, "m⁶/mol²";
    cm6_mol2: 1e-12, "cm⁶/mol²";
);
impl_conversions!(N1, P2, Z0, Z0, Z0, Z0;
    m2_s: 1.0, "m²/s";
);
impl_conversions!(P2, P1, N1, Z0, Z0, Z0;
    per_pa: 1.0, "1/Pa";
    per_mpa: 1.0 / MEGA, "1/MPa";
);
impl_conversions!(Z0, Z0, Z0, Z0, N1, Z0;
    per_k: 1.0, "1/K";
);
impl_conversions!(N2, N1, P1, Z0, N1, Z0;
    pa_k: 1.0, "Pa/K";
    mpa_k: MEGA, "MPa/K";
);
impl_conversions!(P2, P1, N1, Z0, P1, Z0;
    k_pa: 1.0, "K/Pa";
    k_mpa: 1.0 / MEGA, "K/MPa";
);

impl Temperature<f64> {
    /// Value in °C.
    pub fn celsius(self) -> f64 {
        self / CELSIUS
    }
}
