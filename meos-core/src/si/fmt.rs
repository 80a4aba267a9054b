use super::*;
use std::fmt;
use typenum::Integer;

const UNIT_SYMBOLS: [&str; 7] = ["s", "m", "kg", "A", "K", "mol", "cd"];

impl<
        Inner: fmt::Debug,
        T: Integer,
        L: Integer,
        M: Integer,
        I: Integer,
        THETA: Integer,
        N: Integer,
        J: Integer,
    > fmt::Debug for Quantity<Inner, SIUnit<T, L, M, I, THETA, N, J>>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)?;
        let unit = [T::I8, L::I8, M::I8, I::I8, THETA::I8, N::I8, J::I8]
            .iter()
            .zip(UNIT_SYMBOLS.iter())
            .filter_map(|(&u, &s)| match u {
                0 => None,
                1 => Some(s.to_owned()),
                _ => Some(format!("{s}^{u}")),
            })
            .collect::<Vec<String>>()
            .join(" ");

        write!(f, " {}", unit)
    }
}

macro_rules! impl_fmt {
    ($t:ident, $l:ident, $m:ident, $theta:ident, $n:ident, $unit:expr, $symbol:expr, $has_prefix:expr) => {
        impl fmt::LowerExp for Quantity<f64, SIUnit<$t, $l, $m, Z0, $theta, $n, Z0>> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                (*self / $unit).into_value().fmt(f)?;
                write!(f, " {}", $symbol)
            }
        }

        impl fmt::Display for Quantity<f64, SIUnit<$t, $l, $m, Z0, $theta, $n, Z0>> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let (value, prefix) = get_prefix((*self / $unit).into_value(), $has_prefix);
                if !((1e-2..1e4).contains(&value.abs()) || value == 0.0) {
                    write!(f, "{:e} {}{}", value, prefix, $symbol)
                } else {
                    value.fmt(f)?;
                    write!(f, " {}{}", prefix, $symbol)
                }
            }
        }
    };
}

const M3: Volume = Quantity(1.0, PhantomData);
const JMK: MolarEntropy = Quantity(1.0, PhantomData);
const JKGK: SpecificEntropy = Quantity(1.0, PhantomData);
const WMK: ThermalConductivity = Quantity(1.0, PhantomData);

impl_fmt!(Z0, Z0, Z0, P1, Z0, KELVIN, "K", None);
impl_fmt!(N2, N1, P1, Z0, Z0, PASCAL, "Pa", Some(GIGA));
impl_fmt!(Z0, N3, Z0, Z0, P1, MOL / M3, "mol/m³", Some(GIGA));
impl_fmt!(Z0, N3, P1, Z0, Z0, KILOGRAM / M3, "kg/m³", None);
impl_fmt!(Z0, P3, Z0, Z0, N1, M3 / MOL, "m³/mol", None);
impl_fmt!(N2, P2, P1, Z0, N1, JOULE / MOL, "J/mol", Some(GIGA));
impl_fmt!(N2, P2, P1, N1, N1, JMK, "J/mol/K", Some(GIGA));
impl_fmt!(N2, P2, Z0, Z0, Z0, JOULE / KILOGRAM, "J/kg", Some(GIGA));
impl_fmt!(N2, P2, Z0, N1, Z0, JKGK, "J/kg/K", Some(GIGA));
impl_fmt!(N1, N1, P1, Z0, Z0, PASCAL * SECOND, "Pa*s", Some(GIGA));
impl_fmt!(N1, P1, Z0, Z0, Z0, METER / SECOND, "m/s", None);
impl_fmt!(N3, P1, P1, N1, Z0, WMK, "W/m/K", Some(GIGA));
impl_fmt!(N2, Z0, P1, Z0, Z0, NEWTON / METER, "N/m", Some(GIGA));
impl_fmt!(Z0, Z0, P1, Z0, N1, KILOGRAM / MOL, "kg/mol", None);

fn get_prefix(value: f64, has_prefix: Option<f64>) -> (f64, &'static str) {
    if let Some(p) = has_prefix {
        let abs_value = value.abs();
        let e: i8 = if abs_value > PICO && abs_value < p {
            (abs_value.log10().floor() as i8).div_euclid(3) * 3
        } else {
            0
        };
        let prefix = 10.0f64.powi(e as i32);
        return (value / prefix, prefix_symbol(e));
    }
    (value, "")
}

fn prefix_symbol(exponent: i8) -> &'static str {
    match exponent {
        -12 => "p",
        -9 => "n",
        -6 => "µ",
        -3 => "m",
        3 => "k",
        6 => "M",
        9 => "G",
        _ => " ",
    }
}
