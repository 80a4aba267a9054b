use super::Quantity;
use approx::{AbsDiffEq, RelativeEq};
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Neg, Sub};
use typenum::{Diff, Integer, Negate, Prod, Quot, Sum};

/// Multiplication
impl<T1, T2, U1, U2> Mul<Quantity<T2, U2>> for Quantity<T1, U1>
where
    T1: Mul<T2>,
    U1: Add<U2>,
{
    type Output = Quantity<Prod<T1, T2>, Sum<U1, U2>>;
    fn mul(self, other: Quantity<T2, U2>) -> Self::Output {
        Quantity(self.0 * other.0, PhantomData)
    }
}

impl<U> Mul<Quantity<f64, U>> for f64 {
    type Output = Quantity<f64, U>;
    fn mul(self, other: Quantity<f64, U>) -> Self::Output {
        Quantity(self * other.0, PhantomData)
    }
}

impl<U> Mul<f64> for Quantity<f64, U> {
    type Output = Quantity<f64, U>;
    fn mul(self, other: f64) -> Self::Output {
        Quantity(self.0 * other, PhantomData)
    }
}

/// Division
impl<T1, T2, U1, U2> Div<Quantity<T2, U2>> for Quantity<T1, U1>
where
    T1: Div<T2>,
    U1: Sub<U2>,
{
    type Output = Quantity<Quot<T1, T2>, Diff<U1, U2>>;
    fn div(self, other: Quantity<T2, U2>) -> Self::Output {
        Quantity(self.0 / other.0, PhantomData)
    }
}

impl<U: Neg> Div<Quantity<f64, U>> for f64 {
    type Output = Quantity<f64, Negate<U>>;
    fn div(self, other: Quantity<f64, U>) -> Self::Output {
        Quantity(self / other.0, PhantomData)
    }
}

impl<U> Div<f64> for Quantity<f64, U> {
    type Output = Quantity<f64, U>;
    fn div(self, other: f64) -> Self::Output {
        Quantity(self.0 / other, PhantomData)
    }
}

/// Addition and subtraction
impl<T1, T2, U> Add<Quantity<T2, U>> for Quantity<T1, U>
where
    T1: Add<T2>,
{
    type Output = Quantity<Sum<T1, T2>, U>;
    fn add(self, other: Quantity<T2, U>) -> Self::Output {
        Quantity(self.0 + other.0, PhantomData)
    }
}

impl<T1, T2, U> Sub<Quantity<T2, U>> for Quantity<T1, U>
where
    T1: Sub<T2>,
{
    type Output = Quantity<Diff<T1, T2>, U>;
    fn sub(self, other: Quantity<T2, U>) -> Self::Output {
        Quantity(self.0 - other.0, PhantomData)
    }
}

/// Integer powers
impl<U> Quantity<f64, U> {
    pub fn powi<E: Integer>(self) -> Quantity<f64, Prod<U, E>>
    where
        U: Mul<E>,
    {
        Quantity(self.0.powi(E::I32), PhantomData)
    }
}

/// Comparisons
impl<T: PartialEq, U> PartialEq for Quantity<T, U> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: PartialOrd, U> PartialOrd for Quantity<T, U> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl<T: AbsDiffEq, U> AbsDiffEq for Quantity<T, U> {
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.0.abs_diff_eq(&other.0, epsilon)
    }
}

impl<T: RelativeEq, U> RelativeEq for Quantity<T, U> {
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.0.relative_eq(&other.0, epsilon, max_relative)
    }
}
