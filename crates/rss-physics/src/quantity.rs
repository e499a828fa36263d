//! Physical Quantity Types
//!
//! Every quantity is a newtype over one `f64` in SI units. Equality and
//! ordering are precision-aware through [`Quantity`], so call sites never
//! compare raw floats themselves.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Common contract of all physical quantities
pub trait Quantity: Copy {
    /// Values closer than this compare equal
    const PRECISION: f64;
    /// Lowest legal value
    const MIN_VALUE: f64;
    /// Highest legal value
    const MAX_VALUE: f64;
    /// Quantity kind, used in error messages
    const KIND: &'static str;

    /// Raw value in SI units
    fn value(self) -> f64;

    /// Finite and inside the legal range
    fn is_valid(self) -> bool {
        let value = self.value();
        value.is_finite() && (Self::MIN_VALUE..=Self::MAX_VALUE).contains(&value)
    }

    /// Precision-aware equality
    fn approx_eq(self, other: Self) -> bool {
        (self.value() - other.value()).abs() <= Self::PRECISION
    }
}

macro_rules! quantity {
    ($(#[$meta:meta])* $name:ident, $kind:literal, $precision:expr, $min:expr, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(f64);

        impl $name {
            pub const ZERO: Self = Self(0.0);

            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            pub fn abs(self) -> Self {
                Self(self.0.abs())
            }

            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }

            pub fn min(self, other: Self) -> Self {
                Self(self.0.min(other.0))
            }

            /// Zero within precision
            pub fn is_zero(self) -> bool {
                self.approx_eq(Self::ZERO)
            }
        }

        impl Quantity for $name {
            const PRECISION: f64 = $precision;
            const MIN_VALUE: f64 = $min;
            const MAX_VALUE: f64 = $max;
            const KIND: &'static str = $kind;

            fn value(self) -> f64 {
                self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.approx_eq(*other)
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                if self.approx_eq(*other) {
                    Some(Ordering::Equal)
                } else {
                    self.0.partial_cmp(&other.0)
                }
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $name {
            type Output = Self;
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl SubAssign for $name {
            fn sub_assign(&mut self, rhs: Self) {
                self.0 -= rhs.0;
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Mul<$name> for f64 {
            type Output = $name;
            fn mul(self, rhs: $name) -> $name {
                $name(self * rhs.0)
            }
        }

        impl Div<f64> for $name {
            type Output = Self;
            fn div(self, rhs: f64) -> Self {
                Self(self.0 / rhs)
            }
        }

        impl Div for $name {
            type Output = f64;
            fn div(self, rhs: Self) -> f64 {
                self.0 / rhs.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

quantity!(
    /// Signed distance (m)
    Distance, "distance", 1e-3, -1e9, 1e9
);

quantity!(
    /// Signed speed along one axis (m/s)
    Speed, "speed", 1e-3, -100.0, 100.0
);

quantity!(
    /// Signed acceleration along one axis (m/s²)
    Acceleration, "acceleration", 1e-4, -1e2, 1e2
);

quantity!(
    /// Non-negative duration (s)
    Duration, "duration", 1e-3, 0.0, 1e6
);

impl Mul<Duration> for Speed {
    type Output = Distance;
    fn mul(self, rhs: Duration) -> Distance {
        Distance::new(self.value() * rhs.value())
    }
}

impl Mul<Speed> for Duration {
    type Output = Distance;
    fn mul(self, rhs: Speed) -> Distance {
        rhs * self
    }
}

impl Mul<Duration> for Acceleration {
    type Output = Speed;
    fn mul(self, rhs: Duration) -> Speed {
        Speed::new(self.value() * rhs.value())
    }
}

impl Mul<Acceleration> for Duration {
    type Output = Speed;
    fn mul(self, rhs: Acceleration) -> Speed {
        rhs * self
    }
}

impl Div<Duration> for Distance {
    type Output = Speed;
    fn div(self, rhs: Duration) -> Speed {
        Speed::new(self.value() / rhs.value())
    }
}

impl Div<Speed> for Distance {
    type Output = Duration;
    fn div(self, rhs: Speed) -> Duration {
        Duration::new(self.value() / rhs.value())
    }
}

impl Div<Acceleration> for Speed {
    type Output = Duration;
    fn div(self, rhs: Acceleration) -> Duration {
        Duration::new(self.value() / rhs.value())
    }
}

impl Div<Duration> for Speed {
    type Output = Acceleration;
    fn div(self, rhs: Duration) -> Acceleration {
        Acceleration::new(self.value() / rhs.value())
    }
}
