// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Minimal complex arithmetic for evaluation results.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::format::format_number;

/// Complex number in rectangular form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex {
    /// The imaginary unit.
    pub const I: Self = Self { re: 0.0, im: 1.0 };

    /// Construct from parts.
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Purely real value.
    pub const fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// Construct from modulus and argument.
    pub fn from_polar(r: f64, theta: f64) -> Self {
        Self::new(r * theta.cos(), r * theta.sin())
    }

    /// Modulus.
    pub fn abs(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Argument in `(-π, π]`.
    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Principal natural logarithm.
    pub fn ln(self) -> Self {
        Self::new(self.abs().ln(), self.arg())
    }

    /// Exponential.
    pub fn exp(self) -> Self {
        Self::from_polar(self.re.exp(), self.im)
    }

    /// Principal square root.
    pub fn sqrt(self) -> Self {
        Self::from_polar(self.abs().sqrt(), self.arg() / 2.0)
    }

    /// Principal power `self ^ exp`.
    pub fn powc(self, exp: Self) -> Self {
        if self.re == 0.0 && self.im == 0.0 {
            return if exp.re == 0.0 && exp.im == 0.0 {
                Self::real(1.0)
            } else {
                Self::real(0.0)
            };
        }
        // Integer powers by repeated multiplication keep i^2 exactly -1.
        if exp.im == 0.0 && exp.re.fract() == 0.0 && exp.re.abs() <= 64.0 {
            let n = exp.re as i32;
            let mut acc = Self::real(1.0);
            for _ in 0..n.unsigned_abs() {
                acc = acc * self;
            }
            return if n < 0 { Self::real(1.0) / acc } else { acc };
        }
        (exp * self.ln()).exp()
    }

    /// Sine.
    pub fn sin(self) -> Self {
        Self::new(
            self.re.sin() * self.im.cosh(),
            self.re.cos() * self.im.sinh(),
        )
    }

    /// Cosine.
    pub fn cos(self) -> Self {
        Self::new(
            self.re.cos() * self.im.cosh(),
            -self.re.sin() * self.im.sinh(),
        )
    }
}

impl Add for Complex {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Div for Complex {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        let denom = rhs.re * rhs.re + rhs.im * rhs.im;
        Self::new(
            (self.re * rhs.re + self.im * rhs.im) / denom,
            (self.im * rhs.re - self.re * rhs.im) / denom,
        )
    }
}

impl Neg for Complex {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let im_text = |im: f64| {
            if im == 1.0 {
                "i".to_string()
            } else {
                format!("{}i", format_number(im))
            }
        };
        if self.im == 0.0 {
            return f.write_str(&format_number(self.re));
        }
        if self.re == 0.0 {
            return if self.im < 0.0 {
                write!(f, "-{}", im_text(-self.im))
            } else {
                f.write_str(&im_text(self.im))
            };
        }
        let sign = if self.im < 0.0 { '-' } else { '+' };
        write!(
            f,
            "{} {sign} {}",
            format_number(self.re),
            im_text(self.im.abs())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn product_of_example_pair() {
        let z = Complex::new(2.0, 3.0) * Complex::new(1.0, -1.0);
        assert_eq!(z, Complex::new(5.0, 1.0));
        assert_eq!(z.to_string(), "5 + i");
    }

    #[test]
    fn display_forms() {
        assert_eq!(Complex::new(0.0, -1.0).to_string(), "-i");
        assert_eq!(Complex::new(0.0, 2.0).to_string(), "2i");
        assert_eq!(Complex::new(1.5, -2.0).to_string(), "1.5 - 2i");
    }

    #[test]
    fn integer_powers_are_exact() {
        assert_eq!(Complex::I.powc(Complex::real(2.0)), Complex::real(-1.0));
    }

    #[test]
    fn log_of_negative_one() {
        let z = Complex::real(-1.0).ln();
        assert_relative_eq!(z.re, 0.0);
        assert_relative_eq!(z.im, std::f64::consts::PI);
    }
}
