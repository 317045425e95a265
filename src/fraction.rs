// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Arbitrary-precision rational numbers used as the plaintext alphabet.
//!
//! A [`BigFraction`] is a signed numerator over a strictly positive
//! denominator. Values are not kept in lowest terms; call
//! [`BigFraction::simplify`] when a canonical form is needed. Equality and
//! ordering use cross multiplication, so `1/2 == 2/4` holds without
//! simplifying either side.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::str::FromStr;

use num_bigint_dig::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::{Error, Result};

/// Immutable rational number `numerator / denominator`.
#[derive(Clone)]
pub struct BigFraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl BigFraction {
    /// Build a fraction, moving any sign onto the numerator.
    ///
    /// Fails with [`Error::InvalidFraction`] when `denominator` is zero.
    pub fn new(numerator: BigInt, denominator: BigInt) -> Result<Self> {
        if denominator.is_zero() {
            return Err(Error::InvalidFraction);
        }

        if denominator.is_negative() {
            return Ok(Self { numerator: -numerator, denominator: -denominator });
        }

        Ok(Self { numerator, denominator })
    }

    /// Caller guarantees `denominator > 0`.
    pub(crate) fn from_parts(numerator: BigInt, denominator: BigInt) -> Self {
        debug_assert!(denominator.is_positive());
        Self { numerator, denominator }
    }

    /// Build an integral fraction `value / 1`.
    pub fn from_integer(value: BigInt) -> Self {
        Self { numerator: value, denominator: BigInt::one() }
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    /// Always strictly positive.
    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    /// Returns `-1`, `0` or `1`.
    pub fn signum(&self) -> i8 {
        match self.numerator.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    pub fn abs(&self) -> Self {
        Self { numerator: self.numerator.abs(), denominator: self.denominator.clone() }
    }

    /// Reduce to lowest terms.
    pub fn simplify(&self) -> Self {
        let gcd = self.numerator.gcd(&self.denominator);
        if gcd.is_zero() || gcd.is_one() {
            return self.clone();
        }

        Self { numerator: &self.numerator / &gcd, denominator: &self.denominator / &gcd }
    }

    /// Integer part, truncated toward zero.
    pub fn to_big_int(&self) -> BigInt {
        &self.numerator / &self.denominator
    }

    /// Cross products `(self.n * other.d, other.n * self.d)`.
    fn cross(&self, other: &Self) -> (BigInt, BigInt) {
        (&self.numerator * &other.denominator, &other.numerator * &self.denominator)
    }
}

impl PartialEq for BigFraction {
    fn eq(&self, other: &Self) -> bool {
        let (lhs, rhs) = self.cross(other);
        lhs == rhs
    }
}

impl Eq for BigFraction {}

impl PartialOrd for BigFraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigFraction {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross multiplication preserves order.
        let (lhs, rhs) = self.cross(other);
        lhs.cmp(&rhs)
    }
}

impl fmt::Debug for BigFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigFraction({}/{})", self.numerator, self.denominator)
    }
}

impl fmt::Display for BigFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl From<BigInt> for BigFraction {
    fn from(value: BigInt) -> Self {
        Self::from_integer(value)
    }
}

impl From<BigUint> for BigFraction {
    fn from(value: BigUint) -> Self {
        Self::from_integer(BigInt::from_biguint(Sign::Plus, value))
    }
}

impl From<i64> for BigFraction {
    fn from(value: i64) -> Self {
        Self::from_integer(BigInt::from(value))
    }
}

impl From<i32> for BigFraction {
    fn from(value: i32) -> Self {
        Self::from_integer(BigInt::from(value))
    }
}

/// Parses `"7"`, `"-12.345"`, `".5"` and `"22/7"`.
impl FromStr for BigFraction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::InvalidParameters(format!("invalid fraction literal `{s}`"));

        if let Some((num, den)) = s.split_once('/') {
            let numerator = num.trim().parse::<BigInt>().map_err(|_| invalid())?;
            let denominator = den.trim().parse::<BigInt>().map_err(|_| invalid())?;
            return Self::new(numerator, denominator);
        }

        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let digits = format!("{int_part}{frac_part}");
        let magnitude = digits.parse::<BigInt>().map_err(|_| invalid())?;
        let numerator = if negative { -magnitude } else { magnitude };
        let denominator = num_traits::pow(BigInt::from(10u32), frac_part.len());

        Self::new(numerator, denominator)
    }
}

impl<'a, 'b> Add<&'b BigFraction> for &'a BigFraction {
    type Output = BigFraction;

    fn add(self, rhs: &'b BigFraction) -> BigFraction {
        let (lhs, rhs_scaled) = self.cross(rhs);
        BigFraction { numerator: lhs + rhs_scaled, denominator: &self.denominator * &rhs.denominator }
    }
}

impl<'a, 'b> Sub<&'b BigFraction> for &'a BigFraction {
    type Output = BigFraction;

    fn sub(self, rhs: &'b BigFraction) -> BigFraction {
        let (lhs, rhs_scaled) = self.cross(rhs);
        BigFraction { numerator: lhs - rhs_scaled, denominator: &self.denominator * &rhs.denominator }
    }
}

impl<'a, 'b> Mul<&'b BigFraction> for &'a BigFraction {
    type Output = BigFraction;

    fn mul(self, rhs: &'b BigFraction) -> BigFraction {
        BigFraction {
            numerator: &self.numerator * &rhs.numerator,
            denominator: &self.denominator * &rhs.denominator,
        }
    }
}

impl<'a, 'b> Div<&'b BigFraction> for &'a BigFraction {
    type Output = BigFraction;

    /// # Panics
    /// Panics when `rhs` is zero, like integer division.
    fn div(self, rhs: &'b BigFraction) -> BigFraction {
        assert!(!rhs.numerator.is_zero(), "attempt to divide a BigFraction by zero");

        let numerator = &self.numerator * &rhs.denominator;
        let denominator = &self.denominator * &rhs.numerator;
        if denominator.is_negative() {
            BigFraction { numerator: -numerator, denominator: -denominator }
        } else {
            BigFraction { numerator, denominator }
        }
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<BigFraction> for BigFraction {
            type Output = BigFraction;

            fn $method(self, rhs: BigFraction) -> BigFraction {
                $imp::$method(&self, &rhs)
            }
        }

        impl<'a> $imp<&'a BigFraction> for BigFraction {
            type Output = BigFraction;

            fn $method(self, rhs: &'a BigFraction) -> BigFraction {
                $imp::$method(&self, rhs)
            }
        }

        impl<'a> $imp<BigFraction> for &'a BigFraction {
            type Output = BigFraction;

            fn $method(self, rhs: BigFraction) -> BigFraction {
                $imp::$method(self, &rhs)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);

impl Neg for BigFraction {
    type Output = BigFraction;

    fn neg(self) -> BigFraction {
        BigFraction { numerator: -self.numerator, denominator: self.denominator }
    }
}

impl<'a> Neg for &'a BigFraction {
    type Output = BigFraction;

    fn neg(self) -> BigFraction {
        BigFraction { numerator: -&self.numerator, denominator: self.denominator.clone() }
    }
}

/// Remainder of the fraction modulo an integer, keeping the sign of `self`.
impl<'a, 'b> Rem<&'b BigInt> for &'a BigFraction {
    type Output = BigFraction;

    fn rem(self, modulus: &'b BigInt) -> BigFraction {
        let scaled = &self.denominator * modulus;
        BigFraction { numerator: &self.numerator % &scaled, denominator: self.denominator.clone() }
    }
}

impl Zero for BigFraction {
    fn zero() -> Self {
        Self::from_integer(BigInt::zero())
    }

    fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }
}

impl One for BigFraction {
    fn one() -> Self {
        Self::from_integer(BigInt::one())
    }
}
