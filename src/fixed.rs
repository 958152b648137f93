//! Q-format fixed-point arithmetic
//!
//! A [`Fixed<N>`] is a signed integer read as `raw / 2^N`. Only the number of
//! fractional bits is tracked, so Q1.15 and Q17.15 values are both
//! `Fixed<15>`; the integer part is whatever the storage allows. Raw values
//! and every intermediate product live in an `i64`.
//!
//! Mixed-precision operations always produce a result at the precision of the
//! left operand:
//!
//! - [`Fixed::mul_q`] multiplies and drops the right operand's fractional
//!   bits with a rounding shift;
//! - [`Fixed::add_q`] / [`Fixed::sub_q`] align the right operand first
//!   (shift left when it has fewer fractional bits, round-shift right when it
//!   has more).
//!
//! Because the precision is a const parameter, mixing values is only possible
//! through these explicit conversions.
//!
//! Arithmetic saturates at the `i64` bounds instead of wrapping, and shifts
//! wider than the storage are clamped.

use core::ops::{Add, Neg, Sub};
use libm::{ldexp, rint, sqrt};

/// Drop `bits` low bits from `x`, adding one half first so the result is
/// rounded rather than truncated. `bits == 0` returns `x` unchanged.
#[inline]
pub const fn round_off(x: i64, bits: u32) -> i64 {
    saturate(round_off_wide(x as i128, bits))
}

/// `round_off` on a 128-bit intermediate, e.g. a full `i64 × i64` product.
#[inline]
const fn round_off_wide(x: i128, bits: u32) -> i128 {
    if bits == 0 {
        x
    } else if bits >= i128::BITS {
        0
    } else {
        x.saturating_add(1i128 << (bits - 1)) >> bits
    }
}

#[inline]
const fn saturate(x: i128) -> i64 {
    if x > i64::MAX as i128 {
        i64::MAX
    } else if x < i64::MIN as i128 {
        i64::MIN
    } else {
        x as i64
    }
}

/// Signed fixed-point number with `N` fractional bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed<const N: u32>(i64);

impl<const N: u32> Fixed<N> {
    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = N;
    pub const ZERO: Self = Self(0);
    /// The representable value closest to +1.0.
    pub const ONE: Self = Self(if N < 63 { (1i64 << N) - 1 } else { i64::MAX });
    /// One half (0.5); zero when there are no fractional bits.
    pub const HALF: Self = Self(match N {
        0 => 0,
        1..=63 => 1i64 << (N - 1),
        _ => i64::MAX,
    });

    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Quantize `value`, rounding half to even.
    ///
    /// Non-finite inputs saturate (`NaN` becomes zero).
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        Self(rint(value * Self::scale()) as i64)
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::scale()
    }

    #[inline]
    fn scale() -> f64 {
        ldexp(1.0, N.min(i32::MAX as u32) as i32)
    }

    /// Re-express the value with `M` fractional bits.
    ///
    /// Gaining precision saturates when the shifted value leaves `i64`.
    #[inline]
    pub fn requantize<const M: u32>(self) -> Fixed<M> {
        let shift = M.abs_diff(N);
        if M <= N {
            Fixed(round_off(self.0, shift))
        } else if self.0 == 0 {
            Fixed(0)
        } else if shift >= i64::BITS {
            Fixed(if self.0 > 0 { i64::MAX } else { i64::MIN })
        } else {
            Fixed(saturate((self.0 as i128) << shift))
        }
    }

    /// Multiply, keeping this operand's precision.
    #[inline]
    pub fn mul_q<const M: u32>(self, rhs: Fixed<M>) -> Self {
        Self(saturate(round_off_wide(self.0 as i128 * rhs.0 as i128, M)))
    }

    /// Add `rhs` after aligning it to this operand's precision.
    #[inline]
    pub fn add_q<const M: u32>(self, rhs: Fixed<M>) -> Self {
        Self(self.0.saturating_add(rhs.requantize::<N>().0))
    }

    /// Subtract `rhs`, aligned the same way as [`Fixed::add_q`].
    ///
    /// The right operand is negated before alignment so rounding matches
    /// adding its negation.
    #[inline]
    pub fn sub_q<const M: u32>(self, rhs: Fixed<M>) -> Self {
        self.add_q(-rhs)
    }

    /// Clamp into the range of a 16-bit storage word.
    #[inline]
    pub fn clamp_i16(self) -> Self {
        Self(self.0.clamp(i16::MIN as i64, i16::MAX as i64))
    }
}

impl<const N: u32> Add for Fixed<N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl<const N: u32> Sub for Fixed<N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl<const N: u32> Neg for Fixed<N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

/// Complex value with `N` fractional bits on both parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedComplex<const N: u32> {
    pub re: Fixed<N>,
    pub im: Fixed<N>,
}

impl<const N: u32> FixedComplex<N> {
    pub const fn new(re: Fixed<N>, im: Fixed<N>) -> Self {
        Self { re, im }
    }

    /// Quantize a floating-point complex value given as `(re, im)`.
    pub fn from_f64(re: f64, im: f64) -> Self {
        Self::new(Fixed::from_f64(re), Fixed::from_f64(im))
    }

    /// Magnitude in raw units, i.e. still scaled by `2^N`.
    ///
    /// The square root is taken in floating point and rounded to the nearest
    /// integer; results beyond `i32` saturate.
    pub fn abs(&self) -> i32 {
        let re = self.re.raw() as f64;
        let im = self.im.raw() as f64;
        rint(sqrt(re * re + im * im)) as i32
    }
}
