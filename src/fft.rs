//! Fast Fourier Transform (FFT) over split real/imaginary rails.
//!
//! This module implements the iterative radix-2 decimation-in-time variant of
//! the [Cooley–Tukey algorithm](https://en.wikipedia.org/wiki/Cooley%E2%80%93Tukey_FFT_algorithm).
//! Samples are reordered into bit-reversed order in place, then merged by
//! `log2(n)` butterfly stages. Twiddle factors come from a complex recurrence
//! re-seeded to `1 + 0i` at the start of every block, so no table is kept and
//! no per-element trigonometric call is made.
//!
//! The inverse is the forward engine followed by a division by `n`. This is
//! not a textbook IDFT: running the forward transform twice yields
//! `n·x[(n - k) mod n]`, so `ifft_split(fft_split(x))` returns `x` with its
//! index order reversed modulo `n` (index 0 stays put). Signals symmetric
//! under that reversal come back unchanged; [`reverse_index_order`] restores
//! natural order for everything else.

use core::f64::consts::PI;
use core::fmt;

use libm::{cos, sin};

use crate::num::SplitComplex;

/// Errors reported by the transforms and helpers of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// A buffer (or the Goertzel block) has zero length.
    EmptyInput,
    /// A transform length is not a power of two.
    NonPowerOfTwo,
    /// Paired buffers differ in length, or an input is shorter than required.
    MismatchedLengths,
    /// A scalar parameter is out of its domain.
    InvalidValue,
    /// Scratch space could not be reserved.
    AllocationFailed,
    /// A row, column or channel index lies outside the pixel buffer.
    OutOfBounds,
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftError::EmptyInput => write!(f, "input is empty"),
            FftError::NonPowerOfTwo => write!(f, "transform length must be a power of two"),
            FftError::MismatchedLengths => write!(f, "buffer lengths do not match"),
            FftError::InvalidValue => write!(f, "parameter out of range"),
            FftError::AllocationFailed => write!(f, "failed to allocate scratch buffers"),
            FftError::OutOfBounds => write!(f, "index outside the pixel buffer"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Check that two rails form a valid transform input and return their length.
pub(crate) fn check_rails(re: &[f64], im: &[f64]) -> Result<usize, FftError> {
    if re.len() != im.len() {
        return Err(FftError::MismatchedLengths);
    }
    let n = re.len();
    if n == 0 {
        return Err(FftError::EmptyInput);
    }
    if !n.is_power_of_two() {
        return Err(FftError::NonPowerOfTwo);
    }
    Ok(n)
}

/// An in-place transform over split rails.
///
/// Implementors provide the forward transform; the inverse is always the
/// forward transform followed by division by `n`.
pub trait SplitFft {
    /// Forward, unnormalized DFT (exponent `-2πi`) in place.
    fn fft_split(&self, re: &mut [f64], im: &mut [f64]) -> Result<(), FftError>;

    /// Forward transform, then scale both rails by `1/n`.
    fn ifft_split(&self, re: &mut [f64], im: &mut [f64]) -> Result<(), FftError> {
        self.fft_split(re, im)?;
        let n = re.len() as f64;
        for (r, i) in re.iter_mut().zip(im.iter_mut()) {
            *r /= n;
            *i /= n;
        }
        Ok(())
    }
}

/// Iterative radix-2 decimation-in-time FFT.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Radix2Fft;

impl SplitFft for Radix2Fft {
    fn fft_split(&self, re: &mut [f64], im: &mut [f64]) -> Result<(), FftError> {
        let n = check_rails(re, im)?;
        verbose!("radix-2 fft: n = {}", n);
        bit_reverse_permute(re, im);
        butterfly_stages(re, im);
        Ok(())
    }
}

/// Reorder both rails into bit-reversed index order.
///
/// `j` tracks the bit reversal of `i`: incrementing `i` is mirrored by a
/// carry that runs from the top bit of `j` downwards. Each pair is swapped
/// once, when `i < j`.
fn bit_reverse_permute(re: &mut [f64], im: &mut [f64]) {
    let n = re.len();
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            re.swap(i, j);
            im.swap(i, j);
        }
    }
}

fn butterfly_stages(re: &mut [f64], im: &mut [f64]) {
    let n = re.len();
    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let angle = -2.0 * PI / len as f64;
        let (wlen_re, wlen_im) = (cos(angle), sin(angle));
        for start in (0..n).step_by(len) {
            let (mut wr, mut wi) = (1.0, 0.0);
            for lo in start..start + half {
                let hi = lo + half;
                let (ur, ui) = (re[lo], im[lo]);
                let vr = re[hi] * wr - im[hi] * wi;
                let vi = re[hi] * wi + im[hi] * wr;
                re[lo] = ur + vr;
                im[lo] = ui + vi;
                re[hi] = ur - vr;
                im[hi] = ui - vi;

                let next_wr = wr * wlen_re - wi * wlen_im;
                wi = wr * wlen_im + wi * wlen_re;
                wr = next_wr;
            }
        }
        len <<= 1;
    }
}

/// Forward FFT of `(re, im)` in place. `re.len()` must be a power of two.
pub fn fft_split(re: &mut [f64], im: &mut [f64]) -> Result<(), FftError> {
    Radix2Fft.fft_split(re, im)
}

/// Forward FFT followed by division by `n`; see the module docs for the
/// index-order convention.
pub fn ifft_split(re: &mut [f64], im: &mut [f64]) -> Result<(), FftError> {
    Radix2Fft.ifft_split(re, im)
}

pub fn fft_split_complex(mut data: SplitComplex<'_>) -> Result<(), FftError> {
    let (re, im) = data.rails();
    Radix2Fft.fft_split(re, im)
}

pub fn ifft_split_complex(mut data: SplitComplex<'_>) -> Result<(), FftError> {
    let (re, im) = data.rails();
    Radix2Fft.ifft_split(re, im)
}

/// Map index `k` to `(n - k) mod n` on both rails.
///
/// Applied after [`ifft_split`] this turns the scaled double-forward result
/// back into the original sample order.
pub fn reverse_index_order(re: &mut [f64], im: &mut [f64]) -> Result<(), FftError> {
    if re.len() != im.len() {
        return Err(FftError::MismatchedLengths);
    }
    if re.len() > 1 {
        re[1..].reverse();
        im[1..].reverse();
    }
    Ok(())
}
