//! Discrete Cosine Transform (DCT) module
//! DCT-II for power-of-two lengths through one complex FFT
//! no_std + alloc compatible
//!
//! The input is repacked so that even-indexed samples run forward from the
//! start of the real rail and odd-indexed samples run backward from its end:
//!
//! ```text
//! re = [x0, x2, x4, ..., x5, x3, x1]
//! ```
//!
//! An `n`-point FFT of that sequence (imaginary rail zero) followed by a
//! quarter-sample phase rotation `e^{-iπk/2n}` yields
//! `X[k] = 2·Σ x[i]·cos(π k (2i + 1) / 2n)`.

use alloc::vec::Vec;
use core::f64::consts::PI;

use libm::{cos, sin};

use crate::fft::{FftError, Radix2Fft, SplitFft};

/// DCT-II of `val` in place using the built-in radix-2 FFT.
///
/// `val.len()` must be a power of two of at least 2. A constant input `c`
/// produces `2·n·c` in bin 0 and zeros elsewhere.
pub fn dct2_inplace(val: &mut [f64]) -> Result<(), FftError> {
    dct2_inplace_with(&Radix2Fft, val)
}

/// DCT-II of `val` in place, driving the supplied FFT engine.
///
/// Two scratch rails of length `n` are reserved up front; if that fails
/// `val` is left untouched and [`FftError::AllocationFailed`] is returned.
pub fn dct2_inplace_with<F: SplitFft + ?Sized>(fft: &F, val: &mut [f64]) -> Result<(), FftError> {
    let n = val.len();
    if n == 0 {
        return Err(FftError::EmptyInput);
    }
    if n < 2 || !n.is_power_of_two() {
        return Err(FftError::NonPowerOfTwo);
    }
    let mut re = scratch(n)?;
    let mut im = scratch(n)?;
    verbose!("dct2: n = {}", n);

    for (i, pair) in val.chunks_exact(2).enumerate() {
        re[i] = pair[0];
        re[n - 1 - i] = pair[1];
    }

    fft.fft_split(&mut re, &mut im)?;

    let step = -PI / (2.0 * n as f64);
    for (i, out) in val.iter_mut().enumerate() {
        let theta = step * i as f64;
        *out = 2.0 * re[i] * cos(theta) - 2.0 * im[i] * sin(theta);
    }
    Ok(())
}

/// Allocating wrapper around [`dct2_inplace`].
pub fn dct2(input: &[f64]) -> Result<Vec<f64>, FftError> {
    let mut out = scratch(input.len())?;
    out.copy_from_slice(input);
    dct2_inplace(&mut out)?;
    Ok(out)
}

fn scratch(n: usize) -> Result<Vec<f64>, FftError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(n)
        .map_err(|_| FftError::AllocationFailed)?;
    buf.resize(n, 0.0);
    Ok(buf)
}
