//! Goertzel algorithm: single-bin DFT detector
//! no_std + alloc compatible
//!
//! The detector runs the second-order recursion
//!
//! ```text
//! w[k] = x[k] + 2·cos(ω)·w[k-1] − w[k-2],   ω = 2π m / N
//! ```
//!
//! over one block of `N` samples plus one zero-input flush step, then applies
//! the complex feedforward zero `−e^{−iω}` once to obtain the bin value
//! `y = w[N] − e^{−iω}·w[N−1]`. The bin index `m = N·f / fs` may be
//! fractional, so any frequency can be probed.
//!
//! [`goertzel_fixed`] does this in Q-format arithmetic:
//!
//! | quantity        | format          | storage |
//! |-----------------|-----------------|---------|
//! | input sample    | Q1.15           | 16 bit  |
//! | feedforward     | Q1.15 (re, im)  | 16 bit  |
//! | feedback        | Q2.14           | 16 bit  |
//! | delay line      | Q15             | 64 bit  |
//! | output          | Q5              | 64 bit  |
//!
//! Quantized values that would overflow their 16-bit word saturate (for
//! example `2·cos(0) = 2.0` in Q2.14 becomes `32767`). The returned magnitude
//! is in raw Q5 units, i.e. about 32 times [`goertzel_f64`].

use core::f64::consts::PI;

use libm::{cos, sin, sqrt};

use crate::fft::FftError;
use crate::fixed::{Fixed, FixedComplex};

/// Fractional bits of the input samples.
pub const X_QN: u32 = 15;
/// Fractional bits of the feedforward coefficient.
pub const COEFF_FF_QN: u32 = 15;
/// Fractional bits of the feedback coefficient.
pub const COEFF_FB_QN: u32 = 14;
/// Fractional bits of the delay line.
pub const W_QN: u32 = 15;
/// Fractional bits of the complex output.
pub const Y_QN: u32 = 5;

/// Quantized coefficients for one `(frequency, sample rate, block length)`.
///
/// The coefficients only depend on those three values, so a detector that
/// scans successive blocks builds this once and calls [`detect`](Self::detect)
/// per block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoertzelCoefficients {
    block_len: usize,
    bin: f64,
    feedforward: FixedComplex<COEFF_FF_QN>,
    feedback: Fixed<COEFF_FB_QN>,
}

impl GoertzelCoefficients {
    pub fn new(detect_hz: f64, sample_rate_hz: f64, block_len: usize) -> Result<Self, FftError> {
        let (bin, omega) = bin_and_omega(detect_hz, sample_rate_hz, block_len)?;

        let feedforward = FixedComplex::new(
            Fixed::from_f64(-cos(omega)).clamp_i16(),
            Fixed::from_f64(sin(omega)).clamp_i16(),
        );
        let feedback = Fixed::from_f64(2.0 * cos(omega)).clamp_i16();
        verbose!(
            "goertzel: n = {}, bin = {}, ff = ({}, {}), fb = {}",
            block_len,
            bin,
            feedforward.re.raw(),
            feedforward.im.raw(),
            feedback.raw()
        );
        Ok(Self {
            block_len,
            bin,
            feedforward,
            feedback,
        })
    }

    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Fractional DFT bin index `N·f / fs`.
    pub fn bin(&self) -> f64 {
        self.bin
    }

    pub fn feedforward(&self) -> FixedComplex<COEFF_FF_QN> {
        self.feedforward
    }

    pub fn feedback(&self) -> Fixed<COEFF_FB_QN> {
        self.feedback
    }

    /// Run the detector over the first `block_len` samples of `input`.
    ///
    /// Exactly `block_len + 1` filter steps are taken; samples past the block
    /// are ignored.
    pub fn detect(&self, input: &[f64]) -> Result<i32, FftError> {
        let n = self.block_len;
        if input.len() < n {
            return Err(FftError::MismatchedLengths);
        }

        let samples = input[..n]
            .iter()
            .map(|&x| Fixed::<X_QN>::from_f64(x).clamp_i16())
            .chain(core::iter::once(Fixed::ZERO));

        let mut w0 = Fixed::<W_QN>::ZERO;
        let mut w1 = Fixed::<W_QN>::ZERO;
        for x in samples {
            let w2 = w1;
            w1 = w0;
            w0 = w1.mul_q(self.feedback).add_q(x).sub_q(w2);
        }

        let ff = self.feedforward;
        let y = FixedComplex::<Y_QN>::new(
            w0.add_q(ff.re.mul_q(w1)).requantize::<Y_QN>(),
            ff.im.mul_q(w1).requantize::<Y_QN>(),
        );
        Ok(y.abs())
    }
}

fn bin_and_omega(
    detect_hz: f64,
    sample_rate_hz: f64,
    block_len: usize,
) -> Result<(f64, f64), FftError> {
    if block_len == 0 {
        return Err(FftError::EmptyInput);
    }
    if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 || !detect_hz.is_finite() {
        return Err(FftError::InvalidValue);
    }
    let n = block_len as f64;
    let bin = n * detect_hz / sample_rate_hz;
    Ok((bin, 2.0 * PI * bin / n))
}

/// Fixed-point estimate of the magnitude of `input` at `detect_hz`.
///
/// - `input`: real samples in `[-1, 1)`, at least `block_len` of them
/// - `detect_hz`: frequency to detect in Hz
/// - `sample_rate_hz`: sample rate in Hz
/// - `block_len`: number of samples in the block; need not be a power of two
///
/// The result is in Q5 units and grows with the energy at `detect_hz`.
pub fn goertzel_fixed(
    input: &[f64],
    detect_hz: f64,
    sample_rate_hz: f64,
    block_len: usize,
) -> Result<i32, FftError> {
    GoertzelCoefficients::new(detect_hz, sample_rate_hz, block_len)?.detect(input)
}

/// Floating-point reference of [`goertzel_fixed`], in natural units.
///
/// For a sinusoid of amplitude `a` sitting exactly on an integer bin this is
/// `a·N/2`.
pub fn goertzel_f64(
    input: &[f64],
    detect_hz: f64,
    sample_rate_hz: f64,
    block_len: usize,
) -> Result<f64, FftError> {
    let (_, omega) = bin_and_omega(detect_hz, sample_rate_hz, block_len)?;
    if input.len() < block_len {
        return Err(FftError::MismatchedLengths);
    }
    let coeff = 2.0 * cos(omega);
    let mut s_prev = 0.0;
    let mut s_prev2 = 0.0;
    for &x in input[..block_len].iter().chain(core::iter::once(&0.0)) {
        let s = x + coeff * s_prev - s_prev2;
        s_prev2 = s_prev;
        s_prev = s;
    }
    let re = s_prev - cos(omega) * s_prev2;
    let im = sin(omega) * s_prev2;
    Ok(sqrt(re * re + im * im))
}
