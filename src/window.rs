//! Window functions applied before a transform

use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::PI;

use libm::cos;

use crate::fft::FftError;

/// Fill `out` with a symmetric Hann window, `0.5·(1 − cos(2π i / (n − 1)))`.
///
/// Both end points are zero and the window peaks at 1.0 in the middle (exactly
/// on the centre sample for odd lengths). At least two samples are required.
pub fn hann(out: &mut [f64]) -> Result<(), FftError> {
    let n = out.len();
    if n == 0 {
        return Err(FftError::EmptyInput);
    }
    if n < 2 {
        return Err(FftError::InvalidValue);
    }
    let denom = (n - 1) as f64;
    for (i, w) in out.iter_mut().enumerate() {
        *w = 0.5 * (1.0 - cos(2.0 * PI * i as f64 / denom));
    }
    Ok(())
}

/// Generate a Hann window of length `len`.
pub fn hann_vec(len: usize) -> Result<Vec<f64>, FftError> {
    let mut out = vec![0.0; len];
    hann(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_endpoints_and_peak() {
        let w = hann_vec(9).unwrap();
        assert!(w[0].abs() < 1e-12);
        assert!(w[8].abs() < 1e-12);
        assert!((w[4] - 1.0).abs() < 1e-12);
        assert!(w.iter().all(|&x| (0.0..=1.0).contains(&x)));
    }

    #[test]
    fn test_hann_symmetric() {
        let w = hann_vec(64).unwrap();
        for (a, b) in w.iter().zip(w.iter().rev()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_hann_too_short() {
        assert_eq!(hann_vec(0), Err(FftError::EmptyInput));
        assert_eq!(hann_vec(1), Err(FftError::InvalidValue));
        assert!(hann_vec(2).unwrap().iter().all(|&x| x.abs() < 1e-12));
    }
}
