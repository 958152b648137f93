//! Spectral post-processing on split rails.

use libm::sqrt;

use crate::fft::FftError;

/// Multiply `val` element-wise by the coefficients in `fval`, in place.
///
/// Used both for windowing a time-domain block and for shaping a spectrum
/// before the inverse transform.
pub fn filter(val: &mut [f64], fval: &[f64]) -> Result<(), FftError> {
    if val.len() != fval.len() {
        return Err(FftError::MismatchedLengths);
    }
    for (v, &f) in val.iter_mut().zip(fval) {
        *v *= f;
    }
    Ok(())
}

/// Write the squared magnitude of every bin into `mag` and return
/// `sqrt((ε + Σ mag) / n)`.
///
/// The sum starts at `f64::EPSILON`, so the summary is strictly positive even
/// for an all-zero spectrum.
pub fn fft_mag_pwr(re: &[f64], im: &[f64], mag: &mut [f64]) -> Result<f64, FftError> {
    if re.len() != im.len() || re.len() != mag.len() {
        return Err(FftError::MismatchedLengths);
    }
    if re.is_empty() {
        return Err(FftError::EmptyInput);
    }
    let mut pwr = f64::EPSILON;
    for ((m, &r), &i) in mag.iter_mut().zip(re).zip(im) {
        *m = r * r + i * i;
        pwr += *m;
    }
    Ok(sqrt(pwr / re.len() as f64))
}

/// Index of the largest finite value in `mag`, first one on ties.
///
/// For a real input only the first half of the spectrum is meaningful, so
/// callers usually pass `&mag[..n / 2]`.
pub fn peak_bin(mag: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &m) in mag.iter().enumerate() {
        if !m.is_finite() {
            continue;
        }
        match best {
            Some((_, b)) if m <= b => {}
            _ => best = Some((i, m)),
        }
    }
    best.map(|(i, _)| i)
}
