//! Split complex storage: one buffer for the real rail, one for the
//! imaginary rail, same length, same index correspondence.

use alloc::vec;
use alloc::vec::Vec;

use crate::fft::FftError;

/// Borrowed real/imaginary rails of equal length.
#[derive(Debug, PartialEq)]
pub struct SplitComplex<'a> {
    pub re: &'a mut [f64],
    pub im: &'a mut [f64],
}

impl<'a> SplitComplex<'a> {
    /// Pair two rails, rejecting rails of different lengths.
    pub fn new(re: &'a mut [f64], im: &'a mut [f64]) -> Result<Self, FftError> {
        if re.len() != im.len() {
            return Err(FftError::MismatchedLengths);
        }
        Ok(Self { re, im })
    }

    pub fn len(&self) -> usize {
        self.re.len()
    }

    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    /// Reborrow both rails at once.
    pub fn rails(&mut self) -> (&mut [f64], &mut [f64]) {
        (&mut *self.re, &mut *self.im)
    }
}

/// Owned real/imaginary rails.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplexVec {
    pub re: Vec<f64>,
    pub im: Vec<f64>,
}

impl ComplexVec {
    pub fn new(re: Vec<f64>, im: Vec<f64>) -> Result<Self, FftError> {
        if re.len() != im.len() {
            return Err(FftError::MismatchedLengths);
        }
        Ok(Self { re, im })
    }

    /// `len` zero samples.
    pub fn zeros(len: usize) -> Self {
        Self {
            re: vec![0.0; len],
            im: vec![0.0; len],
        }
    }

    /// Real-valued signal with an all-zero imaginary rail.
    pub fn from_real(real: &[f64]) -> Self {
        Self {
            re: real.to_vec(),
            im: vec![0.0; real.len()],
        }
    }

    pub fn len(&self) -> usize {
        self.re.len()
    }

    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    pub fn as_slices(&self) -> (&[f64], &[f64]) {
        (&self.re, &self.im)
    }

    pub fn as_mut_slices(&mut self) -> (&mut [f64], &mut [f64]) {
        (&mut self.re, &mut self.im)
    }

    /// Borrow as a [`SplitComplex`].
    pub fn as_split(&mut self) -> SplitComplex<'_> {
        SplitComplex {
            re: &mut self.re,
            im: &mut self.im,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_rejects_mismatched_rails() {
        let mut re = [0.0; 4];
        let mut im = [0.0; 3];
        assert_eq!(
            SplitComplex::new(&mut re, &mut im).unwrap_err(),
            FftError::MismatchedLengths
        );
    }

    #[test]
    fn complex_vec_from_real() {
        let cv = ComplexVec::from_real(&[1.0, -2.0, 3.5]);
        assert_eq!(cv.len(), 3);
        assert_eq!(cv.re, vec![1.0, -2.0, 3.5]);
        assert!(cv.im.iter().all(|&x| x == 0.0));
        assert!(ComplexVec::zeros(0).is_empty());
    }

    #[test]
    fn as_split_writes_through() {
        let mut cv = ComplexVec::zeros(2);
        {
            let mut split = cv.as_split();
            let (re, im) = split.rails();
            re[1] = 4.0;
            im[0] = -1.0;
        }
        assert_eq!(cv.as_slices(), (&[0.0, 4.0][..], &[-1.0, 0.0][..]));
    }
}
