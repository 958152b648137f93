//! Phase-continuous sine tone generator producing 16-bit PCM.
//!
//! Successive tones are stitched without clicks: the oscillator phase carries
//! over from one tone to the next, and tone lengths are placed on a running
//! clock so that rounding to whole samples never accumulates. A tone of
//! `t` ms ends at sample `rint(clock · fs)`, where `clock` is the sum of all
//! requested durations so far.

use alloc::vec::Vec;
use core::f64::consts::PI;

use libm::{fmod, rint, sin};

use crate::fft::FftError;

/// Peak sample value; samples are clamped to `±AMPLITUDE`.
pub const AMPLITUDE: i16 = i16::MAX;

const TWO_PI: f64 = 2.0 * PI;

/// Stateful tone generator for one output stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneGenerator {
    sample_rate_hz: f64,
    phase: f64,
    clock_s: f64,
    emitted: u64,
}

impl ToneGenerator {
    pub fn new(sample_rate_hz: f64) -> Result<Self, FftError> {
        if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
            return Err(FftError::InvalidValue);
        }
        Ok(Self {
            sample_rate_hz,
            phase: 0.0,
            clock_s: 0.0,
            emitted: 0,
        })
    }

    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    /// Current oscillator phase in `[0, 2π)`.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Total number of samples written so far.
    pub fn samples_emitted(&self) -> u64 {
        self.emitted
    }

    /// Append `freq_hz` lasting `duration_ms` to `out`, returning the number
    /// of samples written.
    ///
    /// The count may be zero for a very short tone; its duration is still
    /// added to the clock and shows up in the following tone.
    pub fn tone(
        &mut self,
        freq_hz: f64,
        duration_ms: f64,
        out: &mut Vec<i16>,
    ) -> Result<usize, FftError> {
        if !freq_hz.is_finite() || !duration_ms.is_finite() || duration_ms < 0.0 {
            return Err(FftError::InvalidValue);
        }
        let clock_s = self.clock_s + duration_ms / 1000.0;
        let end = rint(clock_s * self.sample_rate_hz);
        if !end.is_finite() || end > usize::MAX as f64 {
            return Err(FftError::InvalidValue);
        }
        let count = (end as u64).saturating_sub(self.emitted) as usize;
        out.try_reserve(count)
            .map_err(|_| FftError::AllocationFailed)?;
        verbose!(
            "tone: {} Hz for {} ms, {} samples",
            freq_hz,
            duration_ms,
            count
        );

        let step = TWO_PI * freq_hz / self.sample_rate_hz;
        let amp = AMPLITUDE as f64;
        for _ in 0..count {
            let s = (amp * sin(self.phase)) as i64;
            out.push(s.clamp(-(AMPLITUDE as i64), AMPLITUDE as i64) as i16);
            self.phase = wrap_phase(self.phase + step);
        }

        self.clock_s = clock_s;
        self.emitted = end as u64;
        Ok(count)
    }
}

/// Reduce `phase` into `[0, 2π)`, also for negative frequencies.
#[inline]
fn wrap_phase(phase: f64) -> f64 {
    let p = fmod(phase, TWO_PI);
    if p < 0.0 {
        p + TWO_PI
    } else {
        p
    }
}

/// Convert 16-bit PCM to `f64` samples in `[-1, 1)`.
pub fn pcm_to_f64(pcm: &[i16], out: &mut [f64]) -> Result<(), FftError> {
    if pcm.len() != out.len() {
        return Err(FftError::MismatchedLengths);
    }
    for (o, &s) in out.iter_mut().zip(pcm) {
        *o = s as f64 / 32768.0;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn quarter_rate_tone_hits_peaks() {
        let mut gen = ToneGenerator::new(8000.0).unwrap();
        let mut out = Vec::new();
        assert_eq!(gen.tone(2000.0, 1.0, &mut out).unwrap(), 8);
        assert_eq!(out[0], 0);
        assert_eq!(out[1], AMPLITUDE);
        assert!(out[3] <= -(AMPLITUDE - 1));
        assert!(out.iter().all(|&s| s >= -AMPLITUDE));
    }

    #[test]
    fn short_tones_accumulate_on_clock() {
        let mut gen = ToneGenerator::new(8000.0).unwrap();
        let mut out = Vec::new();
        let counts: Vec<usize> = (0..10)
            .map(|_| gen.tone(1000.0, 0.1, &mut out).unwrap())
            .collect();
        assert_eq!(counts[..3], [1, 1, 0]);
        assert_eq!(out.len(), 8);
        assert_eq!(gen.samples_emitted(), 8);
    }

    #[test]
    fn phase_carries_across_tones() {
        let mut split = ToneGenerator::new(8000.0).unwrap();
        let mut a = Vec::new();
        split.tone(1000.0, 1.0, &mut a).unwrap();
        split.tone(1000.0, 1.0, &mut a).unwrap();

        let mut whole = ToneGenerator::new(8000.0).unwrap();
        let mut b = Vec::new();
        whole.tone(1000.0, 2.0, &mut b).unwrap();
        assert_eq!(a, b);
        assert!(split.phase() >= 0.0 && split.phase() < TWO_PI);
    }

    #[test]
    fn negative_frequency_keeps_phase_in_range() {
        let mut gen = ToneGenerator::new(8000.0).unwrap();
        let mut out = Vec::new();
        gen.tone(-1000.0, 1.0, &mut out).unwrap();
        assert!(gen.phase() >= 0.0 && gen.phase() < TWO_PI);
        assert!(out[2] < 0);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(ToneGenerator::new(0.0), Err(FftError::InvalidValue));
        assert_eq!(ToneGenerator::new(f64::NAN), Err(FftError::InvalidValue));
        let mut gen = ToneGenerator::new(8000.0).unwrap();
        let mut out = Vec::new();
        assert_eq!(gen.tone(f64::NAN, 1.0, &mut out), Err(FftError::InvalidValue));
        assert_eq!(gen.tone(1000.0, -1.0, &mut out), Err(FftError::InvalidValue));
        assert!(out.is_empty());
        assert_eq!(gen.samples_emitted(), 0);
    }

    #[test]
    fn pcm_scaling() {
        let mut out = vec![0.0; 3];
        pcm_to_f64(&[0, 16384, -32768], &mut out).unwrap();
        assert_eq!(out, [0.0, 0.5, -1.0]);
        assert_eq!(
            pcm_to_f64(&[0], &mut out),
            Err(FftError::MismatchedLengths)
        );
    }
}
