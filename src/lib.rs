//! # splitfft - small no_std spectral kernel for Rust
//!
//! In-place radix-2 FFT over split real/imaginary `f64` rails, a DCT-II built
//! on top of it, a handful of spectral post-processing helpers and a
//! fixed-point Goertzel tone detector.
//!
//! ## Features
//!
//! - **In-place split-rail transforms**: callers own `re`/`im` buffers, the
//!   kernel never keeps a reference past the call
//! - **DCT-II** through the even/odd packing trick (one complex FFT of length `n`)
//! - **Spectral helpers**: Hann window, element-wise filter, squared magnitude
//!   and an RMS-like power summary
//! - **Fixed-point Goertzel** using a typed Q-format value ([`fixed::Fixed`])
//! - **Raw pixel rows/columns** as signals through [`pixels::PixelSource`]
//! - **Tone synthesis**: phase-continuous 16-bit sine bursts
//!   ([`tone::ToneGenerator`]) to drive the detector
//!
//! ## Cargo Features
//!
//! - `std` (default): implement `std::error::Error` for [`FftError`]
//! - `verbose-logging`: emit `log::debug!` records from the transforms
//!
//! ## Size contract
//!
//! FFT, inverse FFT and DCT lengths must be powers of two. Violations are
//! reported as [`FftError`] values before any buffer is touched; nothing in
//! this crate panics on caller input; fixed-point arithmetic saturates.
//!
//! ```
//! use splitfft::fft::{fft_split, ifft_split};
//! use splitfft::spectrum::fft_mag_pwr;
//!
//! let mut re = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
//! let mut im = [0.0; 8];
//! fft_split(&mut re, &mut im).unwrap();
//! assert!(re.iter().all(|&x| (x - 1.0).abs() < 1e-12));
//!
//! let mut mag = [0.0; 8];
//! let pwr = fft_mag_pwr(&re, &im, &mut mag).unwrap();
//! assert!(pwr > 0.0);
//!
//! ifft_split(&mut re, &mut im).unwrap();
//! assert!((re[0] - 1.0).abs() < 1e-12);
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or https://opensource.org/licenses/MIT)
//!
//! at your option.

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Debug-level diagnostics, compiled out unless `verbose-logging` is enabled.
#[cfg(feature = "verbose-logging")]
macro_rules! verbose {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(not(feature = "verbose-logging"))]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if false {
            let _ = format_args!($($arg)*);
        }
    };
}

/// Q-format fixed-point values
///
/// Typed precision tracking used by the Goertzel detector.
pub mod fixed;

/// Split real/imaginary buffer pairs.
pub mod num;

/// Fast Fourier Transform (FFT)
///
/// In-place radix-2 decimation-in-time transform and its scaled inverse.
pub mod fft;

/// Discrete Cosine Transform (DCT)
///
/// DCT-II computed with a single complex FFT of the input length.
pub mod dct;

/// Window functions
pub mod window;

/// Spectral post-processing: filtering, magnitude and power.
pub mod spectrum;

/// Goertzel algorithm
///
/// Fixed-point single-bin detector plus a floating-point reference.
pub mod goertzel;

/// Raw pixel buffers as one-dimensional signals.
pub mod pixels;

/// Phase-continuous tone synthesis into 16-bit PCM.
pub mod tone;

pub use fft::{fft_split, ifft_split, FftError, Radix2Fft, SplitFft};
pub use num::{ComplexVec, SplitComplex};
