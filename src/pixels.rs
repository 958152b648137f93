//! Raw pixel buffers as one-dimensional signals.
//!
//! Image decoding happens elsewhere; this module only needs the decoded
//! buffer: `width × height` pixels of `channels` interleaved bytes each, rows
//! stored top to bottom. A row or column of one channel becomes a signal
//! scaled to `[0, 1]` that can be fed to the transforms.

use alloc::vec::Vec;

use crate::fft::FftError;

/// Anything that can hand out a decoded, interleaved 8-bit pixel buffer.
pub trait PixelSource {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn channels(&self) -> usize;
    /// `width · height · channels` bytes, row-major.
    fn data(&self) -> &[u8];
}

/// Owned pixel buffer with validated dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawImage {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl RawImage {
    pub fn new(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self, FftError> {
        if channels == 0 {
            return Err(FftError::InvalidValue);
        }
        let expected = width
            .checked_mul(height)
            .and_then(|px| px.checked_mul(channels))
            .ok_or(FftError::InvalidValue)?;
        if data.len() != expected {
            return Err(FftError::MismatchedLengths);
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

impl PixelSource for RawImage {
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }
    fn channels(&self) -> usize {
        self.channels
    }
    fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Copy `channel` of pixel row `row` into `out`, scaled by `1/255`.
///
/// `out` must hold exactly `width` samples.
pub fn row_signal<P: PixelSource + ?Sized>(
    src: &P,
    row: usize,
    channel: usize,
    out: &mut [f64],
) -> Result<(), FftError> {
    let (width, channels) = (src.width(), src.channels());
    if row >= src.height() || channel >= channels {
        return Err(FftError::OutOfBounds);
    }
    if out.len() != width {
        return Err(FftError::MismatchedLengths);
    }
    let start = row * width * channels;
    let bytes = src
        .data()
        .get(start..start + width * channels)
        .ok_or(FftError::OutOfBounds)?;
    for (o, px) in out.iter_mut().zip(bytes.chunks_exact(channels)) {
        *o = px[channel] as f64 / 255.0;
    }
    Ok(())
}

/// Copy `channel` of pixel column `col` into `out`, scaled by `1/255`.
///
/// `out` must hold exactly `height` samples.
pub fn column_signal<P: PixelSource + ?Sized>(
    src: &P,
    col: usize,
    channel: usize,
    out: &mut [f64],
) -> Result<(), FftError> {
    let (width, channels) = (src.width(), src.channels());
    if col >= width || channel >= channels {
        return Err(FftError::OutOfBounds);
    }
    if out.len() != src.height() {
        return Err(FftError::MismatchedLengths);
    }
    let data = src.data();
    let stride = width * channels;
    for (y, o) in out.iter_mut().enumerate() {
        let idx = y * stride + col * channels + channel;
        *o = *data.get(idx).ok_or(FftError::OutOfBounds)? as f64 / 255.0;
    }
    Ok(())
}
