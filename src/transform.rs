//! Frame edge transform.
//!
//! Turns one RGBA camera frame into an RGBA edge visualization:
//!
//! 1. Luma reduction (alpha ignored)
//! 2. 5x5 Gaussian smoothing, sigma derived from the kernel size
//! 3. Canny edge detection with thresholds 50 / 150
//! 4. Expansion of the 0/255 mask into all four channels
//!
//! Both frames are borrowed for the duration of the call. Preconditions
//! are checked before the output is touched; every intermediate buffer
//! lives only inside one call, so concurrent calls on different frames
//! need no coordination.

use ndarray::{Array3, ArrayView3, ArrayViewMut3};
use tracing::trace_span;

use crate::error::{FrameError, Result};
use crate::filters::blur::gaussian_blur_gray_u8;
use crate::filters::edge::canny_u8;
use crate::filters::grayscale::{gray_to_rgba_into, rgb_to_rgba_u8, rgba_to_gray_u8};

/// Gaussian kernel size (both directions)
pub const BLUR_KERNEL_SIZE: usize = 5;

/// Gaussian standard deviation; 0 derives it from the kernel size
pub const BLUR_SIGMA: f64 = 0.0;

/// Hysteresis thresholds on the 0-255 intensity scale
pub const CANNY_LOW_THRESHOLD: f64 = 50.0;
pub const CANNY_HIGH_THRESHOLD: f64 = 150.0;

/// Channels per pixel of both frames
pub const FRAME_CHANNELS: usize = 4;

fn check_frame(input: &ArrayView3<u8>) -> Result<()> {
    let (height, width, channels) = input.dim();
    if channels != FRAME_CHANNELS {
        return Err(FrameError::UnsupportedChannels {
            expected: FRAME_CHANNELS,
            actual: channels,
        });
    }
    if height == 0 || width == 0 {
        return Err(FrameError::EmptyFrame { width, height });
    }
    Ok(())
}

/// Write the edge visualization of `input` into `output`.
///
/// # Arguments
/// * `input` - RGBA frame of shape (height, width, 4)
/// * `output` - Pre-allocated RGBA frame of the same shape, fully overwritten
///
/// # Errors
/// Fails without writing if either frame is not 4-channel, if the frames
/// differ in size, or if the frame is empty.
pub fn edge_frame_into(input: ArrayView3<u8>, mut output: ArrayViewMut3<u8>) -> Result<()> {
    check_frame(&input)?;

    let (height, width, _) = input.dim();
    let (out_height, out_width, out_channels) = output.dim();
    if out_channels != FRAME_CHANNELS {
        return Err(FrameError::UnsupportedChannels {
            expected: FRAME_CHANNELS,
            actual: out_channels,
        });
    }
    if (out_height, out_width) != (height, width) {
        return Err(FrameError::DimensionMismatch {
            input: (width, height),
            output: (out_width, out_height),
        });
    }

    let _span = trace_span!("edge_frame", width, height).entered();

    let gray = rgba_to_gray_u8(input);
    let smoothed = gaussian_blur_gray_u8(gray.view(), BLUR_KERNEL_SIZE, BLUR_SIGMA)?;
    let edges = canny_u8(smoothed.view(), CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD);
    gray_to_rgba_into(edges.view(), output.view_mut());

    Ok(())
}

/// Edge visualization of `input` in a newly allocated frame.
pub fn edge_frame(input: ArrayView3<u8>) -> Result<Array3<u8>> {
    let mut output = Array3::<u8>::zeros(input.raw_dim());
    edge_frame_into(input, output.view_mut())?;
    Ok(output)
}

/// Byte length of a flat RGBA frame, checking that `data` has it.
pub fn check_frame_bytes(data: &[u8], width: usize, height: usize) -> Result<usize> {
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(FRAME_CHANNELS))
        .ok_or(FrameError::InvalidDimensions {
            width: i64::try_from(width).unwrap_or(i64::MAX),
            height: i64::try_from(height).unwrap_or(i64::MAX),
        })?;

    if data.len() != expected {
        return Err(FrameError::BufferLength {
            expected,
            actual: data.len(),
        });
    }
    Ok(expected)
}

/// Edge transform over flat, row-major RGBA byte buffers.
///
/// Both buffers must hold exactly `width * height * 4` bytes.
pub fn edge_frame_bytes(input: &[u8], output: &mut [u8], width: usize, height: usize) -> Result<()> {
    check_frame_bytes(input, width, height)?;
    check_frame_bytes(output, width, height)?;

    let shape = (height, width, FRAME_CHANNELS);
    let input = ArrayView3::from_shape(shape, input)?;
    let output = ArrayViewMut3::from_shape(shape, output)?;
    edge_frame_into(input, output)
}

/// Edge visualization of an RGB or RGBA frame.
///
/// RGB frames are widened with an opaque alpha channel before the
/// transform; the result is always RGBA.
pub fn process_frame(input: ArrayView3<u8>) -> Result<Array3<u8>> {
    match input.dim().2 {
        3 => edge_frame(rgb_to_rgba_u8(input).view()),
        FRAME_CHANNELS => edge_frame(input),
        actual => Err(FrameError::UnsupportedChannels {
            expected: FRAME_CHANNELS,
            actual,
        }),
    }
}
