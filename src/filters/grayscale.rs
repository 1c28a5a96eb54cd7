//! Grayscale reduction and channel expansion.
//!
//! Luma uses ITU-R BT.601 weights in 14-bit fixed point, the same
//! integer formula camera pipelines apply to RGBA frames:
//!
//! `gray = (4899 R + 9617 G + 1868 B + 2^13) >> 14`
//!
//! The weights sum to exactly `1 << 14`, so white stays 255 and
//! equal-channel pixels map to themselves. Alpha never contributes.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, ArrayViewMut3, Axis, Zip};

/// Fixed-point shift of the luma weights
const LUMA_SHIFT: u32 = 14;

/// ITU-R BT.601 luma coefficients scaled by 2^14
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let sum = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
    ((sum + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Reduce an RGBA (or RGB) u8 image to a single luma channel.
///
/// # Arguments
/// * `input` - 3D array view of shape (height, width, 3 or 4), channel order R, G, B[, A]
///
/// # Returns
/// 2D array of shape (height, width)
pub fn rgba_to_gray_u8(input: ArrayView3<u8>) -> Array2<u8> {
    let (height, width, _) = input.dim();
    let mut gray = Array2::<u8>::zeros((height, width));

    let zip = Zip::from(&mut gray).and(input.lanes(Axis(2)));

    #[cfg(feature = "parallel")]
    zip.par_for_each(|g, px| *g = luma(px[0], px[1], px[2]));

    #[cfg(not(feature = "parallel"))]
    zip.for_each(|g, px| *g = luma(px[0], px[1], px[2]));

    gray
}

/// Expand a single-channel image into an existing RGBA frame.
///
/// Every channel of the output pixel, alpha included, receives the
/// gray value. The output must already have shape (height, width, 4).
pub fn gray_to_rgba_into(gray: ArrayView2<u8>, mut output: ArrayViewMut3<u8>) {
    let zip = Zip::from(output.lanes_mut(Axis(2))).and(&gray);

    #[cfg(feature = "parallel")]
    zip.par_for_each(|mut px, &v| px.fill(v));

    #[cfg(not(feature = "parallel"))]
    zip.for_each(|mut px, &v| px.fill(v));
}

/// Add an opaque alpha channel to an RGB u8 image.
///
/// Camera bitmaps sometimes arrive without alpha; the transform only
/// accepts RGBA, so those frames are widened first.
pub fn rgb_to_rgba_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = input.dim();
    Array3::from_shape_fn((height, width, 4), |(y, x, c)| {
        if c < 3 {
            input[[y, x, c]]
        } else {
            255
        }
    })
}
