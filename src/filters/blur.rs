//! Gaussian smoothing for single-channel u8 images.
//!
//! Separable two-pass convolution in integer arithmetic. Taps are Q8
//! fixed point, so the horizontal pass yields Q8 sums and the vertical
//! pass Q16 sums, rounded half-up back to u8 at the end. Borders use
//! reflect-101.

use ndarray::{Array2, ArrayView2};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::core::{gaussian_taps_q8, reflect_101, KERNEL_SHIFT};
use crate::error::Result;

/// Apply a square Gaussian blur to a grayscale u8 image.
///
/// # Arguments
/// * `input` - 2D array view of shape (height, width)
/// * `ksize` - Kernel size in both directions, odd
/// * `sigma` - Standard deviation; `<= 0` derives it from `ksize`
///
/// # Returns
/// Blurred image with same dimensions
pub fn gaussian_blur_gray_u8(input: ArrayView2<u8>, ksize: usize, sigma: f64) -> Result<Array2<u8>> {
    let (height, width) = input.dim();
    let taps = gaussian_taps_q8(ksize, sigma)?;
    if height == 0 || width == 0 {
        return Ok(input.to_owned());
    }
    let half = (ksize / 2) as isize;

    // Horizontal pass (Q8)
    let mut temp = vec![0u32; height * width];
    let horizontal = |(y, row): (usize, &mut [u32])| {
        for (x, out) in row.iter_mut().enumerate() {
            let mut sum = 0u32;
            for (ki, &kv) in taps.iter().enumerate() {
                let sx = reflect_101(x as isize + ki as isize - half, width);
                sum += kv * input[[y, sx]] as u32;
            }
            *out = sum;
        }
    };

    #[cfg(feature = "parallel")]
    temp.par_chunks_mut(width).enumerate().for_each(horizontal);
    #[cfg(not(feature = "parallel"))]
    temp.chunks_mut(width).enumerate().for_each(horizontal);

    // Vertical pass (Q16), rounded back to u8
    let shift = 2 * KERNEL_SHIFT;
    let round = 1u32 << (shift - 1);
    let mut blurred = vec![0u8; height * width];
    let vertical = |(y, row): (usize, &mut [u8])| {
        for (x, out) in row.iter_mut().enumerate() {
            let mut sum = 0u32;
            for (ki, &kv) in taps.iter().enumerate() {
                let sy = reflect_101(y as isize + ki as isize - half, height);
                sum += kv * temp[sy * width + x];
            }
            *out = ((sum + round) >> shift).min(255) as u8;
        }
    };

    #[cfg(feature = "parallel")]
    blurred.par_chunks_mut(width).enumerate().for_each(vertical);
    #[cfg(not(feature = "parallel"))]
    blurred.chunks_mut(width).enumerate().for_each(vertical);

    Ok(Array2::from_shape_vec((height, width), blurred)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameError;

    #[test]
    fn test_constant_image_unchanged() {
        let img = Array2::<u8>::from_elem((6, 9), 137);
        let result = gaussian_blur_gray_u8(img.view(), 5, 0.0).unwrap();
        assert!(result.iter().all(|&v| v == 137));
    }

    #[test]
    fn test_step_profile() {
        // Vertical step: columns 0..4 black, 4..8 white
        let img = Array2::from_shape_fn((5, 8), |(_, x)| if x < 4 { 0u8 } else { 255 });
        let result = gaussian_blur_gray_u8(img.view(), 5, 0.0).unwrap();

        // 255 * [0, 1, 5, 11, 15, 16] / 16, rounded
        let row: Vec<u8> = (1..7).map(|x| result[[2, x]]).collect();
        assert_eq!(row, vec![0, 16, 80, 175, 239, 255]);
    }

    #[test]
    fn test_single_point_spreads_binomially() {
        let mut img = Array2::<u8>::zeros((9, 9));
        img[[4, 4]] = 255;
        let result = gaussian_blur_gray_u8(img.view(), 5, 0.0).unwrap();

        // Centre weight 6 * 6 / 256
        assert_eq!(result[[4, 4]], 36);
        // Symmetric spread
        assert_eq!(result[[4, 3]], result[[4, 5]]);
        assert_eq!(result[[3, 4]], result[[5, 4]]);
        assert_eq!(result[[3, 4]], result[[4, 3]]);
        // Outside the 5x5 footprint nothing changes
        assert_eq!(result[[4, 7]], 0);
        assert_eq!(result[[1, 4]], 0);
    }

    #[test]
    fn test_reflect_border() {
        // Single bright column at the left edge reflects onto column 1 only
        let img = Array2::from_shape_fn((5, 6), |(_, x)| if x == 0 { 255u8 } else { 0 });
        let result = gaussian_blur_gray_u8(img.view(), 5, 0.0).unwrap();

        // x = 0: 6/16, x = 1: 4/16, x = 2: 1/16
        assert_eq!(result[[2, 0]], 96);
        assert_eq!(result[[2, 1]], 64);
        assert_eq!(result[[2, 2]], 16);
        assert_eq!(result[[2, 3]], 0);
    }

    #[test]
    fn test_tiny_image() {
        let img = Array2::<u8>::from_elem((1, 1), 42);
        let result = gaussian_blur_gray_u8(img.view(), 5, 0.0).unwrap();
        assert_eq!(result[[0, 0]], 42);
    }

    #[test]
    fn test_even_kernel_is_error() {
        let img = Array2::<u8>::zeros((4, 4));
        let err = gaussian_blur_gray_u8(img.view(), 6, 0.0).unwrap_err();
        assert!(matches!(err, FrameError::InvalidKernel(6)));
    }
}
