//! Core utilities shared by the frame filters.
//!
//! This module provides:
//! - Border index interpolation (reflect-101 and replicate)
//! - Gaussian kernel generation in 8-bit fixed point
//! - A parallel/serial per-pixel fill helper

use ndarray::{Array2, Zip};

use crate::error::{FrameError, Result};

/// Fractional bits of the fixed-point Gaussian taps.
pub const KERNEL_SHIFT: u32 = 8;

/// Sum of every fixed-point kernel (1.0 in Q8).
pub const KERNEL_ONE: u32 = 1 << KERNEL_SHIFT;

/// Binomial kernels used when sigma is derived from the kernel size.
///
/// These are the tables the auto-sigma convention selects for small
/// kernels, expressed in Q8.
const SMALL_GAUSSIAN_TAPS: [&[u32]; 4] = [
    &[256],
    &[64, 128, 64],
    &[16, 64, 96, 64, 16],
    &[8, 28, 56, 72, 56, 28, 8],
];

// ============================================================================
// Border Interpolation
// ============================================================================

/// Map an out-of-range coordinate with reflect-101 (`gfedcb|abcdefgh|gfedcba`).
///
/// The edge pixel itself is not repeated. A length of 1 always maps to 0.
#[inline]
pub fn reflect_101(pos: isize, len: usize) -> usize {
    let n = len as isize;
    if n <= 1 {
        return 0;
    }

    let mut p = pos;
    while p < 0 || p >= n {
        if p < 0 {
            p = -p;
        } else {
            p = 2 * n - p - 2;
        }
    }
    p as usize
}

/// Map an out-of-range coordinate by clamping to the nearest edge (`aaaa|abcdefgh|hhhh`).
#[inline]
pub fn replicate(pos: isize, len: usize) -> usize {
    pos.clamp(0, len as isize - 1) as usize
}

// ============================================================================
// Gaussian Kernel
// ============================================================================

/// Standard deviation derived from a kernel size.
///
/// Used whenever a blur is requested with `sigma <= 0`.
pub fn auto_sigma(ksize: usize) -> f64 {
    0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Generate a 1D Gaussian kernel in Q8 fixed point.
///
/// # Arguments
/// * `ksize` - Number of taps, must be odd
/// * `sigma` - Standard deviation; `<= 0` derives it from `ksize`
///
/// # Returns
/// Taps summing to exactly [`KERNEL_ONE`]
pub fn gaussian_taps_q8(ksize: usize, sigma: f64) -> Result<Vec<u32>> {
    if ksize == 0 || ksize % 2 == 0 {
        return Err(FrameError::InvalidKernel(ksize));
    }

    if sigma <= 0.0 && ksize <= 7 {
        return Ok(SMALL_GAUSSIAN_TAPS[ksize / 2].to_vec());
    }

    let sigma = if sigma > 0.0 { sigma } else { auto_sigma(ksize) };
    let half = ksize / 2;

    let weights: Vec<f64> = (0..ksize)
        .map(|i| {
            let x = i as f64 - half as f64;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();

    let mut taps: Vec<u32> = weights
        .iter()
        .map(|w| (w / sum * KERNEL_ONE as f64).round() as u32)
        .collect();

    // Fold the rounding residue into the centre tap
    let total: i64 = taps.iter().map(|&t| t as i64).sum();
    taps[half] = (taps[half] as i64 + KERNEL_ONE as i64 - total).max(0) as u32;

    Ok(taps)
}

// ============================================================================
// Per-pixel fill
// ============================================================================

/// Fill every element of `out` from its `(row, col)` index.
///
/// Runs on the rayon pool when the `parallel` feature is enabled and
/// serially otherwise; the result is identical either way.
pub(crate) fn fill_indexed<T, F>(out: &mut Array2<T>, f: F)
where
    T: Send,
    F: Fn((usize, usize)) -> T + Sync + Send,
{
    let zip = Zip::indexed(out);

    #[cfg(feature = "parallel")]
    zip.par_for_each(|idx, v| *v = f(idx));

    #[cfg(not(feature = "parallel"))]
    zip.for_each(|idx, v| *v = f(idx));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_101() {
        // gfedcb|abcdefgh|gfedcba
        assert_eq!(reflect_101(-1, 8), 1);
        assert_eq!(reflect_101(-2, 8), 2);
        assert_eq!(reflect_101(8, 8), 6);
        assert_eq!(reflect_101(9, 8), 5);
        assert_eq!(reflect_101(3, 8), 3);
    }

    #[test]
    fn test_reflect_101_tiny() {
        assert_eq!(reflect_101(-2, 1), 0);
        assert_eq!(reflect_101(5, 1), 0);
        // Two pixels bounce back and forth
        assert_eq!(reflect_101(-2, 2), 0);
        assert_eq!(reflect_101(3, 2), 1);
    }

    #[test]
    fn test_replicate() {
        assert_eq!(replicate(-3, 5), 0);
        assert_eq!(replicate(7, 5), 4);
        assert_eq!(replicate(2, 5), 2);
    }

    #[test]
    fn test_auto_sigma_for_5() {
        assert!((auto_sigma(5) - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_taps_5_auto_are_binomial() {
        let taps = gaussian_taps_q8(5, 0.0).unwrap();
        assert_eq!(taps, vec![16, 64, 96, 64, 16]);
    }

    #[test]
    fn test_taps_sum_to_one() {
        for ksize in [1, 3, 5, 7, 9, 11, 15] {
            for sigma in [0.0, 0.8, 2.5] {
                let taps = gaussian_taps_q8(ksize, sigma).unwrap();
                assert_eq!(taps.len(), ksize);
                assert_eq!(taps.iter().sum::<u32>(), KERNEL_ONE, "ksize={} sigma={}", ksize, sigma);
            }
        }
    }

    #[test]
    fn test_taps_are_symmetric() {
        let taps = gaussian_taps_q8(9, 0.0).unwrap();
        for i in 0..taps.len() / 2 {
            assert_eq!(taps[i], taps[taps.len() - 1 - i]);
        }
    }

    #[test]
    fn test_even_kernel_rejected() {
        assert!(matches!(gaussian_taps_q8(4, 0.0), Err(FrameError::InvalidKernel(4))));
        assert!(matches!(gaussian_taps_q8(0, 1.0), Err(FrameError::InvalidKernel(0))));
    }

    #[test]
    fn test_fill_indexed() {
        let mut out = Array2::<usize>::zeros((3, 4));
        fill_indexed(&mut out, |(y, x)| y * 10 + x);
        assert_eq!(out[[2, 3]], 23);
        assert_eq!(out[[0, 1]], 1);
    }
}
