//! Edge detection: Sobel gradients and two-threshold Canny.
//!
//! Canny follows the classic integer formulation:
//! - 3x3 Sobel derivatives with replicated borders
//! - L1 magnitude `|dx| + |dy|`
//! - Non-maximum suppression along the gradient direction, quantized to
//!   0°, 45°, 90°, 135° with a `tan(22.5°)` test in 15-bit fixed point
//! - Hysteresis: pixels above `high` seed edges, pixels above `low` join
//!   them through 8-connected neighbours
//!
//! Output is a binary mask (0 or 255) with the input's dimensions.

use ndarray::{Array2, ArrayView2};
use tracing::trace;

use super::core::{fill_indexed, replicate};

/// `tan(22.5°)` scaled by 2^15
const TG22: i32 = 13573;
const CANNY_SHIFT: i32 = 15;

/// Pixel classification during non-maximum suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// Local maximum above the low threshold, not yet connected
    Candidate,
    NotEdge,
    Edge,
}

// ============================================================================
// Sobel Gradients
// ============================================================================

/// Compute 3x3 Sobel derivatives of a grayscale image.
///
/// Border pixels are replicated. Values fit i16 (at most 4 * 255).
///
/// # Returns
/// `(dx, dy)` with the same dimensions as `input`
pub fn sobel_3x3(input: ArrayView2<u8>) -> (Array2<i16>, Array2<i16>) {
    let (height, width) = input.dim();
    let px = |y: isize, x: isize| input[[replicate(y, height), replicate(x, width)]] as i16;

    let mut dx = Array2::<i16>::zeros((height, width));
    let mut dy = Array2::<i16>::zeros((height, width));

    fill_indexed(&mut dx, |(y, x)| {
        let (y, x) = (y as isize, x as isize);
        (px(y - 1, x + 1) + 2 * px(y, x + 1) + px(y + 1, x + 1))
            - (px(y - 1, x - 1) + 2 * px(y, x - 1) + px(y + 1, x - 1))
    });
    fill_indexed(&mut dy, |(y, x)| {
        let (y, x) = (y as isize, x as isize);
        (px(y + 1, x - 1) + 2 * px(y + 1, x) + px(y + 1, x + 1))
            - (px(y - 1, x - 1) + 2 * px(y - 1, x) + px(y - 1, x + 1))
    });

    (dx, dy)
}

// ============================================================================
// Canny
// ============================================================================

/// Check whether `m` at padded index `i` survives non-maximum suppression.
///
/// Ties are broken towards the left/upper pixel so a symmetric ridge
/// yields a one-pixel line.
#[inline]
fn is_local_max(mag: &[i32], i: usize, stride: usize, m: i32, xs: i32, ys: i32) -> bool {
    let ax = xs.abs();
    let ay = ys.abs() << CANNY_SHIFT;
    let tg22x = ax * TG22;

    if ay < tg22x {
        // Near-horizontal gradient: compare left and right
        return m > mag[i - 1] && m >= mag[i + 1];
    }

    let tg67x = tg22x + (ax << (CANNY_SHIFT + 1));
    if ay > tg67x {
        // Near-vertical gradient: compare above and below
        return m > mag[i - stride] && m >= mag[i + stride];
    }

    // Diagonal: the sign of dx * dy picks the diagonal
    let s: isize = if (xs ^ ys) < 0 { -1 } else { 1 };
    let above = (i as isize - stride as isize - s) as usize;
    let below = (i as isize + stride as isize + s) as usize;
    m > mag[above] && m > mag[below]
}

/// Detect edges in a grayscale u8 image.
///
/// # Arguments
/// * `input` - 2D array view of shape (height, width)
/// * `low` - Hysteresis low threshold (floored)
/// * `high` - Hysteresis high threshold (floored); swapped with `low` if smaller
///
/// # Returns
/// Binary edge mask, 255 for edge pixels and 0 elsewhere
pub fn canny_u8(input: ArrayView2<u8>, low: f64, high: f64) -> Array2<u8> {
    let (height, width) = input.dim();
    let (low, high) = if low > high { (high, low) } else { (low, high) };
    let (low, high) = (low.floor() as i32, high.floor() as i32);

    let (dx, dy) = sobel_3x3(input);

    // Magnitude and marks carry a one-pixel frame so neighbour lookups
    // never leave the buffer. The frame is zero magnitude and never an edge.
    let stride = width + 2;
    let mut mag = vec![0i32; (height + 2) * stride];
    for y in 0..height {
        for x in 0..width {
            mag[(y + 1) * stride + x + 1] = (dx[[y, x]] as i32).abs() + (dy[[y, x]] as i32).abs();
        }
    }

    let mut map = vec![Mark::NotEdge; (height + 2) * stride];
    let mut stack = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let i = (y + 1) * stride + x + 1;
            let m = mag[i];
            if m <= low {
                continue;
            }

            let (xs, ys) = (dx[[y, x]] as i32, dy[[y, x]] as i32);
            if !is_local_max(&mag, i, stride, m, xs, ys) {
                continue;
            }

            if m > high {
                map[i] = Mark::Edge;
                stack.push(i);
            } else {
                map[i] = Mark::Candidate;
            }
        }
    }

    trace!(seeds = stack.len(), "canny hysteresis");

    let s = stride as isize;
    let neighbours = [-s - 1, -s, -s + 1, -1, 1, s - 1, s, s + 1];
    while let Some(i) = stack.pop() {
        for off in neighbours {
            let n = (i as isize + off) as usize;
            if map[n] == Mark::Candidate {
                map[n] = Mark::Edge;
                stack.push(n);
            }
        }
    }

    Array2::from_shape_fn((height, width), |(y, x)| {
        if map[(y + 1) * stride + x + 1] == Mark::Edge {
            255
        } else {
            0
        }
    })
}
