//! Filter primitives behind the frame transform.
//!
//! ## Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | RGBA8 | (H, W, 4) | u8 | Camera frame, R G B A, 0-255 |
//! | RGB8 | (H, W, 3) | u8 | Camera frame without alpha |
//! | Gray8 | (H, W) | u8 | Luma, smoothed luma, or 0/255 edge mask |
//! | Gradient | (H, W) | i16 | Sobel derivative |
//!
//! ## Architecture
//!
//! - **Integer arithmetic** - luma, smoothing and gradients are exact, so
//!   results are reproducible across platforms and thread counts
//! - **Borrowed inputs** - every filter takes an `ArrayView` and allocates
//!   only its own result
//! - **Thread-safe** - rows are processed on rayon when the `parallel`
//!   feature is enabled
//!
//! ## Modules
//!
//! - **grayscale**: RGBA/RGB → luma, luma → RGBA, RGB → RGBA
//! - **blur**: separable Gaussian smoothing
//! - **edge**: Sobel gradients, Canny
//! - **core**: border interpolation, kernels, parallel fill

pub mod core;
pub mod grayscale;
pub mod blur;
pub mod edge;
