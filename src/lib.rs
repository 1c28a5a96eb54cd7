//! Edgecam
//!
//! Edge visualization for camera frames: one RGBA frame in, one RGBA
//! frame out, with white (255) pixels on detected edges and black (0)
//! everywhere else.
//!
//! ## Pipeline
//! 1. Luma reduction (BT.601, fixed point)
//! 2. 5x5 Gaussian smoothing, sigma derived from the kernel size
//! 3. Canny edge detection, thresholds 50 / 150
//! 4. Channel expansion, alpha included
//!
//! The thresholds and kernel size are fixed constants in [`transform`].
//!
//! ## Image Format
//! Frames are `ndarray` arrays of shape (height, width, 4) with `u8`
//! channels, or flat row-major RGBA byte slices via
//! [`transform::edge_frame_bytes`].
//!
//! ## Bindings
//! - `python`: PyO3 module `edgecam` (numpy arrays)
//! - `wasm`: wasm-bindgen exports for browser workers
//! - `jni`: Android `EdgeDetector.processFrame` over direct byte buffers

pub mod error;
pub mod filters;
pub mod transform;

#[cfg(feature = "wasm")]
pub mod wasm;

#[cfg(feature = "jni")]
pub mod android;

pub use error::{FrameError, Result};
pub use transform::{edge_frame, edge_frame_bytes, edge_frame_into, process_frame};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3, PyReadwriteArray3};
    use pyo3::prelude::*;
    use tracing::warn;

    use crate::transform;

    /// Edge visualization of an RGBA u8 frame.
    ///
    /// Returns a new (height, width, 4) array whose pixels are all 0 or
    /// all 255.
    #[pyfunction]
    pub fn edge_frame<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = transform::edge_frame(image.as_array()).inspect_err(|err| {
            warn!(%err, "edge_frame rejected frame");
        })?;
        Ok(result.into_pyarray(py))
    }

    /// Write the edge visualization of `image` into `output` in place.
    ///
    /// Both arrays must be (height, width, 4) u8.
    #[pyfunction]
    pub fn edge_frame_into<'py>(
        image: PyReadonlyArray3<'py, u8>,
        mut output: PyReadwriteArray3<'py, u8>,
    ) -> PyResult<()> {
        transform::edge_frame_into(image.as_array(), output.as_array_mut()).inspect_err(|err| {
            warn!(%err, "edge_frame_into rejected frame");
        })?;
        Ok(())
    }

    /// Edge visualization of an RGB or RGBA u8 frame.
    ///
    /// RGB input gets an opaque alpha channel first; output is RGBA.
    #[pyfunction]
    pub fn process_frame<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = transform::process_frame(image.as_array()).inspect_err(|err| {
            warn!(%err, "process_frame rejected frame");
        })?;
        Ok(result.into_pyarray(py))
    }

    /// Edgecam extension module
    #[pymodule]
    pub fn edgecam(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(edge_frame, m)?)?;
        m.add_function(wrap_pyfunction!(edge_frame_into, m)?)?;
        m.add_function(wrap_pyfunction!(process_frame, m)?)?;

        m.add("BLUR_KERNEL_SIZE", transform::BLUR_KERNEL_SIZE)?;
        m.add("CANNY_LOW_THRESHOLD", transform::CANNY_LOW_THRESHOLD)?;
        m.add("CANNY_HIGH_THRESHOLD", transform::CANNY_HIGH_THRESHOLD)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::edgecam;
