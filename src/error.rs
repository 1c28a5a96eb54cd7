//! Error types for edgecam.
//!
//! Every precondition of the frame transform is checked up front and
//! reported through [`FrameError`] before anything is written to the
//! output frame.

use thiserror::Error;

/// Edgecam error type
#[derive(Error, Debug)]
pub enum FrameError {
    /// Frame has no pixels
    #[error("empty frame: {width}x{height}")]
    EmptyFrame { width: usize, height: usize },

    /// Wrong number of channels per pixel
    #[error("unsupported channel count: expected {expected}, got {actual}")]
    UnsupportedChannels { expected: usize, actual: usize },

    /// Input and output frames differ in size
    #[error(
        "dimension mismatch: input {}x{}, output {}x{}",
        .input.0, .input.1, .output.0, .output.1
    )]
    DimensionMismatch {
        input: (usize, usize),
        output: (usize, usize),
    },

    /// Flat buffer does not hold width * height * 4 bytes
    #[error("buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// Host supplied negative or overflowing dimensions
    #[error("invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    /// Gaussian kernel size must be odd and non-zero
    #[error("invalid gaussian kernel size: {0}")]
    InvalidKernel(usize),

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),

    /// Host binding could not hand over a pixel buffer
    #[error("host buffer unavailable: {0}")]
    HostBuffer(String),
}

/// Result type alias for edgecam operations
pub type Result<T> = std::result::Result<T, FrameError>;

#[cfg(feature = "python")]
impl From<FrameError> for pyo3::PyErr {
    fn from(err: FrameError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
