//! WebAssembly exports for the browser camera path.
//!
//! A web worker posts a flat RGBA buffer (as read from `ImageData`)
//! together with its width and height and gets a flat RGBA buffer of
//! the same size back.
//!
//! Build without the default `parallel` feature; the filters then run
//! single-threaded with identical output.

use ndarray::ArrayView3;
use wasm_bindgen::prelude::*;

use crate::error::FrameError;
use crate::transform::{check_frame_bytes, edge_frame, edge_frame_bytes, FRAME_CHANNELS};

fn js_error(err: FrameError) -> JsError {
    JsError::new(&err.to_string())
}

/// Edge visualization of an RGBA u8 frame.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Flat array of RGBA bytes, every pixel 0,0,0,0 or 255,255,255,255
#[wasm_bindgen]
pub fn edge_frame_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    check_frame_bytes(data, width, height).map_err(js_error)?;
    let input = ArrayView3::from_shape((height, width, FRAME_CHANNELS), data)
        .map_err(|e| js_error(e.into()))?;

    let result = edge_frame(input).map_err(js_error)?;
    Ok(result.into_raw_vec_and_offset().0)
}

/// Write the edge visualization of `input` into a caller-owned buffer.
///
/// `output` must have the same length as `input`.
#[wasm_bindgen]
pub fn edge_frame_into_wasm(
    input: &[u8],
    output: &mut [u8],
    width: usize,
    height: usize,
) -> Result<(), JsError> {
    edge_frame_bytes(input, output, width, height).map_err(js_error)
}
