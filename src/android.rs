//! Android entry point via JNI.
//!
//! The camera activity copies each preview bitmap (`ARGB_8888`, which is
//! RGBA byte order in memory) into a direct `ByteBuffer` and calls
//!
//! ```java
//! native void processFrame(ByteBuffer input, ByteBuffer output, int width, int height);
//! ```
//!
//! on `com.example.edgedetection.EdgeDetector`. Both buffers are borrowed
//! for the duration of the call only. A rejected frame raises
//! `IllegalArgumentException`, so the activity can skip it and keep the
//! preview running.

use jni::objects::{JByteBuffer, JObject};
use jni::sys::jint;
use jni::JNIEnv;
use tracing::warn;

use crate::error::{FrameError, Result};
use crate::transform::edge_frame_bytes;

const ILLEGAL_ARGUMENT: &str = "java/lang/IllegalArgumentException";

/// Map any `jni::errors::Error` into `FrameError::HostBuffer`.
fn jni_err(context: &str, e: jni::errors::Error) -> FrameError {
    FrameError::HostBuffer(format!("{context}: {e}"))
}

/// Address and capacity of a direct `ByteBuffer`.
fn direct_buffer(env: &JNIEnv<'_>, buf: &JByteBuffer<'_>, name: &str) -> Result<(*mut u8, usize)> {
    let ptr = env
        .get_direct_buffer_address(buf)
        .map_err(|e| jni_err(name, e))?;
    let len = env
        .get_direct_buffer_capacity(buf)
        .map_err(|e| jni_err(name, e))?;
    Ok((ptr, len))
}

fn frame_dimensions(width: jint, height: jint) -> Result<(usize, usize)> {
    match (usize::try_from(width), usize::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(FrameError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        }),
    }
}

/// Whether `[a, a + a_len)` and `[b, b + b_len)` share any byte. A range
/// whose end does not fit in `usize` counts as overlapping.
fn ranges_overlap(a: usize, a_len: usize, b: usize, b_len: usize) -> bool {
    if a_len == 0 || b_len == 0 {
        return false;
    }
    match (a.checked_add(a_len), b.checked_add(b_len)) {
        (Some(a_end), Some(b_end)) => a < b_end && b < a_end,
        _ => true,
    }
}

fn process_direct_buffers(
    env: &JNIEnv<'_>,
    input: &JByteBuffer<'_>,
    output: &JByteBuffer<'_>,
    width: jint,
    height: jint,
) -> Result<()> {
    let (width, height) = frame_dimensions(width, height)?;
    let (in_ptr, in_len) = direct_buffer(env, input, "input buffer")?;
    let (out_ptr, out_len) = direct_buffer(env, output, "output buffer")?;

    let (in_start, out_start) = (in_ptr as usize, out_ptr as usize);
    if ranges_overlap(in_start, in_len, out_start, out_len) {
        return Err(FrameError::HostBuffer(
            "input and output buffers overlap".into(),
        ));
    }

    // SAFETY: both pointers come from direct buffers the caller keeps
    // alive for this call, each valid for its reported capacity, and the
    // ranges were checked to be disjoint above.
    let input = unsafe { std::slice::from_raw_parts(in_ptr as *const u8, in_len) };
    let output = unsafe { std::slice::from_raw_parts_mut(out_ptr, out_len) };

    edge_frame_bytes(input, output, width, height)
}

/// `EdgeDetector.processFrame(ByteBuffer, ByteBuffer, int, int)`
#[no_mangle]
pub extern "system" fn Java_com_example_edgedetection_EdgeDetector_processFrame<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    input: JByteBuffer<'local>,
    output: JByteBuffer<'local>,
    width: jint,
    height: jint,
) {
    if let Err(err) = process_direct_buffers(&env, &input, &output, width, height) {
        warn!(%err, width, height, "dropping camera frame");
        if let Err(e) = env.throw_new(ILLEGAL_ARGUMENT, err.to_string()) {
            warn!(%e, "failed to raise IllegalArgumentException");
        }
    }
}
