//! C ABI surface, exported from the `cdylib` build.
//!
//! ```c
//! void apply_gain(int16_t *samples, size_t length, float gain);
//! ```

use crate::dsp::gain;

/// Applies `gain` in place to the first `length` samples behind `samples`.
///
/// # Safety
/// `samples` must point to at least `length` valid, writable `i16`s that no
/// other thread touches for the duration of the call. A null pointer or a
/// zero length is a no-op.
#[no_mangle]
pub unsafe extern "C" fn apply_gain(samples: *mut i16, length: usize, gain: f32) {
    if samples.is_null() || length == 0 {
        return;
    }
    // Safety: upheld by the caller as documented above.
    let block = unsafe { std::slice::from_raw_parts_mut(samples, length) };
    gain::apply_gain(block, gain);
}
