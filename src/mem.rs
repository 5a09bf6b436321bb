//! Primitive memory copy.
//!
//! [`memcpy`] is the raw fallback that compiled code calls before a richer implementation is
//! linked in. [`copy_bytes`] wraps it for callers that hold slices.

use core::fmt;

/// Copies `count` bytes from `src` to `dst` and returns `dst`.
///
/// Bytes are copied one at a time from the lowest address to the highest. Every access is
/// volatile so the loop is neither widened nor turned back into a call to `memcpy` itself.
///
/// On freestanding targets this function is exported under the C name `memcpy`. It overrides
/// the weak definition from `compiler_builtins` if that one is enabled as well.
///
/// # Safety
///
/// - `src` must be valid for reads of `count` bytes.
/// - `dst` must be valid for writes of `count` bytes.
/// - The two regions must not overlap.
///
/// Violating any of these is undefined behavior. With `count == 0` no memory is accessed, so
/// dangling pointers are fine.
#[cfg_attr(target_os = "none", no_mangle)]
pub unsafe extern "C" fn memcpy(dst: *mut u8, src: *const u8, count: usize) -> *mut u8 {
    let mut offset = 0;
    while offset < count {
        // SAFETY: `offset < count` and the caller guarantees that both regions are valid
        // for `count` bytes and do not overlap.
        unsafe {
            let byte = src.add(offset).read_volatile();
            dst.add(offset).write_volatile(byte);
        }
        offset += 1;
    }
    dst
}

/// Error returned by [`copy_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyError {
    /// Source and destination have different lengths.
    LengthMismatch { dst: usize, src: usize },
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyError::LengthMismatch { dst, src } => write!(
                f,
                "cannot copy {src} bytes into a destination of {dst} bytes"
            ),
        }
    }
}

/// Copies all of `src` into `dst`.
///
/// The borrow checker already rules out overlap between a `&mut` and a `&` slice, so the only
/// remaining precondition of [`memcpy`] is the length, which is checked here. On a mismatch
/// `dst` is left untouched.
pub fn copy_bytes(dst: &mut [u8], src: &[u8]) -> Result<(), CopyError> {
    if dst.len() != src.len() {
        return Err(CopyError::LengthMismatch {
            dst: dst.len(),
            src: src.len(),
        });
    }
    // SAFETY: both slices are valid for `src.len()` bytes and cannot alias.
    unsafe { memcpy(dst.as_mut_ptr(), src.as_ptr(), src.len()) };
    Ok(())
}
