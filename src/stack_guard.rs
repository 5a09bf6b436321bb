//! Stack-growth hook.
//!
//! Compilers that emit segmented-stack prologues call `__morestack` when the current stack
//! segment runs out. Bare-metal targets have no segmented stacks, but the symbol must still
//! resolve at link time.

/// No-op stack-growth hook.
///
/// Does nothing and returns immediately. Safe to call any number of times from any context.
#[cfg_attr(target_os = "none", no_mangle)]
#[inline(never)]
pub extern "C" fn __morestack() {}
