//! A minimal startup shim for bare-metal Rust kernels.
//!
//! The shim provides the handful of symbols a freshly linked kernel expects before any richer
//! runtime exists: a no-op `__morestack` stack-growth hook, a portable `memcpy`, and the
//! `_cstart` trampoline that the assembly startup code jumps to once a stack is set up.
//!
//! Use the [`entry_point`] macro to generate `_cstart` for your kernel:
//!
//! ```ignore
//! use core::ffi::{c_char, c_int};
//!
//! bootshim::entry_point!(kernel_main);
//!
//! fn kernel_main(_argc: c_int, _argv: *const *const c_char) -> c_int {
//!     0
//! }
//! ```
//!
//! The C-named symbols are only exported when building for a freestanding target
//! (`target_os = "none"`). On hosted targets they are ordinary Rust functions.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]

pub use bootshim_config::{BootConfig, BootMode, LevelFilter, ReturnAction};
pub use logger::init_logger;

/// Loading of the boot configuration from a static value or a JSON blob.
pub mod config;
pub mod entry;
pub mod error;
pub mod halt;
/// Provides a logger that writes boot messages to the serial port.
pub mod logger;
pub mod mem;
mod serial;
pub mod stack_guard;

/// Defines the entry point function.
///
/// The function must have the signature `fn(c_int, *const *const c_char) -> c_int`.
///
/// This macro creates a function exported as `_cstart`, which the assembly startup code calls
/// once the stack is set up. The advantage of using this macro instead of providing an own
/// `_cstart` function is that the macro ensures that the function and argument types are correct
/// and that the entry point is only ever entered once.
///
/// The configuration can be given either as a `BootConfig` reference or as JSON bytes, e.g.
/// `entry_point!(kernel_main, config_json = include_bytes!("boot.json"))`. A JSON config that
/// fails to parse falls back to the default configuration.
#[macro_export]
macro_rules! entry_point {
    (@trampoline $path:path, $source:expr) => {
        #[export_name = "_cstart"]
        pub extern "C" fn __impl_cstart() -> ! {
            // validate the signature of the program entry point
            let f: $crate::entry::EntryFn = $path;

            $crate::entry::start(&$crate::entry::BOOT_STATE, $source, f)
        }
    };
    ($path:path) => {
        $crate::entry_point!($path, config = &$crate::BootConfig::new_default());
    };
    ($path:path, config = $config:expr) => {
        #[doc(hidden)]
        pub static __BOOTSHIM_CONFIG: $crate::BootConfig = {
            // validate the type
            let config: &$crate::BootConfig = $config;
            *config
        };

        $crate::entry_point!(
            @trampoline $path,
            $crate::config::ConfigSource::Static(&__BOOTSHIM_CONFIG)
        );
    };
    ($path:path, config_json = $json:expr) => {
        #[doc(hidden)]
        pub static __BOOTSHIM_CONFIG_JSON: &[u8] = $json;

        $crate::entry_point!(
            @trampoline $path,
            $crate::config::ConfigSource::Json(__BOOTSHIM_CONFIG_JSON)
        );
    };
}
