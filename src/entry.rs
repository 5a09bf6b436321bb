//! The `_cstart` trampoline and the boot state it guards.
//!
//! The assembly startup code jumps to `_cstart` once a stack pointer is valid. Nothing else is
//! assumed to be initialized at that point. `_cstart` itself is generated by
//! [`crate::entry_point`]; the logic lives in [`start`] and [`enter`] so that it can be driven by
//! tests without diverging.

use crate::{
    config::ConfigSource,
    error::{EntryError, CORRUPT_BOOT_STATE},
    halt::{self, UnwrapOrFail},
};
use bootshim_config::{BootConfig, BootMode, ReturnAction};
use core::{
    ffi::{c_char, c_int},
    ptr,
    sync::atomic::{AtomicU8, Ordering},
};

/// Signature of the language-level entry point.
pub type EntryFn = fn(argc: c_int, argv: *const *const c_char) -> c_int;

/// The boot state used by the generated `_cstart`.
pub static BOOT_STATE: BootState = BootState::new();

/// Lifecycle of a single boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Stage {
    /// The startup code has not handed over yet.
    Booted = 0,
    /// The entry point is executing.
    Running = 1,
    /// The entry point returned.
    Returned = 2,
}

impl Stage {
    fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Stage::Booted),
            1 => Some(Stage::Running),
            2 => Some(Stage::Returned),
            _ => None,
        }
    }
}

/// Single-shot flag recording how far the boot has progressed.
///
/// Only the `Booted -> Running` transition can fail; it guarantees that the entry point is
/// called at most once per state.
pub struct BootState(AtomicU8);

impl BootState {
    /// Creates a state in [`Stage::Booted`].
    pub const fn new() -> Self {
        Self(AtomicU8::new(Stage::Booted as u8))
    }

    /// Returns the current stage.
    pub fn stage(&self) -> Stage {
        Stage::from_raw(self.0.load(Ordering::Acquire)).unwrap_or_fail(CORRUPT_BOOT_STATE)
    }

    fn begin(&self) -> Result<(), EntryError> {
        self.0
            .compare_exchange(
                Stage::Booted as u8,
                Stage::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
            .map_err(|raw| {
                EntryError::AlreadyEntered(
                    Stage::from_raw(raw).unwrap_or_fail(CORRUPT_BOOT_STATE),
                )
            })
    }

    fn finish(&self) {
        self.0.store(Stage::Returned as u8, Ordering::Release);
    }
}

impl Default for BootState {
    fn default() -> Self {
        Self::new()
    }
}

/// What the entry point returned and what should happen next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit {
    /// The value returned by the entry point.
    pub status: c_int,
    /// The configured reaction to the return.
    pub action: ReturnAction,
}

/// A null-terminated argument vector with no entries.
struct ArgVector([*const c_char; 1]);

// the vector only ever holds a null pointer
unsafe impl Sync for ArgVector {}

static EMPTY_ARGV: ArgVector = ArgVector([ptr::null()]);

/// Builds the `(argc, argv)` pair for the given boot mode.
///
/// There is no argument source at boot time, so `argc` is always zero.
pub fn arguments(mode: BootMode) -> (c_int, *const *const c_char) {
    match mode {
        BootMode::NoArguments => (0, ptr::null()),
        BootMode::EmptyVector => (0, EMPTY_ARGV.0.as_ptr()),
    }
}

/// Moves `state` from `Booted` to `Running`, calls `main` exactly once and reports its return.
///
/// Fails without calling `main` if `state` has already left [`Stage::Booted`].
pub fn enter<F>(state: &BootState, config: &BootConfig, main: F) -> Result<Exit, EntryError>
where
    F: FnOnce(c_int, *const *const c_char) -> c_int,
{
    if let Err(err) = state.begin() {
        log::error!("{}", err);
        return Err(err);
    }

    let (argc, argv) = arguments(config.boot_mode);
    log::info!("Jumping to entry point ({:?}, argc={})", config.boot_mode, argc);
    let status = main(argc, argv);
    state.finish();

    log::warn!("Entry point returned with status {}", status);
    Ok(Exit {
        status,
        action: config.on_return,
    })
}

/// Body of the generated `_cstart` trampoline.
///
/// Resolves the configuration, sets up logging, calls `main` through [`enter`] and finally
/// executes the configured [`ReturnAction`]. Never returns.
pub fn start(state: &BootState, source: ConfigSource, main: EntryFn) -> ! {
    let (config, error_loading_config) = source.resolve();
    crate::init_logger(&config);

    if let Some(err) = error_loading_config {
        log::warn!("Failed to deserialize the boot config {:?}", err);
    }
    log::info!("Boot shim started");

    let exit = match enter(state, &config, main) {
        Ok(exit) => exit,
        Err(err) => halt::fail(err.code()),
    };
    halt::finish(exit)
}
