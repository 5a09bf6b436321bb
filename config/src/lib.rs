#![cfg_attr(not(test), no_std)]

use serde::{Deserialize, Serialize};

/// Configures how the boot shim hands control to the kernel entry point.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
#[non_exhaustive]
pub struct BootConfig {
    /// How the argument vector passed to the entry point is built.
    ///
    /// The default is [`BootMode::NoArguments`].
    pub boot_mode: BootMode,

    /// What happens when the entry point returns.
    ///
    /// The default is [`ReturnAction::Halt`].
    pub on_return: ReturnAction,

    /// The minimum log level that is printed during boot.
    ///
    /// The default is [`LevelFilter::Trace`].
    pub log_level: LevelFilter,

    /// Whether the boot shim should print log messages to the serial port.
    ///
    /// Enabled by default.
    pub serial_logging: bool,
}

impl BootConfig {
    /// Creates a new default configuration with the following values:
    ///
    /// - `boot_mode`: [`BootMode::NoArguments`]
    /// - `on_return`: [`ReturnAction::Halt`]
    /// - `log_level`: [`LevelFilter::Trace`]
    /// - `serial_logging`: `true`
    pub const fn new_default() -> Self {
        Self {
            boot_mode: BootMode::NoArguments,
            on_return: ReturnAction::Halt,
            log_level: LevelFilter::Trace,
            serial_logging: true,
        }
    }
}

impl Default for BootConfig {
    fn default() -> Self {
        Self::new_default()
    }
}

/// The argument-passing convention used when calling the entry point.
///
/// There is no firmware-provided argument vector at this stage, so the argument count is
/// always zero. The modes only differ in what `argv` points to.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BootMode {
    /// `argc == 0` and `argv` is a null pointer.
    NoArguments,
    /// `argc == 0` and `argv` points to a vector containing only the null terminator.
    EmptyVector,
}

impl Default for BootMode {
    fn default() -> Self {
        Self::NoArguments
    }
}

/// What the boot shim does after the entry point returns.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ReturnAction {
    /// Park the processor forever.
    Halt,
    /// Report the exit status to the `isa-debug-exit` device and halt.
    Shutdown,
    /// Treat the return as abnormal termination and take the panic path.
    Panic,
}

impl Default for ReturnAction {
    fn default() -> Self {
        Self::Halt
    }
}

/// An enum representing the available verbosity level filters of the logger.
///
/// Based on
/// <https://github.com/rust-lang/log/blob/dc32ab999f52805d5ce579b526bd9d9684c38d1a/src/lib.rs#L552-565>
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LevelFilter {
    /// A level lower than all log levels.
    Off,
    /// Corresponds to the `Error` log level.
    Error,
    /// Corresponds to the `Warn` log level.
    Warn,
    /// Corresponds to the `Info` log level.
    Info,
    /// Corresponds to the `Debug` log level.
    Debug,
    /// Corresponds to the `Trace` log level.
    Trace,
}

impl Default for LevelFilter {
    fn default() -> Self {
        Self::Trace
    }
}
