//! What happens when the boot cannot or should not continue.

use crate::entry::Exit;
use bootshim_config::ReturnAction;
use core::ffi::c_int;

/// I/O port of QEMU's `isa-debug-exit` device.
pub const DEBUG_EXIT_PORT: u16 = 0xf4;

/// Exit codes written to the `isa-debug-exit` device.
///
/// QEMU exits with `(code << 1) | 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ExitCode {
    Success = 0x10,
    Failed = 0x11,
}

impl ExitCode {
    /// Maps the status returned by the entry point to an exit code.
    pub fn from_status(status: c_int) -> Self {
        match status {
            0 => ExitCode::Success,
            _ => ExitCode::Failed,
        }
    }
}

pub trait UnwrapOrFail {
    type Out;

    fn unwrap_or_fail(self, code: u8) -> Self::Out;
}

impl<T> UnwrapOrFail for Option<T> {
    type Out = T;

    fn unwrap_or_fail(self, code: u8) -> Self::Out {
        match self {
            Some(v) => v,
            None => fail(code),
        }
    }
}

impl<T, E> UnwrapOrFail for Result<T, E> {
    type Out = T;

    fn unwrap_or_fail(self, code: u8) -> Self::Out {
        match self {
            Ok(v) => v,
            Err(_) => fail(code),
        }
    }
}

/// Reports a one-byte failure code and halts.
#[cold]
#[inline(never)]
pub fn fail(code: u8) -> ! {
    log::error!("Boot failure: {}", char::from(code));
    halt()
}

/// Executes the configured reaction to the entry point returning.
pub fn finish(exit: Exit) -> ! {
    match exit.action {
        ReturnAction::Halt => {
            log::info!("Halting");
            halt()
        }
        ReturnAction::Shutdown => {
            log::info!("Shutting down");
            shutdown(ExitCode::from_status(exit.status))
        }
        ReturnAction::Panic => panic!("entry point returned with status {}", exit.status),
    }
}

/// Parks the processor forever.
pub fn halt() -> ! {
    loop {
        hlt()
    }
}

/// Writes `code` to the debug exit device and halts if the write does not stop the machine.
pub fn shutdown(code: ExitCode) -> ! {
    #[cfg(target_arch = "x86_64")]
    {
        use x86_64::instructions::port::Port;

        let mut port = Port::<u32>::new(DEBUG_EXIT_PORT);
        unsafe { port.write(code as u32) };
    }
    #[cfg(not(target_arch = "x86_64"))]
    let _ = code;

    halt()
}

#[cfg(target_arch = "x86_64")]
fn hlt() {
    x86_64::instructions::hlt();
}

#[cfg(not(target_arch = "x86_64"))]
fn hlt() {
    core::hint::spin_loop();
}

#[panic_handler]
#[cfg(all(target_os = "none", feature = "panic-handler"))]
fn panic(info: &core::panic::PanicInfo) -> ! {
    if let Some(logger) = crate::logger::LOGGER.get() {
        unsafe { logger.force_unlock() };
    }
    log::error!("{}", info);
    halt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_status_maps_to_success() {
        assert_eq!(ExitCode::from_status(0), ExitCode::Success);
        assert_eq!(ExitCode::Success as u32, 0x10);
    }

    #[test]
    fn nonzero_status_maps_to_failure() {
        for status in [1, -1, 255, c_int::MIN] {
            assert_eq!(ExitCode::from_status(status), ExitCode::Failed);
        }
        assert_eq!(ExitCode::Failed as u32, 0x11);
    }

    #[test]
    fn unwrap_or_fail_passes_values_through() {
        assert_eq!(Some(3).unwrap_or_fail(b'x'), 3);
        assert_eq!(Ok::<_, ()>("ok").unwrap_or_fail(b'x'), "ok");
    }

    #[test]
    #[should_panic(expected = "entry point returned with status 7")]
    fn panic_action_panics_with_status() {
        finish(Exit {
            status: 7,
            action: ReturnAction::Panic,
        });
    }
}
