use core::fmt;

/// The COM1 serial port.
///
/// Serial output is only wired up on x86_64. On other architectures writes are discarded.
pub struct SerialPort {
    #[cfg(target_arch = "x86_64")]
    port: uart_16550::SerialPort,
}

/// I/O base of COM1.
#[cfg(target_arch = "x86_64")]
const COM1: u16 = 0x3F8;

impl SerialPort {
    /// # Safety
    ///
    /// unsafe because this function must only be called once
    #[cfg(target_arch = "x86_64")]
    pub unsafe fn init() -> Self {
        let mut port = unsafe { uart_16550::SerialPort::new(COM1) };
        port.init();
        Self { port }
    }

    /// # Safety
    ///
    /// unsafe because this function must only be called once
    #[cfg(not(target_arch = "x86_64"))]
    pub unsafe fn init() -> Self {
        Self {}
    }
}

impl fmt::Write for SerialPort {
    #[cfg(target_arch = "x86_64")]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            match byte {
                b'\n' => {
                    self.port.send(b'\r');
                    self.port.send(b'\n');
                }
                byte => self.port.send(byte),
            }
        }
        Ok(())
    }

    #[cfg(not(target_arch = "x86_64"))]
    fn write_str(&mut self, _s: &str) -> fmt::Result {
        Ok(())
    }
}
