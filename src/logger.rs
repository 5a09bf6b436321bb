use crate::serial::SerialPort;
use bootshim_config::{BootConfig, LevelFilter};
use conquer_once::spin::OnceCell;
use core::fmt::Write;
use spinning_top::Spinlock;

/// The global logger instance used for the `log` crate.
pub static LOGGER: OnceCell<LockedLogger> = OnceCell::uninit();

/// A logger instance protected by a spinlock.
pub struct LockedLogger {
    serial: Option<Spinlock<SerialPort>>,
}

impl LockedLogger {
    /// Create a new instance that optionally logs to the serial port.
    pub fn new(serial_logger_status: bool) -> Self {
        let serial = match serial_logger_status {
            true => Some(Spinlock::new(unsafe { SerialPort::init() })),
            false => None,
        };

        LockedLogger { serial }
    }

    /// Force-unlocks the logger to prevent a deadlock.
    ///
    /// ## Safety
    /// This method is not memory safe and should be only used when absolutely necessary.
    pub unsafe fn force_unlock(&self) {
        if let Some(serial) = &self.serial {
            unsafe { serial.force_unlock() };
        }
    }
}

impl log::Log for LockedLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        if let Some(serial) = &self.serial {
            let mut serial = serial.lock();
            // a failed serial write must not take down the boot
            let _ = writeln!(serial, "{:5}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Initialize the serial logger according to `config` and install it for the `log` crate.
///
/// Only the first call has an effect.
pub fn init_logger(config: &BootConfig) {
    let serial_logging = config.serial_logging;
    let logger = LOGGER.get_or_init(move || LockedLogger::new(serial_logging));
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level_filter(config.log_level));
    }
}

/// Converts the configured level into the `log` crate's filter.
pub fn level_filter(level: LevelFilter) -> log::LevelFilter {
    match level {
        LevelFilter::Off => log::LevelFilter::Off,
        LevelFilter::Error => log::LevelFilter::Error,
        LevelFilter::Warn => log::LevelFilter::Warn,
        LevelFilter::Info => log::LevelFilter::Info,
        LevelFilter::Debug => log::LevelFilter::Debug,
        LevelFilter::Trace => log::LevelFilter::Trace,
    }
}
