use crate::entry::Stage;
use core::fmt;

/// `_cstart` was entered a second time.
pub const REENTERED: u8 = b'R';

/// The boot state flag held a value that does not name a [`Stage`].
pub const CORRUPT_BOOT_STATE: u8 = b'S';

/// Error returned by [`crate::entry::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryError {
    /// The entry point already ran on this boot; the state was in the given stage.
    AlreadyEntered(Stage),
}

impl EntryError {
    /// The one-byte code reported through [`crate::halt::fail`].
    pub fn code(&self) -> u8 {
        match self {
            EntryError::AlreadyEntered(_) => REENTERED,
        }
    }
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryError::AlreadyEntered(stage) => {
                write!(f, "entry point already entered (stage: {stage:?})")
            }
        }
    }
}
