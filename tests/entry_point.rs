use bootshim::{
    entry::{enter, BootState},
    entry_point, BootConfig, BootMode, LevelFilter, ReturnAction,
};
use core::ffi::{c_char, c_int};

const CONFIG: BootConfig = {
    let mut config = BootConfig::new_default();
    config.boot_mode = BootMode::EmptyVector;
    config.on_return = ReturnAction::Shutdown;
    config.log_level = LevelFilter::Info;
    config.serial_logging = false;
    config
};

entry_point!(kernel_main, config = &CONFIG);

fn kernel_main(_argc: c_int, _argv: *const *const c_char) -> c_int {
    0
}

#[test]
fn stores_the_given_config() {
    assert_eq!(__BOOTSHIM_CONFIG, CONFIG);
}

#[test]
fn stored_config_drives_the_entry_point() {
    let _trampoline: extern "C" fn() -> ! = __impl_cstart;

    let exit = enter(&BootState::new(), &__BOOTSHIM_CONFIG, kernel_main).unwrap();
    assert_eq!(exit.status, 0);
    assert_eq!(exit.action, ReturnAction::Shutdown);
}
