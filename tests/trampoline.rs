use bootshim::{
    config::ConfigSource,
    entry::{enter, start, BootState, EntryFn, Exit, Stage},
    error::EntryError,
    BootConfig, BootMode, ReturnAction,
};
use core::ffi::{c_char, c_int};
use std::{
    panic::{self, AssertUnwindSafe},
    sync::Mutex,
};

static CALLS: Mutex<Vec<(c_int, bool)>> = Mutex::new(Vec::new());

fn recording_main(argc: c_int, argv: *const *const c_char) -> c_int {
    CALLS.lock().unwrap().push((argc, argv.is_null()));
    0
}

#[test]
fn entry_point_is_called_exactly_once_with_no_arguments() {
    let state = BootState::new();
    let config = BootConfig::default();
    let main: EntryFn = recording_main;

    let exit = enter(&state, &config, main).unwrap();
    assert_eq!(
        enter(&state, &config, main),
        Err(EntryError::AlreadyEntered(Stage::Returned))
    );

    assert_eq!(*CALLS.lock().unwrap(), [(0, true)]);
    assert_eq!(
        exit,
        Exit {
            status: 0,
            action: ReturnAction::Halt
        }
    );
    assert_eq!(state.stage(), Stage::Returned);
}

// `start` installs the global logger once per process, so every config used with it in this
// file keeps serial logging off.
static PANICKING: BootConfig = {
    let mut config = BootConfig::new_default();
    config.boot_mode = BootMode::EmptyVector;
    config.on_return = ReturnAction::Panic;
    config.serial_logging = false;
    config
};

static STATIC_CALLS: Mutex<Vec<(c_int, bool)>> = Mutex::new(Vec::new());
static JSON_CALLS: Mutex<Vec<(c_int, bool)>> = Mutex::new(Vec::new());

fn static_main(argc: c_int, argv: *const *const c_char) -> c_int {
    STATIC_CALLS.lock().unwrap().push((argc, argv.is_null()));
    9
}

fn json_main(argc: c_int, argv: *const *const c_char) -> c_int {
    JSON_CALLS.lock().unwrap().push((argc, argv.is_null()));
    4
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .unwrap_or_default(),
    }
}

#[test]
fn start_with_static_config_runs_main_then_takes_panic_action() {
    let state = BootState::new();

    let payload = panic::catch_unwind(AssertUnwindSafe(|| {
        start(&state, ConfigSource::Static(&PANICKING), static_main)
    }))
    .unwrap_err();

    // EmptyVector: argc is zero and argv is a non-null, null-terminated vector
    assert_eq!(*STATIC_CALLS.lock().unwrap(), [(0, false)]);
    assert_eq!(state.stage(), Stage::Returned);
    assert_eq!(
        panic_message(payload),
        "entry point returned with status 9"
    );
}

#[test]
fn start_with_json_config_runs_main_then_takes_panic_action() {
    let state = BootState::new();
    let json = br#"{"boot_mode":"NoArguments","on_return":"Panic","serial_logging":false}"#;

    let payload = panic::catch_unwind(AssertUnwindSafe(|| {
        start(&state, ConfigSource::Json(json), json_main)
    }))
    .unwrap_err();

    assert_eq!(*JSON_CALLS.lock().unwrap(), [(0, true)]);
    assert_eq!(state.stage(), Stage::Returned);
    assert_eq!(
        panic_message(payload),
        "entry point returned with status 4"
    );
}
