use bootshim_config::BootConfig;

pub use serde_json_core::de::Error;

/// Where the generated `_cstart` takes its configuration from.
#[derive(Debug, Clone, Copy)]
pub enum ConfigSource {
    /// A configuration built at compile time.
    Static(&'static BootConfig),
    /// A JSON document, e.g. embedded with `include_bytes!`.
    Json(&'static [u8]),
}

impl ConfigSource {
    /// Returns the configuration to boot with.
    ///
    /// A JSON document that fails to parse yields the default configuration together with the
    /// parse error, so the caller can report it once logging is available.
    pub fn resolve(self) -> (BootConfig, Option<Error>) {
        match self {
            ConfigSource::Static(config) => (*config, None),
            ConfigSource::Json(json) => match parse(json) {
                Ok(config) => (config, None),
                Err(err) => (BootConfig::default(), Some(err)),
            },
        }
    }
}

/// Parses a JSON boot configuration. Missing fields keep their default values.
pub fn parse(json: &[u8]) -> Result<BootConfig, Error> {
    serde_json_core::from_slice(json).map(|(config, _)| config)
}
