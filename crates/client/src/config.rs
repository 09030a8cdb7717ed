use shared_types::ClientConfig;
use std::sync::OnceLock;

static CONFIG: OnceLock<ClientConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_PATH: &str = "config.toml";

/// Overrides `[api] base_url`.
pub const BASE_URL_VAR: &str = "RESET_API_BASE_URL";
/// Overrides `[api] timeout_secs`.
pub const TIMEOUT_VAR: &str = "RESET_API_TIMEOUT_SECS";

/// Read the client config once and keep it for the process lifetime.
/// Only the first call has effect.
pub fn load_config() {
    CONFIG.get_or_init(read_config);
}

/// The loaded config, loading it on first use.
pub fn client_config() -> &'static ClientConfig {
    CONFIG.get_or_init(read_config)
}

#[cfg(not(target_arch = "wasm32"))]
fn read_config() -> ClientConfig {
    let _ = dotenvy::dotenv();

    let mut config = match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => parse_config(&contents),
        Err(e) => {
            tracing::info!("{CONFIG_PATH} not found ({e}), using default client config");
            ClientConfig::default()
        }
    };
    apply_overrides(&mut config, |key| std::env::var(key).ok());

    tracing::info!(
        base_url = %config.api.base_url,
        timeout_secs = config.api.timeout_secs,
        "Client config loaded"
    );
    config
}

/// Browsers have no environment; overrides are baked in at build time.
#[cfg(target_arch = "wasm32")]
fn read_config() -> ClientConfig {
    let mut config = ClientConfig::default();
    apply_overrides(&mut config, |key| {
        match key {
            BASE_URL_VAR => option_env!("RESET_API_BASE_URL"),
            TIMEOUT_VAR => option_env!("RESET_API_TIMEOUT_SECS"),
            _ => None,
        }
        .map(str::to_string)
    });
    config
}

/// Parse `config.toml` contents. Falls back to defaults when unparseable.
#[cfg(not(target_arch = "wasm32"))]
pub fn parse_config(contents: &str) -> ClientConfig {
    let mut config: ClientConfig = toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!("Failed to parse {CONFIG_PATH}: {e}, using default client config");
        ClientConfig::default()
    });

    // A zero timeout would fail every call before it is sent.
    if config.api.timeout_secs == 0 {
        tracing::warn!(
            "Ignoring timeout_secs = 0 in {CONFIG_PATH}, using {}s",
            shared_types::DEFAULT_TIMEOUT_SECS
        );
        config.api.timeout_secs = shared_types::DEFAULT_TIMEOUT_SECS;
    }
    config
}

/// Apply environment overrides on top of the file config. Empty or
/// unparseable values are ignored.
pub fn apply_overrides(config: &mut ClientConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(BASE_URL_VAR).filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
    }

    if let Some(raw) = lookup(TIMEOUT_VAR) {
        match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => config.api.timeout_secs = secs,
            _ => tracing::warn!("Ignoring {TIMEOUT_VAR}={raw:?}, expected a positive number of seconds"),
        }
    }
}
