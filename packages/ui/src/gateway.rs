//! Shared configuration loading and gateway construction for all platforms.
//!
//! - **Web** (WASM): defaults plus the compile-time `VAXBOOK_API_URL`.
//! - **Desktop** (native): `vaxbook.toml` from the working directory, then from
//!   `<config_dir>/vaxbook/`, then defaults; `VAXBOOK_API_URL` overrides the URL.

use api::HttpGateway;
use dioxus::prelude::*;
use records::VaxbookConfig;

/// Load the platform-appropriate configuration.
pub fn load_config() -> VaxbookConfig {
    #[cfg(target_arch = "wasm32")]
    {
        VaxbookConfig::default().with_env_overrides()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let candidates = [
            Some(std::path::PathBuf::from(VaxbookConfig::filename())),
            dirs::config_dir().map(|d| d.join("vaxbook").join(VaxbookConfig::filename())),
        ];
        let config = candidates
            .into_iter()
            .flatten()
            .find_map(|path| {
                let text = std::fs::read_to_string(&path).ok()?;
                match VaxbookConfig::from_toml(&text) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {}", path.display());
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring invalid {}: {e}", path.display());
                        None
                    }
                }
            })
            .unwrap_or_default();
        config.with_env_overrides()
    }
}

/// Create the HTTP gateway for a configuration.
pub fn make_gateway(config: &VaxbookConfig) -> HttpGateway {
    tracing::info!("Using backend at {}", config.api.base_url);
    HttpGateway::new(config.api.clone())
}

/// Consume the `HttpGateway` provided by the app root.
pub fn use_gateway() -> HttpGateway {
    use_context::<HttpGateway>()
}

/// Consume the `VaxbookConfig` provided by the app root.
pub fn use_config() -> VaxbookConfig {
    use_context::<VaxbookConfig>()
}
