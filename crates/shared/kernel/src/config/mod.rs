use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_CONFIG: &str = "server";
const ENV_PREFIX: &str = "GC";

#[gc_derive::gc_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads layered configuration: a file, then `GC__`-prefixed environment overrides.
///
/// * With `path`, the file is required. Its format follows the extension (`.toml`, `.json`,
///   ...) or is probed when the extension is omitted.
/// * Without `path`, `server.*` in the working directory is used when present; otherwise only
///   defaults and the environment apply.
///
/// Nested keys use double underscores: `GC__PAYMENTS__GATEWAY__PARTNER_CODE` maps to
/// `payments.gateway.partner_code`.
///
/// # Example
/// ```rust
/// use gc_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    info!(path = %effective_path.display(), required, "Loading config");
    build(&effective_path, required, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

fn build<T>(path: &Path, required: bool, environment: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let config = Config::builder()
        .add_source(File::from(path).required(required))
        .add_source(environment)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
