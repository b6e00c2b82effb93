//! Configuration: TOML file, precedence chain and key bindings.

pub mod keybindings;
pub mod loader;

pub use keybindings::{parse_key_spec, KeyBindings};
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, CliOverrides, ConfigError,
    ConfigFile, RejectedOverride, ResolvedConfig,
};

/// Resolve the full configuration.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest).
/// Also returns the environment overrides that were ignored, for logging
/// once the subscriber is up.
pub fn resolve(
    config_path: Option<std::path::PathBuf>,
    cli: CliOverrides,
) -> Result<(ResolvedConfig, Vec<RejectedOverride>), ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let (config, rejected) = apply_env_overrides(merge_config(file));
    Ok((apply_cli_overrides(config, cli), rejected))
}
