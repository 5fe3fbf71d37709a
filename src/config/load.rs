use std::{env, path::Path, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` layers environment variables (prefix `SYNCTUNES__`)
/// over an optional config file over struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    ///
    /// `explicit_path` (the `--config` flag) takes priority over
    /// `SYNCTUNES_CONFIG_PATH` and the XDG default location.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let config_path = explicit_path
            .map(Path::to_path_buf)
            .or_else(resolve_config_path);

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("SYNCTUNES")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.sync.album_chars == Some(0) {
            return Err("sync.album_chars must be >= 1 when set".to_string());
        }
        if self.sync.tempdir == self.sync.dest {
            return Err("sync.tempdir must differ from sync.dest".to_string());
        }
        if self.sync.tempdir == self.sync.source {
            return Err("sync.tempdir must differ from sync.source".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `SYNCTUNES_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SYNCTUNES_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/synctunes/config.toml`
/// or `~/.config/synctunes/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("synctunes").join("config.toml"))
}
