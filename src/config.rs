//! Settings loading for the dashboard.
//!
//! Settings come from four layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML config file
//! 3. `JUPWATCH_`-prefixed environment variables (e.g. `JUPWATCH_API_URL`)
//! 4. command-line flags, applied by the binary after loading
//!
//! ```toml
//! api_url = "http://127.0.0.1:8000"
//! refresh_secs = 60
//! theme = "auto"
//! ```

use anyhow::Result;
use config::{Config, Environment, File};
use std::path::Path;

use crate::ui::theme::ThemeMode;

/// Resolved dashboard settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Base URL of the alert server.
    pub api_url: String,
    /// Seconds between automatic state refreshes.
    pub refresh_secs: u64,
    /// Color theme selection.
    pub theme: ThemeMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000".to_string(),
            refresh_secs: 60,
            theme: ThemeMode::Auto,
        }
    }
}

impl Settings {
    /// Load settings from the optional config file and the environment,
    /// applied over the defaults.
    ///
    /// A config file given explicitly must exist; a missing key in any
    /// source just keeps the default.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(Environment::with_prefix("JUPWATCH"))
            .build()?;

        let mut settings = Self::default();
        if let Ok(url) = config.get_string("api_url") {
            settings.api_url = url;
        }
        if let Ok(secs) = config.get_int("refresh_secs") {
            settings.refresh_secs = secs.max(1) as u64;
        }
        if let Ok(theme) = config.get_string("theme") {
            settings.theme = theme.parse()?;
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // Environment variables are process-wide; every test takes this lock
    // so the env-mutating test cannot interleave with the rest.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults_without_config_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.api_url, "http://127.0.0.1:8000");
        assert_eq!(settings.refresh_secs, 60);
        assert_eq!(settings.theme, ThemeMode::Auto);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "api_url = \"http://alerts.example:9000\"").unwrap();
        writeln!(file, "refresh_secs = 15").unwrap();
        writeln!(file, "theme = \"light\"").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.api_url, "http://alerts.example:9000");
        assert_eq!(settings.refresh_secs, 15);
        assert_eq!(settings.theme, ThemeMode::Light);
    }

    #[test]
    fn test_env_overrides_file_and_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "api_url = \"http://from-file:8000\"").unwrap();

        std::env::set_var("JUPWATCH_API_URL", "http://alerts.example:9000");
        std::env::set_var("JUPWATCH_REFRESH_SECS", "15");
        let settings = Settings::load(Some(file.path()));
        std::env::remove_var("JUPWATCH_API_URL");
        std::env::remove_var("JUPWATCH_REFRESH_SECS");

        let settings = settings.unwrap();
        // env beats the file layer and the defaults
        assert_eq!(settings.api_url, "http://alerts.example:9000");
        assert_eq!(settings.refresh_secs, 15);
    }

    #[test]
    fn test_partial_config_keeps_remaining_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "refresh_secs = 5").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.api_url, "http://127.0.0.1:8000");
        assert_eq!(settings.refresh_secs, 5);
    }

    #[test]
    fn test_zero_refresh_clamps_to_one() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "refresh_secs = 0").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.refresh_secs, 1);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        let path = Path::new("/nonexistent/jupwatch.toml");
        assert!(Settings::load(Some(path)).is_err());
    }

    #[test]
    fn test_unknown_theme_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "theme = \"solarized\"").unwrap();

        assert!(Settings::load(Some(file.path())).is_err());
    }
}
