//! Configuration file management for deckgen.
//!
//! Provides a TOML-based config file at `~/.config/deckgen/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use deckgen_core::image::pollinations::DEFAULT_BASE_URL as DEFAULT_IMAGE_URL;
use deckgen_core::provider::{DEFAULT_TIMEOUT, ProviderKind, ProviderSettings};
use deckgen_db::config::DbConfig;

pub const ENV_PROVIDER: &str = "DECKGEN_PROVIDER";
pub const ENV_MODEL: &str = "DECKGEN_MODEL";
pub const ENV_API_KEY: &str = "DECKGEN_API_KEY";
pub const ENV_PROVIDER_URL: &str = "DECKGEN_PROVIDER_URL";

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub database: DatabaseSection,
    #[serde(default)]
    pub provider: ProviderSection,
    #[serde(default)]
    pub images: ImagesSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DbConfig::DEFAULT_URL.to_string(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProviderSection {
    #[serde(default)]
    pub kind: ProviderKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImagesSection {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_image_url")]
    pub base_url: String,
}

impl Default for ImagesSection {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_image_url(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: DEFAULT_PORT,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_image_url() -> String {
    DEFAULT_IMAGE_URL.to_string()
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the deckgen config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/deckgen` or `~/.config/deckgen`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("deckgen");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("deckgen")
}

/// Return the path to the deckgen config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix since it may hold an API key.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(path)
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Values given on the command line, highest precedence.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub database_url: Option<String>,
    pub provider: Option<ProviderKind>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub provider_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ImageSettings {
    pub enabled: bool,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub bind: String,
    pub port: u16,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct DeckgenConfig {
    pub db_config: DbConfig,
    pub provider: ProviderSettings,
    pub images: ImageSettings,
    pub server: ServerSettings,
}

/// Non-empty environment variable.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl DeckgenConfig {
    /// Resolve against the on-disk config file (if any).
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        Self::resolve_with(load_config().ok(), cli)
    }

    /// Resolve using the chain: CLI flag > env var > config file > default.
    ///
    /// - DB URL: `--database-url` > `DECKGEN_DATABASE_URL` > `database.url` > `DbConfig::DEFAULT_URL`
    /// - Provider kind, model, key and URL: flag > `DECKGEN_*` > `[provider]` > the kind's default
    ///
    /// A model or URL from the file is ignored when the kind was overridden
    /// to something other than the file's kind.
    pub fn resolve_with(file: Option<ConfigFile>, cli: &CliOverrides) -> Result<Self> {
        let file = file.unwrap_or_default();

        let db_url = cli
            .database_url
            .clone()
            .or_else(|| env_var(DbConfig::ENV_VAR))
            .unwrap_or(file.database.url);
        let db_config = DbConfig::new(db_url);

        let kind = match (cli.provider, env_var(ENV_PROVIDER)) {
            (Some(kind), _) => kind,
            (None, Some(raw)) => raw
                .parse()
                .with_context(|| format!("{ENV_PROVIDER} is not a known provider"))?,
            (None, None) => file.provider.kind,
        };
        let same_kind = kind == file.provider.kind;

        let mut provider = ProviderSettings::for_kind(kind);
        let model = cli
            .model
            .clone()
            .or_else(|| env_var(ENV_MODEL))
            .or(file.provider.model.filter(|_| same_kind));
        if let Some(model) = model {
            provider = provider.with_model(model);
        }
        let base_url = cli
            .provider_url
            .clone()
            .or_else(|| env_var(ENV_PROVIDER_URL))
            .or(file.provider.base_url.filter(|_| same_kind));
        if let Some(url) = base_url {
            provider = provider.with_base_url(url);
        }
        let api_key = cli
            .api_key
            .clone()
            .or_else(|| env_var(ENV_API_KEY))
            .or(file.provider.api_key);
        if let Some(key) = api_key {
            provider = provider.with_api_key(key);
        }
        let timeout = file
            .provider
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        provider = provider.with_timeout(timeout);

        Ok(Self {
            db_config,
            provider,
            images: ImageSettings {
                enabled: file.images.enabled,
                base_url: file.images.base_url,
            },
            server: ServerSettings {
                bind: file.server.bind,
                port: file.server.port,
            },
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        crate::test_util::lock_env()
    }

    fn clear_env() {
        for var in [
            DbConfig::ENV_VAR,
            ENV_PROVIDER,
            ENV_MODEL,
            ENV_API_KEY,
            ENV_PROVIDER_URL,
        ] {
            unsafe { std::env::remove_var(var) };
        }
    }

    fn sample_file() -> ConfigFile {
        ConfigFile {
            database: DatabaseSection {
                url: "postgresql://file:5432/filedb".to_string(),
            },
            provider: ProviderSection {
                kind: ProviderKind::Ollama,
                model: Some("mistral".to_string()),
                api_key: None,
                base_url: Some("http://gpu-box:11434/".to_string()),
                timeout_secs: Some(90),
            },
            images: ImagesSection {
                enabled: false,
                base_url: "http://images.local/prompt".to_string(),
            },
            server: ServerSection {
                bind: "127.0.0.1".to_string(),
                port: 9000,
            },
        }
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let original = sample_file();
        let text = toml::to_string_pretty(&original).unwrap();
        assert!(text.contains("kind = \"ollama\""));
        assert!(!text.contains("api_key"), "unset key should be omitted");

        let loaded: ConfigFile = toml::from_str(&text).unwrap();
        assert_eq!(loaded.database.url, original.database.url);
        assert_eq!(loaded.provider.kind, ProviderKind::Ollama);
        assert_eq!(loaded.provider.model.as_deref(), Some("mistral"));
        assert_eq!(loaded.server.port, 9000);
        assert!(!loaded.images.enabled);
    }

    #[test]
    fn minimal_file_fills_defaults() {
        let loaded: ConfigFile =
            toml::from_str("[database]\nurl = \"postgresql://x:5432/y\"\n").unwrap();
        assert_eq!(loaded.provider.kind, ProviderKind::Gemini);
        assert!(loaded.images.enabled);
        assert_eq!(loaded.images.base_url, DEFAULT_IMAGE_URL);
        assert_eq!(loaded.server.bind, DEFAULT_BIND);
        assert_eq!(loaded.server.port, DEFAULT_PORT);
    }

    #[cfg(unix)]
    #[test]
    fn save_config_writes_owner_only_file() {
        use std::os::unix::fs::PermissionsExt;

        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        let orig_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", tmp.path()) };

        let result = save_config(&sample_file());
        let loaded = load_config();

        match orig_xdg {
            Some(x) => unsafe { std::env::set_var("XDG_CONFIG_HOME", x) },
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }

        let path = result.unwrap();
        assert!(path.starts_with(tmp.path()));
        let meta = std::fs::metadata(&path).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o600);
        assert_eq!(loaded.unwrap().server.port, 9000);
    }

    #[test]
    fn resolve_defaults_when_nothing_set() {
        let _lock = lock_env();
        clear_env();

        let config = DeckgenConfig::resolve_with(None, &CliOverrides::default()).unwrap();
        assert_eq!(config.db_config.database_url, DbConfig::DEFAULT_URL);
        assert_eq!(config.provider, ProviderSettings::for_kind(ProviderKind::Gemini));
        assert!(config.images.enabled);
        assert_eq!(config.server.port, DEFAULT_PORT);
    }

    #[test]
    fn resolve_reads_file_values() {
        let _lock = lock_env();
        clear_env();

        let config =
            DeckgenConfig::resolve_with(Some(sample_file()), &CliOverrides::default()).unwrap();
        assert_eq!(config.db_config.database_url, "postgresql://file:5432/filedb");
        assert_eq!(config.provider.kind, ProviderKind::Ollama);
        assert_eq!(config.provider.model, "mistral");
        assert_eq!(config.provider.base_url, "http://gpu-box:11434");
        assert_eq!(config.provider.timeout, Duration::from_secs(90));
        assert!(!config.images.enabled);
        assert_eq!(config.server.bind, "127.0.0.1");
    }

    #[test]
    fn resolve_env_overrides_file() {
        let _lock = lock_env();
        clear_env();
        unsafe { std::env::set_var(DbConfig::ENV_VAR, "postgresql://env:5432/envdb") };
        unsafe { std::env::set_var(ENV_MODEL, "llama3.2") };
        unsafe { std::env::set_var(ENV_API_KEY, "env-key") };

        let config = DeckgenConfig::resolve_with(Some(sample_file()), &CliOverrides::default());
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.db_config.database_url, "postgresql://env:5432/envdb");
        assert_eq!(config.provider.model, "llama3.2");
        assert_eq!(config.provider.api_key.as_deref(), Some("env-key"));
    }

    #[test]
    fn resolve_cli_overrides_env() {
        let _lock = lock_env();
        clear_env();
        unsafe { std::env::set_var(DbConfig::ENV_VAR, "postgresql://env:5432/envdb") };
        unsafe { std::env::set_var(ENV_PROVIDER, "ollama") };

        let cli = CliOverrides {
            database_url: Some("postgresql://cli:5432/clidb".to_string()),
            provider: Some(ProviderKind::HuggingFace),
            ..Default::default()
        };
        let config = DeckgenConfig::resolve_with(Some(sample_file()), &cli);
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.db_config.database_url, "postgresql://cli:5432/clidb");
        assert_eq!(config.provider.kind, ProviderKind::HuggingFace);
        // File model and URL belong to ollama and are not carried over.
        assert_eq!(config.provider.model, ProviderKind::HuggingFace.default_model());
        assert_eq!(
            config.provider.base_url,
            ProviderKind::HuggingFace.default_base_url()
        );
    }

    #[test]
    fn resolve_rejects_unknown_env_provider() {
        let _lock = lock_env();
        clear_env();
        unsafe { std::env::set_var(ENV_PROVIDER, "openai") };

        let result = DeckgenConfig::resolve_with(None, &CliOverrides::default());
        clear_env();

        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains(ENV_PROVIDER), "unexpected error: {msg}");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let _lock = lock_env();
        clear_env();
        unsafe { std::env::set_var(ENV_API_KEY, "   ") };

        let config = DeckgenConfig::resolve_with(None, &CliOverrides::default());
        clear_env();

        assert_eq!(config.unwrap().provider.api_key, None);
    }

    #[test]
    fn config_path_ends_with_expected_filename() {
        let _lock = lock_env();
        let path = config_path();
        assert!(
            path.ends_with("deckgen/config.toml"),
            "unexpected config path: {}",
            path.display()
        );
    }
}
