//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory
//! (or the path given with `-f/--config`), then applies env overrides:
//!
//! | env var                 | overrides               |
//! |-------------------------|-------------------------|
//! | `NDERTIMTARI_LOG_LEVEL` | `[bot] log_level`       |
//! | `NDERTIMTARI_BIND`      | `[http] bind`           |
//! | `OPENAI_MODEL`          | `[llm.openai] model`    |
//!
//! The API key comes from `OPENAI_API_KEY` (or `LLM_API_KEY`) only, never
//! from TOML.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// HTTP channel configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Socket address to bind the HTTP listener to.
    pub bind: String,
}

/// Glossary source.
#[derive(Debug, Clone)]
pub struct GlossaryConfig {
    /// TOML file to load terms from; `None` means the bundled glossary.
    pub path: Option<PathBuf>,
}

/// OpenAI / OpenAI-compatible provider configuration.
/// Populated from `[llm.openai]` in the TOML.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Full chat completions endpoint URL.
    pub api_base_url: String,
    /// Model name passed in the request body.
    pub model: String,
    /// Sampling temperature (ignored for models that forbid it).
    pub temperature: f32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// LLM configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider is active (`"openai"` or `"dummy"`).
    /// Maps to `default` in `[llm]` TOML.
    pub provider: String,
    /// Upper bound on answer length, in tokens.
    pub max_tokens: u32,
    pub openai: OpenAiConfig,
}

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_name: String,
    pub log_level: String,
    pub http: HttpConfig,
    pub glossary: GlossaryConfig,
    pub llm: LlmConfig,
    /// API key from `OPENAI_API_KEY` / `LLM_API_KEY`. `None` when unset.
    pub llm_api_key: Option<String>,
}

/// Values taken from the environment. Tests build this directly instead of
/// mutating env vars.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_level: Option<String>,
    pub bind: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
}

impl Overrides {
    pub fn from_env() -> Self {
        Self {
            log_level: non_empty_var("NDERTIMTARI_LOG_LEVEL"),
            bind: non_empty_var("NDERTIMTARI_BIND"),
            model: non_empty_var("OPENAI_MODEL"),
            api_key: non_empty_var("OPENAI_API_KEY").or_else(|| non_empty_var("LLM_API_KEY")),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

// ── Raw TOML shape ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    bot: RawBot,
    #[serde(default)]
    http: RawHttp,
    #[serde(default)]
    glossary: RawGlossary,
    #[serde(default)]
    llm: RawLlm,
}

#[derive(Deserialize)]
struct RawBot {
    #[serde(default = "default_bot_name")]
    bot_name: String,
    #[serde(default = "default_log_level")]
    log_level: String,
}

impl Default for RawBot {
    fn default() -> Self {
        Self { bot_name: default_bot_name(), log_level: default_log_level() }
    }
}

#[derive(Deserialize)]
struct RawHttp {
    #[serde(default = "default_http_bind")]
    bind: String,
}

impl Default for RawHttp {
    fn default() -> Self {
        Self { bind: default_http_bind() }
    }
}

#[derive(Deserialize, Default)]
struct RawGlossary {
    #[serde(default)]
    path: Option<String>,
}

#[derive(Deserialize)]
struct RawLlm {
    /// Maps to `default = "..."` in `[llm]`.
    #[serde(rename = "default", default = "default_llm_provider")]
    provider: String,
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,
    #[serde(default)]
    openai: RawOpenAiConfig,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            max_tokens: default_max_tokens(),
            openai: RawOpenAiConfig::default(),
        }
    }
}

#[derive(Deserialize)]
struct RawOpenAiConfig {
    #[serde(default = "default_openai_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_openai_model")]
    model: String,
    #[serde(default = "default_openai_temperature")]
    temperature: f32,
    #[serde(default = "default_openai_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawOpenAiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_openai_api_base_url(),
            model: default_openai_model(),
            temperature: default_openai_temperature(),
            timeout_seconds: default_openai_timeout_seconds(),
        }
    }
}

fn default_bot_name() -> String { "ndertimtari".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_http_bind() -> String { "127.0.0.1:8080".to_string() }
fn default_llm_provider() -> String { "openai".to_string() }
fn default_max_tokens() -> u32 { 400 }
fn default_openai_api_base_url() -> String { "https://api.openai.com/v1/chat/completions".to_string() }
fn default_openai_model() -> String { "gpt-4o-mini".to_string() }
fn default_openai_temperature() -> f32 { 0.2 }
fn default_openai_timeout_seconds() -> u64 { 60 }

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load config, then apply env-var overrides.
///
/// With no explicit path, a missing `config/default.toml` is not an error:
/// built-in defaults are used. An explicit path must exist.
pub fn load(config_path: Option<&str>) -> Result<Config, AppError> {
    let overrides = Overrides::from_env();
    match config_path {
        Some(path) => load_from(Path::new(path), &overrides),
        None => {
            let path = Path::new(DEFAULT_CONFIG_PATH);
            if path.exists() {
                load_from(path, &overrides)
            } else {
                Ok(resolve(RawConfig::default(), &overrides))
            }
        }
    }
}

/// Internal loader; accepts an explicit path and overrides.
pub fn load_from(path: &Path, overrides: &Overrides) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
    parse(&raw, overrides)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))
}

/// Resolve a TOML string into a [`Config`].
pub fn parse(toml_str: &str, overrides: &Overrides) -> Result<Config, toml::de::Error> {
    let parsed: RawConfig = toml::from_str(toml_str)?;
    Ok(resolve(parsed, overrides))
}

fn resolve(parsed: RawConfig, overrides: &Overrides) -> Config {
    let s = parsed.bot;
    let oai = parsed.llm.openai;

    Config {
        bot_name: s.bot_name,
        log_level: overrides.log_level.clone().unwrap_or(s.log_level),
        http: HttpConfig {
            bind: overrides.bind.clone().unwrap_or(parsed.http.bind),
        },
        glossary: GlossaryConfig {
            path: parsed
                .glossary
                .path
                .filter(|p| !p.trim().is_empty())
                .map(|p| expand_home(&p)),
        },
        llm: LlmConfig {
            provider: parsed.llm.provider,
            max_tokens: parsed.llm.max_tokens,
            openai: OpenAiConfig {
                api_base_url: oai.api_base_url,
                model: overrides.model.clone().unwrap_or(oai.model),
                temperature: oai.temperature,
                timeout_seconds: oai.timeout_seconds,
            },
        },
        llm_api_key: overrides.api_key.clone(),
    }
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

// ── test helpers ──────────────────────────────────────────────────────────────

/// `Config` for unit tests: dummy LLM, no API keys, no external calls.
#[cfg(test)]
impl Config {
    pub fn test_default() -> Self {
        Self {
            bot_name: "test".into(),
            log_level: "info".into(),
            http: HttpConfig { bind: default_http_bind() },
            glossary: GlossaryConfig { path: None },
            llm: LlmConfig {
                provider: "dummy".into(),
                max_tokens: 400,
                openai: OpenAiConfig {
                    api_base_url: "http://localhost:0/v1/chat/completions".into(),
                    model: "test-model".into(),
                    temperature: 0.0,
                    timeout_seconds: 1,
                },
            },
            llm_api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL_TOML: &str = r#"
[bot]
bot_name = "test-bot"
log_level = "debug"

[http]
bind = "0.0.0.0:9000"

[glossary]
path = "/etc/ndertimtari/glossary.toml"

[llm]
default = "dummy"
max_tokens = 128

[llm.openai]
api_base_url = "http://localhost:11434/v1/chat/completions"
model = "llama3"
temperature = 0.5
timeout_seconds = 5
"#;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parse_full_config() {
        let f = write_toml(FULL_TOML);
        let cfg = load_from(f.path(), &Overrides::default()).unwrap();
        assert_eq!(cfg.bot_name, "test-bot");
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.http.bind, "0.0.0.0:9000");
        assert_eq!(cfg.glossary.path, Some(PathBuf::from("/etc/ndertimtari/glossary.toml")));
        assert_eq!(cfg.llm.provider, "dummy");
        assert_eq!(cfg.llm.max_tokens, 128);
        assert_eq!(cfg.llm.openai.model, "llama3");
        assert_eq!(cfg.llm.openai.timeout_seconds, 5);
        assert!(cfg.llm_api_key.is_none());
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = parse("", &Overrides::default()).unwrap();
        assert_eq!(cfg.bot_name, "ndertimtari");
        assert_eq!(cfg.http.bind, "127.0.0.1:8080");
        assert!(cfg.glossary.path.is_none());
        assert_eq!(cfg.llm.provider, "openai");
        assert_eq!(cfg.llm.max_tokens, 400);
        assert_eq!(cfg.llm.openai.model, "gpt-4o-mini");
        assert!((cfg.llm.openai.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn overrides_win_over_toml() {
        let overrides = Overrides {
            log_level: Some("trace".into()),
            bind: Some("127.0.0.1:3000".into()),
            model: Some("gpt-4o".into()),
            api_key: Some("sk-test".into()),
        };
        let cfg = parse(FULL_TOML, &overrides).unwrap();
        assert_eq!(cfg.log_level, "trace");
        assert_eq!(cfg.http.bind, "127.0.0.1:3000");
        assert_eq!(cfg.llm.openai.model, "gpt-4o");
        assert_eq!(cfg.llm_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn bundled_default_toml_parses() {
        let raw = include_str!("../config/default.toml");
        let cfg = parse(raw, &Overrides::default()).unwrap();
        assert_eq!(cfg.llm.provider, "openai");
        assert!(cfg.glossary.path.is_none());
    }

    #[test]
    fn blank_glossary_path_means_builtin() {
        let cfg = parse("[glossary]\npath = \"  \"\n", &Overrides::default()).unwrap();
        assert!(cfg.glossary.path.is_none());
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = dirs::home_dir().expect("home dir must exist in test env");
        let expanded = expand_home("~/.ndertimtari");
        assert!(expanded.starts_with(&home));
        assert!(expanded.ends_with(".ndertimtari"));
    }

    #[test]
    fn absolute_path_unchanged() {
        assert_eq!(expand_home("/absolute/path"), PathBuf::from("/absolute/path"));
    }

    #[test]
    fn missing_explicit_file_errors() {
        let result = load_from(Path::new("/nonexistent/config.toml"), &Overrides::default());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("config error"));
    }

    #[test]
    fn invalid_toml_errors() {
        let f = write_toml("[llm\ndefault = ");
        let msg = load_from(f.path(), &Overrides::default()).unwrap_err().to_string();
        assert!(msg.contains("parse error"));
    }
}
