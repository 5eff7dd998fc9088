use crate::core::error::ConfigError;
use huquq_llm::{GeminiSettings, LLMClientConfig, LLMProvider, OpenAISettings, RetryConfig};
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;
const MAX_GENERATION_TIMEOUT_SECS: u64 = 3 * 60 * 60;
const MAX_GENERATION_RETRIES: u32 = 10;

/// Process-wide configuration, read once at startup and handed to the
/// components that need it.
#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: String,
    pub port: u16,
    pub provider: LLMProvider,
    pub llm: LLMClientConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: "dev".to_string(),
            port: DEFAULT_PORT,
            provider: LLMProvider::Gemini(GeminiSettings::new("")),
            llm: LLMClientConfig {
                timeout: Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
                retry_config: RetryConfig::default(),
            },
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let provider = match get("LLM_PROVIDER")
            .unwrap_or_else(|| "gemini".to_string())
            .to_lowercase()
            .as_str()
        {
            "gemini" => {
                let mut settings =
                    GeminiSettings::new(get("GEMINI_API_KEY").or_else(|| get("API_KEY")).unwrap_or_default());
                if let Some(model) = get("GEMINI_MODEL") {
                    settings.model = model;
                }
                if let Some(api_base) = get("GEMINI_API_BASE") {
                    settings.api_base = api_base;
                }
                LLMProvider::Gemini(settings)
            }
            "openai" => {
                let mut settings = OpenAISettings::new(get("OPENAI_API_KEY").unwrap_or_default());
                settings.org_id = get("OPENAI_ORG_ID").unwrap_or_default();
                if let Some(model) = get("OPENAI_MODEL") {
                    settings.model = model;
                }
                if let Some(api_base) = get("OPENAI_API_BASE") {
                    settings.api_base = api_base;
                }
                LLMProvider::OpenAI(settings)
            }
            other => return Err(ConfigError::UnknownProvider(other.to_string())),
        };

        let timeout_secs: u64 = parse(
            &get,
            "GENERATION_TIMEOUT_SECS",
            DEFAULT_GENERATION_TIMEOUT_SECS,
        )?;
        if !(1..=MAX_GENERATION_TIMEOUT_SECS).contains(&timeout_secs) {
            return Err(ConfigError::InvalidValue {
                key: "GENERATION_TIMEOUT_SECS",
                value: timeout_secs.to_string(),
            });
        }

        let max_retries: u32 = parse(&get, "GENERATION_MAX_RETRIES", 0)?;
        if max_retries > MAX_GENERATION_RETRIES {
            return Err(ConfigError::InvalidValue {
                key: "GENERATION_MAX_RETRIES",
                value: max_retries.to_string(),
            });
        }

        Ok(Self {
            environment: get("APP_ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse(&get, "PORT", defaults.port)?,
            provider,
            llm: LLMClientConfig {
                timeout: Duration::from_secs(timeout_secs),
                retry_config: RetryConfig {
                    max_retries,
                    ..RetryConfig::default()
                },
            },
        })
    }

    pub fn is_dev(&self) -> bool {
        self.environment == "dev"
    }

    /// Upper bound for a whole HTTP request: every generation attempt plus
    /// the longest backoff between attempts, with some slack.
    pub fn request_timeout(&self) -> Duration {
        let retries = self.llm.retry_config.max_retries;
        self.llm
            .timeout
            .saturating_mul(retries.saturating_add(1))
            .saturating_add(Duration::from_secs(30).saturating_mul(retries))
            .saturating_add(Duration::from_secs(5))
    }
}

fn parse<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}
