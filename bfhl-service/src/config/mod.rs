use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct BfhlConfig {
    pub common: core_config::Config,
    /// Echoed in every response as `official_email`.
    pub official_email: String,
    pub ai: AiConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub provider: AiProviderKind,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

/// Which backend answers the `AI` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProviderKind {
    Gemini,
    Mock,
}

impl std::str::FromStr for AiProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(AiProviderKind::Gemini),
            "mock" => Ok(AiProviderKind::Mock),
            other => Err(AppError::config(format!(
                "AI_PROVIDER must be 'gemini' or 'mock', got '{}'",
                other
            ))),
        }
    }
}

impl BfhlConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let provider: AiProviderKind = get_env("AI_PROVIDER", Some("gemini"), false)?.parse()?;
        // The key is only mandatory when Gemini is actually used.
        let needs_key = is_prod && provider == AiProviderKind::Gemini;

        Ok(BfhlConfig {
            common: common_config,
            official_email: get_env("OFFICIAL_EMAIL", Some(""), is_prod)?,
            ai: AiConfig {
                provider,
                gemini: GeminiSettings {
                    api_key: Secret::new(get_env("GEMINI_API_KEY", Some(""), needs_key)?),
                    model: get_env("GEMINI_MODEL", Some(DEFAULT_GEMINI_MODEL), false)?,
                    api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), false)?,
                    timeout_secs: get_env(
                        "GEMINI_TIMEOUT_SECS",
                        Some(&DEFAULT_GEMINI_TIMEOUT_SECS.to_string()),
                        false,
                    )?
                    .parse()
                    .unwrap_or(DEFAULT_GEMINI_TIMEOUT_SECS),
                },
            },
            observability: ObservabilityConfig {
                log_level: get_env("LOG_LEVEL", Some("info"), false)?,
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            },
        })
    }
}

impl GeminiSettings {
    pub fn with_defaults(api_key: &str) -> Self {
        Self {
            api_key: Secret::new(api_key.to_string()),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout_secs: DEFAULT_GEMINI_TIMEOUT_SECS,
        }
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::config(format!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::config(format!("{} is required but not set", key)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn provider_kind_parses_case_insensitively() {
        assert_eq!(
            "Gemini".parse::<AiProviderKind>().unwrap(),
            AiProviderKind::Gemini
        );
        assert_eq!(
            " mock ".parse::<AiProviderKind>().unwrap(),
            AiProviderKind::Mock
        );
        assert!("openai".parse::<AiProviderKind>().is_err());
    }

    #[test]
    fn gemini_defaults_point_at_public_api() {
        let settings = GeminiSettings::with_defaults("k");
        assert_eq!(settings.api_key.expose_secret(), "k");
        assert_eq!(settings.model, "gemini-1.5-flash");
        assert!(settings.api_base.starts_with("https://generativelanguage"));
        assert_eq!(settings.timeout_secs, 120);
    }

    #[test]
    fn get_env_uses_default_outside_prod() {
        let value = get_env("BFHL_TEST_SURELY_UNSET_VAR", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn get_env_requires_value_in_prod() {
        let err = get_env("BFHL_TEST_SURELY_UNSET_VAR", Some("fallback"), true).unwrap_err();
        assert!(err.to_string().contains("required in production"));
    }
}
