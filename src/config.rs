use std::env;

#[derive(Debug)]
pub enum ConfigError {
    MissingApiKey,
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingApiKey => {
                write!(f, "GEMINI_API_KEY must be set before the service can start")
            }
            ConfigError::InvalidValue(msg) => write!(f, "invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Process-wide configuration, read from the environment exactly once at
/// startup. Every inference path depends on the language-model credentials,
/// so a missing API key aborts startup instead of degrading silently.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub embedding_model: String,
    pub qdrant_host: String,
    pub qdrant_port: u16,
    pub port: u16,
    pub debug: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            gemini_api_key,
            embedding_model: env::var("EMBEDDING_MODEL_NAME")
                .unwrap_or_else(|_| "models/embedding-001".to_string()),
            qdrant_host: env::var("QDRANT_HOST").unwrap_or_else(|_| "localhost".to_string()),
            qdrant_port: parse_port("QDRANT_PORT", 6333)?,
            port: parse_port("PORT", 8000)?,
            debug: parse_flag(env::var("DEBUG").ok().as_deref()),
        })
    }
}

fn parse_port(name: &str, default: u16) -> Result<u16, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue(format!("{}={}", name, value))),
        Err(_) => Ok(default),
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(value, Some(v) if v.eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some("TRUE")));
        assert!(!parse_flag(Some("false")));
        assert!(!parse_flag(Some("1")));
        assert!(!parse_flag(None));
    }
}
