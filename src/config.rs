//! Runtime configuration
//!
//! Gathered once at startup from the environment (dotenv first) with
//! the plaintext key file as a fallback credential source.

use crate::error::InterviewError;
use std::path::PathBuf;
use tracing::info;

/// Model used for the open-ended dialogue stages
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
/// More capable model used for extraction and computation
pub const DEFAULT_REASONING_MODEL: &str = "gpt-4o-mini";

const DEFAULT_KEY_FILE: &str = "openai_apikey.txt";
const DEFAULT_RULES_PATH: &str = "data/itr_rules.csv";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub chat_model: String,
    pub reasoning_model: String,
    pub rules_path: PathBuf,
    /// Iteration cap for the stage loops. `None` means ask until
    /// satisfied; set only when embedding in automated harnesses.
    pub turn_limit: Option<u32>,
}

impl Config {
    /// Load configuration from the environment. Missing credential or
    /// an unreadable key file is fatal here, before any stage runs.
    pub fn from_env() -> crate::Result<Self> {
        let api_key = match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key.trim().to_string(),
            _ => {
                let key_path = std::env::var("OPENAI_API_KEY_FILE")
                    .unwrap_or_else(|_| DEFAULT_KEY_FILE.to_string());
                read_key_file(&key_path)?
            }
        };

        let chat_model = std::env::var("CHATITR_CHAT_MODEL")
            .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());
        let reasoning_model = std::env::var("CHATITR_REASONING_MODEL")
            .unwrap_or_else(|_| DEFAULT_REASONING_MODEL.to_string());

        let rules_path = PathBuf::from(
            std::env::var("ITR_RULES_PATH").unwrap_or_else(|_| DEFAULT_RULES_PATH.to_string()),
        );

        let turn_limit = match std::env::var("CHATITR_TURN_LIMIT") {
            Ok(raw) => Some(raw.parse::<u32>().map_err(|_| {
                InterviewError::ConfigError(format!("invalid CHATITR_TURN_LIMIT: {}", raw))
            })?),
            Err(_) => None,
        };

        info!(
            chat_model = %chat_model,
            reasoning_model = %reasoning_model,
            rules_path = %rules_path.display(),
            "Configuration loaded"
        );

        Ok(Self {
            api_key,
            chat_model,
            reasoning_model,
            rules_path,
            turn_limit,
        })
    }
}

fn read_key_file(path: &str) -> crate::Result<String> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        InterviewError::ResourceError(format!("failed to read API key file {}: {}", path, e))
    })?;

    // First line only, matching the key file convention
    let key = raw.lines().next().unwrap_or("").trim().to_string();
    if key.is_empty() {
        return Err(InterviewError::ResourceError(format!(
            "API key file {} is empty",
            path
        )));
    }

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_key_file_first_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sk-test-abc").unwrap();
        writeln!(file, "trailing junk").unwrap();

        let key = read_key_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(key, "sk-test-abc");
    }

    #[test]
    fn test_read_key_file_missing_is_fatal() {
        let err = read_key_file("no/such/openai_apikey.txt").unwrap_err();
        assert!(matches!(err, InterviewError::ResourceError(_)));
    }

    #[test]
    fn test_read_key_file_empty_is_fatal() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = read_key_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
