//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{LedgerBackend, TrialchainConfig};
use super::secret_string;
use crate::domain::errors::RegistryError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into TrialchainConfig
/// 4. Applies environment variable overrides (TRIALCHAIN_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns `RegistryError::Configuration` if the file is missing or
/// unreadable, a referenced variable is unset, the TOML does not parse or
/// validation fails.
///
/// # Examples
///
/// ```no_run
/// use trialchain::config::loader::load_config;
///
/// let config = load_config("trialchain.toml").expect("Failed to load config");
/// println!("ledger backend: {}", config.ledger.backend.as_str());
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TrialchainConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RegistryError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RegistryError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut config = parse_config(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        RegistryError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Parses configuration text after `${VAR}` substitution, without
/// overrides or validation
///
/// # Errors
///
/// Returns `RegistryError::Configuration` on missing variables or bad TOML.
pub fn parse_config(contents: &str) -> Result<TrialchainConfig> {
    let contents = substitute_env_vars(contents)?;
    toml::from_str(&contents)
        .map_err(|e| RegistryError::Configuration(format!("Failed to parse TOML: {e}")))
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RegistryError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RegistryError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using TRIALCHAIN_* prefix
///
/// Environment variables follow the pattern: TRIALCHAIN_<SECTION>_<KEY>,
/// for example TRIALCHAIN_STORAGE_DATA_DIR or TRIALCHAIN_LEDGER_BACKEND.
fn apply_env_overrides(config: &mut TrialchainConfig) -> Result<()> {
    if let Ok(val) = std::env::var("TRIALCHAIN_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("TRIALCHAIN_STORAGE_DATA_DIR") {
        config.storage.data_dir = val;
    }

    if let Ok(val) = std::env::var("TRIALCHAIN_LEDGER_BACKEND") {
        config.ledger.backend = parse_backend(&val)?;
    }
    if let Ok(val) = std::env::var("TRIALCHAIN_LEDGER_PUBLISH_ADDRESS") {
        config.ledger.publish_address = val;
    }
    if let Ok(val) = std::env::var("TRIALCHAIN_LEDGER_FETCH_ADDRESS") {
        config.ledger.fetch_address = val;
    }
    if let Ok(val) = std::env::var("TRIALCHAIN_LEDGER_FILE_PATH") {
        config.ledger.file_path = val;
    }
    if let Ok(val) = std::env::var("TRIALCHAIN_LEDGER_BASE_URL") {
        config.ledger.base_url = Some(val);
    }
    if let Ok(val) = std::env::var("TRIALCHAIN_LEDGER_API_TOKEN") {
        config.ledger.api_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("TRIALCHAIN_LEDGER_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.ledger.timeout_seconds = secs;
        }
    }

    if let Ok(val) = std::env::var("TRIALCHAIN_REPORT_DATE_FORMAT") {
        config.report.date_format = val;
    }

    if let Ok(val) = std::env::var("TRIALCHAIN_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("TRIALCHAIN_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("TRIALCHAIN_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_backend(value: &str) -> Result<LedgerBackend> {
    match value.trim().to_lowercase().as_str() {
        "memory" => Ok(LedgerBackend::Memory),
        "file" => Ok(LedgerBackend::File),
        "http" => Ok(LedgerBackend::Http),
        other => Err(RegistryError::Configuration(format!(
            "Invalid TRIALCHAIN_LEDGER_BACKEND '{other}'. Must be one of: memory, file, http"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"
[ledger]
publish_address = "0xCf3cC873C988eb635712C8AB7c9a4F6A2376EFc7"
fetch_address = "0xCf3cC873C988eb635712C8AB7c9a4F6A2376EFc7"
"#;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("TRIALCHAIN_TEST_SUB_VAR", "test_value");
        let input = "api_token = \"${TRIALCHAIN_TEST_SUB_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api_token = \"test_value\"\n");
        std::env::remove_var("TRIALCHAIN_TEST_SUB_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("TRIALCHAIN_TEST_MISSING_VAR");
        let input = "api_token = \"${TRIALCHAIN_TEST_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("TRIALCHAIN_TEST_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# api_token = \"${TRIALCHAIN_TEST_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let config = parse_config(MINIMAL).unwrap();
        assert_eq!(config.application.log_level, "warn");
        assert_eq!(config.storage.data_dir, "./trialchain-data");
        assert_eq!(config.ledger.backend, LedgerBackend::File);
        assert_eq!(config.ledger.timeout_seconds, 10);
        assert_eq!(config.report.date_format, "%-m/%-d/%Y");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_requires_ledger_addresses() {
        let err = parse_config("[ledger]\nbackend = \"memory\"\n").unwrap_err();
        assert!(matches!(err, RegistryError::Configuration(_)));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-trialchain.toml");
        assert!(matches!(result, Err(RegistryError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "info"

[storage]
data_dir = "/tmp/trialchain"

[ledger]
backend = "http"
publish_address = "0xCf3cC873C988eb635712C8AB7c9a4F6A2376EFc7"
fetch_address = "0xCf3cC873C988eb635712C8AB7c9a4F6A2376EFc7"
base_url = "https://ledger.example.com"
timeout_seconds = 5

[report]
date_format = "%Y-%m-%d"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.ledger.backend, LedgerBackend::Http);
        assert_eq!(
            config.ledger.base_url.as_deref(),
            Some("https://ledger.example.com")
        );
        assert_eq!(config.report.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let toml_content = r#"
[ledger]
backend = "http"
publish_address = "0xCf3cC873C988eb635712C8AB7c9a4F6A2376EFc7"
fetch_address = "0xCf3cC873C988eb635712C8AB7c9a4F6A2376EFc7"
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_parse_backend() {
        assert_eq!(parse_backend(" HTTP ").unwrap(), LedgerBackend::Http);
        assert!(parse_backend("chain").is_err());
    }
}
