//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, AzureConfig, CaptureConfig};
use crate::domain::error::ConfigError;
use crate::domain::language::Language;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(unknown_key(key));
    }

    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;
    store.save(&config).await?;

    presenter.success(&format!("{} = {}", key, value));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(unknown_key(key));
    }

    let config = store.load().await?;
    match read_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;
    for key in VALID_CONFIG_KEYS {
        let value = read_value(&config, key).unwrap_or_else(|| "(not set)".to_string());
        presenter.key_value(key, &value);
    }
    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    }
}

fn bool_error(key: &str) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: "Value must be 'true' or 'false'".to_string(),
    }
}

fn number_error(key: &str) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: "Value must be a number".to_string(),
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "language" => {
            value
                .parse::<Language>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        }
        "auto_mic" | "voice" => {
            parse_bool(value).map_err(|_| bool_error(key))?;
        }
        "capture.silence_threshold_db" => {
            value.parse::<f32>().map_err(|_| number_error(key))?;
        }
        "capture.quiet_period_ms" | "capture.grace_period_ms" | "capture.max_duration_ms" => {
            value.parse::<u64>().map_err(|_| number_error(key))?;
        }
        _ => {} // paths, keys, regions, and endpoints accept any string
    }
    Ok(())
}

/// Write a validated value into the config
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "language" => config.language = Some(value.to_string()),
        "auto_mic" => config.auto_mic = Some(parse_bool(value).map_err(|_| bool_error(key))?),
        "voice" => config.voice = Some(parse_bool(value).map_err(|_| bool_error(key))?),
        "cache_dir" => config.cache_dir = Some(value.to_string()),
        _ if key.starts_with("azure.") => {
            let azure = config.azure.get_or_insert_with(AzureConfig::default);
            match key {
                "azure.speech_key" => azure.speech_key = Some(value.to_string()),
                "azure.speech_region" => azure.speech_region = Some(value.to_string()),
                "azure.translator_key" => azure.translator_key = Some(value.to_string()),
                "azure.translator_region" => azure.translator_region = Some(value.to_string()),
                "azure.translator_endpoint" => {
                    azure.translator_endpoint = Some(value.to_string())
                }
                "azure.openai_endpoint" => azure.openai_endpoint = Some(value.to_string()),
                "azure.openai_api_key" => azure.openai_api_key = Some(value.to_string()),
                "azure.openai_deployment" => azure.openai_deployment = Some(value.to_string()),
                _ => return Err(unknown_key(key)),
            }
        }
        _ if key.starts_with("capture.") => {
            let capture = config.capture.get_or_insert_with(CaptureConfig::default);
            match key {
                "capture.silence_threshold_db" => {
                    capture.silence_threshold_db =
                        Some(value.parse().map_err(|_| number_error(key))?)
                }
                "capture.quiet_period_ms" => {
                    capture.quiet_period_ms = Some(value.parse().map_err(|_| number_error(key))?)
                }
                "capture.grace_period_ms" => {
                    capture.grace_period_ms = Some(value.parse().map_err(|_| number_error(key))?)
                }
                "capture.max_duration_ms" => {
                    capture.max_duration_ms = Some(value.parse().map_err(|_| number_error(key))?)
                }
                _ => return Err(unknown_key(key)),
            }
        }
        _ => return Err(unknown_key(key)),
    }
    Ok(())
}

/// Read a display value from the config
fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    let azure = config.azure.as_ref();
    let capture = config.capture.as_ref();
    match key {
        "language" => config.language.clone(),
        "auto_mic" => config.auto_mic.map(|b| b.to_string()),
        "voice" => config.voice.map(|b| b.to_string()),
        "cache_dir" => config.cache_dir.clone(),
        "azure.speech_key" => azure.and_then(|a| a.speech_key.as_deref()).map(mask_secret),
        "azure.speech_region" => azure.and_then(|a| a.speech_region.clone()),
        "azure.translator_key" => azure
            .and_then(|a| a.translator_key.as_deref())
            .map(mask_secret),
        "azure.translator_region" => azure.and_then(|a| a.translator_region.clone()),
        "azure.translator_endpoint" => azure.and_then(|a| a.translator_endpoint.clone()),
        "azure.openai_endpoint" => azure.and_then(|a| a.openai_endpoint.clone()),
        "azure.openai_api_key" => azure
            .and_then(|a| a.openai_api_key.as_deref())
            .map(mask_secret),
        "azure.openai_deployment" => azure.and_then(|a| a.openai_deployment.clone()),
        "capture.silence_threshold_db" => {
            capture.and_then(|c| c.silence_threshold_db).map(|v| v.to_string())
        }
        "capture.quiet_period_ms" => {
            capture.and_then(|c| c.quiet_period_ms).map(|v| v.to_string())
        }
        "capture.grace_period_ms" => {
            capture.and_then(|c| c.grace_period_ms).map(|v| v.to_string())
        }
        "capture.max_duration_ms" => {
            capture.and_then(|c| c.max_duration_ms).map(|v| v.to_string())
        }
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

/// Mask a secret for display (show first 4 and last 4 chars)
fn mask_secret(key: &str) -> String {
    if key.len() <= 8 {
        "*".repeat(key.len())
    } else {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("false"), Ok(false));
        assert_eq!(parse_bool("yes"), Ok(true));
        assert_eq!(parse_bool("no"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert_eq!(parse_bool("0"), Ok(false));
        assert!(parse_bool("invalid").is_err());
    }

    #[test]
    fn mask_secret_long() {
        assert_eq!(mask_secret("abcdefghijklmnop"), "abcd...mnop");
    }

    #[test]
    fn mask_secret_short() {
        assert_eq!(mask_secret("short"), "*****");
    }

    #[test]
    fn validate_language_values() {
        assert!(validate_config_value("language", "hi").is_ok());
        assert!(validate_config_value("language", "fr").is_err());
    }

    #[test]
    fn validate_boolean_values() {
        assert!(validate_config_value("auto_mic", "true").is_ok());
        assert!(validate_config_value("voice", "maybe").is_err());
    }

    #[test]
    fn validate_capture_values() {
        assert!(validate_config_value("capture.quiet_period_ms", "900").is_ok());
        assert!(validate_config_value("capture.quiet_period_ms", "soon").is_err());
        assert!(validate_config_value("capture.silence_threshold_db", "-55.5").is_ok());
    }

    #[test]
    fn apply_and_read_top_level_value() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "language", "ta").unwrap();
        assert_eq!(read_value(&config, "language"), Some("ta".to_string()));
    }

    #[test]
    fn apply_and_read_azure_value() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "azure.speech_region", "centralindia").unwrap();
        assert_eq!(
            read_value(&config, "azure.speech_region"),
            Some("centralindia".to_string())
        );
    }

    #[test]
    fn secrets_are_masked_on_read() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "azure.speech_key", "abcdefghijklmnop").unwrap();
        assert_eq!(
            read_value(&config, "azure.speech_key"),
            Some("abcd...mnop".to_string())
        );
    }

    #[test]
    fn apply_and_read_capture_value() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "capture.max_duration_ms", "8000").unwrap();
        assert_eq!(
            read_value(&config, "capture.max_duration_ms"),
            Some("8000".to_string())
        );
        assert_eq!(config.vad_config().max_duration_ms, 8000);
    }

    #[test]
    fn unset_values_read_as_none() {
        let config = AppConfig::empty();
        assert_eq!(read_value(&config, "azure.openai_endpoint"), None);
        assert_eq!(read_value(&config, "capture.grace_period_ms"), None);
    }
}
