use crate::config::types::{BoardsConfig, Config, SearchConfig, SourceConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_search_config(&config.search)?;
    validate_source_config(&config.source)?;
    validate_boards_config(&config.boards)?;
    Ok(())
}

/// Validates search configuration
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.max_workers < 1 || config.max_workers > 100 {
        return Err(ConfigError::Validation(format!(
            "max_workers must be between 1 and 100, got {}",
            config.max_workers
        )));
    }

    if config.max_threads_per_board < 1 {
        return Err(ConfigError::Validation(format!(
            "max_threads_per_board must be >= 1, got {}",
            config.max_threads_per_board
        )));
    }

    if config.download_dir.trim().is_empty() {
        return Err(ConfigError::Validation(
            "download_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates endpoint configuration
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    validate_base_url("api_base", &config.api_base)?;
    validate_base_url("media_base", &config.media_base)?;
    validate_base_url("site_base", &config.site_base)?;

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates explicitly listed board codes
fn validate_boards_config(config: &BoardsConfig) -> Result<(), ConfigError> {
    for board in &config.list {
        validate_board_code(board)?;
    }
    Ok(())
}

/// Board codes are short alphanumeric tokens such as `g` or `3`
pub(crate) fn validate_board_code(board: &str) -> Result<(), ConfigError> {
    if board.is_empty() {
        return Err(ConfigError::Validation(
            "Board code cannot be empty".to_string(),
        ));
    }

    if !board.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::Validation(format!(
            "Board code '{}' must be alphanumeric",
            board
        )));
    }

    Ok(())
}

fn validate_base_url(name: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", name, e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            name, value
        )));
    }

    Ok(())
}
