use crate::app_config::{AppConfig, Environment, ResponseShape};
use crate::ConfigError;

/// Reads `GOGROUPS_*` settings, loading a `.env` file first if one exists.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Reads `GOGROUPS_*` settings from the process environment only.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

// Every variable has a default; an empty environment is a working local setup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let var_or = |var: &str, default: &str| lookup(var).unwrap_or_else(|_| default.to_owned());

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&var_or("GOGROUPS_ENV", "development"))?;

    let bind_addr = var_or("GOGROUPS_BIND_ADDR", "0.0.0.0:8080")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("GOGROUPS_BIND_ADDR", e.to_string()))?;
    let log_level = var_or("GOGROUPS_LOG_LEVEL", "info");
    let groups_path = PathBuf::from(var_or("GOGROUPS_GROUPS_PATH", "./config/groups.yaml"));
    let response_shape = parse_response_shape(&var_or("GOGROUPS_RESPONSE_SHAPE", "current"))?;

    let api_base_url = var_or("GOGROUPS_API_BASE_URL", "http://localhost:8080");
    if api_base_url.trim().is_empty() {
        return Err(invalid(
            "GOGROUPS_API_BASE_URL",
            "must not be empty".to_string(),
        ));
    }
    let request_timeout_secs = var_or("GOGROUPS_REQUEST_TIMEOUT_SECS", "30")
        .parse::<u64>()
        .map_err(|e| invalid("GOGROUPS_REQUEST_TIMEOUT_SECS", e.to_string()))?;
    let user_agent = var_or("GOGROUPS_USER_AGENT", "gogroups/0.1");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        groups_path,
        response_shape,
        api_base_url,
        request_timeout_secs,
        user_agent,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    Environment::ALL
        .into_iter()
        .find(|env| env.as_str() == s)
        .ok_or_else(|| ConfigError::InvalidEnvVar {
            var: "GOGROUPS_ENV".to_string(),
            reason: format!("unknown environment '{s}'"),
        })
}

fn parse_response_shape(s: &str) -> Result<ResponseShape, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "current" => Ok(ResponseShape::Current),
        "legacy" => Ok(ResponseShape::Legacy),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GOGROUPS_RESPONSE_SHAPE".to_string(),
            reason: format!("expected 'current' or 'legacy', got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
