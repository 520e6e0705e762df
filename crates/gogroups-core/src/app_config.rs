use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    pub const ALL: [Environment; 3] = [
        Environment::Development,
        Environment::Test,
        Environment::Production,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which `/api/groups` envelope the server emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseShape {
    /// `{"Groups": [...], "Errors": [...]}`
    #[default]
    Current,
    /// `{"Groups": [...], "Error": "..."}` with `Link`/`Lat`/`Lon` groups.
    Legacy,
}

impl std::fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseShape::Current => write!(f, "current"),
            ResponseShape::Legacy => write!(f, "legacy"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub groups_path: PathBuf,
    pub response_shape: ResponseShape,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}
