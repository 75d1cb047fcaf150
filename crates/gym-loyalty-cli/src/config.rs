//! CLI configuration.

use serde::Deserialize;
use std::path::Path;

/// Default gym API base URL.
const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Places a secrets file is looked for, in order.
const SECRET_PATHS: [&str; 3] = [
    ".secrets/gym-api.json",
    "gym-loyalty/.secrets/gym-api.json",
    "../.secrets/gym-api.json",
];

/// Configuration loaded from a secrets file and environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Gym API base URL (default: `http://localhost:8000/api`).
    pub api_url: String,

    /// Bearer token for the gym API (optional).
    pub api_token: Option<String>,

    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

/// Gym API secrets file structure.
#[derive(Debug, Deserialize)]
struct ApiSecrets {
    api_url: String,
    #[serde(default)]
    api_token: Option<String>,
}

impl CliConfig {
    /// Load configuration from the secrets file or environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_sources(&SECRET_PATHS)
    }

    fn from_sources<P: AsRef<Path>>(secret_paths: &[P]) -> Self {
        let (api_url, api_token) = load_api_secrets(secret_paths);

        Self {
            api_url,
            api_token,
            timeout_seconds: std::env::var("GYM_API_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            api_token: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// Load API URL and token from the first readable secrets file, else the environment.
fn load_api_secrets<P: AsRef<Path>>(secret_paths: &[P]) -> (String, Option<String>) {
    for path in secret_paths {
        let path = path.as_ref();
        if let Ok(secrets) = load_secrets_file::<ApiSecrets>(path) {
            tracing::info!(path = %path.display(), "Loaded gym API secrets from file");
            return (secrets.api_url, secrets.api_token);
        }
    }

    tracing::debug!("Gym API secrets file not found, using environment variables");
    (
        std::env::var("GYM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()),
        std::env::var("GYM_API_TOKEN").ok(),
    )
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, std::io::Error> {
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
