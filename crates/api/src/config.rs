/// Gateway configuration loaded from environment variables.
///
/// All optional fields have defaults suitable for local development.
/// The two upstream base URLs are required; missing either is a
/// startup failure.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the user-management API.
    pub user_api_url: String,
    /// Base URL of the traffic-flow API.
    pub traffic_api_url: String,
    /// Traffic snapshot poll interval in seconds (default: `30`).
    pub traffic_poll_secs: u64,
    /// Whether session cookies carry the `Secure` attribute. True when
    /// `APP_ENV=production`.
    pub secure_cookies: bool,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Required | Default                 |
    /// |------------------------|----------|-------------------------|
    /// | `HOST`                 | no       | `0.0.0.0`               |
    /// | `PORT`                 | no       | `3000`                  |
    /// | `CORS_ORIGINS`         | no       | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | no       | `30`                    |
    /// | `USER_API_URL`         | **yes**  | --                      |
    /// | `TRAFFIC_API_URL`      | **yes**  | --                      |
    /// | `TRAFFIC_POLL_SECS`    | no       | `30`                    |
    /// | `APP_ENV`              | no       | `development`           |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or a numeric variable
    /// fails to parse -- misconfiguration should fail fast at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let user_api_url =
            std::env::var("USER_API_URL").expect("USER_API_URL must be set in the environment");
        let traffic_api_url = std::env::var("TRAFFIC_API_URL")
            .expect("TRAFFIC_API_URL must be set in the environment");

        let traffic_poll_secs: u64 = std::env::var("TRAFFIC_POLL_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("TRAFFIC_POLL_SECS must be a valid u64");

        let secure_cookies = std::env::var("APP_ENV")
            .map(|env| env == "production")
            .unwrap_or(false);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            user_api_url,
            traffic_api_url,
            traffic_poll_secs,
            secure_cookies,
        }
    }
}
