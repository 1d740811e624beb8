use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub db_name: String,
    pub jwt: JwtConfig,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mongodb_uri = std::env::var("MONGODB_URI")?;
        let db_name = std::env::var("MONGODB_DB").unwrap_or_else(|_| "quick-beaver-dive".into());
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            expires_in: std::env::var("JWT_EXPIRES_IN")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(86_400),
        };
        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            mongodb_uri,
            db_name,
            jwt,
            cors_origins,
        })
    }
}
