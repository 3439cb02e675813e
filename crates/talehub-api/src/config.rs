//! Server configuration, read once from the environment at startup.

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Base URL baked into blob retrieval URLs.
    pub public_base_url: String,
    /// Name of the access-token cookie set at login.
    pub access_token_cookie: String,
}

impl AppConfig {
    /// Reads configuration from environment variables. `DATABASE_URL` is
    /// required; everything else has a development default.
    ///
    /// # Errors
    ///
    /// Returns a message naming the missing or malformed variable.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable must be set".to_owned())?;
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_owned())
            .parse()
            .map_err(|e| format!("PORT must be a valid u16: {e}"))?;
        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let access_token_cookie = std::env::var("ACCESS_TOKEN_COOKIE")
            .unwrap_or_else(|_| "talehub-access-token".to_owned());

        Ok(Self {
            host,
            port,
            database_url,
            public_base_url,
            access_token_cookie,
        })
    }
}
