/// Runtime configuration, read once at startup from the environment.
#[derive(Debug)]
pub struct HrConfig {
    /// Postgres connection string.
    pub database_url: String,
    /// Redis connection string for the OTP store.
    pub redis_url: String,
    /// Symmetric secret both token kinds are signed with.
    pub jwt_secret: String,
    /// Domain attribute stamped on every auth cookie.
    pub cookie_domain: String,
    /// TCP port to listen on (default 3114). Env var: `HR_PORT`.
    pub hr_port: u16,
    /// Password assigned to roster-file rows that carry none. Env var:
    /// `IMPORT_DEFAULT_PASSWORD`. When unset, such rows fail validation.
    pub import_default_password: Option<String>,
    /// Maximum rows accepted per import request (default 10000). Env var: `IMPORT_MAX_ROWS`.
    pub import_max_rows: usize,
}

impl HrConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            redis_url: std::env::var("REDIS_URL").expect("REDIS_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            hr_port: std::env::var("HR_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
            import_default_password: std::env::var("IMPORT_DEFAULT_PASSWORD").ok(),
            import_max_rows: std::env::var("IMPORT_MAX_ROWS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
        }
    }
}
