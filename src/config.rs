use std::env;

/// Server configuration from the environment (a `.env` file is honored via
/// dotenvy in main).
#[derive(Debug, Clone)]
pub struct Config {
    /// REST bind address.
    pub addr: String,
    /// Sled data directory.
    pub data_dir: String,
    /// HS256 signing secret for bearer tokens.
    pub jwt_secret: Vec<u8>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            addr: env::var("HOTELIER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            data_dir: env::var("HOTELIER_DATA").unwrap_or_else(|_| "hotelier_data".to_string()),
            jwt_secret: env::var("HOTELIER_JWT_SECRET")
                .unwrap_or_else(|_| "dev_only_secret_change_me".to_string())
                .into_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Only assert defaults for keys the test env does not set
        if env::var("HOTELIER_ADDR").is_err() {
            assert_eq!(Config::from_env().addr, "0.0.0.0:8080");
        }
    }
}
