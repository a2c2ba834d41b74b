use serde::Deserialize;

/// Highest accepted request rate; the limiter replenishes in whole milliseconds.
pub const MAX_RATE_PER_SECOND: u64 = 1000;

/// Per-IP rate limit applied to the scoring endpoint.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct RateLimit {
    pub per_second: u64,
    pub burst_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// `None` disables rate limiting.
    pub rate_limit: Option<RateLimit>,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            rate_limit: Some(RateLimit {
                per_second: 10,
                burst_size: 20,
            }),
            max_body_bytes: 64 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or(defaults.host);

        let port = match var("PORT") {
            Some(p) => p
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|p| *p > 0)
                .ok_or_else(|| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            None => defaults.port,
        };

        let per_second = match var("RATE_LIMIT_PER_SECOND") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|r| *r <= MAX_RATE_PER_SECOND)
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "RATE_LIMIT_PER_SECOND must be a number between 0 and {}",
                        MAX_RATE_PER_SECOND
                    )
                })?,
            None => 10,
        };

        let burst_size = match var("RATE_LIMIT_BURST") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|b| *b > 0)
                .ok_or_else(|| anyhow::anyhow!("RATE_LIMIT_BURST must be a positive number"))?,
            None => 20,
        };

        let max_body_bytes = match var("MAX_BODY_BYTES") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|b| *b > 0)
                .ok_or_else(|| anyhow::anyhow!("MAX_BODY_BYTES must be a positive number"))?,
            None => defaults.max_body_bytes,
        };

        let config = Self {
            host,
            port,
            rate_limit: (per_second > 0).then_some(RateLimit {
                per_second,
                burst_size,
            }),
            max_body_bytes,
        };

        tracing::debug!("Server address: {}:{}", config.host, config.port);
        match config.rate_limit {
            Some(limit) => tracing::debug!(
                "Rate limit: {} req/s, burst {}",
                limit.per_second,
                limit.burst_size
            ),
            None => tracing::info!("Rate limiting disabled"),
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
