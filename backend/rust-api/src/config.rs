use serde::Deserialize;
use std::env;

pub const DEFAULT_AI_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub mongo_uri: String,
    pub mongo_database: String,
    pub port: u16,
    pub ai: AiConfig,
}

/// Generative-AI provider settings. Without a usable `api_key` every AI call
/// goes straight to the fallback content.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub mock_delay_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_AI_BASE_URL.to_string(),
            timeout_secs: 30,
            mock_delay_ms: 0,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Local .env is optional; real environment always wins
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // config/*.toml + ENV overrides (prefix: APP_)
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let mongo_uri = settings
            .get_string("database.mongo_uri")
            .or_else(|_| env::var("MONGODB_URI"))
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let mongo_database = settings
            .get_string("database.mongo_database")
            .or_else(|_| env::var("MONGO_DATABASE"))
            .unwrap_or_else(|_| "quiz_app".to_string());

        let port = settings
            .get_int("server.port")
            .ok()
            .and_then(|p| u16::try_from(p).ok())
            .or_else(|| env::var("PORT").ok().and_then(|p| p.trim().parse().ok()))
            .unwrap_or(5000);

        let api_key = settings
            .get_string("ai.api_key")
            .or_else(|_| env::var("AI_API_KEY"))
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        if api_key.is_none() {
            tracing::warn!("AI_API_KEY not set, quiz content will come from the question bank");
        }

        let base_url = settings
            .get_string("ai.base_url")
            .or_else(|_| env::var("AI_BASE_URL"))
            .unwrap_or_else(|_| DEFAULT_AI_BASE_URL.to_string());

        let timeout_secs = read_u64(&settings, "ai.timeout_secs", "AI_TIMEOUT_SECS").unwrap_or(30);
        let mock_delay_ms = read_u64(&settings, "ai.mock_delay_ms", "AI_MOCK_DELAY_MS").unwrap_or(0);

        Ok(Config {
            mongo_uri,
            mongo_database,
            port,
            ai: AiConfig {
                api_key,
                base_url,
                timeout_secs,
                mock_delay_ms,
            },
        })
    }
}

fn read_u64(settings: &config::Config, key: &str, env_key: &str) -> Option<u64> {
    settings
        .get_int(key)
        .ok()
        .and_then(|v| u64::try_from(v).ok())
        .or_else(|| env::var(env_key).ok().and_then(|v| v.trim().parse().ok()))
}
