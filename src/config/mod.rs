use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Server bind address (e.g., "0.0.0.0:3000").
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// PostgreSQL connection string
    pub database_url: String,

    /// Gemini API key for the vision service
    pub gemini_api_key: String,

    /// Vision model identifier
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Upper bound on a single vision call, in seconds. The analysis
    /// surfaces an unavailability error rather than blocking past this.
    #[serde(default = "default_vision_timeout_secs")]
    pub vision_timeout_secs: u64,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_gemini_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_vision_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }
}
