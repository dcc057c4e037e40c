use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://playground.4geeks.com/contact";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_url: String,
    pub default_agenda: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            default_agenda: None,
        }
    }
}
