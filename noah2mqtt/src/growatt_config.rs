use serde_derive::Deserialize;

pub const DEFAULT_SERVER_URL: &str = "https://openapi.growatt.com";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GrowattConfig {
    pub username: String,
    pub password: String,
    pub server_url: Option<String>,
}

impl GrowattConfig {
    pub fn is_valid(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    pub fn server_url(&self) -> &str {
        self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }
}
