use serde_derive::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    pub host: String,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub client_id: Option<String>,
    pub tls: Option<bool>,
}

impl MqttConfig {
    pub fn is_valid(&self) -> bool {
        !self.host.is_empty()
    }
}
