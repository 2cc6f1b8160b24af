use std::{env, fs, path::PathBuf, time::Duration};

use log::{info, warn};
use noah2mqtt::{
    growatt_config::GrowattConfig, home_assistant::DEFAULT_DISCOVERY_PREFIX,
    mqtt_config::MqttConfig, service,
};
use serde_derive::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub growatt: GrowattConfig,
    pub mqtt: MqttConfig,
    pub topic_prefix: Option<String>,
    pub home_assistant_prefix: Option<String>,
    pub polling_interval: Option<u64>,
}

impl Config {
    pub fn is_valid(&self) -> bool {
        self.growatt.is_valid() && self.mqtt.is_valid()
    }

    pub fn topic_prefix(&self) -> &str {
        self.topic_prefix
            .as_deref()
            .unwrap_or(service::DEFAULT_TOPIC_PREFIX)
    }

    pub fn home_assistant_prefix(&self) -> &str {
        self.home_assistant_prefix
            .as_deref()
            .unwrap_or(DEFAULT_DISCOVERY_PREFIX)
    }

    pub fn polling_interval(&self) -> Duration {
        match self.polling_interval {
            Some(seconds) if seconds > 0 => Duration::from_secs(seconds),
            _ => service::DEFAULT_POLLING_INTERVAL,
        }
    }

    pub fn load() -> Config {
        // parse config from TOML file if present
        let contents = match config_path().map(fs::read_to_string) {
            Some(Ok(contents)) => contents,
            Some(Err(e)) => {
                warn!("Could not read config.toml: {e}");
                "".into()
            }
            None => {
                info!("no config.toml found, relying on environment variables");
                "".into()
            }
        };
        let mut config = match toml::from_str::<Config>(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("toml config unparsable: {e}");
                Config::default()
            }
        };
        config.apply_env();
        config
    }

    // environment variables take precedence over config.toml
    fn apply_env(&mut self) {
        if let Ok(username) = env::var("GROWATT_USERNAME") {
            self.growatt.username = username;
        }
        if let Ok(password) = env::var("GROWATT_PASSWORD") {
            self.growatt.password = password;
        }
        if let Ok(server_url) = env::var("GROWATT_SERVER_URL") {
            self.growatt.server_url = Some(server_url);
        }
        if let Ok(host) = env::var("MQTT_HOST") {
            self.mqtt.host = host;
        }
        if let Ok(port) = env::var("MQTT_PORT") {
            match port.parse() {
                Ok(port) => self.mqtt.port = Some(port),
                Err(e) => warn!("ignoring MQTT_PORT {port}: {e}"),
            }
        }
        if let Ok(username) = env::var("MQTT_USERNAME") {
            self.mqtt.username = Some(username);
        }
        if let Ok(password) = env::var("MQTT_PASSWORD") {
            self.mqtt.password = Some(password);
        }
        if let Ok(client_id) = env::var("MQTT_CLIENT_ID") {
            self.mqtt.client_id = Some(client_id);
        }
        if let Ok(tls) = env::var("MQTT_TLS") {
            self.mqtt.tls = Some(matches!(tls.as_str(), "1" | "true" | "yes"));
        }
        if let Ok(prefix) = env::var("MQTT_TOPIC_PREFIX") {
            self.topic_prefix = Some(prefix);
        }
        if let Ok(prefix) = env::var("HOMEASSISTANT_TOPIC_PREFIX") {
            self.home_assistant_prefix = Some(prefix);
        }
        if let Ok(interval) = env::var("POLLING_INTERVAL") {
            match interval.parse() {
                Ok(seconds) => self.polling_interval = Some(seconds),
                Err(e) => warn!("ignoring POLLING_INTERVAL {interval}: {e}"),
            }
        }
    }
}

// load configuration from current working dir, or relative to executable if former location fails
fn config_path() -> Option<PathBuf> {
    let mut path = env::current_dir().ok()?;
    path.push("config.toml");
    if path.exists() {
        return Some(path);
    }
    info!("{} does not exist. Trying relative path", path.display());

    let mut path = env::current_exe().ok()?;
    path.pop();
    path.push("config.toml");
    path.exists().then_some(path)
}
