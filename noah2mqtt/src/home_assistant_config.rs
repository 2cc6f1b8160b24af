use serde_derive::Serialize;

/// `DeviceConfig` is used to define the configuration for a Home Assistant device
/// in the MQTT discovery protocol and is used to group entities together.
///
#[derive(Serialize, Clone)]
pub struct DeviceConfig {
    name: String,
    model: String,
    identifiers: Vec<String>,
    manufacturer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sw_version: Option<String>, // Firmware version reported by the device.
    #[serde(skip_serializing_if = "Option::is_none")]
    via_device: Option<String>, // Identifier of the device this one is attached to.
}

impl DeviceConfig {
    pub fn new(name: String, model: String, identifier: String) -> Self {
        Self {
            name,
            model,
            identifiers: Vec::from([identifier]),
            manufacturer: "Growatt".to_string(),
            sw_version: None,
            via_device: None,
        }
    }

    pub fn with_sw_version(mut self, sw_version: &str) -> Self {
        if !sw_version.is_empty() {
            self.sw_version = Some(sw_version.to_string());
        }
        self
    }

    pub fn via(mut self, parent: &DeviceConfig) -> Self {
        self.via_device = Some(parent.identifiers[0].clone());
        self
    }
}

/// `SensorConfig` is used to define the configuration for a Home Assistant sensor entity
/// in the MQTT discovery protocol.
///
/// More information about the MQTT discovery protocol can be found here:
/// https://www.home-assistant.io/docs/mqtt/discovery/
///
#[derive(Serialize)]
pub struct SensorConfig {
    pub unique_id: String,  //  A globally unique identifier for the sensor.
    name: String,           // The name of the sensor.
    state_topic: String,    // The MQTT topic where sensor readings will be published.
    value_template: String, // A template to extract a value from the mqtt message.
    device: DeviceConfig,   // The device that the sensor belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    unit_of_measurement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state_class: Option<String>,
}

impl SensorConfig {
    fn new_sensor(
        state_topic: &str,
        device_config: &DeviceConfig,
        key: &str,
        name: &str,
        device_class: Option<&str>,
        unit_of_measurement: Option<&str>,
        state_class: Option<&str>,
    ) -> Self {
        SensorConfig {
            unique_id: format!("{}_{}", device_config.identifiers[0], key),
            name: name.to_string(),
            state_topic: state_topic.to_string(),
            value_template: format!("{{{{ value_json.{} }}}}", key),
            device: device_config.clone(),
            unit_of_measurement: unit_of_measurement.map(str::to_string),
            device_class: device_class.map(str::to_string),
            state_class: state_class.map(str::to_string),
        }
    }

    pub fn string(state_topic: &str, device_config: &DeviceConfig, name: &str, key: &str) -> Self {
        Self::new_sensor(state_topic, device_config, key, name, None, None, None)
    }

    pub fn count(state_topic: &str, device_config: &DeviceConfig, name: &str, key: &str) -> Self {
        Self::new_sensor(
            state_topic,
            device_config,
            key,
            name,
            None,
            None,
            Some("measurement"),
        )
    }

    pub fn power(state_topic: &str, device_config: &DeviceConfig, name: &str, key: &str) -> Self {
        Self::new_sensor(
            state_topic,
            device_config,
            key,
            name,
            Some("power"),
            Some("W"),
            Some("measurement"),
        )
    }

    pub fn energy(state_topic: &str, device_config: &DeviceConfig, name: &str, key: &str) -> Self {
        Self::new_sensor(
            state_topic,
            device_config,
            key,
            name,
            Some("energy"),
            Some("kWh"),
            Some("total_increasing"),
        )
    }

    pub fn battery(state_topic: &str, device_config: &DeviceConfig, name: &str, key: &str) -> Self {
        Self::new_sensor(
            state_topic,
            device_config,
            key,
            name,
            Some("battery"),
            Some("%"),
            Some("measurement"),
        )
    }

    pub fn temperature(
        state_topic: &str,
        device_config: &DeviceConfig,
        name: &str,
        key: &str,
    ) -> Self {
        Self::new_sensor(
            state_topic,
            device_config,
            key,
            name,
            Some("temperature"),
            Some("°C"),
            Some("measurement"),
        )
    }
}
