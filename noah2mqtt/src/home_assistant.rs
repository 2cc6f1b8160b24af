use log::{debug, error, info};

use crate::discovery_registrar::DiscoveryRegistrar;
use crate::home_assistant_config::{DeviceConfig, SensorConfig};
use crate::inventory::{BatteryInfo, DeviceInfo};
use crate::mqtt_config::MqttConfig;
use crate::mqtt_wrapper::{MqttWrapper, QoS};

pub const DEFAULT_DISCOVERY_PREFIX: &str = "homeassistant";

/// Announces devices through Home Assistant MQTT discovery.
pub struct HomeAssistant<MQTT: MqttWrapper> {
    client: MQTT,
    discovery_prefix: String,
}

impl<MQTT: MqttWrapper> HomeAssistant<MQTT> {
    pub fn new(config: &MqttConfig, discovery_prefix: &str) -> Self {
        Self::with_client(MQTT::new(config, "-ha"), discovery_prefix)
    }

    pub fn with_client(client: MQTT, discovery_prefix: &str) -> Self {
        Self {
            client,
            discovery_prefix: discovery_prefix.to_string(),
        }
    }

    fn publish_json(&mut self, topic: &str, payload: serde_json::Value) {
        debug!("Publishing to {topic} with payload {payload}");

        if let Err(e) = self
            .client
            .publish(topic, QoS::AtMostOnce, true, payload.to_string())
        {
            error!("Failed to publish message: {e:?}");
        }
    }

    fn publish_configs(&mut self, config_topic: &str, sensor_configs: &[SensorConfig]) {
        // configs let home assistant know what sensors are available and where to find them
        for sensor_config in sensor_configs {
            let topic = format!("{}/{}/config", config_topic, sensor_config.unique_id);
            match serde_json::to_value(sensor_config) {
                Ok(payload) => self.publish_json(&topic, payload),
                Err(e) => error!("could not serialize sensor config {}: {e}", sensor_config.unique_id),
            }
        }
    }
}

impl<MQTT: MqttWrapper> DiscoveryRegistrar for HomeAssistant<MQTT> {
    fn set_devices(&mut self, devices: &[DeviceInfo]) {
        for device in devices {
            info!(
                "announcing {} ({}) with {} batteries to home assistant",
                device.serial_number,
                device.alias,
                device.batteries.len()
            );
            let config_topic = format!(
                "{}/sensor/{}",
                self.discovery_prefix,
                device_identifier(&device.serial_number)
            );
            let sensors = create_sensor_configs(device);
            self.publish_configs(&config_topic, &sensors);
        }
    }
}

fn device_identifier(serial_number: &str) -> String {
    format!("noah_{serial_number}")
}

fn create_sensor_configs(device: &DeviceInfo) -> Vec<SensorConfig> {
    let name = if device.alias.is_empty() {
        format!("Noah {}", device.serial_number)
    } else {
        device.alias.clone()
    };
    let device_config = DeviceConfig::new(
        name.clone(),
        device.model.clone(),
        device_identifier(&device.serial_number),
    )
    .with_sw_version(&device.version);
    let state_topic = device.state_topic.as_str();

    // keys must match the fields of `DevicePayload`
    let mut sensors = Vec::from([
        SensorConfig::power(state_topic, &device_config, "Solar Power", "solar_power"),
        SensorConfig::power(state_topic, &device_config, "Output Power", "output_power"),
        SensorConfig::power(state_topic, &device_config, "Charging Power", "charge_power"),
        SensorConfig::power(state_topic, &device_config, "Discharge Power", "discharge_power"),
        SensorConfig::count(state_topic, &device_config, "Number of Batteries", "battery_num"),
        SensorConfig::battery(state_topic, &device_config, "State of Charge", "soc"),
        SensorConfig::energy(state_topic, &device_config, "Generation Today", "generation_today"),
        SensorConfig::energy(state_topic, &device_config, "Generation Total", "generation_total"),
        SensorConfig::string(state_topic, &device_config, "Work Mode", "work_mode"),
        SensorConfig::string(state_topic, &device_config, "Status", "status"),
    ]);

    for battery in &device.batteries {
        sensors.extend(battery_sensor_configs(&name, device, battery, &device_config));
    }
    sensors
}

// every battery shows up as its own device attached to the noah unit
fn battery_sensor_configs(
    device_name: &str,
    device: &DeviceInfo,
    battery: &BatteryInfo,
    parent: &DeviceConfig,
) -> [SensorConfig; 2] {
    let battery_config = DeviceConfig::new(
        format!("{device_name} {}", battery.alias),
        "Noah Battery".to_string(),
        format!("{}_{}", device_identifier(&device.serial_number), battery.alias),
    )
    .via(parent);
    let state_topic = battery.state_topic.as_str();

    [
        SensorConfig::battery(state_topic, &battery_config, "State of Charge", "soc"),
        SensorConfig::temperature(state_topic, &battery_config, "Temperature", "temperature"),
    ]
}
