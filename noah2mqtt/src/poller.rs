use std::thread;
use std::time::Duration;

use log::{debug, error, info, warn};
use serde::Serialize;

use crate::gateway::SessionGateway;
use crate::mqtt_wrapper::{MqttWrapper, QoS};
use crate::payload::{BatteryPayload, DevicePayload};
use crate::topic::{battery_topic, device_topic};

/// Fetches telemetry of a fixed set of devices and republishes it.
///
/// A failure never leaves the poller: it is logged with the device serial
/// number and the device is tried again on the next cycle.
pub struct Poller<G: SessionGateway, MQTT: MqttWrapper> {
    gateway: G,
    client: MQTT,
    serial_numbers: Vec<String>,
    topic_prefix: String,
    interval: Duration,
}

impl<G: SessionGateway, MQTT: MqttWrapper> Poller<G, MQTT> {
    pub fn new(
        gateway: G,
        client: MQTT,
        serial_numbers: Vec<String>,
        topic_prefix: &str,
        interval: Duration,
    ) -> Self {
        Self {
            gateway,
            client,
            serial_numbers,
            topic_prefix: topic_prefix.to_string(),
            interval,
        }
    }

    /// Polls forever. Cycles never overlap, the next one starts `interval`
    /// after the previous one finished.
    pub fn run(mut self) {
        info!(
            "start polling growatt every {}s",
            self.interval.as_secs_f64()
        );
        loop {
            self.poll_cycle();
            thread::sleep(self.interval);
        }
    }

    /// Runs a single pass over all devices in discovery order.
    pub fn poll_cycle(&mut self) {
        for serial_number in self.serial_numbers.clone() {
            self.poll_device_status(&serial_number);
            self.poll_battery_status(&serial_number);
        }
    }

    fn poll_device_status(&mut self, serial_number: &str) {
        let status = match self.gateway.device_status(serial_number) {
            Ok(status) => status,
            Err(e) => {
                error!("could not get device data for {serial_number}: {e:#}");
                return;
            }
        };

        let topic = device_topic(&self.topic_prefix, serial_number);
        match to_json(&DevicePayload::from(&status)) {
            Ok(payload) => {
                debug!("device data received for {serial_number}: {payload}");
                self.publish(topic, payload);
            }
            Err(e) => error!("could not serialize device data for {serial_number}: {e}"),
        }
    }

    fn poll_battery_status(&mut self, serial_number: &str) {
        let batteries = match self.gateway.battery_status(serial_number) {
            Ok(batteries) => batteries,
            Err(e) => {
                error!("could not get battery data for {serial_number}: {e:#}");
                return;
            }
        };

        for (index, battery) in batteries.iter().enumerate() {
            let topic = battery_topic(&self.topic_prefix, serial_number, index);
            match to_json(&BatteryPayload::from(battery)) {
                Ok(payload) => {
                    debug!("battery data received for {serial_number} BAT{index}: {payload}");
                    self.publish(topic, payload);
                }
                Err(e) => error!(
                    "could not serialize battery data for {serial_number} BAT{index}: {e}"
                ),
            }
        }
    }

    // fire and forget, delivery is not awaited
    fn publish(&mut self, topic: String, payload: String) {
        if let Err(e) = self.client.publish(topic, QoS::AtMostOnce, false, payload) {
            warn!("mqtt error: {e:#}");
        }
    }
}

fn to_json<T: Serialize>(payload: &T) -> serde_json::Result<String> {
    serde_json::to_string(payload)
}
