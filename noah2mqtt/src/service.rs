use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::info;

use crate::discovery_registrar::DiscoveryRegistrar;
use crate::enumerator;
use crate::error::StartupError;
use crate::gateway::SessionGateway;
use crate::mqtt_wrapper::MqttWrapper;
use crate::poller::Poller;

pub const DEFAULT_TOPIC_PREFIX: &str = "noah2mqtt";
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_secs(10);
// leaves time for log shippers to pick up the last lines before the process ends
pub const NO_DEVICES_GRACE_PERIOD: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
pub struct Options {
    pub topic_prefix: String,
    pub polling_interval: Duration,
    pub no_devices_grace_period: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            topic_prefix: DEFAULT_TOPIC_PREFIX.to_string(),
            polling_interval: DEFAULT_POLLING_INTERVAL,
            no_devices_grace_period: NO_DEVICES_GRACE_PERIOD,
        }
    }
}

/// Outcome of a successful start.
#[derive(Debug)]
pub enum Started {
    /// Telemetry is being polled on the returned thread.
    Polling(JoinHandle<()>),
    /// The account holds no device. The grace period has already elapsed and
    /// the caller is expected to shut down cleanly.
    NoDevices,
}

/// Wires the cloud session, discovery and telemetry polling together.
pub struct Service<G, R, MQTT> {
    gateway: G,
    registrar: R,
    client: MQTT,
    options: Options,
}

impl<G, R, MQTT> Service<G, R, MQTT>
where
    G: SessionGateway + Send + 'static,
    R: DiscoveryRegistrar,
    MQTT: MqttWrapper + Send + 'static,
{
    pub fn new(gateway: G, registrar: R, client: MQTT, options: Options) -> Self {
        Self {
            gateway,
            registrar,
            client,
            options,
        }
    }

    /// Logs in, enumerates the devices, announces them and spawns the poller.
    ///
    /// Returns as soon as the polling thread is running.
    pub fn start(mut self) -> Result<Started, StartupError> {
        self.gateway.login().map_err(StartupError::Login)?;
        info!("logged in to growatt account");

        let inventory = enumerator::enumerate(&self.gateway, &self.options.topic_prefix)?;
        if inventory.is_empty() {
            info!(
                "no noah devices found, shutting down in {}s",
                self.options.no_devices_grace_period.as_secs()
            );
            thread::sleep(self.options.no_devices_grace_period);
            return Ok(Started::NoDevices);
        }

        self.registrar.set_devices(&inventory.devices);

        let poller = Poller::new(
            self.gateway,
            self.client,
            inventory.serial_numbers,
            &self.options.topic_prefix,
            self.options.polling_interval,
        );
        let handle = thread::Builder::new()
            .name("telemetry-poller".to_string())
            .spawn(move || poller.run())
            .map_err(StartupError::Spawn)?;

        Ok(Started::Polling(handle))
    }
}
