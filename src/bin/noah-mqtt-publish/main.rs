mod config;
mod logging;
mod rumqttc_wrapper;

use anyhow::{anyhow, bail};
use config::Config;
use log::{error, info};
use noah2mqtt::growatt::GrowattClient;
use noah2mqtt::home_assistant::HomeAssistant;
use noah2mqtt::mqtt_wrapper::MqttWrapper;
use noah2mqtt::service::{Options, Service, Started};
use rumqttc_wrapper::RumqttcWrapper;

fn main() -> anyhow::Result<()> {
    logging::init_logger();
    info!("Running revision: {}", env!("GIT_HASH"));
    if std::env::args().len() > 1 {
        error!("Arguments passed. Tool is configured by config.toml in its path or environment variables");
    }

    let config = Config::load();
    if !config.is_valid() {
        bail!("incomplete configuration: growatt username, password and mqtt host are required");
    }

    info!("mqtt broker: {}", config.mqtt.host);
    info!("publishing telemetry below {}", config.topic_prefix());
    info!(
        "using update interval of {:.2}s",
        config.polling_interval().as_secs_f64()
    );

    let gateway = GrowattClient::new(&config.growatt)?;
    let registrar =
        HomeAssistant::<RumqttcWrapper>::new(&config.mqtt, config.home_assistant_prefix());
    let telemetry_client = RumqttcWrapper::new(&config.mqtt, "-telemetry");
    let options = Options {
        topic_prefix: config.topic_prefix().to_string(),
        polling_interval: config.polling_interval(),
        ..Options::default()
    };

    match Service::new(gateway, registrar, telemetry_client, options).start()? {
        Started::Polling(handle) => handle
            .join()
            .map_err(|_| anyhow!("polling thread terminated unexpectedly")),
        Started::NoDevices => {
            info!("exiting, no devices to poll");
            Ok(())
        }
    }
}
