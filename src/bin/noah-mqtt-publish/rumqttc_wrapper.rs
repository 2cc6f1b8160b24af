use std::{thread, time::Duration};

use log::warn;
use noah2mqtt::{
    mqtt_config::MqttConfig,
    mqtt_wrapper::{self},
};
use rumqttc::{
    tokio_rustls::{self, rustls::ClientConfig},
    Client, MqttOptions, Transport,
};

static DEFAULT_CLIENT_ID: &str = "noah-mqtt-publisher";

pub struct RumqttcWrapper {
    client: Client,
}

fn match_qos(qos: mqtt_wrapper::QoS) -> rumqttc::QoS {
    match qos {
        mqtt_wrapper::QoS::AtMostOnce => rumqttc::QoS::AtMostOnce,
        mqtt_wrapper::QoS::AtLeastOnce => rumqttc::QoS::AtLeastOnce,
        mqtt_wrapper::QoS::ExactlyOnce => rumqttc::QoS::ExactlyOnce,
    }
}

impl mqtt_wrapper::MqttWrapper for RumqttcWrapper {
    fn publish<S, V>(
        &mut self,
        topic: S,
        qos: mqtt_wrapper::QoS,
        retain: bool,
        payload: V,
    ) -> anyhow::Result<()>
    where
        S: Clone + Into<String>,
        V: Clone + Into<Vec<u8>>,
    {
        // try publishing up to three times
        for _ in 0..2 {
            if self
                .client
                .try_publish(topic.clone(), match_qos(qos), retain, payload.clone())
                .is_ok()
            {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(100));
        }
        Ok(self
            .client
            .try_publish(topic, match_qos(qos), retain, payload)?)
    }

    fn new(config: &MqttConfig, suffix: &str) -> Self {
        let use_tls = config.tls.is_some_and(|tls| tls);

        let client_id = config.client_id.as_deref().unwrap_or(DEFAULT_CLIENT_ID);
        let mut mqttoptions = MqttOptions::new(
            client_id.to_string() + suffix,
            &config.host,
            config.port.unwrap_or(if use_tls { 8883 } else { 1883 }),
        );
        mqttoptions.set_keep_alive(Duration::from_secs(5));
        if use_tls {
            // Use rustls-native-certs to load root certificates from the operating system.
            let mut roots = tokio_rustls::rustls::RootCertStore::empty();
            let native = rustls_native_certs::load_native_certs();
            for e in native.errors {
                warn!("could not load platform certificate: {e}");
            }
            for cert in native.certs {
                if let Err(e) = roots.add(cert) {
                    warn!("ignoring platform certificate: {e}");
                }
            }

            let client_config = ClientConfig::builder()
                .with_root_certificates(roots)
                .with_no_client_auth();

            mqttoptions.set_transport(Transport::tls_with_config(client_config.into()));
        }

        //parse the mqtt authentication options
        if let Some((username, password)) = match (&config.username, &config.password) {
            (None, None) => None,
            (None, Some(_)) => None,
            (Some(username), None) => Some((username.clone(), "".into())),
            (Some(username), Some(password)) => Some((username.clone(), password.clone())),
        } {
            mqttoptions.set_credentials(username, password);
        }

        let (client, mut connection) = Client::new(mqttoptions, 512);

        thread::spawn(move || {
            // keep polling the event loop to make sure outgoing messages get sent
            // the call to .iter() blocks and suspends the thread effectively by
            // calling .recv() under the hood. This implies that the loop terminates
            // once the client is dropped
            for notification in connection.iter() {
                if let Err(e) = notification {
                    warn!("mqtt connection error: {e}");
                    thread::sleep(Duration::from_secs(1));
                }
            }
        });
        Self { client }
    }
}
