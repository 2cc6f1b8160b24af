use log::{error, info};

use crate::error::StartupError;
use crate::gateway::SessionGateway;
use crate::inventory::{BatteryInfo, DeviceInfo, Inventory};
use crate::models::NoahDetails;
use crate::topic::{battery_alias, battery_topic, device_topic};

/// Walks the plants of the account and collects the devices registered under
/// them.
///
/// Only a failing plant list is fatal. A plant or device that cannot be
/// resolved is logged and left out. A device whose details are missing is
/// still kept in `serial_numbers` and thus polled.
pub fn enumerate<G: SessionGateway>(
    gateway: &G,
    topic_prefix: &str,
) -> Result<Inventory, StartupError> {
    let serial_numbers = fetch_serial_numbers(gateway, topic_prefix)?;

    let devices = serial_numbers
        .iter()
        .filter_map(|serial_number| match gateway.device_info(serial_number) {
            Ok(details) => Some(device_info(topic_prefix, serial_number, details)),
            Err(e) => {
                error!("could not get noah info for {serial_number}: {e:#}");
                None
            }
        })
        .collect();

    Ok(Inventory {
        serial_numbers,
        devices,
    })
}

fn fetch_serial_numbers<G: SessionGateway>(
    gateway: &G,
    topic_prefix: &str,
) -> Result<Vec<String>, StartupError> {
    info!("fetching plant list");
    let plants = gateway.plant_list().map_err(StartupError::PlantList)?;

    let mut serial_numbers = Vec::new();
    for plant in plants {
        info!("fetch plant details for plant {}", plant.plant_id);
        match gateway.plant_info(&plant.plant_id) {
            Ok(info) if !info.device_sn.is_empty() => {
                info!(
                    "found device {} in plant {}, publishing to {}",
                    info.device_sn,
                    plant.plant_id,
                    device_topic(topic_prefix, &info.device_sn)
                );
                serial_numbers.push(info.device_sn);
            }
            Ok(_) => info!("plant {} holds no noah device", plant.plant_id),
            Err(e) => error!("could not get plant info for plant {}: {e:#}", plant.plant_id),
        }
    }

    Ok(serial_numbers)
}

fn device_info(topic_prefix: &str, serial_number: &str, details: NoahDetails) -> DeviceInfo {
    let batteries = (0..details.bat_sns.len())
        .map(|index| BatteryInfo {
            alias: battery_alias(index),
            state_topic: battery_topic(topic_prefix, serial_number, index),
        })
        .collect();

    DeviceInfo {
        serial_number: serial_number.to_string(),
        alias: details.alias,
        state_topic: device_topic(topic_prefix, serial_number),
        model: details.model,
        version: details.version,
        batteries,
    }
}
