use serde_derive::Serialize;

use crate::models::{BatteryDetails, NoahStatus};

/// Telemetry published to the device topic on every cycle.
///
/// When modifying the fields, adjust the sensors announced in
/// `home_assistant.rs` accordingly.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DevicePayload {
    pub solar_power: f64,
    pub output_power: f64,
    pub charge_power: f64,
    pub discharge_power: f64,
    pub battery_num: u32,
    pub soc: f64,
    pub generation_today: f64,
    pub generation_total: f64,
    pub work_mode: String,
    pub status: String,
}

/// Telemetry published to a battery topic on every cycle.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatteryPayload {
    pub serial_number: String,
    pub soc: f64,
    pub temperature: f64,
}

impl From<&NoahStatus> for DevicePayload {
    fn from(status: &NoahStatus) -> Self {
        Self {
            solar_power: parse_number(&status.ppv),
            output_power: parse_number(&status.pac),
            charge_power: parse_number(&status.charge_power),
            discharge_power: parse_number(&status.dis_charge_power),
            battery_num: status.battery_num.trim().parse().unwrap_or_default(),
            soc: parse_number(&status.soc),
            generation_today: parse_number(&status.eac_today),
            generation_total: parse_number(&status.eac_total),
            work_mode: work_mode(&status.work_mode),
            status: status.status.clone(),
        }
    }
}

impl From<&BatteryDetails> for BatteryPayload {
    fn from(battery: &BatteryDetails) -> Self {
        Self {
            serial_number: battery.serial_num.clone(),
            soc: parse_number(&battery.soc),
            temperature: parse_number(&battery.temp),
        }
    }
}

// the API reports numbers as strings, an empty or garbled value counts as zero
fn parse_number(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or_default()
}

fn work_mode(value: &str) -> String {
    match value {
        "0" => "load_first".to_string(),
        "1" => "battery_first".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_payload_parses_string_values() {
        let status = NoahStatus {
            status: "1".into(),
            work_mode: "1".into(),
            soc: "87".into(),
            battery_num: "2".into(),
            charge_power: "120.5".into(),
            dis_charge_power: "0".into(),
            pac: "300".into(),
            ppv: "420.5".into(),
            eac_today: "1.2".into(),
            eac_total: "345.6".into(),
            ..Default::default()
        };

        let payload = DevicePayload::from(&status);
        assert_eq!(payload.soc, 87.0);
        assert_eq!(payload.battery_num, 2);
        assert_eq!(payload.solar_power, 420.5);
        assert_eq!(payload.output_power, 300.0);
        assert_eq!(payload.work_mode, "battery_first");
        assert_eq!(payload.status, "1");
    }

    #[test]
    fn unparsable_values_become_zero() {
        let status = NoahStatus {
            soc: "".into(),
            pac: "n/a".into(),
            ppv: "NaN".into(),
            work_mode: "7".into(),
            ..Default::default()
        };

        let payload = DevicePayload::from(&status);
        assert_eq!(payload.soc, 0.0);
        assert_eq!(payload.output_power, 0.0);
        assert_eq!(payload.solar_power, 0.0);
        assert_eq!(payload.work_mode, "7");
    }

    #[test]
    fn battery_payload_serializes_to_json() {
        let battery = BatteryDetails {
            serial_num: "B1".into(),
            soc: "55".into(),
            temp: "21.5".into(),
        };

        let json = serde_json::to_value(BatteryPayload::from(&battery)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "serial_number": "B1", "soc": 55.0, "temperature": 21.5 })
        );
    }
}
