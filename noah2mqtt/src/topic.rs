//! Topic layout for published telemetry.
//!
//! Device telemetry goes to `<prefix>/<serial>`, battery telemetry to
//! `<prefix>/<serial>/BAT<index>`. Neither the prefix nor the serial number is
//! escaped or validated.

pub fn device_topic(prefix: &str, serial_number: &str) -> String {
    format!("{prefix}/{serial_number}")
}

pub fn battery_topic(prefix: &str, serial_number: &str, index: usize) -> String {
    format!("{}/{}", device_topic(prefix, serial_number), battery_alias(index))
}

/// Display name of the battery at `index` within its device, e.g. `BAT0`.
pub fn battery_alias(index: usize) -> String {
    format!("BAT{index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_topic_joins_prefix_and_serial() {
        assert_eq!(device_topic("noah2mqtt", "0PVP50ZR16ST00CB"), "noah2mqtt/0PVP50ZR16ST00CB");
    }

    #[test]
    fn battery_topic_extends_device_topic() {
        for index in [0, 1, 3, 12] {
            let topic = battery_topic("solar/noah", "S1", index);
            let suffix = format!("/BAT{index}");
            assert_eq!(topic.strip_suffix(&suffix), Some(device_topic("solar/noah", "S1").as_str()));
        }
    }

    #[test]
    fn battery_index_is_not_padded() {
        assert_eq!(battery_topic("p", "S1", 10), "p/S1/BAT10");
        assert_eq!(battery_alias(7), "BAT7");
    }
}
