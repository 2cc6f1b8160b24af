/// Battery module of a device, addressed by its position in the device's
/// battery list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatteryInfo {
    pub alias: String,
    pub state_topic: String,
}

/// A device as announced to the home automation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceInfo {
    pub serial_number: String,
    pub alias: String,
    pub state_topic: String,
    pub model: String,
    pub version: String,
    pub batteries: Vec<BatteryInfo>,
}

/// Result of device enumeration.
///
/// `serial_numbers` drives polling and keeps discovery order. `devices` only
/// holds the devices whose details could be fetched, so it may be shorter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    pub serial_numbers: Vec<String>,
    pub devices: Vec<DeviceInfo>,
}

impl Inventory {
    pub fn is_empty(&self) -> bool {
        self.serial_numbers.is_empty()
    }
}
