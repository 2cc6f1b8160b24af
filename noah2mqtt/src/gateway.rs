use crate::models::{BatteryDetails, NoahDetails, NoahPlantInfo, NoahStatus, Plant};

/// Session with the cloud account that owns the devices.
///
/// Every error is treated as opaque by the callers and is never retried.
pub trait SessionGateway {
    fn login(&self) -> anyhow::Result<()>;

    fn plant_list(&self) -> anyhow::Result<Vec<Plant>>;

    /// Resolves a plant to the device registered under it. An empty
    /// `device_sn` means the plant holds no device.
    fn plant_info(&self, plant_id: &str) -> anyhow::Result<NoahPlantInfo>;

    /// Static device description used for discovery.
    fn device_info(&self, serial_number: &str) -> anyhow::Result<NoahDetails>;

    fn device_status(&self, serial_number: &str) -> anyhow::Result<NoahStatus>;

    /// Battery pack entries in the order reported by the device.
    fn battery_status(&self, serial_number: &str) -> anyhow::Result<Vec<BatteryDetails>>;
}
