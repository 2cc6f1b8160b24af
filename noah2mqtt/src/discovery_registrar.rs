use crate::inventory::DeviceInfo;

/// Announces enumerated devices to a home automation layer.
pub trait DiscoveryRegistrar {
    fn set_devices(&mut self, devices: &[DeviceInfo]);
}
