//! Response types of the Growatt cloud API.
//!
//! The API reports almost every value as a string, numbers included.

use serde_derive::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub back: LoginBack,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginBack {
    pub success: bool,
    pub msg: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlantListResponse {
    pub back: PlantListBack,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlantListBack {
    pub success: bool,
    pub data: Vec<Plant>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Plant {
    pub plant_id: String,
    pub plant_name: String,
}

/// Envelope of the `noahDeviceApi` endpoints. `result` is `1` on success.
#[derive(Debug, Deserialize)]
pub struct NoahResponse<T> {
    pub result: i32,
    #[serde(default)]
    pub msg: Option<String>,
    pub obj: Option<T>,
}

impl<T> NoahResponse<T> {
    pub fn into_obj(self) -> anyhow::Result<T> {
        if self.result != 1 {
            anyhow::bail!(
                "request failed with result {}: {}",
                self.result,
                self.msg.unwrap_or_default()
            );
        }
        self.obj
            .ok_or_else(|| anyhow::anyhow!("response does not contain an object"))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NoahPlantInfo {
    pub plant_id: String,
    pub is_plant_noah_system: bool,
    pub device_sn: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NoahInfo {
    pub noah: NoahDetails,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NoahDetails {
    pub alias: String,
    pub model: String,
    pub version: String,
    pub bat_sns: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NoahStatus {
    pub status: String,
    pub work_mode: String,
    pub soc: String,
    pub battery_num: String,
    pub charge_power: String,
    pub dis_charge_power: String,
    pub pac: String,
    pub ppv: String,
    pub eac_today: String,
    pub eac_total: String,
    pub alias: String,
    pub plant_id: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BatteryInfo {
    pub batter: Vec<BatteryDetails>,
    pub time: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatteryDetails {
    pub serial_num: String,
    pub soc: String,
    pub temp: String,
}
