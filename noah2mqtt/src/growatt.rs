use std::time::Duration;

use anyhow::Context;
use log::debug;
use md5::{Digest, Md5};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use crate::gateway::SessionGateway;
use crate::growatt_config::GrowattConfig;
use crate::models::{
    BatteryDetails, BatteryInfo, LoginResponse, NoahDetails, NoahInfo, NoahPlantInfo,
    NoahResponse, NoahStatus, Plant, PlantListResponse,
};

// the API only answers requests that look like they come from the mobile app
static USER_AGENT: &str = "Dalvik/2.1.0 (Linux; U; Android 12)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GrowattClient {
    client: Client,
    server_url: String,
    username: String,
    password: String,
}

impl GrowattClient {
    pub fn new(config: &GrowattConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("could not create http client")?;

        Ok(Self {
            client,
            server_url: config.server_url().trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.server_url, path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        debug!("GET {path}");
        let response = self.client.get(self.url(path)).send()?.error_for_status()?;
        Ok(response.json::<T>()?)
    }

    fn post_form<T: DeserializeOwned>(&self, path: &str, form: &[(&str, &str)]) -> anyhow::Result<T> {
        debug!("POST {path}");
        let response = self
            .client
            .post(self.url(path))
            .form(form)
            .send()?
            .error_for_status()?;
        Ok(response.json::<T>()?)
    }

    fn post_noah<T: DeserializeOwned>(&self, path: &str, form: &[(&str, &str)]) -> anyhow::Result<T> {
        self.post_form::<NoahResponse<T>>(path, form)?.into_obj()
    }
}

impl SessionGateway for GrowattClient {
    fn login(&self) -> anyhow::Result<()> {
        let password = hash_password(&self.password);
        let response: LoginResponse = self.post_form(
            "newTwoLoginAPI.do",
            &[("userName", self.username.as_str()), ("password", password.as_str())],
        )?;
        if !response.back.success {
            anyhow::bail!("login rejected: {}", response.back.msg.unwrap_or_default());
        }
        Ok(())
    }

    fn plant_list(&self) -> anyhow::Result<Vec<Plant>> {
        let response: PlantListResponse = self.get("PlantListAPI.do")?;
        if !response.back.success {
            anyhow::bail!("plant list request was not successful");
        }
        Ok(response.back.data)
    }

    fn plant_info(&self, plant_id: &str) -> anyhow::Result<NoahPlantInfo> {
        self.post_noah(
            "noahDeviceApi/noah/isPlantNoahSystem",
            &[("plantId", plant_id)],
        )
    }

    fn device_info(&self, serial_number: &str) -> anyhow::Result<NoahDetails> {
        let info: NoahInfo = self.post_noah(
            "noahDeviceApi/noah/getNoahInfoBySn",
            &[("deviceSn", serial_number)],
        )?;
        Ok(info.noah)
    }

    fn device_status(&self, serial_number: &str) -> anyhow::Result<NoahStatus> {
        self.post_noah(
            "noahDeviceApi/noah/getSystemStatus",
            &[("deviceSn", serial_number)],
        )
    }

    fn battery_status(&self, serial_number: &str) -> anyhow::Result<Vec<BatteryDetails>> {
        let info: BatteryInfo = self.post_noah(
            "noahDeviceApi/noah/getBatteryData",
            &[("deviceSn", serial_number)],
        )?;
        Ok(info.batter)
    }
}

/// MD5 hex digest with every `0` at an even position replaced by `c`.
fn hash_password(password: &str) -> String {
    let digest = hex::encode(Md5::digest(password.as_bytes()));
    digest
        .chars()
        .enumerate()
        .map(|(i, c)| if i % 2 == 0 && c == '0' { 'c' } else { c })
        .collect()
}
