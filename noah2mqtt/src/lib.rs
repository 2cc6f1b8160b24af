// externally visible interfaces
pub mod discovery_registrar;
pub mod enumerator;
pub mod error;
pub mod gateway;
pub mod growatt;
pub mod growatt_config;
pub mod home_assistant;
pub mod inventory;
pub mod models;
pub mod mqtt_config;
pub mod mqtt_wrapper;
pub mod payload;
pub mod poller;
pub mod service;
pub mod topic;

// internal interfaces
mod home_assistant_config;
