use thiserror::Error;

/// Conditions under which the bridge cannot start.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("could not login to growatt account: {0:#}")]
    Login(anyhow::Error),
    #[error("could not get plant list: {0:#}")]
    PlantList(anyhow::Error),
    #[error("could not spawn polling thread: {0}")]
    Spawn(std::io::Error),
}
