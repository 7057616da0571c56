use crate::errors::{Error, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const PRACTICUM_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default)]
    pub practicum_token: String,
    #[serde(default)]
    pub telegram_token: String,
    #[serde(default)]
    pub telegram_chat_id: String,
    pub endpoint: String,
    pub telegram_api_url: String,
    /// Seconds to sleep after each poll.
    pub retry_time: u64,
    pub log_file: PathBuf,
    /// Rotation threshold for `log_file`, 0 disables rotation.
    pub log_max_bytes: u64,
    pub log_backup_count: usize,
}

impl AppConfig {
    /// Fails with the name of the first token that is absent or blank.
    pub fn check_tokens(&self) -> Result<()> {
        let tokens = [
            ("PRACTICUM_TOKEN", &self.practicum_token),
            ("TELEGRAM_TOKEN", &self.telegram_token),
            ("TELEGRAM_CHAT_ID", &self.telegram_chat_id),
        ];
        for (name, value) in tokens {
            if value.trim().is_empty() {
                return Err(Error::MissingToken(name));
            }
        }
        Ok(())
    }
}

pub fn load_config(config_path: Option<&Path>) -> Result<AppConfig> {
    load_config_with_env(config_path, Environment::default())
}

fn load_config_with_env(config_path: Option<&Path>, env: Environment) -> Result<AppConfig> {
    let mut settings = Config::builder()
        .set_default("endpoint", PRACTICUM_ENDPOINT)?
        .set_default("telegram_api_url", TELEGRAM_API_URL)?
        .set_default("retry_time", 0i64)?
        .set_default("log_file", "main.log")?
        .set_default("log_max_bytes", 50_000_000i64)?
        .set_default("log_backup_count", 5i64)?;
    if let Some(path) = config_path {
        settings = settings.add_source(File::from(path));
    }
    let app_config = settings
        .add_source(env)
        .build()?
        .try_deserialize::<AppConfig>()?;
    app_config.check_tokens()?;
    Ok(app_config)
}
