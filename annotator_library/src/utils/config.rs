use crate::utils::logging::*;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

const CONFIG_PATH: &str = "./annotator.toml";

lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::new());
}

#[derive(Debug, Serialize, Deserialize)]
struct ConfigTable {
    #[serde(rename = "Config")]
    config: Config,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub http_server_bind_port: u16, //port
    pub bind_retry_duration: u64, //seconds
    pub upload_directory: String, //path
    pub annotation_directory: String, //path
    pub classes_file: String, //path
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_server_bind_port: 5000,
            bind_retry_duration: 5,
            upload_directory: "uploads".to_string(),
            annotation_directory: "annotations".to_string(),
            classes_file: "classes.json".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        match fs::read_to_string(CONFIG_PATH) {
            Ok(toml_string) => match Self::parse(&toml_string) {
                Ok(config) => config,
                Err(err) => {
                    //Seriously, the program must be terminated.
                    logging_console!(emergency_entry!(err.clone()));
                    panic!("{err}");
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                logging_console!(warning_entry!(SystemEntry::ConfigNotFound, format!("Path: {CONFIG_PATH}")));
                Self::default()
            }
            Err(err) => {
                let message = String::from(SystemEntry::ConfigParseError(err.to_string()));
                logging_console!(emergency_entry!(message.clone()));
                panic!("{message}");
            }
        }
    }

    pub fn parse(toml_string: &str) -> Result<Self, String> {
        let config_table = toml::from_str::<ConfigTable>(toml_string)
            .map_err(|err| String::from(SystemEntry::ConfigParseError(err.to_string())))?;
        let config = config_table.config;
        if Self::validate(&config) {
            Ok(config)
        } else {
            Err(SystemEntry::InvalidConfig.into())
        }
    }

    pub async fn now() -> Config {
        CONFIG.read().await.clone()
    }

    pub async fn update(config: Config) {
        *CONFIG.write().await = config
    }

    pub fn validate(config: &Config) -> bool {
        Self::validate_port(config.http_server_bind_port)
            && Self::validate_second(config.bind_retry_duration)
            && Self::validate_path(&config.upload_directory)
            && Self::validate_path(&config.annotation_directory)
            && Self::validate_path(&config.classes_file)
    }

    fn validate_port(port: u16) -> bool {
        port != 0
    }

    fn validate_second(second: u64) -> bool {
        second <= 3600
    }

    fn validate_path(path: &str) -> bool {
        !path.trim().is_empty()
    }
}

/// The TOML file a configuration is read from at start-up and written back to on update.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new(CONFIG_PATH)
    }
}

impl ConfigFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn save(&self, config: &Config) -> Result<(), String> {
        let config_table = ConfigTable { config: config.clone() };
        let toml_string = toml::to_string(&config_table)
            .map_err(|err| String::from(SystemEntry::ConfigSaveError(err.to_string())))?;
        tokio::fs::write(&self.path, toml_string).await
            .map_err(|err| String::from(SystemEntry::ConfigSaveError(err.to_string())))
    }
}
