use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0";
const DEFAULT_LISTEN_PORT: u16 = 8090;
const DEFAULT_AIRTABLE_BASE_URL: &str = "https://api.airtable.com/v0";
const DEFAULT_AIRTABLE_TABLE: &str = "Copy";
const DEFAULT_LOG_DIR: &str = "./logs";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser, Deserialize, Serialize, Debug, Clone, Default)]
#[clap(about = "Copy content delivery server", version)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[clap(long, env = "COPY_CONFIG_PATH", help = "Path to the JSON configuration file.")]
    pub config_path: Option<PathBuf>,

    #[clap(long, env = "COPY_LISTEN_ADDRESS", help = "Address to bind the HTTP listener to.")]
    pub listen_address: Option<String>,

    #[clap(long, env = "COPY_PORT", help = "Port to listen on for client connections.")]
    pub port: Option<u16>,

    #[clap(long, env = "AIRTABLE_BASE_URL", help = "Airtable API root URL.")]
    pub airtable_base_url: Option<String>,

    #[clap(long, env = "AIRTABLE_BASE_ID", help = "Airtable base holding the copy table.")]
    pub airtable_base_id: Option<String>,

    #[clap(long, env = "AIRTABLE_TABLE", help = "Airtable table holding the copy records.")]
    pub airtable_table: Option<String>,

    #[clap(long, env = "AIRTABLE_API_KEY", help = "Airtable personal access token.")]
    pub airtable_api_key: Option<String>,

    #[clap(long, env = "COPY_LOG_DIR", help = "Directory for log files.")]
    pub log_dir: Option<PathBuf>,

    #[clap(long, env = "COPY_LOG_LEVEL", help = "Logging level (trace, debug, info, warn, error).")]
    pub log_level: Option<String>,
}

impl Config {
    // Merge two Config structs, where 'other' overrides 'self' for Some values
    fn merge(self, other: Config) -> Config {
        Config {
            config_path: other.config_path.or(self.config_path),
            listen_address: other.listen_address.or(self.listen_address),
            port: other.port.or(self.port),
            airtable_base_url: other.airtable_base_url.or(self.airtable_base_url),
            airtable_base_id: other.airtable_base_id.or(self.airtable_base_id),
            airtable_table: other.airtable_table.or(self.airtable_table),
            airtable_api_key: other.airtable_api_key.or(self.airtable_api_key),
            log_dir: other.log_dir.or(self.log_dir),
            log_level: other.log_level.or(self.log_level),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!(
            "{}:{}",
            self.listen_address.as_deref().unwrap_or(DEFAULT_LISTEN_ADDRESS),
            self.port.unwrap_or(DEFAULT_LISTEN_PORT)
        )
    }

    pub fn airtable_base_url(&self) -> &str {
        self.airtable_base_url.as_deref().unwrap_or(DEFAULT_AIRTABLE_BASE_URL)
    }

    pub fn airtable_table(&self) -> &str {
        self.airtable_table.as_deref().unwrap_or(DEFAULT_AIRTABLE_TABLE)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

pub fn load_config() -> Config {
    // 1. Load defaults
    let default_config = Config {
        listen_address: Some(DEFAULT_LISTEN_ADDRESS.to_string()),
        port: Some(DEFAULT_LISTEN_PORT),
        airtable_base_url: Some(DEFAULT_AIRTABLE_BASE_URL.to_string()),
        airtable_table: Some(DEFAULT_AIRTABLE_TABLE.to_string()),
        log_dir: Some(PathBuf::from(DEFAULT_LOG_DIR)),
        log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        ..Default::default()
    };

    // 2. Load from config file (server_copy.conf) if present.
    //    Allow overriding the default config file path with CLI arg or env.
    let cli_args = Config::parse();
    let config_file_path = cli_args
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("server_copy.conf"));

    let mut current_config = default_config;
    if let Some(file_config) = load_file(&config_file_path) {
        current_config = current_config.merge(file_config);
    }

    // 3. Override with environment variables and CLI arguments
    //    clap::Parser already folded env vars into the parsed args.
    current_config.merge(cli_args)
}

fn load_file(path: &Path) -> Option<Config> {
    if !path.exists() {
        log::info!(
            "Config file not found at {}. Using defaults and environment/CLI variables.",
            path.display()
        );
        return None;
    }
    match fs::read_to_string(path) {
        Ok(config_str) => match serde_json::from_str::<Config>(&config_str) {
            Ok(file_config) => Some(file_config),
            Err(e) => {
                log::warn!(
                    "Failed to parse config file {}: {}. Falling back to other sources.",
                    path.display(),
                    e
                );
                None
            }
        },
        Err(e) => {
            log::warn!(
                "Failed to read config file {}: {}. Falling back to other sources.",
                path.display(),
                e
            );
            None
        }
    }
}
