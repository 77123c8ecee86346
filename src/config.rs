use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub sources: SourcesConfig,
    pub disk: DiskConfig,
    pub network: NetworkConfig,
    pub speedtest: SpeedtestConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub meminfo: PathBuf,
    pub cpuinfo: PathBuf,
    pub net_dev: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        SourcesConfig {
            meminfo: PathBuf::from("/proc/meminfo"),
            cpuinfo: PathBuf::from("/proc/cpuinfo"),
            net_dev: PathBuf::from("/proc/net/dev"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiskConfig {
    pub program: String,
    /// Passed to `-B` and stripped from every value of the output.
    pub block_size: String,
    pub target: PathBuf,
}

impl Default for DiskConfig {
    fn default() -> Self {
        DiskConfig {
            program: "df".to_string(),
            block_size: "GB".to_string(),
            target: PathBuf::from("/usr/src/app/shared"),
        }
    }
}

impl DiskConfig {
    pub fn args(&self) -> Vec<String> {
        vec![
            "-B".to_string(),
            self.block_size.clone(),
            self.target.display().to_string(),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub excluded_interfaces: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            excluded_interfaces: vec!["lo".to_string(), "docker0".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeedtestConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for SpeedtestConfig {
    fn default() -> Self {
        SpeedtestConfig {
            program: "speedtest".to_string(),
            args: ["--accept-license", "--accept-gdpr", "-f", "json"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("nodestat").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
