use crate::state::Addressing;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_block_size")]
    pub block_size: usize,
    #[serde(default = "default_sector_size")]
    pub sector_size: u64,
    #[serde(default)]
    pub bytes_per_line: Option<usize>,
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default)]
    pub sector_mode: bool,
}

fn default_block_size() -> usize {
    4
}

fn default_sector_size() -> u64 {
    512
}

fn default_true() -> bool {
    true
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            block_size: 4,
            sector_size: 512,
            bytes_per_line: None,
            color: true,
            sector_mode: false,
        }
    }
}

impl SystemConfig {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "hexedit").map(|dirs| dirs.config_dir().join("config.json"))
    }

    pub fn load() -> Self {
        if let Some(path) = Self::config_path()
            && path.exists()
        {
            match Self::load_from(&path) {
                Ok(config) => return config,
                Err(e) => log::warn!("Ignoring config {:?}: {:#}", path, e),
            }
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        if config.block_size == 0 || config.sector_size == 0 {
            anyhow::bail!("block_size and sector_size must be non-zero");
        }
        Ok(config)
    }

    pub fn addressing(&self) -> Addressing {
        if self.sector_mode {
            Addressing::Sector
        } else {
            Addressing::Byte
        }
    }
}
