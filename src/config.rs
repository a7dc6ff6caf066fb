use crate::storage::FsExplorer;
use anyhow::Result;
use std::path::PathBuf;

/// Overrides the host directory backing the storage device
pub const ROOT_ENV: &str = "LEAFCFG_ROOT";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for all data (XDG config dir)
    pub data_dir: PathBuf,
    /// Host directory mounted as `sdmc:`
    pub device_root: PathBuf,
}

impl Config {
    pub fn new() -> Result<Self> {
        // Use ~/.config on all platforms for consistency
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("leafcfg");

        let device_root = std::env::var_os(ROOT_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| base_dir.join("sdmc"));

        Ok(Self {
            data_dir: base_dir,
            device_root,
        })
    }

    /// Ensure all required directories exist
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.device_root)?;
        Ok(())
    }

    pub fn explorer(&self) -> FsExplorer {
        FsExplorer::new(&self.device_root)
    }
}
