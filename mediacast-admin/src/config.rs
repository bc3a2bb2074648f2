//! mediacast-admin specific configuration

use std::path::PathBuf;

/// Admin service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
}

impl Config {
    pub fn new(port: u16, data_dir: PathBuf) -> Self {
        let db_path = data_dir.join("mediacast.db");
        Self {
            port,
            data_dir,
            db_path,
        }
    }

    /// Directory holding generated podcast thumbnails and original backups
    pub fn images_dir(&self) -> PathBuf {
        self.data_dir.join("images")
    }
}
