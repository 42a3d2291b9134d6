use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::repository::traits::ConfigRepository;

const CONFIG_DIR_NAME: &str = ".eascheck";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Clone)]
pub struct FileConfigRepository {
    file_path: PathBuf,
}

impl FileConfigRepository {
    /// Uses `~/.eascheck/config.json`, or `config.json` under `base_dir`.
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let dir = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(CONFIG_DIR_NAME)
            }
        };
        Ok(Self {
            file_path: dir.join(CONFIG_FILE_NAME),
        })
    }

    /// Points at an explicit file, e.g. from `--config`.
    pub fn at(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Writes the default configuration unless a file is already there.
    pub fn init(&self) -> Result<bool> {
        if self.file_path.exists() {
            return Ok(false);
        }
        self.save(&AppConfig::default())?;
        Ok(true)
    }
}

impl ConfigRepository for FileConfigRepository {
    fn load(&self) -> Result<AppConfig> {
        if !self.file_path.exists() {
            warn!(path = %self.file_path.display(), "config file not found, using defaults");
            return Ok(AppConfig::default());
        }

        let file = File::open(&self.file_path)
            .with_context(|| format!("opening {}", self.file_path.display()))?;
        let config: AppConfig = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", self.file_path.display()))?;
        debug!(path = %self.file_path.display(), "loaded config");
        Ok(config)
    }

    fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.file_path)
            .with_context(|| format!("creating {}", self.file_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, config)?;
        writer.flush()?;
        Ok(())
    }
}
