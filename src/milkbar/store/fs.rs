use super::DataStore;
use crate::error::{MilkbarError, Result};
use crate::model::Dataset;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

const DATA_FILENAME: &str = "data.json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn data_path(&self) -> PathBuf {
        self.root.join(DATA_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(MilkbarError::Io)?;
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load(&self) -> Result<Dataset> {
        let path = self.data_path();
        if !path.exists() {
            return Ok(Dataset::default());
        }
        let content = fs::read_to_string(&path).map_err(MilkbarError::Io)?;
        serde_json::from_str(&content).map_err(|source| MilkbarError::CorruptData { path, source })
    }

    fn save(&mut self, data: &Dataset) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(data).map_err(MilkbarError::Serialization)?;

        // Atomic write: temp file in the same directory, then rename
        let tmp_file = self.root.join(format!(".data-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(MilkbarError::Io)?;
        fs::rename(&tmp_file, self.data_path()).map_err(MilkbarError::Io)?;

        Ok(())
    }
}
