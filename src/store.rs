//! Storage port for installments and the cycle configuration.
//!
//! The ledger only talks to these traits; writes replace the whole list and
//! the last writer wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::CycleConfig;
use crate::errors::Result;
use crate::installments::Installment;

pub const INSTALLMENTS_FILE: &str = "installments.json";
pub const CONFIG_FILE: &str = "cycle_config.json";

/// persisted list of installment records
pub trait InstallmentStore {
    fn load(&self) -> Result<Vec<Installment>>;
    fn save(&mut self, installments: &[Installment]) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// persisted billing cycle
pub trait ConfigStore {
    /// stored configuration, `None` when nothing was saved yet
    fn load_config(&self) -> Result<Option<CycleConfig>>;
    fn save_config(&mut self, cfg: CycleConfig) -> Result<()>;
}

/// in-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    installments: Vec<Installment>,
    config: Option<CycleConfig>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// store seeded with existing records
    pub fn with_installments(installments: Vec<Installment>) -> Self {
        Self {
            installments,
            config: None,
        }
    }
}

impl InstallmentStore for MemoryStore {
    fn load(&self) -> Result<Vec<Installment>> {
        Ok(self.installments.clone())
    }

    fn save(&mut self, installments: &[Installment]) -> Result<()> {
        self.installments = installments.to_vec();
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.installments.clear();
        Ok(())
    }
}

impl ConfigStore for MemoryStore {
    fn load_config(&self) -> Result<Option<CycleConfig>> {
        Ok(self.config)
    }

    fn save_config(&mut self, cfg: CycleConfig) -> Result<()> {
        self.config = Some(cfg);
        Ok(())
    }
}

/// json files in one directory
///
/// A missing file reads as empty; a file that does not parse is reported as
/// an error and left untouched.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// store rooted at `dir`, created if missing
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read(&self, file: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path(file)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, file: &str, contents: &str) -> Result<()> {
        // readers never see a partially written file
        let target = self.path(file);
        let tmp = target.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &target)?;
        debug!(path = %target.display(), bytes = contents.len(), "wrote store file");
        Ok(())
    }
}

impl InstallmentStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Installment>> {
        match self.read(INSTALLMENTS_FILE)? {
            Some(contents) => Ok(serde_json::from_str(&contents)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, installments: &[Installment]) -> Result<()> {
        let json = serde_json::to_string_pretty(installments)?;
        self.write(INSTALLMENTS_FILE, &json)
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(self.path(INSTALLMENTS_FILE)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ConfigStore for JsonFileStore {
    fn load_config(&self) -> Result<Option<CycleConfig>> {
        match self.read(CONFIG_FILE)? {
            Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            None => Ok(None),
        }
    }

    fn save_config(&mut self, cfg: CycleConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(&cfg)?;
        self.write(CONFIG_FILE, &json)
    }
}
