use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::error::Result;
use super::loader::load_file;
use super::model::HousingDataset;
use super::synthetic;

/// Where the session dataset came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataOrigin {
    File(PathBuf),
    /// The input file was missing; synthetic records were generated.
    Synthetic { missing: PathBuf },
}

/// A loaded dataset and its origin.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Arc<HousingDataset>,
    pub origin: DataOrigin,
}

impl LoadedDataset {
    /// User-visible warning, present only for the synthetic fallback.
    pub fn warning(&self) -> Option<String> {
        match &self.origin {
            DataOrigin::File(_) => None,
            DataOrigin::Synthetic { missing } => {
                let name = missing
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| missing.display().to_string());
                Some(format!("{name} not found. Using sample data."))
            }
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self.origin, DataOrigin::Synthetic { .. })
    }
}

/// Session-scoped memo of the default dataset.
///
/// The first [`get`](Self::get) reads the file (or generates the fallback);
/// later calls return the same `Arc` without touching the disk again, until
/// [`reset`](Self::reset).
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    seed: u64,
    samples: usize,
    cell: OnceCell<LoadedDataset>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>, seed: u64, samples: usize) -> Self {
        DatasetCache {
            path: path.into(),
            seed,
            samples,
            cell: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load once, then serve from memory. Only a missing file falls back to
    /// synthetic data; other failures are returned and nothing is cached, so
    /// a later call retries.
    pub fn get(&self) -> Result<LoadedDataset> {
        self.cell.get_or_try_init(|| self.load()).cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Drop the memoized dataset.
    pub fn reset(&mut self) {
        self.cell.take();
    }

    fn load(&self) -> Result<LoadedDataset> {
        match load_file(&self.path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records with columns {:?} from {}",
                    dataset.len(),
                    dataset.column_names(),
                    self.path.display()
                );
                Ok(LoadedDataset {
                    dataset: Arc::new(dataset),
                    origin: DataOrigin::File(self.path.clone()),
                })
            }
            Err(e) if e.is_not_found() => {
                let loaded = LoadedDataset {
                    dataset: Arc::new(synthetic::generate(self.seed, self.samples)),
                    origin: DataOrigin::Synthetic {
                        missing: self.path.clone(),
                    },
                };
                if let Some(warning) = loaded.warning() {
                    log::warn!("{warning}");
                }
                Ok(loaded)
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", self.path.display());
                Err(e)
            }
        }
    }
}
