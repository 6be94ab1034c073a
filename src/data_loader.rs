//! Dataset discovery and loading
//!
//! Reports run over a JSON dataset of tickets, fuel events, and stations.
//! The dataset is looked up in this order:
//!
//! 1. an explicit `--data <path>`
//! 2. the `FROTA_DATA_PATH` environment variable
//! 3. `<config dir>/frota/dataset.json` (e.g. `~/.config/frota/dataset.json`)
//!
//! When none of them exists the built-in demo data is used.
//!
//! # Examples
//!
//! ```no_run
//! use frota::data_loader::DataLoader;
//! use frota::repository::FleetDataSource;
//!
//! # fn example() -> frota::Result<()> {
//! let repo = DataLoader::new(None).load()?;
//! println!("{} fuel events", repo.fuel_events().len());
//! # Ok(())
//! # }
//! ```

use frota_core::error::{FrotaError, Result};
use frota_core::repository::{Dataset, InMemoryRepository};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable pointing at a dataset file
pub const DATA_PATH_ENV: &str = "FROTA_DATA_PATH";

/// Where the dataset came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// A JSON file on disk
    File(PathBuf),
    /// Built-in demo data
    Demo,
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Demo => write!(f, "built-in demo data"),
        }
    }
}

/// Resolves and loads the dataset reports run over
pub struct DataLoader {
    explicit: Option<PathBuf>,
    config_dir: Option<PathBuf>,
}

impl DataLoader {
    /// Create a loader; `explicit` is the `--data` argument, if any
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self {
            explicit,
            config_dir: dirs::config_dir(),
        }
    }

    /// Override the platform config directory
    pub fn with_config_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.config_dir = dir;
        self
    }

    /// Decide which dataset to use without reading it
    ///
    /// # Errors
    ///
    /// An explicit path that does not exist is an error; the other
    /// locations are optional.
    pub fn resolve(&self) -> Result<DatasetSource> {
        if let Some(path) = &self.explicit {
            if path.is_file() {
                return Ok(DatasetSource::File(path.clone()));
            }
            return Err(FrotaError::Config(format!(
                "dataset file not found: {}",
                path.display()
            )));
        }

        if let Ok(custom) = std::env::var(DATA_PATH_ENV) {
            let path = PathBuf::from(custom);
            if path.is_file() {
                debug!("Using dataset from {}", DATA_PATH_ENV);
                return Ok(DatasetSource::File(path));
            }
            warn!(
                "{} points at {}, which is not a file; ignoring it",
                DATA_PATH_ENV,
                path.display()
            );
        }

        if let Some(dir) = &self.config_dir {
            let path = dir.join("frota").join("dataset.json");
            if path.is_file() {
                return Ok(DatasetSource::File(path));
            }
            debug!("No dataset at {}", path.display());
        }

        Ok(DatasetSource::Demo)
    }

    /// Resolve and load the dataset into a repository
    pub fn load(&self) -> Result<InMemoryRepository> {
        let source = self.resolve()?;
        info!("Loading dataset from {}", source);

        match source {
            DatasetSource::File(path) => Ok(InMemoryRepository::from(Self::load_file(&path)?)),
            DatasetSource::Demo => Ok(InMemoryRepository::demo()),
        }
    }

    /// Read and parse one dataset file
    pub fn load_file(path: &Path) -> Result<Dataset> {
        let content = std::fs::read_to_string(path)?;
        let dataset: Dataset =
            serde_json::from_str(&content).map_err(|e| FrotaError::Parse {
                file: path.to_path_buf(),
                error: e.to_string(),
            })?;

        debug!(
            "Parsed {} tickets, {} fuel events, {} stations from {}",
            dataset.tickets.len(),
            dataset.fuel_events.len(),
            dataset.stations.len(),
            path.display()
        );
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frota_core::repository::FleetDataSource;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_dataset(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        let path = write_dataset(dir.path(), "data.json", r#"{"fuelEvents": []}"#);

        let loader = DataLoader::new(Some(path.clone())).with_config_dir(None);
        assert_eq!(loader.resolve().unwrap(), DatasetSource::File(path));
        assert!(loader.load().unwrap().fuel_events().is_empty());
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let loader = DataLoader::new(Some(PathBuf::from("/nonexistent/frota.json")));
        assert!(matches!(loader.resolve(), Err(FrotaError::Config(_))));
    }

    #[test]
    fn test_malformed_dataset_reports_file() {
        let dir = TempDir::new().unwrap();
        let path = write_dataset(dir.path(), "broken.json", "{ not json");

        match DataLoader::load_file(&path) {
            Err(FrotaError::Parse { file, .. }) => assert_eq!(file, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
