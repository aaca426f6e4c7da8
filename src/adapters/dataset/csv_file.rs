//! CSV File Loader - reads a dataset from the local filesystem.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::domain::conversation::{Dataset, DatasetError};

/// Maximum dataset size accepted (5 MB).
///
/// The whole table travels inside every prompt, so anything larger would be
/// rejected by the service anyway.
const MAX_DATASET_BYTES: u64 = 5 * 1024 * 1024;

/// Loads `.csv` files into a [`Dataset`].
///
/// # Usage
///
/// ```rust,ignore
/// let dataset = CsvFileLoader::new("data/sales.csv").load().await?;
/// println!("{} rows", dataset.row_count());
/// ```
#[derive(Debug, Clone)]
pub struct CsvFileLoader {
    path: PathBuf,
}

impl CsvFileLoader {
    /// Creates a loader for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this loader reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and normalises the file.
    ///
    /// # Errors
    ///
    /// - `UnsupportedFormat` if the extension is not `.csv`
    /// - `Unreadable` if the file is missing, too large or not UTF-8
    /// - `Empty` if it holds no content
    pub async fn load(&self) -> Result<Dataset, DatasetError> {
        let display = self.path.display().to_string();

        let is_csv = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if !is_csv {
            return Err(DatasetError::UnsupportedFormat(display));
        }

        let metadata = fs::metadata(&self.path)
            .await
            .map_err(|e| unreadable(&display, e))?;
        if metadata.len() > MAX_DATASET_BYTES {
            return Err(DatasetError::Unreadable {
                path: display,
                reason: format!(
                    "{} bytes exceeds limit of {} bytes",
                    metadata.len(),
                    MAX_DATASET_BYTES
                ),
            });
        }

        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|e| unreadable(&display, e))?;

        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| display.clone());

        let dataset = Dataset::from_csv_text(name, &raw)?;
        info!(
            dataset = dataset.name(),
            rows = dataset.row_count(),
            bytes = metadata.len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }
}

fn unreadable(path: &str, err: std::io::Error) -> DatasetError {
    DatasetError::Unreadable {
        path: path.to_string(),
        reason: err.to_string(),
    }
}
