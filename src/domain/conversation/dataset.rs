//! Dataset - the uploaded table every question is asked against.
//!
//! The table is carried as CSV text and appended to each prompt under a fixed
//! header so the assistant sees the data alongside the question.

use serde::Serialize;
use thiserror::Error;

/// Separator placed between the user's question and the table.
pub const DATA_SECTION_HEADER: &str = "\n\nData File Content:\n";

/// Errors that can occur while preparing a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// The file holds no rows, not even a header.
    #[error("Dataset '{0}' is empty")]
    Empty(String),

    /// The file could not be read as UTF-8 text.
    #[error("Dataset '{path}' could not be read: {reason}")]
    Unreadable { path: String, reason: String },

    /// Only CSV files are accepted.
    #[error("Dataset '{0}' is not a CSV file")]
    UnsupportedFormat(String),
}

/// A tabular dataset serialized as CSV text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    name: String,
    text: String,
}

impl Dataset {
    /// Builds a dataset from raw CSV text.
    ///
    /// Line endings are normalised to `\n`, trailing blank lines are dropped
    /// and the text always ends with a single newline. Whitespace at the end
    /// of the last row is kept.
    ///
    /// # Errors
    ///
    /// - `Empty` if the text has no non-blank line
    pub fn from_csv_text(name: impl Into<String>, raw: &str) -> Result<Self, DatasetError> {
        let name = name.into();
        let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
        let mut lines: Vec<&str> = normalized.split('\n').collect();
        // blank lines only; whitespace inside the last field is data
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return Err(DatasetError::Empty(name));
        }

        Ok(Self {
            name,
            text: format!("{}\n", lines.join("\n")),
        })
    }

    /// Display name (usually the file name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The CSV text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of data rows, excluding the header line.
    pub fn row_count(&self) -> usize {
        self.text.lines().count().saturating_sub(1)
    }

    /// The header section appended after the user's question.
    pub fn prompt_suffix(&self) -> String {
        format!("{}{}", DATA_SECTION_HEADER, self.text)
    }

    /// The full prompt for one question.
    pub fn compose_prompt(&self, user_text: &str) -> String {
        format!("{}{}", user_text, self.prompt_suffix())
    }
}
