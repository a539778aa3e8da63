// src/inventory/snapshot.rs

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

const DATE_FORMAT: &str = "%Y_%m_%d";

static SNAPSHOT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}_\d{2}_\d{2}").expect("snapshot date pattern is valid"));

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot not found: {0}")]
    NotFound(String),
    #[error("invalid snapshot date '{0}', expected YYYY_MM_DD")]
    InvalidDate(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Directory of `<model>.json` / `<YYYY_MM_DD>_<model>.json` files.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
    base_filename: String,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>, model: &str) -> Self {
        Self {
            dir: dir.into(),
            base_filename: format!("{model}.json"),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn base_filename(&self) -> &str {
        &self.base_filename
    }

    /// `None` is the undated (latest) snapshot.
    pub fn filename(&self, date: Option<NaiveDate>) -> String {
        match date {
            Some(date) => format!("{}_{}", date.format(DATE_FORMAT), self.base_filename),
            None => self.base_filename.clone(),
        }
    }

    pub fn path(&self, date: Option<NaiveDate>) -> PathBuf {
        self.dir.join(self.filename(date))
    }

    /// Reads the raw snapshot. A missing file is fatal for the caller, there is no fallback.
    pub fn load(&self, date: Option<NaiveDate>) -> Result<Value, SnapshotError> {
        let path = self.path(date);
        let display = path.display().to_string();

        let text = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SnapshotError::NotFound(display.clone()),
            _ => SnapshotError::Io {
                path: display.clone(),
                source: e,
            },
        })?;

        serde_json::from_str(&text).map_err(|e| SnapshotError::Json {
            path: display,
            source: e,
        })
    }

    /// Dates of every file whose name ends with the base filename.
    ///
    /// Files without a `YYYY_MM_DD` token (including the undated base file)
    /// come back as `None`.
    pub fn list_dates(&self) -> Result<Vec<Option<String>>, SnapshotError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| SnapshotError::Io {
            path: self.dir.display().to_string(),
            source: e,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SnapshotError::Io {
                path: self.dir.display().to_string(),
                source: e,
            })?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(&self.base_filename) {
                names.push(name);
            }
        }
        names.sort();

        Ok(names
            .into_iter()
            .map(|name| {
                let date = extract_date(&name);
                if date.is_none() {
                    warn!(file = %name, "Snapshot file has no date token");
                }
                date
            })
            .collect())
    }

    /// Writes the records to a temp file and renames it into place, so a
    /// failed write never leaves a truncated snapshot behind.
    pub fn write(&self, date: Option<NaiveDate>, records: &[Value]) -> Result<PathBuf, SnapshotError> {
        let path = self.path(date);
        let tmp = path.with_extension("json.tmp");
        let io_err = |source: io::Error| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;

        let staged = (|| {
            let file = fs::File::create(&tmp).map_err(io_err)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, records).map_err(|e| SnapshotError::Json {
                path: path.display().to_string(),
                source: e,
            })?;
            writer.flush().map_err(io_err)?;
            drop(writer);
            fs::rename(&tmp, &path).map_err(io_err)
        })();

        if let Err(e) = staged {
            if tmp.exists() {
                let _ = fs::remove_file(&tmp);
            }
            return Err(e);
        }
        info!(path = %path.display(), records = records.len(), "Wrote inventory snapshot");

        Ok(path)
    }
}

pub fn extract_date(filename: &str) -> Option<String> {
    SNAPSHOT_DATE.find(filename).map(|m| m.as_str().to_string())
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, SnapshotError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| SnapshotError::InvalidDate(raw.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
