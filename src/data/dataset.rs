//! CSV-backed datasets loaded once at startup.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{AshaError, Result};
use crate::types::Category;

/// A single row: field name to scalar value, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record(Vec<(String, String)>);

impl Record {
    /// Value of the first column named `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get("id")
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Ordered, immutable rows of one schema.
#[derive(Debug, Clone)]
pub struct Dataset {
    category: Category,
    records: Vec<Record>,
}

impl Dataset {
    /// Columns that must be present in the header for this kind of dataset.
    #[must_use]
    pub fn required_columns(category: Category) -> &'static [&'static str] {
        match category {
            Category::Jobs => &["id", "title", "description"],
            Category::Events => &["id", "name", "description"],
            Category::Mentorship => &[],
        }
    }

    /// Load a dataset from a CSV file with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`AshaError::DataLoad`] if the file is missing or unreadable,
    /// a required column is absent, a row is malformed, or an `id` is empty
    /// or repeated.
    pub fn load(path: &Path, category: Category) -> Result<Self> {
        debug!("Loading {category} dataset from {}", path.display());
        let file = File::open(path).map_err(|e| AshaError::DataLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let dataset = Self::from_reader(file, path, category)?;
        info!(
            "Loaded {} {category} records from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parse CSV from any reader. `origin` is only used in error reports.
    ///
    /// Header names are trimmed; cell values are kept exactly as written.
    ///
    /// # Errors
    ///
    /// Returns [`AshaError::DataLoad`] for the same conditions as [`Dataset::load`].
    pub fn from_reader<R: Read>(reader: R, origin: &Path, category: Category) -> Result<Self> {
        let fail = |reason: String| AshaError::DataLoad {
            path: origin.to_path_buf(),
            reason,
        };

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader.headers().map_err(|e| fail(e.to_string()))?.clone();
        for column in Self::required_columns(category) {
            if !headers.iter().any(|h| h == *column) {
                return Err(fail(format!("missing required column '{column}'")));
            }
        }

        let mut records = Vec::new();
        for row in csv_reader.records() {
            let row = row.map_err(|e| fail(e.to_string()))?;
            records.push(headers.iter().zip(row.iter()).collect::<Record>());
        }

        Self::new(category, records).map_err(fail)
    }

    /// Build a dataset from rows already in memory, enforcing unique ids for
    /// jobs and events.
    ///
    /// # Errors
    ///
    /// Returns [`AshaError::DataLoad`] if a job or event row has an empty or
    /// repeated `id`.
    pub fn from_records(category: Category, records: Vec<Record>) -> Result<Self> {
        Self::new(category, records).map_err(|reason| AshaError::DataLoad {
            path: PathBuf::from(format!("<{category}>")),
            reason,
        })
    }

    fn new(category: Category, records: Vec<Record>) -> std::result::Result<Self, String> {
        if category != Category::Mentorship {
            let mut seen = HashSet::new();
            for (row, record) in records.iter().enumerate() {
                match record.id() {
                    None | Some("") => return Err(format!("row {} has an empty id", row + 1)),
                    Some(id) if !seen.insert(id) => return Err(format!("duplicate id '{id}'")),
                    Some(_) => {}
                }
            }
        }
        Ok(Self { category, records })
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose `id` equals `id` exactly.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.id() == Some(id))
    }
}

/// The three listings the assistant can search.
#[derive(Debug, Clone)]
pub struct DataStore {
    pub jobs: Dataset,
    pub events: Dataset,
    pub mentorship: Dataset,
}

impl DataStore {
    pub const JOBS_FILE: &'static str = "job_listings.csv";
    pub const EVENTS_FILE: &'static str = "events.csv";
    pub const MENTORSHIP_FILE: &'static str = "mentorship_programs.csv";

    #[must_use]
    pub fn new(jobs: Dataset, events: Dataset, mentorship: Dataset) -> Self {
        Self {
            jobs,
            events,
            mentorship,
        }
    }

    /// Load all three datasets from `dir`.
    ///
    /// # Errors
    ///
    /// Fails on the first dataset that cannot be loaded.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        Ok(Self::new(
            Dataset::load(&dir.join(Self::JOBS_FILE), Category::Jobs)?,
            Dataset::load(&dir.join(Self::EVENTS_FILE), Category::Events)?,
            Dataset::load(&dir.join(Self::MENTORSHIP_FILE), Category::Mentorship)?,
        ))
    }
}
