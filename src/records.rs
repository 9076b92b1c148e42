//! Taxonomy value records and the CSV loader that produces them.
//!
//! One record per taxonomy term. Rows are validated eagerly so that a
//! malformed snapshot fails before any graph is built.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// How a term was derived relative to its root value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueCategory {
    Core,
    Antonym,
    Synonym,
    Hypernym,
}

impl ValueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Antonym => "antonym",
            Self::Synonym => "synonym",
            Self::Hypernym => "hypernym",
        }
    }
}

impl fmt::Display for ValueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "core" => Ok(Self::Core),
            "antonym" => Ok(Self::Antonym),
            "synonym" => Ok(Self::Synonym),
            "hypernym" => Ok(Self::Hypernym),
            other => Err(other.to_string()),
        }
    }
}

/// A single taxonomy term.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRecord {
    /// Case-sensitive unique key.
    pub name: String,
    pub is_anti_value: bool,
    pub category: ValueCategory,
    /// Originating core value; equal to `name` for core entries.
    pub root_value: String,
    /// Percentage of conversations. Informational only.
    pub frequency: f64,
}

impl ValueRecord {
    pub fn new(
        name: impl Into<String>,
        category: ValueCategory,
        root_value: impl Into<String>,
        is_anti_value: bool,
    ) -> Self {
        Self {
            name: name.into(),
            is_anti_value,
            category,
            root_value: root_value.into(),
            frequency: 0.0,
        }
    }

    pub fn core(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), ValueCategory::Core, name, false)
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn is_root(&self) -> bool {
        self.root_value == self.name
    }
}

/// Records keyed by name, in first-appearance order.
///
/// Inserting an existing name replaces its attributes but keeps its position.
/// Serializes as a JSON object whose key order follows the table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueTable {
    records: Vec<ValueRecord>,
    index: HashMap<String, usize>,
}

impl ValueTable {
    pub fn from_records(records: &[ValueRecord]) -> Self {
        let mut table = Self::default();
        for record in records {
            if table.insert(record.clone()) {
                tracing::warn!(value = %record.name, "duplicate value record; keeping the later attributes");
            }
        }
        table
    }

    /// Returns true when an existing entry was replaced.
    pub fn insert(&mut self, record: ValueRecord) -> bool {
        match self.index.get(&record.name) {
            Some(&idx) => {
                self.records[idx] = record;
                true
            }
            None => {
                self.index.insert(record.name.clone(), self.records.len());
                self.records.push(record);
                false
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ValueRecord> {
        self.index.get(name).map(|&idx| &self.records[idx])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ValueRecord] {
        &self.records
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ValueAttributes {
    is_anti_value: bool,
    category: ValueCategory,
    root_value: String,
    pct_convos: f64,
}

impl Serialize for ValueTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.records.iter().map(|r| {
            (
                &r.name,
                ValueAttributes {
                    is_anti_value: r.is_anti_value,
                    category: r.category,
                    root_value: r.root_value.clone(),
                    pct_convos: r.frequency,
                },
            )
        }))
    }
}

impl<'de> Deserialize<'de> for ValueTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = ValueTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from value name to value attributes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ValueTable, A::Error> {
                let mut table = ValueTable::default();
                while let Some((name, attrs)) = map.next_entry::<String, ValueAttributes>()? {
                    table.insert(ValueRecord {
                        name,
                        is_anti_value: attrs.is_anti_value,
                        category: attrs.category,
                        root_value: attrs.root_value,
                        frequency: attrs.pct_convos,
                    });
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: missing value for column `{column}`")]
    MissingField { line: usize, column: &'static str },
    #[error("line {line}: `{column}` must be True or False, got {raw:?}")]
    InvalidBool {
        line: usize,
        column: &'static str,
        raw: String,
    },
    #[error("line {line}: unknown category {raw:?} (expected core, antonym, synonym or hypernym)")]
    InvalidCategory { line: usize, raw: String },
    #[error("line {line}: `pct_convos` must be a non-negative number, got {raw:?}")]
    InvalidFrequency { line: usize, raw: String },
}

#[derive(Debug, Deserialize)]
struct RawRow {
    value: String,
    is_anti_value: String,
    category: String,
    root_value: String,
    pct_convos: String,
}

/// Load value records from a CSV file on disk.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<ValueRecord>, RecordError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| RecordError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let records = parse_records(file)?;
    tracing::info!(path = %path.display(), records = records.len(), "loaded value records");
    Ok(records)
}

/// Parse value records from any CSV source with a header row.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<ValueRecord>, RecordError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, row) in csv_reader.deserialize::<RawRow>().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        records.push(parse_row(row?, line)?);
    }
    Ok(records)
}

fn parse_row(row: RawRow, line: usize) -> Result<ValueRecord, RecordError> {
    let name = required(row.value, "value", line)?;
    let root_value = required(row.root_value, "root_value", line)?;

    let is_anti_value = match row.is_anti_value.trim().to_ascii_lowercase().as_str() {
        "true" => true,
        "false" => false,
        _ => {
            return Err(RecordError::InvalidBool {
                line,
                column: "is_anti_value",
                raw: row.is_anti_value,
            })
        }
    };

    let category = row
        .category
        .parse::<ValueCategory>()
        .map_err(|_| RecordError::InvalidCategory {
            line,
            raw: row.category.clone(),
        })?;

    let frequency = row
        .pct_convos
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && *f >= 0.0)
        .ok_or_else(|| RecordError::InvalidFrequency {
            line,
            raw: row.pct_convos.clone(),
        })?;

    Ok(ValueRecord {
        name,
        is_anti_value,
        category,
        root_value,
        frequency,
    })
}

fn required(raw: String, column: &'static str, line: usize) -> Result<String, RecordError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RecordError::MissingField { line, column });
    }
    Ok(trimmed.to_string())
}
