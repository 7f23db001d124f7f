//! CSV collaborator: reads the raw exports, writes the finished directory.
//!
//! The processing stages never touch files; they consume the `RawRow`s
//! produced here and hand back rows to serialize. Column vocabularies per
//! source live in schema.json so header variants (including the
//! "Organisaton" spelling that ships in the relationship export) are
//! declared once instead of at every access site.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::directory::{ContactRow, OrgSummaryRow};

const SCHEMA_JSON: &str = include_str!("../schema.json");

pub type RawRow = HashMap<String, String>;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no column schema named {0:?} in schema.json")]
    UnknownSchema(String),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Deserialize)]
struct SchemaFile {
    sources: HashMap<String, HashMap<String, Vec<String>>>,
}

/// Header lookup for one source shape: logical field name to the list of
/// acceptable header spellings, first one present in a row wins.
pub struct SourceSchema {
    fields: HashMap<String, Vec<String>>,
}

impl SourceSchema {
    pub fn for_source(name: &str) -> Result<SourceSchema> {
        let parsed: SchemaFile =
            serde_json::from_str(SCHEMA_JSON).context("schema.json is not valid JSON")?;
        let fields = parsed
            .sources
            .get(name)
            .ok_or_else(|| SourceError::UnknownSchema(name.to_string()))?
            .clone();
        Ok(SourceSchema { fields })
    }

    /// Value of a logical field in a row. Absent headers and unknown fields
    /// read as "", never an error.
    pub fn get<'a>(&self, row: &'a RawRow, field: &str) -> &'a str {
        self.fields
            .get(field)
            .into_iter()
            .flatten()
            .find_map(|header| row.get(header))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Read one export into header-keyed rows. A missing file is not an error
/// (sources are optional, the caller decides how loudly to skip); an
/// unreadable one is.
pub fn read_rows(path: &Path) -> Result<Option<Vec<RawRow>>> {
    if !path.exists() {
        return Ok(None);
    }
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut row = RawRow::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            row.insert(header.clone(), record.get(idx).unwrap_or("").to_string());
        }
        rows.push(row);
    }
    Ok(Some(rows))
}

pub fn write_directory(path: &Path, rows: &[ContactRow]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("failed to create {:?}", path))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_org_summary(path: &Path, rows: &[OrgSummaryRow]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("failed to create {:?}", path))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn schema_prefers_first_present_header() {
        let schema = SourceSchema::for_source("relationship").unwrap();
        let misspelled = row(&[("Organisaton", "Home Office")]);
        assert_eq!(schema.get(&misspelled, "organisation"), "Home Office");
        let corrected = row(&[("Organisation", "Home Office")]);
        assert_eq!(schema.get(&corrected, "organisation"), "Home Office");
    }

    #[test]
    fn schema_defaults_missing_fields_to_empty() {
        let schema = SourceSchema::for_source("mailsuite").unwrap();
        let empty = row(&[]);
        assert_eq!(schema.get(&empty, "recipient"), "");
        assert_eq!(schema.get(&empty, "no_such_field"), "");
    }

    #[test]
    fn unknown_source_is_an_error() {
        assert!(SourceSchema::for_source("spreadsheet_of_dreams").is_err());
    }
}
