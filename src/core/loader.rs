//! Table loading
//!
//! Turns a header row plus data rows into a validated sequence of
//! [`EquipmentRecord`]s. The load is all-or-nothing: the first row with an
//! uncoercible numeric cell fails the whole table.

use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::core::error::{LoadError, ValidationError};
use crate::core::record::{EquipmentRecord, Parameter};

pub const COL_NAME: &str = "Equipment Name";
pub const COL_TYPE: &str = "Type";

/// Required columns, in canonical order
pub const REQUIRED_COLUMNS: [&str; 5] = [COL_NAME, COL_TYPE, "Flowrate", "Pressure", "Temperature"];

/// Column positions resolved from a header row
#[derive(Debug, Clone)]
struct ColumnMap {
    name: usize,
    category: usize,
    numeric: [(Parameter, usize); 3],
}

impl ColumnMap {
    fn resolve<S: AsRef<str>>(header: &[S]) -> Result<Self, ValidationError> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for (i, h) in header.iter().enumerate() {
            // First occurrence wins for duplicated headers
            positions.entry(h.as_ref().trim()).or_insert(i);
        }

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !positions.contains_key(**c))
            .map(|c| c.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingColumns {
                missing,
                present: header.iter().map(|h| h.as_ref().trim().to_string()).collect(),
                required: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            });
        }

        let pos = |col: &str| positions[col];
        Ok(Self {
            name: pos(COL_NAME),
            category: pos(COL_TYPE),
            numeric: Parameter::ALL.map(|p| (p, pos(p.label()))),
        })
    }

    fn parse_row<S: AsRef<str>>(
        &self,
        row_num: usize,
        row: &[S],
    ) -> Result<EquipmentRecord, ValidationError> {
        let cell = |idx: usize| row.get(idx).map(|s| s.as_ref().trim()).unwrap_or("");

        let mut values = [0.0_f64; 3];
        for (slot, (parameter, idx)) in values.iter_mut().zip(self.numeric.iter()) {
            let raw = cell(*idx);
            *slot = parse_number(raw).ok_or_else(|| ValidationError::MalformedValue {
                row: row_num,
                column: parameter.label().to_string(),
                value: raw.to_string(),
            })?;
        }

        Ok(EquipmentRecord::new(
            cell(self.name),
            cell(self.category),
            values[0],
            values[1],
            values[2],
        ))
    }
}

/// Parse a finite floating point number; empty, NaN and infinite cells are rejected
fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Load records from an in-memory table
///
/// `header` names the columns; every row is matched to it by position.
/// Extra columns are ignored and column order is free.
pub fn load_rows<H, R, S>(header: &[H], rows: R) -> Result<Vec<EquipmentRecord>, ValidationError>
where
    H: AsRef<str>,
    R: IntoIterator<Item = Vec<S>>,
    S: AsRef<str>,
{
    let columns = ColumnMap::resolve(header)?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| columns.parse_row(i + 1, &row))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(rows = records.len(), "loaded equipment table");
    Ok(records)
}

/// Load records from delimited text (comma separated, header row first)
pub fn load_csv<R: Read>(reader: R) -> Result<Vec<EquipmentRecord>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let header: Vec<&str> = headers.iter().collect();
    let columns = ColumnMap::resolve(&header)?;

    let mut records = Vec::new();
    for (row_idx, result) in rdr.records().enumerate() {
        let record = result?;
        let row: Vec<&str> = record.iter().collect();
        records.push(columns.parse_row(row_idx + 1, &row)?);
    }

    tracing::debug!(rows = records.len(), "loaded equipment CSV");
    Ok(records)
}

/// Load records from a CSV file on disk
pub fn load_path(path: &Path) -> Result<Vec<EquipmentRecord>, LoadError> {
    let file = File::open(path)?;
    load_csv(BufReader::new(file))
}
