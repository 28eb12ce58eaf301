use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use tracing::info;

use super::domain::{LaborRate, LaborRateId};
use super::repository::ReferenceCatalog;

#[derive(Debug, thiserror::Error)]
pub enum LaborRateImportError {
    #[error("failed to read labor rate file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid labor rate CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: effective date '{value}' is not YYYY-MM-DD or RFC 3339")]
    InvalidDate { row: usize, value: String },
    #[error("row {row}: {field} must be a finite, non-negative number")]
    InvalidRate { row: usize, field: &'static str },
    #[error("labor rate file contains no rows")]
    Empty,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LaborRateRow {
    name: String,
    region: String,
    hourly_rate: f64,
    overhead_rate: f64,
    profit_margin: f64,
    total_rate: f64,
    effective_date: String,
    #[serde(default, deserialize_with = "optional_flag")]
    is_active: Option<bool>,
}

impl LaborRateRow {
    fn check_rates(&self, row: usize) -> Result<(), LaborRateImportError> {
        let rates = [
            ("hourlyRate", self.hourly_rate),
            ("overheadRate", self.overhead_rate),
            ("profitMargin", self.profit_margin),
            ("totalRate", self.total_rate),
        ];

        match rates
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            Some((field, _)) => Err(LaborRateImportError::InvalidRate { row, field }),
            None => Ok(()),
        }
    }
}

pub struct LaborRateImporter;

impl LaborRateImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<LaborRate>, LaborRateImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parses rates in file order, numbering ids from 1.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LaborRate>, LaborRateImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut rates = Vec::new();

        for (index, record) in csv_reader.deserialize::<LaborRateRow>().enumerate() {
            let row = record?;
            row.check_rates(index + 1)?;
            let effective_date = parse_date(&row.effective_date).ok_or_else(|| {
                LaborRateImportError::InvalidDate {
                    row: index + 1,
                    value: row.effective_date.clone(),
                }
            })?;

            rates.push(LaborRate {
                id: LaborRateId(index as u32 + 1),
                name: row.name,
                region: row.region,
                hourly_rate: row.hourly_rate,
                overhead_rate: row.overhead_rate,
                profit_margin: row.profit_margin,
                total_rate: row.total_rate,
                effective_date,
                is_active: row.is_active.unwrap_or(true),
            });
        }

        if rates.is_empty() {
            return Err(LaborRateImportError::Empty);
        }

        Ok(rates)
    }
}

impl ReferenceCatalog {
    /// Replaces the catalog's labor rates with those read from a CSV file.
    pub fn with_labor_rates_from<P: AsRef<Path>>(
        mut self,
        path: P,
    ) -> Result<Self, LaborRateImportError> {
        let path = path.as_ref();
        self.labor_rates = LaborRateImporter::from_path(path)?;
        info!(path = %path.display(), rates = self.labor_rates.len(), "labor rates imported");
        Ok(self)
    }
}

fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "'{other}' is not a boolean flag"
            ))),
        },
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}
