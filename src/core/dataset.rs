use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::TemperatureRecord;
use crate::error::{HeatmapError, HeatmapResult};

/// Wire shape of the global-temperature document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetDocument {
    pub base_temperature: f64,
    pub monthly_variance: Vec<TemperatureRecord>,
}

/// Validated, immutable monthly temperature dataset.
///
/// Records keep the input order; the first and last record drive the
/// header subtitle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    base_temperature: f64,
    records: Vec<TemperatureRecord>,
}

impl Dataset {
    pub fn new(base_temperature: f64, records: Vec<TemperatureRecord>) -> HeatmapResult<Self> {
        if !base_temperature.is_finite() {
            return Err(HeatmapError::InvalidData(
                "base temperature must be finite".to_owned(),
            ));
        }
        if records.is_empty() {
            return Err(HeatmapError::DegenerateDataset(
                "dataset must contain at least one record".to_owned(),
            ));
        }

        let mut seen = HashSet::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if !(1..=12).contains(&record.month) {
                return Err(HeatmapError::MalformedRecord {
                    index,
                    reason: format!("month {} is outside 1..=12", record.month),
                });
            }
            if !record.variance.is_finite() {
                return Err(HeatmapError::MalformedRecord {
                    index,
                    reason: "variance must be finite".to_owned(),
                });
            }
            if !seen.insert(record.key()) {
                return Err(HeatmapError::MalformedRecord {
                    index,
                    reason: format!(
                        "duplicate record for year {} month {}",
                        record.year, record.month
                    ),
                });
            }
        }

        Ok(Self {
            base_temperature,
            records,
        })
    }

    pub fn from_document(document: DatasetDocument) -> HeatmapResult<Self> {
        Self::new(document.base_temperature, document.monthly_variance)
    }

    pub fn from_json_str(input: &str) -> HeatmapResult<Self> {
        let document: DatasetDocument = serde_json::from_str(input)
            .map_err(|e| HeatmapError::Load(format!("failed to parse dataset json: {e}")))?;
        Self::from_document(document)
    }

    #[must_use]
    pub fn base_temperature(&self) -> f64 {
        self.base_temperature
    }

    #[must_use]
    pub fn records(&self) -> &[TemperatureRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false` for a constructed dataset; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn absolute_temperature(&self, record: TemperatureRecord) -> f64 {
        self.base_temperature + record.variance
    }

    /// `(min, max)` of the record years.
    #[must_use]
    pub fn year_extent(&self) -> (i32, i32) {
        self.records
            .iter()
            .fold((i32::MAX, i32::MIN), |(min, max), record| {
                (min.min(record.year), max.max(record.year))
            })
    }

    /// `(min, max)` of the record variances.
    #[must_use]
    pub fn variance_extent(&self) -> (f64, f64) {
        self.records
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), record| {
                (min.min(record.variance), max.max(record.variance))
            })
    }

    #[must_use]
    pub fn first_record(&self) -> TemperatureRecord {
        self.records[0]
    }

    #[must_use]
    pub fn last_record(&self) -> TemperatureRecord {
        self.records[self.records.len() - 1]
    }
}

impl TryFrom<DatasetDocument> for Dataset {
    type Error = HeatmapError;

    fn try_from(document: DatasetDocument) -> HeatmapResult<Self> {
        Self::from_document(document)
    }
}
