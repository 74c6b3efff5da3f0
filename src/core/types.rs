use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One monthly anomaly sample as it appears in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRecord {
    pub year: i32,
    /// Calendar month, 1-based.
    pub month: u8,
    /// Offset in °C from the dataset base temperature.
    pub variance: f64,
}

impl TemperatureRecord {
    #[must_use]
    pub fn new(year: i32, month: u8, variance: f64) -> Self {
        Self {
            year,
            month,
            variance,
        }
    }

    #[must_use]
    pub fn key(self) -> RecordKey {
        RecordKey::new(self.year, self.month)
    }

    /// Zero-based month slot used by the month band scale.
    #[must_use]
    pub fn month_index(self) -> usize {
        usize::from(self.month.saturating_sub(1))
    }
}

/// Identity of one record and of the grid mark drawn for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    pub year: i32,
    pub month: u8,
}

impl RecordKey {
    #[must_use]
    pub const fn new(year: i32, month: u8) -> Self {
        Self { year, month }
    }
}
