use thiserror::Error;

pub type HeatmapResult<T> = Result<T, HeatmapError>;

#[derive(Debug, Error)]
pub enum HeatmapError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error("degenerate dataset: {0}")]
    DegenerateDataset(String),

    #[error("malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("failed to load dataset: {0}")]
    Load(String),
}
