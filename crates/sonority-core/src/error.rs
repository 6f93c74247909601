use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("no valid songs found in dataset for computing mean vector")]
    NoValidSeeds,

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
