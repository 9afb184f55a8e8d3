use polars::error::PolarsError;
use std::io::Error as IoError;

use crate::StatType;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] IoError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid selector {0}")]
    Selector(String),

    #[error("No game log table found")]
    MissingTable,

    #[error("Game log has no {0} column")]
    MissingColumn(&'static str),

    #[error("Player not available with current filters: {player} (choose from: {})", .available.join(", "))]
    UnknownPlayer {
        player: String,
        available: Vec<String>,
    },

    #[error("Prop line must be a non-negative number, got {0}")]
    InvalidPropLine(f64),

    #[error("No valid games with data found for {player} ({stat})")]
    NoData { player: String, stat: StatType },

    #[error("No data to save. Check for scraping errors or rate limiting")]
    NothingToSave,
}
