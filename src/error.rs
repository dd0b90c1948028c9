use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("could not parse score in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("score store is unavailable")]
    StoreUnavailable,

    #[error("render failed: {0}")]
    Render(String),

    #[error("failed to spawn frame thread")]
    ThreadSpawn(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
