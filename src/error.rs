//! Error types for plot mutations and for the relay/host layer.

use std::path::PathBuf;

/// Failure of a plot or grid mutation. Nothing is mutated when one of these is returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    #[error("series {index} is not a flat sequence of finite numbers: {reason}")]
    InvalidSeries { index: usize, reason: String },

    #[error("series {index} has {len} values but x has {expected}")]
    LengthMismatch {
        index: usize,
        len: usize,
        expected: usize,
    },

    #[error("a plot needs at least one series")]
    NoSeries,

    #[error("{labels} series labels given for {series} series")]
    LabelCount { labels: usize, series: usize },

    #[error(
        "push() requires a value for x and a value for each series, \
         or a single value if there is only one series (got {got} for {series} series)"
    )]
    ArgumentCount { got: usize, series: usize },

    #[error("too many plots ({plots}) for grid {grid:?}")]
    GridCapacity { plots: usize, grid: Vec<usize> },

    #[error("grid column count must be at least 1")]
    InvalidGrid,

    #[error("no plot at index {0}")]
    NoSuchPlot(usize),
}

/// Failure of the host API: plot errors plus everything around the relay server.
#[derive(thiserror::Error, Debug)]
pub enum PencilError {
    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error("failed to bind relay server at {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start relay runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("failed to open browser at {url}: {source}")]
    Browser {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to serialize snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
