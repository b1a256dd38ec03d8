use thiserror::Error;

/// Result alias for `tier-louvain`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by graph construction, clustering, and the I/O adapters.
#[derive(Debug, Error)]
pub enum Error {
    /// Edge list or node table is malformed (id out of range, bad weight).
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// Total edge weight is zero, so modularity is undefined.
    #[error("degenerate graph: total edge weight is zero")]
    DegenerateGraph,

    /// The hierarchy driver was already run to completion.
    #[error("hierarchy driver already consumed")]
    AlreadyConsumed,

    /// A partition seed refers to nodes or communities that do not exist.
    #[error("invalid partition seed: {0}")]
    InvalidPartition(String),

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: String,
    },

    /// A line of a text input could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// File or stream failure in an importer or exporter.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed TOML configuration.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Statistics could not be serialized.
    #[cfg(feature = "io")]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
