/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("goal unreachable after settling {settled} nodes")]
    Unreachable { settled: usize },

    #[error("edge leads to a node outside the graph: {0}")]
    UnknownNode(String),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
