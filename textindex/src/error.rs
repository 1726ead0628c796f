/// Errors raised while building or querying a [`TextIndex`](crate::TextIndex).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A record lacks one of the mandatory `title` / `url` fields. A field that
    /// is present but empty or whitespace-only counts as missing.
    #[error("document at position {position} is missing `{field}`")]
    InvalidDocument { position: usize, field: &'static str },
    /// Two records share the same `url`.
    #[error("document at position {position} duplicates url {url}")]
    DuplicateDocument { position: usize, url: String },
    /// The query produced no tokens.
    #[error("empty query")]
    EmptyQuery,
    #[error("malformed search store: {0}")]
    Parse(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
