use thiserror::Error;

/// Errors that can abort a refresh run. None of these are recovered from;
/// every variant propagates to `main` and ends the process. The next
/// scheduled invocation is the retry mechanism.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport failure on the HEAD probe or the page GET.
    #[error("request to bank code page failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The HEAD response carried no `Last-Modified` header.
    #[error("response has no Last-Modified header")]
    MissingLastModified,

    /// A timestamp (remote header or local marker) was not an HTTP-date.
    #[error("malformed HTTP-date: {0}")]
    MalformedDate(#[from] chrono::ParseError),

    /// The cell pattern matched nothing — the page markup changed in a way
    /// the extractor does not understand.
    #[error("no table cells matched; page layout may have changed")]
    NoCells,

    /// No decoder exists for the configured charset label.
    #[error("unknown charset label: {0}")]
    UnknownCharset(String),

    /// Artifact (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Marker, template, or artifact file I/O failed.
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
