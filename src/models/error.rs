#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("Invalid argument(s): {0}")]
    InvalidArgument(String),

    #[error("Missing required argument(s): {0}")]
    MissingArgument(String),

    #[error("Remote API error: {0}")]
    RemoteError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}
