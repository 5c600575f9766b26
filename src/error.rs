use thiserror::Error;

/// Failures talking to the recipe API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {message}")]
    Network { endpoint: String, message: String },

    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("could not decode {endpoint} response: {message}")]
    Decode { endpoint: String, message: String },

    #[error("no recipe found for id {0}")]
    NotFound(String),
}

/// Failures of a whole listing load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{failed} of {total} recipe lookups failed")]
    Lookups { failed: usize, total: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown fan-out policy {0:?} (expected \"discard\" or \"partial\")")]
pub struct UnknownPolicy(pub String);
