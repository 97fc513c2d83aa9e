use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Resource id {0} is not valid, ids start at 1")]
    InvalidResourceId(u32),
    #[error("Resource {0} was not found")]
    NotFound(String),
    #[error("Unexpected status code {status_code} for {path}")]
    UnexpectedStatus { path: String, status_code: u16 },
    #[error(transparent)]
    Contract(#[from] apicontract::Error),
}
