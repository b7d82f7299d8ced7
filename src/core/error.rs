use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Path does not exist: {0}")]
    NotFound(String),

    #[error("Path must be a directory: {0}")]
    NotADirectory(String),

    #[error("No index found for {0}. Scan the project first.")]
    NotIndexed(String),

    #[error("Ignore rules error: {0}")]
    IgnoreRules(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<ignore::Error> for Error {
    fn from(err: ignore::Error) -> Self {
        Error::IgnoreRules(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
