#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    InvalidInput(String),
}

impl Error {
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Error::InvalidInput(msg.into())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(fmt, "invalid input: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
