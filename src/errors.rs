pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid integer '{0}'")]
    InvalidInteger(String),
    #[error("malformed rule: {0}")]
    MalformedRule(String),
    #[error("malformed parse table: {0}")]
    MalformedTable(String),
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("unexpected input character '{0}'")]
    UnexpectedChar(char),
}
