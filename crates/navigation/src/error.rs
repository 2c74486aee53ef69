#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    Config(String),
    UnknownSection(String),
}

impl std::fmt::Display for NavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavError::Config(msg) => write!(f, "invalid navigation config: {msg}"),
            NavError::UnknownSection(id) => write!(f, "unknown section: {id:?}"),
        }
    }
}

impl std::error::Error for NavError {}
