use std::fmt;

#[derive(Debug)]
pub enum ViewError {
    /// Input or frame delivered to a view that is not mounted.
    NotMounted,
    AlreadyMounted,
    Config(serde_json::Error),
    InvalidConfig(&'static str),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::NotMounted => write!(f, "journey view is not mounted"),
            ViewError::AlreadyMounted => write!(f, "journey view is already mounted"),
            ViewError::Config(e) => write!(f, "invalid view config: {e}"),
            ViewError::InvalidConfig(msg) => write!(f, "invalid view config: {msg}"),
        }
    }
}

impl std::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ViewError {
    fn from(e: serde_json::Error) -> Self {
        ViewError::Config(e)
    }
}
