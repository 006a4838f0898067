use std::fmt;
use std::path::PathBuf;

use journey::JourneyError;
use view::ViewError;

#[derive(Debug)]
pub enum ToolError {
    Io { path: PathBuf, source: std::io::Error },
    Journey(JourneyError),
    View(ViewError),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ToolError::Journey(err) => write!(f, "{err}"),
            ToolError::View(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToolError::Io { source, .. } => Some(source),
            ToolError::Journey(err) => Some(err),
            ToolError::View(err) => Some(err),
        }
    }
}

impl From<JourneyError> for ToolError {
    fn from(err: JourneyError) -> Self {
        ToolError::Journey(err)
    }
}

impl From<ViewError> for ToolError {
    fn from(err: ViewError) -> Self {
        ToolError::View(err)
    }
}
