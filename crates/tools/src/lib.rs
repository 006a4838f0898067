//! Offline helpers behind the `journey` binary: dataset checks, projector
//! calibration and a headless session driver.

pub mod error;
pub mod report;
pub mod simulate;

pub use error::*;
pub use report::*;
pub use simulate::*;

use std::path::Path;

use journey::{CoordinatePolicy, Journey};
use view::ViewConfig;

/// Reads a view config file, or returns the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<ViewConfig, ToolError> {
    let Some(path) = path else {
        return Ok(ViewConfig::default());
    };
    let payload = std::fs::read_to_string(path).map_err(|source| ToolError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ViewConfig::from_json_str(&payload)?)
}

/// Loads a journey document for one of the subcommands.
pub fn load_journey(path: &Path, policy: CoordinatePolicy) -> Result<Journey, ToolError> {
    Ok(Journey::load(path, policy)?)
}
