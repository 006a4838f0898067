pub mod color;
pub mod dataset;
pub mod document;
pub mod error;
pub mod waypoint;

pub use color::*;
pub use dataset::*;
pub use document::*;
pub use error::*;
pub use waypoint::*;
