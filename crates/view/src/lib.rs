//! One journey-map session: the dataset, the step tracker that owns the
//! active step, the camera that chases it, and the layers drawn from it.

pub mod config;
pub mod error;
pub mod event;
pub mod host;
pub mod session;

pub use config::*;
pub use error::*;
pub use event::*;
pub use host::*;
pub use session::*;
