pub mod autoplay;
pub mod config;
pub mod regions;
pub mod scroll;
pub mod source;
pub mod tracker;

pub use autoplay::*;
pub use config::*;
pub use regions::*;
pub use scroll::*;
pub use source::*;
pub use tracker::*;
