pub mod arcs;
pub mod globe;
pub mod layer;
pub mod markers;
pub mod narrative;
pub mod symbology;

pub use arcs::*;
pub use globe::*;
pub use layer::*;
pub use markers::*;
pub use narrative::*;
pub use symbology::*;
